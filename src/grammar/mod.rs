pub mod eliminate_left_recursion;
pub mod error;
pub mod grammar;
pub mod nullable;
pub mod parse;
pub mod pretty_print;
pub mod production;
pub use error::GrammarError;
pub use grammar::{Grammar, Production};

pub const EPSILON: &str = "#";
pub const PRIME: char = '\'';
