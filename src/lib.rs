extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{Grammar, GrammarError, Production};

fn error_to_json(e: GrammarError) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn epsilon_non_terminals_to_json(grammar: &str) -> String {
    match crate::Grammar::parse(grammar) {
        Ok(g) => g.to_epsilon_output().to_json(),
        Err(e) => error_to_json(e),
    }
}

#[wasm_bindgen]
pub fn eliminate_left_recursion_to_json(grammar: &str) -> String {
    match crate::Grammar::parse(grammar) {
        Ok(g) => g.eliminate_left_recursion().to_json(),
        Err(e) => error_to_json(e),
    }
}
