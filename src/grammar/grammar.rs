use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub left_part: Vec<String>,
    pub right_parts: Vec<Vec<String>>,
}

impl Production {
    pub fn new<S: Into<String>>(left_part: Vec<S>, right_parts: Vec<Vec<S>>) -> Self {
        Self {
            left_part: left_part.into_iter().map(Into::into).collect(),
            right_parts: right_parts
                .into_iter()
                .map(|right| right.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// The left symbol of a single-non-terminal rule. Rules whose left part
    /// has any other length are not considered by the algorithms.
    pub fn left_symbol(&self) -> Option<&str> {
        match self.left_part.as_slice() {
            [left] => Some(left.as_str()),
            _ => None,
        }
    }

    pub fn key(&self) -> String {
        self.left_part.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grammar {
    pub terminals: Vec<String>,
    pub non_terminals: Vec<String>,
    pub productions: BTreeMap<String, Production>,
    pub start: String,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_terminal(&self, symbol: &str) -> bool {
        self.terminals.iter().any(|t| t == symbol)
    }

    pub fn is_non_terminal(&self, symbol: &str) -> bool {
        self.non_terminals.iter().any(|nt| nt == symbol)
    }

    pub fn add_terminal(&mut self, name: &str) {
        if !self.is_terminal(name) {
            self.terminals.push(name.to_string());
        }
    }

    pub fn add_non_terminal(&mut self, name: &str) {
        if !self.is_non_terminal(name) {
            self.non_terminals.push(name.to_string());
        }
    }

    /// Appends `right` as a new alternative of the rule keyed by `left`,
    /// creating the rule if needed.
    pub fn add_production(&mut self, left: &str, right: Vec<String>) {
        self.productions
            .entry(left.to_string())
            .or_insert_with(|| Production {
                left_part: vec![left.to_string()],
                right_parts: Vec::new(),
            })
            .right_parts
            .push(right);
    }

    pub fn production_iter(&self) -> impl Iterator<Item = &Production> {
        self.productions.values()
    }
}
