use std::borrow::Cow;

use crowbook_text_processing::escape;
use serde::Serialize;

use super::{Grammar, EPSILON};

fn symbol_to_latex(s: &str) -> Cow<'_, str> {
    if s == EPSILON {
        Cow::Borrowed("\\epsilon")
    } else {
        escape::tex(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize, multiline: bool) -> String {
        if self.rights.is_empty() {
            return format!("{:>width$} ->", self.left, width = left_width);
        }
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else if multiline {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                } else {
                    format!(" | {}", right)
                }
            })
            .collect::<Vec<_>>()
            .join(if multiline { "\n" } else { "" })
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| symbol_to_latex(s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        left + &right
    }
}

#[derive(Debug, Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.len())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len, true))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex(true)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Grammar {
    /// Rules in key order, the start rule first.
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let start = self.productions.get_key_value(self.start.as_str());
        let productions = start
            .into_iter()
            .chain(
                self.productions
                    .iter()
                    .filter(|(key, _)| key.as_str() != self.start),
            )
            .map(|(key, production)| ProductionOutput {
                left: key.as_str(),
                rights: production
                    .right_parts
                    .iter()
                    .map(|right| right.iter().map(String::as_str).collect())
                    .collect(),
            })
            .collect();
        ProductionOutputVec { productions }
    }
}

#[derive(Debug, Serialize)]
pub struct EpsilonOutput {
    epsilon_non_terminals: Vec<String>,
}

impl EpsilonOutput {
    pub fn to_plaintext(&self) -> String {
        format!("{{{}}}", self.epsilon_non_terminals.join(", "))
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .epsilon_non_terminals
            .iter()
            .map(|s| escape::tex(s.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("\\[\\{{{}\\}}\\]", content)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Grammar {
    pub fn to_epsilon_output(&self) -> EpsilonOutput {
        let mut epsilon_non_terminals = self.epsilon_non_terminals();
        epsilon_non_terminals.sort();
        EpsilonOutput {
            epsilon_non_terminals,
        }
    }
}
