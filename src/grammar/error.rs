use std::fmt;

#[derive(Debug)]
pub enum GrammarError {
    /// The grammar document could not be decoded.
    InvalidDocument(serde_json::Error),
    /// A line of the textual rule notation is malformed.
    InvalidRule { line: usize, message: String },
    /// A rule with an alternative that has no symbols.
    EmptyAlternative { rule: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::InvalidDocument(e) => write!(f, "invalid grammar document: {}", e),
            GrammarError::InvalidRule { line, message } => {
                write!(f, "Line {}: {}", line, message)
            }
            GrammarError::EmptyAlternative { rule } => {
                write!(f, "Rule '{}' has an empty right-hand side", rule)
            }
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GrammarError::InvalidDocument(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GrammarError {
    fn from(e: serde_json::Error) -> Self {
        GrammarError::InvalidDocument(e)
    }
}
