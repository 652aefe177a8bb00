use super::{grammar::Production, EPSILON};

impl Production {
    /// True for a single-non-terminal rule with an alternative that is exactly
    /// the epsilon marker.
    pub fn is_epsilon(&self) -> bool {
        self.left_symbol().is_some()
            && self
                .right_parts
                .iter()
                .any(|right| matches!(right.as_slice(), [s] if s == EPSILON))
    }

    /// True for a single-non-terminal rule with an alternative starting with
    /// its own left symbol.
    pub fn has_left_recursion(&self) -> bool {
        match self.left_symbol() {
            Some(left) => self
                .right_parts
                .iter()
                .any(|right| right.first().map(String::as_str) == Some(left)),
            None => false,
        }
    }
}
