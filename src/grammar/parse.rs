use super::{error::GrammarError, Grammar, EPSILON};

impl Grammar {
    /// Reads a grammar document:
    ///
    /// ```json
    /// {
    ///   "terminals": ["d"],
    ///   "non_terminals": ["S", "D"],
    ///   "productions": {"S": {"left_part": ["S"], "right_parts": [["D", "S"], ["#"]]}},
    ///   "start": "S"
    /// }
    /// ```
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let g: Grammar = serde_json::from_str(grammar)?;
        g.validate()?;
        Ok(g)
    }

    /// Reads rules written as `S -> A B | D S`, one left side per line.
    /// A line starting with `|` continues the previous rule. Left sides are
    /// non-terminals, the first one is the start symbol, and every other
    /// symbol except the epsilon marker is a terminal.
    pub fn parse_rules(grammar: &str) -> Result<Self, GrammarError> {
        let mut g = Self::new();

        let mut raw_productions: Vec<(&str, &str)> = Vec::new();

        let mut previous_left: Option<&str> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let invalid = |message: &str| GrammarError::InvalidRule {
                line: i + 1,
                message: message.to_string(),
            };

            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(invalid("too many \"->\""));
            }
            let (left, rights) = if parts.len() == 2 {
                let left = parts[0].trim();
                if left.is_empty() {
                    return Err(invalid("empty left side"));
                } else if left.split_whitespace().count() != 1 {
                    return Err(invalid("left side contains whitespace"));
                }
                g.add_non_terminal(left);
                (left, parts[1].trim())
            } else {
                let rest = parts[0].trim();
                match (previous_left, rest.strip_prefix('|')) {
                    (Some(left), Some(rights)) => (left, rights.trim()),
                    _ => return Err(invalid("cannot find left side")),
                }
            };

            previous_left = Some(left);
            raw_productions.push((left, rights));
        }

        for (left, rights) in raw_productions {
            for right in rights.split('|') {
                let symbols: Vec<String> =
                    right.split_whitespace().map(|s| s.to_string()).collect();
                g.add_production(left, symbols);
            }
        }

        let symbols: Vec<String> = g
            .productions
            .values()
            .flat_map(|p| p.right_parts.iter().flatten())
            .filter(|s| s.as_str() != EPSILON && !g.is_non_terminal(s))
            .cloned()
            .collect();
        for s in symbols {
            g.add_terminal(&s);
        }

        if let Some(start) = g.non_terminals.first() {
            g.start = start.clone();
        }

        g.validate()?;
        Ok(g)
    }

    pub fn to_json(&self) -> String {
        // a grammar is plain strings and maps, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// A rule may have no alternatives (it derives nothing, as left behind by
    /// eliminating `A -> A a`), but every alternative needs a symbol.
    fn validate(&self) -> Result<(), GrammarError> {
        for (key, production) in &self.productions {
            if production.right_parts.iter().any(|right| right.is_empty()) {
                return Err(GrammarError::EmptyAlternative { rule: key.clone() });
            }
        }
        Ok(())
    }
}
