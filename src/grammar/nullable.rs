use std::collections::HashSet;

use tracing::{debug, trace};

use super::grammar::{Grammar, Production};

impl Grammar {
    /// Non-terminals that derive the empty string, in discovery order.
    pub fn epsilon_non_terminals(&self) -> Vec<String> {
        self.epsilon_fixpoint().0
    }

    /// The nullable set together with the number of extension rounds it
    /// took, the last one adding nothing.
    pub(crate) fn epsilon_fixpoint(&self) -> (Vec<String>, usize) {
        let seed = self.epsilon_productions();
        let mut nullable = self.seed_epsilon_non_terminals(&seed);
        debug!("epsilon seed: {:?}", nullable);

        let mut rounds = 0;
        loop {
            rounds += 1;
            let before = nullable.len();
            self.extend_epsilon_non_terminals(&mut nullable);
            trace!("round {}: {:?}", rounds, nullable);
            if nullable.len() == before {
                break;
            }
        }

        (nullable, rounds)
    }

    /// Rules with an alternative that is exactly the epsilon marker.
    pub fn epsilon_productions(&self) -> Vec<&Production> {
        self.production_iter().filter(|p| p.is_epsilon()).collect()
    }

    fn seed_epsilon_non_terminals(&self, productions: &[&Production]) -> Vec<String> {
        let mut nullable: Vec<String> = Vec::new();
        for p in productions {
            for s in &p.left_part {
                if self.is_non_terminal(s) && !nullable.contains(s) {
                    nullable.push(s.clone());
                }
            }
        }
        nullable
    }

    /// One extension step: adds the left symbol of every rule that has an
    /// alternative made only of symbols already known to be nullable. The
    /// epsilon marker itself is not one of them.
    fn extend_epsilon_non_terminals(&self, nullable: &mut Vec<String>) {
        let known: HashSet<&str> = nullable.iter().map(String::as_str).collect();

        let mut extension: Vec<String> = Vec::new();
        for p in self.production_iter() {
            let left = match p.left_symbol() {
                Some(left) => left,
                None => continue,
            };
            if known.contains(left) || extension.iter().any(|s| s == left) {
                continue;
            }
            if p
                .right_parts
                .iter()
                .any(|right| right.iter().all(|s| known.contains(s.as_str())))
            {
                extension.push(left.to_string());
            }
        }

        nullable.extend(extension);
    }
}
