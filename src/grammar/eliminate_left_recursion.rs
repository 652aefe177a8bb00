use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::{
    grammar::{Grammar, Production},
    EPSILON, PRIME,
};

impl Production {
    /// Removes immediate left recursion.
    ///
    /// `A -> A a | b` becomes `A -> b A' | b` and `A' -> a A' | a`. Every
    /// alternative is emitted twice: once followed by the fresh symbol and
    /// once unchanged, in that order. A rule without left recursion comes
    /// back unchanged under its joined left part.
    pub fn eliminate_left_recursion(&self) -> BTreeMap<String, Production> {
        let left = match self.left_symbol() {
            Some(left) if self.has_left_recursion() => left,
            _ => return BTreeMap::from([(self.key(), self.clone())]),
        };
        let left_prime = format!("{}{}", left, PRIME);

        let (recursive, non_recursive): (Vec<&Vec<String>>, Vec<&Vec<String>>) = self
            .right_parts
            .iter()
            .partition(|right| right.first().map(String::as_str) == Some(left));

        let mut non_recursive_rights: Vec<Vec<String>> = Vec::new();
        for right in non_recursive {
            non_recursive_rights.push(with_suffix(right, &left_prime));
            non_recursive_rights.push(right.clone());
        }

        let mut recursive_rights: Vec<Vec<String>> = Vec::new();
        for right in recursive {
            let rest = &right[1..];
            recursive_rights.push(with_suffix(rest, &left_prime));
            if rest.is_empty() {
                // `A -> A` leaves nothing behind
                recursive_rights.push(vec![EPSILON.to_string()]);
            } else {
                recursive_rights.push(rest.to_vec());
            }
        }

        trace!(
            "{} -> {:?}, {} -> {:?}",
            left,
            non_recursive_rights,
            left_prime,
            recursive_rights
        );

        BTreeMap::from([
            (
                left.to_string(),
                Production {
                    left_part: vec![left.to_string()],
                    right_parts: non_recursive_rights,
                },
            ),
            (
                left_prime.clone(),
                Production {
                    left_part: vec![left_prime],
                    right_parts: recursive_rights,
                },
            ),
        ])
    }
}

fn with_suffix(right: &[String], suffix: &str) -> Vec<String> {
    right
        .iter()
        .cloned()
        .chain(std::iter::once(suffix.to_string()))
        .collect()
}

impl Grammar {
    /// Returns a copy of the grammar with immediate left recursion removed.
    ///
    /// Rules sharing a left symbol are rewritten together, their alternatives
    /// taken in key order, so `X: A -> A b` also sees `A: A -> z`. The
    /// rewritten rule for `L` is stored under the first key of its group and
    /// the rule for `L'` under `L'`. Fresh symbols are declared as
    /// non-terminals.
    pub fn eliminate_left_recursion(&self) -> Grammar {
        let mut g = Grammar {
            terminals: self.terminals.clone(),
            non_terminals: self.non_terminals.clone(),
            productions: BTreeMap::new(),
            start: self.start.clone(),
        };

        let mut groups: BTreeMap<&str, Vec<&String>> = BTreeMap::new();
        for (key, production) in &self.productions {
            match production.left_symbol() {
                Some(left) => groups.entry(left).or_default().push(key),
                None => g.merge_production(key.clone(), production.clone()),
            }
        }

        for (left, keys) in groups {
            let merged = Production {
                left_part: vec![left.to_string()],
                right_parts: keys
                    .iter()
                    .flat_map(|key| self.productions[key.as_str()].right_parts.iter().cloned())
                    .collect(),
            };
            if !merged.has_left_recursion() {
                for key in keys {
                    g.merge_production(key.clone(), self.productions[key.as_str()].clone());
                }
                continue;
            }

            debug!("eliminating left recursion from '{}' ({:?})", left, keys);
            for (new_key, new_production) in merged.eliminate_left_recursion() {
                if let Some(symbol) = new_production.left_symbol() {
                    g.add_non_terminal(symbol);
                }
                let key = if new_key == left {
                    keys[0].clone()
                } else {
                    new_key
                };
                g.merge_production(key, new_production);
            }
        }

        g
    }

    /// Inserts `production` under `key`, appending its alternatives when the
    /// key is already taken.
    fn merge_production(&mut self, key: String, production: Production) {
        match self.productions.get_mut(&key) {
            Some(existing) => existing.right_parts.extend(production.right_parts),
            None => {
                self.productions.insert(key, production);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rights(v: Vec<Vec<&str>>) -> Vec<Vec<String>> {
        v.into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn eliminate_simple() {
        let p = Production::new(
            vec!["A"],
            vec![vec!["A", "b"], vec!["A", "c"], vec!["B"], vec!["C"]],
        );
        let r = p.eliminate_left_recursion();

        assert_eq!(r.len(), 2);
        assert_eq!(r["A"].left_part, vec!["A"]);
        assert_eq!(
            r["A"].right_parts,
            rights(vec![vec!["B", "A'"], vec!["B"], vec!["C", "A'"], vec!["C"]])
        );
        assert_eq!(r["A'"].left_part, vec!["A'"]);
        assert_eq!(
            r["A'"].right_parts,
            rights(vec![vec!["b", "A'"], vec!["b"], vec!["c", "A'"], vec!["c"]])
        );
    }

    #[test]
    fn non_recursive_rule_is_returned_unchanged() {
        let p = Production::new(vec!["A"], vec![vec!["b", "A"], vec!["c"]]);
        let r = p.eliminate_left_recursion();

        assert_eq!(r.len(), 1);
        assert_eq!(r["A"], p);
    }

    #[test]
    fn multi_symbol_left_part_keyed_by_joined_symbols() {
        let p = Production::new(vec!["A", "B"], vec![vec!["A", "b"]]);
        let r = p.eliminate_left_recursion();

        assert_eq!(r.len(), 1);
        assert_eq!(r["A B"], p);
    }

    #[test]
    fn rewrite_is_idempotent_on_its_output() {
        let p = Production::new(
            vec!["E"],
            vec![vec!["E", "+", "T"], vec!["T"], vec!["E", "-", "T"]],
        );
        for (key, rule) in p.eliminate_left_recursion() {
            let again = rule.eliminate_left_recursion();
            assert_eq!(again.len(), 1);
            assert_eq!(again[&key], rule);
        }
    }

    #[test]
    fn alternative_order_is_preserved() {
        let p = Production::new(
            vec!["E"],
            vec![vec!["x"], vec!["E", "+", "T"], vec!["y"], vec!["E", "-", "T"]],
        );
        let r = p.eliminate_left_recursion();

        assert_eq!(
            r["E"].right_parts,
            rights(vec![vec!["x", "E'"], vec!["x"], vec!["y", "E'"], vec!["y"]])
        );
        assert_eq!(
            r["E'"].right_parts,
            rights(vec![
                vec!["+", "T", "E'"],
                vec!["+", "T"],
                vec!["-", "T", "E'"],
                vec!["-", "T"],
            ])
        );
    }

    #[test]
    fn bare_recursive_alternative_becomes_epsilon() {
        let p = Production::new(vec!["A"], vec![vec!["A"], vec!["a"]]);
        let r = p.eliminate_left_recursion();

        assert_eq!(r["A"].right_parts, rights(vec![vec!["a", "A'"], vec!["a"]]));
        assert_eq!(r["A'"].right_parts, rights(vec![vec!["A'"], vec![EPSILON]]));
        assert!(r["A'"].is_epsilon());
    }

    #[test]
    fn only_recursive_alternatives() {
        let p = Production::new(vec!["A"], vec![vec!["A", "a"]]);
        let r = p.eliminate_left_recursion();

        assert!(r["A"].right_parts.is_empty());
        assert_eq!(r["A'"].right_parts, rights(vec![vec!["a", "A'"], vec!["a"]]));
    }

    #[test]
    fn eliminate_whole_grammar() {
        let mut g = Grammar::new();
        g.terminals = vec!["+".to_string(), "n".to_string()];
        g.non_terminals = vec!["E".to_string(), "T".to_string()];
        g.start = "E".to_string();
        g.add_production("E", vec!["E".to_string(), "+".to_string(), "T".to_string()]);
        g.add_production("E", vec!["T".to_string()]);
        g.add_production("T", vec!["n".to_string()]);

        let r = g.eliminate_left_recursion();

        assert_eq!(r.non_terminals, vec!["E", "T", "E'"]);
        assert_eq!(r.start, "E");
        assert_eq!(r.productions.len(), 3);
        assert_eq!(r.productions["T"], g.productions["T"]);
        assert_eq!(
            r.productions["E"].right_parts,
            rights(vec![vec!["T", "E'"], vec!["T"]])
        );
        assert_eq!(
            r.productions["E'"].right_parts,
            rights(vec![vec!["+", "T", "E'"], vec!["+", "T"]])
        );
        assert!(r.production_iter().all(|p| !p.has_left_recursion()));

        // the receiver is untouched
        assert_eq!(g.productions.len(), 2);
    }

    #[test]
    fn eliminate_keeps_key_different_from_left_part() {
        let mut g = Grammar::new();
        g.non_terminals = vec!["A".to_string()];
        g.productions.insert(
            "X".to_string(),
            Production::new(vec!["A"], vec![vec!["A", "b"], vec!["c"]]),
        );

        let r = g.eliminate_left_recursion();

        assert_eq!(r.productions.keys().collect::<Vec<_>>(), vec!["A'", "X"]);
        assert_eq!(r.productions["X"].left_part, vec!["A"]);
        assert_eq!(
            r.productions["X"].right_parts,
            rights(vec![vec!["c", "A'"], vec!["c"]])
        );
        assert_eq!(
            r.productions["A'"].right_parts,
            rights(vec![vec!["b", "A'"], vec!["b"]])
        );
    }

    #[test]
    fn eliminate_merges_rules_sharing_a_left_symbol() {
        let mut g = Grammar::new();
        g.non_terminals = vec!["A".to_string()];
        g.productions.insert(
            "A".to_string(),
            Production::new(vec!["A"], vec![vec!["z"]]),
        );
        g.productions.insert(
            "X".to_string(),
            Production::new(vec!["A"], vec![vec!["A", "b"], vec!["c"]]),
        );

        let r = g.eliminate_left_recursion();

        assert_eq!(r.productions.keys().collect::<Vec<_>>(), vec!["A", "A'"]);
        assert_eq!(
            r.productions["A"].right_parts,
            rights(vec![vec!["z", "A'"], vec!["z"], vec!["c", "A'"], vec!["c"]])
        );
        assert_eq!(
            r.productions["A'"].right_parts,
            rights(vec![vec!["b", "A'"], vec!["b"]])
        );
    }

    #[test]
    fn eliminate_keeps_unrelated_rules_with_shared_left_symbol() {
        let mut g = Grammar::new();
        g.productions.insert(
            "A".to_string(),
            Production::new(vec!["A"], vec![vec!["z"]]),
        );
        g.productions.insert(
            "X".to_string(),
            Production::new(vec!["A"], vec![vec!["y"]]),
        );
        g.productions.insert(
            "P Q".to_string(),
            Production::new(vec!["P", "Q"], vec![vec!["P", "q"]]),
        );

        assert_eq!(g.eliminate_left_recursion(), g);
    }
}
