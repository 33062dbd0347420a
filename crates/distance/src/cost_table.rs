//! Declarative substitution costs.
//!
//! A [`CostTable`] lists per-pair costs and converts into a
//! [`SubstitutionCost`], so custom costs can come from a configuration file
//! instead of code.

use crate::policy::SubstitutionCost;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cost of replacing `from` with `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRule {
    /// Character from the first sequence
    pub from: char,
    /// Character from the second sequence
    pub to: char,
    /// Substitution cost
    pub cost: usize,
}

/// Table of substitution costs with a fallback for unlisted pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTable {
    /// Cost for pairs without a rule
    #[serde(default = "default_cost")]
    pub default: usize,

    /// Apply every rule in both directions
    #[serde(default)]
    pub symmetric: bool,

    /// Per-pair costs; later rules win
    #[serde(default)]
    pub rules: Vec<CostRule>,
}

fn default_cost() -> usize {
    1
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            default: default_cost(),
            symmetric: false,
            rules: Vec::new(),
        }
    }
}

impl CostTable {
    /// Empty table with the given fallback cost.
    pub fn new(default: usize) -> Self {
        Self {
            default,
            ..Self::default()
        }
    }

    /// Add a rule.
    pub fn with_rule(mut self, from: char, to: char, cost: usize) -> Self {
        self.rules.push(CostRule { from, to, cost });
        self
    }

    /// Apply rules in both directions.
    pub fn symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    /// Returns true if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn index(&self) -> HashMap<(char, char), usize> {
        let mut index = HashMap::with_capacity(self.rules.len() * 2);
        if self.symmetric {
            for rule in &self.rules {
                index.insert((rule.to, rule.from), rule.cost);
            }
        }
        for rule in &self.rules {
            index.insert((rule.from, rule.to), rule.cost);
        }
        index
    }

    /// Cost of replacing `a` with `b`.
    ///
    /// Scans the rules on every call. Convert the table into a
    /// [`SubstitutionCost`] for per-cell lookups.
    pub fn lookup(&self, a: char, b: char) -> usize {
        let explicit = self.rules.iter().rev().find(|r| (r.from, r.to) == (a, b));
        let mirrored = || {
            self.rules
                .iter()
                .rev()
                .find(|r| self.symmetric && (r.to, r.from) == (a, b))
        };
        explicit.or_else(mirrored).map_or(self.default, |r| r.cost)
    }
}

impl From<CostTable> for SubstitutionCost {
    fn from(table: CostTable) -> Self {
        let index = table.index();
        let default = table.default;
        SubstitutionCost::new(move |a, b| index.get(&(a, b)).copied().unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_falls_back_to_default() {
        let table = CostTable::new(2).with_rule('b', '8', 0);
        assert_eq!(table.lookup('b', '8'), 0);
        assert_eq!(table.lookup('8', 'b'), 2);
        assert_eq!(table.lookup('x', 'y'), 2);
    }

    #[test]
    fn test_symmetric_rules() {
        let table = CostTable::default().with_rule('0', 'o', 0).symmetric(true);
        assert_eq!(table.lookup('o', '0'), 0);
    }

    #[test]
    fn test_explicit_rule_beats_mirrored_rule() {
        let table = CostTable::default()
            .with_rule('a', 'b', 3)
            .with_rule('b', 'a', 2)
            .symmetric(true);
        assert_eq!(table.lookup('a', 'b'), 3);
        assert_eq!(table.lookup('b', 'a'), 2);
    }

    #[test]
    fn test_into_substitution_cost() {
        let cost: SubstitutionCost = CostTable::default().with_rule('l', '1', 0).into();
        assert_eq!(cost.cost('l', '1').unwrap(), 0);
        assert_eq!(cost.cost('l', '2').unwrap(), 1);
    }

    #[test]
    fn test_lookup_agrees_with_indexed_cost() {
        let table = CostTable::new(4)
            .with_rule('a', 'b', 0)
            .with_rule('b', 'c', 2)
            .with_rule('a', 'b', 1)
            .with_rule('c', 'a', 3)
            .symmetric(true);
        let cost: SubstitutionCost = table.clone().into();

        for a in ['a', 'b', 'c', 'd'] {
            for b in ['a', 'b', 'c', 'd'] {
                assert_eq!(table.lookup(a, b), cost.cost(a, b).unwrap(), "{a} -> {b}");
            }
        }
        assert_eq!(table.lookup('a', 'b'), 1);
        assert_eq!(table.lookup('b', 'a'), 1);
        assert_eq!(table.lookup('a', 'c'), 3);
    }

    #[test]
    fn test_parse_from_toml() {
        let table: CostTable = toml::from_str(
            r#"
            symmetric = true
            rules = [{ from = "b", to = "8", cost = 0 }]
            "#,
        )
        .unwrap();
        assert_eq!(table.default, 1);
        assert!(table.symmetric);
        assert_eq!(table.lookup('8', 'b'), 0);
    }
}
