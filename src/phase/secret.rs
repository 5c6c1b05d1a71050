//! The secret phase.
//!
//! A fifteen-node binary search tree is stored in level order (children of
//! slot `i` live at `2i + 1` and `2i + 2`). The user enters a number; the
//! search for it through the tree yields a path code that must equal the
//! hidden target.

use serde::{Deserialize, Serialize};

use crate::error::{Explosion, SolveError};
use crate::parse::leading_int;

use super::{Phase, PhaseResult};

/// Nodes in the secret tree.
pub const TREE_NODES: usize = 15;

/// Smallest answer the secret phase accepts.
pub const MIN_ANSWER: i64 = 1;
/// Largest answer the secret phase accepts.
pub const MAX_ANSWER: i64 = 1001;

/// Secret phase tree and target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretPhase {
    /// Node values in level order.
    pub values: [i32; TREE_NODES],
    /// Path code the answer must produce.
    pub target: i32,
}

impl Default for SecretPhase {
    fn default() -> Self {
        Self {
            values: [36, 8, 50, 6, 22, 45, 107, 1, 7, 20, 35, 40, 47, 99, 1001],
            target: 6,
        }
    }
}

impl SecretPhase {
    /// Path code for `n`: `-1` off the tree, `0` on a match, doubled on
    /// every left turn and doubled plus one on every right turn.
    #[must_use]
    pub fn path_code(&self, n: i64) -> i64 {
        self.code_from(Some(0), n)
    }

    fn code_from(&self, slot: Option<usize>, n: i64) -> i64 {
        let Some(slot) = slot.filter(|&s| s < TREE_NODES) else {
            return -1;
        };
        let value = i64::from(self.values[slot]);
        if n < value {
            2 * self.code_from(child(slot, 1), n)
        } else if n == value {
            0
        } else {
            2 * self.code_from(child(slot, 2), n) + 1
        }
    }

    /// Whether every node respects the search-tree ordering.
    #[must_use]
    pub fn is_search_tree(&self) -> bool {
        self.bounded(0, i64::MIN, i64::MAX)
    }

    fn bounded(&self, slot: usize, low: i64, high: i64) -> bool {
        if slot >= TREE_NODES {
            return true;
        }
        let value = i64::from(self.values[slot]);
        value > low
            && value < high
            && self.bounded(2 * slot + 1, low, value)
            && self.bounded(2 * slot + 2, value, high)
    }
}

fn child(slot: usize, side: usize) -> Option<usize> {
    Some(2 * slot + side).filter(|&c| c < TREE_NODES)
}

impl Phase for SecretPhase {
    fn name(&self) -> &'static str {
        "secret"
    }

    fn check(&self, line: &str) -> PhaseResult {
        let n = leading_int(line);
        if !(MIN_ANSWER..=MAX_ANSWER).contains(&n) {
            return Err(Explosion::rule(format!("{n} out of range")));
        }
        if self.path_code(n) != i64::from(self.target) {
            return Err(Explosion::rule("path code mismatch"));
        }
        Ok(())
    }

    fn solve(&self) -> Result<String, SolveError> {
        self.values
            .iter()
            .map(|&v| i64::from(v))
            .filter(|v| (MIN_ANSWER..=MAX_ANSWER).contains(v))
            .find(|&v| self.path_code(v) == i64::from(self.target))
            .map(|v| v.to_string())
            .ok_or_else(|| SolveError::NoWitness {
                phase: self.name(),
                detail: format!("no node produces path code {}", self.target),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tree_is_a_search_tree() {
        assert!(SecretPhase::default().is_search_tree());
    }

    #[test]
    fn path_codes_follow_turns() {
        let tree = SecretPhase::default();
        assert_eq!(tree.path_code(36), 0);
        assert_eq!(tree.path_code(50), 1);
        assert_eq!(tree.path_code(22), 2);
        assert_eq!(tree.path_code(7), 4);
        assert_eq!(tree.path_code(35), 6);
        assert_eq!(tree.path_code(1001), 7);
        assert_eq!(tree.path_code(2), -8);
    }

    #[test]
    fn accepts_matching_answer_only() {
        let tree = SecretPhase::default();
        assert!(tree.check("35").is_ok());
        assert!(tree.check("  35 trailing").is_ok());
        assert!(tree.check("36").is_err());
        assert!(tree.check("0").is_err());
        assert!(tree.check("1002").is_err());
        assert!(tree.check("nonsense").is_err());
    }

    #[test]
    fn solver_finds_the_node() {
        let tree = SecretPhase::default();
        assert_eq!(tree.solve().unwrap(), "35");
        let tree = SecretPhase { target: 9, ..tree };
        assert!(tree.solve().is_err());
    }

    #[test]
    fn detects_broken_ordering() {
        let mut tree = SecretPhase::default();
        tree.values.swap(3, 4);
        assert!(!tree.is_search_tree());
    }
}
