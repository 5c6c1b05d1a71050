//! Exact-match phase: the line must be a fixed phrase.

use serde::{Deserialize, Serialize};

use crate::error::{Explosion, SolveError};
use crate::parse::spells;

use super::{Phase, PhaseResult};

/// Phrase the input must reproduce character for character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactMatch {
    /// The hidden phrase.
    pub phrase: String,
}

impl Phase for ExactMatch {
    fn name(&self) -> &'static str {
        "exact_match"
    }

    fn check(&self, line: &str) -> PhaseResult {
        if line.chars().count() != self.phrase.len() {
            return Err(Explosion::rule("length differs from the phrase"));
        }
        if !spells(line, &self.phrase) {
            return Err(Explosion::rule("text differs from the phrase"));
        }
        Ok(())
    }

    fn solve(&self) -> Result<String, SolveError> {
        Ok(self.phrase.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::decode_line;

    fn phase() -> ExactMatch {
        ExactMatch {
            phrase: "Public speaking is very easy.".to_string(),
        }
    }

    #[test]
    fn accepts_identical_text() {
        assert!(phase().check("Public speaking is very easy.").is_ok());
    }

    #[test]
    fn rejects_prefix_and_case_changes() {
        assert!(phase().check("Public speaking is very easy").is_err());
        assert!(phase().check("public speaking is very easy.").is_err());
        assert!(phase().check("Public speaking is very easy. ").is_err());
        assert!(phase().check("").is_err());
    }

    #[test]
    fn compares_input_bytes() {
        let phase = ExactMatch {
            phrase: "café".to_string(),
        };
        assert!(phase.check(&decode_line("café".as_bytes())).is_ok());
        assert!(phase.check("café").is_err());
    }

    #[test]
    fn solution_is_the_phrase() {
        assert_eq!(phase().solve().unwrap(), "Public speaking is very easy.");
    }
}
