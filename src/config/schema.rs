//! Bomb file schema
//!
//! A bomb file is YAML:
//!
//! ```yaml
//! bomb_id: 17
//! secret_phrase: DrEvil
//! phases:
//!   - variant: exact_match
//!     phrase: I am just a renegade hockey mom.
//!   - variant: doubling
//!   - variant: jump_fall_through
//!     deltas: [100, -200, 300, -400, 500, -600, 700, -800]
//!   - variant: bisection_sum
//!     target: 35
//!   - variant: masked_walk
//!     table: [10, 2, 14, 7, 8, 12, 15, 11, 0, 4, 1, 13, 3, 9, 6, 5]
//!     steps: 6
//!   - variant: list_reorder
//!     values: [212, 705, 141, 997, 432, 300]
//! ```

use serde::{Deserialize, Serialize};

use crate::phase::{PhaseVariant, SecretPhase};

/// Passphrase used when a bomb file does not name one.
pub const DEFAULT_SECRET_PHRASE: &str = "DrEvil";

fn default_secret_phrase() -> String {
    DEFAULT_SECRET_PHRASE.to_string()
}

/// Complete description of one bomb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BombConfig {
    /// Identifier reported in result notifications.
    pub bomb_id: u32,

    /// Word that, trailing the phase 4 answer, unlocks the secret phase.
    #[serde(default = "default_secret_phrase")]
    pub secret_phrase: String,

    /// One variant per phase slot, slot 1 first.
    pub phases: Vec<PhaseVariant>,

    /// Secret phase tree; the built-in tree when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<SecretPhase>,
}

impl BombConfig {
    /// The secret phase this bomb runs once unlocked.
    #[must_use]
    pub fn secret_phase(&self) -> SecretPhase {
        self.secret.clone().unwrap_or_default()
    }

    /// Compact selection string, e.g. `"exact_match,doubling,…"`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.phases
            .iter()
            .map(|p| p.as_phase().name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
bomb_id: 17
phases:
  - variant: exact_match
    phrase: I am just a renegade hockey mom.
  - variant: doubling
  - variant: jump_fall_through
    deltas: [100, -200, 300, -400, 500, -600, 700, -800]
  - variant: bisection_sum
    target: 35
  - variant: masked_walk
    table: [10, 2, 14, 7, 8, 12, 15, 11, 0, 4, 1, 13, 3, 9, 6, 5]
    steps: 6
  - variant: list_reorder
    values: [212, 705, 141, 997, 432, 300]
";

    #[test]
    fn parses_sample_bomb() {
        let bomb: BombConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(bomb.bomb_id, 17);
        assert_eq!(bomb.secret_phrase, DEFAULT_SECRET_PHRASE);
        assert_eq!(bomb.phases.len(), 6);
        assert_eq!(bomb.secret_phase(), SecretPhase::default());
        assert_eq!(
            bomb.describe(),
            "exact_match,doubling,jump_fall_through,bisection_sum,masked_walk,list_reorder"
        );
    }

    #[test]
    fn yaml_round_trip_preserves_bomb() {
        let bomb: BombConfig = serde_yaml::from_str(SAMPLE).unwrap();
        let text = serde_yaml::to_string(&bomb).unwrap();
        let again: BombConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(bomb, again);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = format!("{SAMPLE}extra: 1\n");
        assert!(serde_yaml::from_str::<BombConfig>(&text).is_err());
    }
}
