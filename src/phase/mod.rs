//! Phase validators and their solution generators
//!
//! Every phase slot of a bomb holds exactly one variant from a closed
//! catalog. A variant knows how to check a raw input line and how to
//! derive, on its own, a line that it would accept.
//!
//! # Architecture
//!
//! - [`Phase`]: check/solve contract shared by every variant
//! - [`PhaseVariant`]: the tagged catalog, chosen once per slot when a bomb loads
//! - [`secret`]: the bonus phase unlocked after all six slots pass

pub mod bisection;
pub mod exact;
pub mod indirect;
pub mod jump_table;
pub mod linked_list;
pub mod secret;
pub mod sequence;

use serde::{Deserialize, Serialize};

use crate::error::{Explosion, SolveError};

pub use bisection::{BisectionPath, BisectionSum, Recurrence};
pub use exact::ExactMatch;
pub use indirect::{DigitSum, LetterCipher, MaskedWalk};
pub use jump_table::{JumpDirect, JumpFallThrough, JumpLetter};
pub use linked_list::ListReorder;
pub use secret::SecretPhase;
pub use sequence::Progression;

/// Number of ordinary phases in every bomb.
pub const PHASE_COUNT: usize = 6;

/// Outcome of checking one line: `Ok` accepts, `Err` detonates.
pub type PhaseResult = Result<(), Explosion>;

/// Check/solve contract implemented by every variant.
pub trait Phase {
    /// Stable variant name, as written in bomb files.
    fn name(&self) -> &'static str;

    /// Checks one raw input line against the variant's hidden rule.
    ///
    /// `line` holds one `char` per input byte, as produced by
    /// [`crate::parse::decode_line`].
    ///
    /// # Errors
    ///
    /// Returns the [`Explosion`] describing the first violation found.
    fn check(&self, line: &str) -> PhaseResult;

    /// Computes an input line this variant accepts.
    ///
    /// Implementations never call [`Phase::check`].
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] only when the static tables admit no answer,
    /// which validation rules out for loaded bombs.
    fn solve(&self) -> Result<String, SolveError>;
}

/// The variant occupying one phase slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum PhaseVariant {
    /// Slot 1: the line must equal a fixed phrase.
    ExactMatch(ExactMatch),
    /// Slot 2: `x[i] = x[i-1] + i`.
    Incremental,
    /// Slot 2: `x[0] = 1`, `x[i] = 2 * x[i-1]`.
    Doubling,
    /// Slot 3: per-case constant.
    JumpDirect(JumpDirect),
    /// Slot 3: running sum through falling cases.
    JumpFallThrough(JumpFallThrough),
    /// Slot 3: per-case constant and letter.
    JumpLetter(JumpLetter),
    /// Slot 4: sum of bisection midpoints.
    BisectionSum(BisectionSum),
    /// Slot 4: left/right bit path of a bisection.
    BisectionPath(BisectionPath),
    /// Slot 4: two-term recurrence with a user-chosen base.
    Recurrence(Recurrence),
    /// Slot 5: walk a permutation table to the sentinel.
    MaskedWalk(MaskedWalk),
    /// Slot 5: six characters spelling a word through a letter table.
    LetterCipher(LetterCipher),
    /// Slot 5: six characters summing through an integer table.
    DigitSum(DigitSum),
    /// Slot 6: reorder a six-node chain into descending order.
    ListReorder(ListReorder),
}

static INCREMENTAL: Progression = Progression::Incremental;
static DOUBLING: Progression = Progression::Doubling;

impl PhaseVariant {
    /// Borrows the variant behind the [`Phase`] contract.
    #[must_use]
    pub fn as_phase(&self) -> &dyn Phase {
        match self {
            Self::ExactMatch(p) => p,
            Self::Incremental => &INCREMENTAL,
            Self::Doubling => &DOUBLING,
            Self::JumpDirect(p) => p,
            Self::JumpFallThrough(p) => p,
            Self::JumpLetter(p) => p,
            Self::BisectionSum(p) => p,
            Self::BisectionPath(p) => p,
            Self::Recurrence(p) => p,
            Self::MaskedWalk(p) => p,
            Self::LetterCipher(p) => p,
            Self::DigitSum(p) => p,
            Self::ListReorder(p) => p,
        }
    }

    /// One-based slot this variant belongs to.
    #[must_use]
    pub const fn slot(&self) -> usize {
        match self {
            Self::ExactMatch(_) => 1,
            Self::Incremental | Self::Doubling => 2,
            Self::JumpDirect(_) | Self::JumpFallThrough(_) | Self::JumpLetter(_) => 3,
            Self::BisectionSum(_) | Self::BisectionPath(_) | Self::Recurrence(_) => 4,
            Self::MaskedWalk(_) | Self::LetterCipher(_) | Self::DigitSum(_) => 5,
            Self::ListReorder(_) => 6,
        }
    }

    /// Checks `line` with this variant.
    ///
    /// # Errors
    ///
    /// See [`Phase::check`].
    pub fn check(&self, line: &str) -> PhaseResult {
        self.as_phase().check(line)
    }

    /// Generates an accepted line for this variant.
    ///
    /// # Errors
    ///
    /// See [`Phase::solve`].
    pub fn solve(&self) -> Result<String, SolveError> {
        self.as_phase().solve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_variants_deserialize_from_tag() {
        let v: PhaseVariant = serde_yaml::from_str("variant: incremental").unwrap();
        assert_eq!(v, PhaseVariant::Incremental);
        assert_eq!(v.slot(), 2);
    }

    #[test]
    fn struct_variants_deserialize_from_tag() {
        let v: PhaseVariant =
            serde_yaml::from_str("variant: bisection_sum\ntarget: 35\n").unwrap();
        assert_eq!(v, PhaseVariant::BisectionSum(BisectionSum { target: 35 }));
        assert_eq!(v.as_phase().name(), "bisection_sum");
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let v: Result<PhaseVariant, _> = serde_yaml::from_str("variant: quantum_walk");
        assert!(v.is_err());
    }

    #[test]
    fn dispatch_reaches_the_right_algorithm() {
        assert!(PhaseVariant::Doubling.check("1 2 4 8 16 32").is_ok());
        assert!(PhaseVariant::Incremental.check("1 2 4 8 16 32").is_err());
        assert_eq!(PhaseVariant::Doubling.solve().unwrap(), "1 2 4 8 16 32");
    }
}
