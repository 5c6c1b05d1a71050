//! Jump-table phases.
//!
//! The input names a case of an eight-way switch together with the value
//! (and, for [`JumpLetter`], the character) that case produces. Indices
//! outside `0..=7` land in the default case and detonate.

use serde::{Deserialize, Serialize};

use crate::error::{Explosion, SolveError};
use crate::parse::{int_char_int, two_ints};

use super::{Phase, PhaseResult};

/// Number of cases in the switch.
pub const CASES: usize = 8;

/// Highest case the fall-through variant accepts.
pub const FALL_THROUGH_LAST_LEGAL: i32 = 5;

fn case_index(index: i32) -> Result<usize, Explosion> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < CASES)
        .ok_or_else(|| Explosion::rule(format!("case {index} falls to the default")))
}

/// Each case yields its own constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpDirect {
    /// Constant produced by each case.
    pub values: [i32; CASES],
}

impl Phase for JumpDirect {
    fn name(&self) -> &'static str {
        "jump_direct"
    }

    fn check(&self, line: &str) -> PhaseResult {
        let (index, value) = two_ints(line)?;
        let expected = self.values[case_index(index)?];
        if value != expected {
            return Err(Explosion::rule(format!("case {index} value mismatch")));
        }
        Ok(())
    }

    fn solve(&self) -> Result<String, SolveError> {
        Ok(format!("0 {}", self.values[0]))
    }
}

/// Cases fall through to the end of the switch, each adding its delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpFallThrough {
    /// Amount each case adds to the running total (negative subtracts).
    pub deltas: [i32; CASES],
}

impl JumpFallThrough {
    /// Running total after entering at `case` and falling to the last case.
    #[must_use]
    pub fn accumulate(&self, case: usize) -> i64 {
        self.deltas[case..].iter().copied().map(i64::from).sum()
    }
}

impl Phase for JumpFallThrough {
    fn name(&self) -> &'static str {
        "jump_fall_through"
    }

    fn check(&self, line: &str) -> PhaseResult {
        let (index, value) = two_ints(line)?;
        let total = self.accumulate(case_index(index)?);
        if index > FALL_THROUGH_LAST_LEGAL {
            return Err(Explosion::rule(format!(
                "case {index} is past the last legal case"
            )));
        }
        if i64::from(value) != total {
            return Err(Explosion::rule(format!("case {index} total mismatch")));
        }
        Ok(())
    }

    fn solve(&self) -> Result<String, SolveError> {
        Ok(format!("0 {}", self.accumulate(0)))
    }
}

/// Each case yields a constant and a letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpLetter {
    /// Constant produced by each case.
    pub values: [i32; CASES],
    /// Letter produced by each case.
    pub letters: [char; CASES],
}

impl Phase for JumpLetter {
    fn name(&self) -> &'static str {
        "jump_letter"
    }

    fn check(&self, line: &str) -> PhaseResult {
        let (index, letter, value) = int_char_int(line)?;
        let case = case_index(index)?;
        if letter != self.letters[case] {
            return Err(Explosion::rule(format!("case {index} letter mismatch")));
        }
        if value != self.values[case] {
            return Err(Explosion::rule(format!("case {index} value mismatch")));
        }
        Ok(())
    }

    fn solve(&self) -> Result<String, SolveError> {
        Ok(format!("0 {} {}", self.letters[0], self.values[0]))
    }
}
