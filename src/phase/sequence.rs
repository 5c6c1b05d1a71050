//! Linear-recurrence sequence phases.

use crate::error::{Explosion, SolveError};
use crate::parse::read_six_numbers;

use super::{Phase, PhaseResult};

/// Recurrence linking each of the six numbers to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    /// `x[0] >= 0`, `x[i] = x[i-1] + i`
    Incremental,
    /// `x[0] = 1`, `x[i] = x[i-1] * 2`
    Doubling,
}

impl Progression {
    fn next(self, prev: i32, i: i32) -> Option<i32> {
        match self {
            Self::Incremental => prev.checked_add(i),
            Self::Doubling => prev.checked_mul(2),
        }
    }
}

impl Phase for Progression {
    fn name(&self) -> &'static str {
        match self {
            Self::Incremental => "incremental",
            Self::Doubling => "doubling",
        }
    }

    fn check(&self, line: &str) -> PhaseResult {
        let numbers = read_six_numbers(line)?;

        match self {
            Self::Incremental if numbers[0] < 0 => {
                return Err(Explosion::rule("first number is negative"));
            }
            Self::Doubling if numbers[0] != 1 => {
                return Err(Explosion::rule("first number is not 1"));
            }
            _ => {}
        }

        for (i, pair) in (1..).zip(numbers.windows(2)) {
            if self.next(pair[0], i) != Some(pair[1]) {
                return Err(Explosion::rule(format!("number {i} breaks the sequence")));
            }
        }
        Ok(())
    }

    fn solve(&self) -> Result<String, SolveError> {
        let mut values = Vec::with_capacity(6);
        // 1 is a legal start for both recurrences.
        let mut current = 1;
        values.push(current);
        for i in 1..6 {
            current = self.next(current, i).ok_or_else(|| SolveError::NoWitness {
                phase: self.name(),
                detail: "sequence overflows".to_string(),
            })?;
            values.push(current);
        }
        Ok(values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "))
    }
}
