//! Recursive prediction phases.
//!
//! [`BisectionSum`] and [`BisectionPath`] replay a binary search for a
//! target index over `[0, 14]` and fold the visited midpoints into a
//! number. [`Recurrence`] evaluates a two-term recurrence for a base the
//! user picks. In every case the user must predict the number.
//!
//! Both bisection folds collide for some indices (`0` and `1` share a sum,
//! and paths do not record their length), so a bomb file may only use a
//! target that exactly one index produces.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Explosion, SolveError};
use crate::parse::two_ints;

use super::{Phase, PhaseResult};

/// Lowest index the bisection searches.
pub const LOW: i32 = 0;
/// Highest index the bisection searches.
pub const HIGH: i32 = 14;

/// Largest iteration count a [`Recurrence`] may use.
pub const MAX_ITERATIONS: u32 = 24;

/// Sum of every midpoint visited while searching `[low, high]` for `target`.
#[must_use]
pub fn midpoint_sum(target: i32, low: i32, high: i32) -> i32 {
    if low > high {
        return 0;
    }
    let mid = low + (high - low) / 2;
    match mid.cmp(&target) {
        Ordering::Greater => mid + midpoint_sum(target, low, mid - 1),
        Ordering::Less => mid + midpoint_sum(target, mid + 1, high),
        Ordering::Equal => mid,
    }
}

/// Left/right decisions taken while searching `[low, high]` for `target`,
/// packed with the first decision in the least significant bit (1 = right).
#[must_use]
pub fn midpoint_path(target: i32, low: i32, high: i32) -> i32 {
    if low > high {
        return 0;
    }
    let mid = low + (high - low) / 2;
    match mid.cmp(&target) {
        Ordering::Greater => 2 * midpoint_path(target, low, mid - 1),
        Ordering::Less => 2 * midpoint_path(target, mid + 1, high) + 1,
        Ordering::Equal => 0,
    }
}

/// Every index in `[LOW, HIGH]` whose fold equals `target`.
#[must_use]
pub fn indices_reaching(fold: fn(i32, i32, i32) -> i32, target: i32) -> Vec<i32> {
    (LOW..=HIGH)
        .filter(|&i| fold(i, LOW, HIGH) == target)
        .collect()
}

fn check_bisection(fold: fn(i32, i32, i32) -> i32, target: i32, line: &str) -> PhaseResult {
    let (index, value) = two_ints(line)?;
    if !(LOW..=HIGH).contains(&index) {
        return Err(Explosion::rule(format!("index {index} outside [{LOW}, {HIGH}]")));
    }
    let result = fold(index, LOW, HIGH);
    if result != target || value != target {
        return Err(Explosion::rule(format!("index {index} folds to the wrong value")));
    }
    Ok(())
}

fn solve_bisection(
    name: &'static str,
    fold: fn(i32, i32, i32) -> i32,
    target: i32,
) -> Result<String, SolveError> {
    (LOW..=HIGH)
        .find(|&i| fold(i, LOW, HIGH) == target)
        .map(|i| format!("{i} {target}"))
        .ok_or_else(|| SolveError::NoWitness {
            phase: name,
            detail: format!("no index in [{LOW}, {HIGH}] folds to {target}"),
        })
}

/// Predict the midpoint sum of the search for the hidden index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BisectionSum {
    /// Sum the hidden index produces.
    pub target: i32,
}

impl Phase for BisectionSum {
    fn name(&self) -> &'static str {
        "bisection_sum"
    }

    fn check(&self, line: &str) -> PhaseResult {
        check_bisection(midpoint_sum, self.target, line)
    }

    fn solve(&self) -> Result<String, SolveError> {
        solve_bisection(self.name(), midpoint_sum, self.target)
    }
}

/// Predict the packed left/right path of the search for the hidden index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BisectionPath {
    /// Path the hidden index produces.
    pub target: i32,
}

impl Phase for BisectionPath {
    fn name(&self) -> &'static str {
        "bisection_path"
    }

    fn check(&self, line: &str) -> PhaseResult {
        check_bisection(midpoint_path, self.target, line)
    }

    fn solve(&self) -> Result<String, SolveError> {
        solve_bisection(self.name(), midpoint_path, self.target)
    }
}

/// `F(0) = 0`, `F(1) = b`, `F(n) = b + F(n-1) + F(n-2)`.
#[must_use]
pub fn recurrence(n: u32, base: i64) -> i64 {
    match n {
        0 => 0,
        1 => base,
        _ => base
            .saturating_add(recurrence(n - 1, base))
            .saturating_add(recurrence(n - 2, base)),
    }
}

/// Predict `F(iterations, b)` for a base `b` of the user's choosing.
///
/// Input is `<value> <base>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    /// Fixed `n`.
    pub iterations: u32,
    /// Smallest legal base.
    pub base_min: i32,
    /// Largest legal base.
    pub base_max: i32,
}

impl Phase for Recurrence {
    fn name(&self) -> &'static str {
        "recurrence"
    }

    fn check(&self, line: &str) -> PhaseResult {
        let (value, base) = two_ints(line)?;
        if base < self.base_min || base > self.base_max {
            return Err(Explosion::rule(format!("base {base} out of range")));
        }
        if recurrence(self.iterations, i64::from(base)) != i64::from(value) {
            return Err(Explosion::rule("recurrence value mismatch"));
        }
        Ok(())
    }

    fn solve(&self) -> Result<String, SolveError> {
        if self.base_min > self.base_max {
            return Err(SolveError::NoWitness {
                phase: self.name(),
                detail: format!("empty base range [{}, {}]", self.base_min, self.base_max),
            });
        }
        let base = self.base_min;
        Ok(format!(
            "{} {base}",
            recurrence(self.iterations, i64::from(base))
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_sums_match_hand_traces() {
        assert_eq!(midpoint_sum(7, LOW, HIGH), 7);
        assert_eq!(midpoint_sum(3, LOW, HIGH), 10);
        assert_eq!(midpoint_sum(8, LOW, HIGH), 35);
        assert_eq!(midpoint_sum(14, LOW, HIGH), 45);
    }

    #[test]
    fn zero_and_one_share_a_sum() {
        assert_eq!(indices_reaching(midpoint_sum, 11), vec![0, 1]);
        assert_eq!(indices_reaching(midpoint_sum, 35), vec![8]);
    }

    #[test]
    fn every_index_accepts_its_own_sum() {
        for t in LOW..=HIGH {
            let sum = midpoint_sum(t, LOW, HIGH);
            let phase = BisectionSum { target: sum };
            assert!(phase.check(&format!("{t} {sum}")).is_ok(), "index {t}");
        }
    }

    #[test]
    fn sum_variant_rejects_wrong_claim_and_range() {
        let phase = BisectionSum { target: 35 };
        assert!(phase.check("8 35").is_ok());
        assert!(phase.check("8 34").is_err());
        assert!(phase.check("9 35").is_err());
        assert!(phase.check("15 35").is_err());
        assert!(phase.check("-1 35").is_err());
    }

    #[test]
    fn paths_put_first_step_in_low_bit() {
        assert_eq!(midpoint_path(7, LOW, HIGH), 0);
        assert_eq!(midpoint_path(11, LOW, HIGH), 1);
        assert_eq!(midpoint_path(2, LOW, HIGH), 4);
        assert_eq!(midpoint_path(10, LOW, HIGH), 5);
        assert_eq!(midpoint_path(14, LOW, HIGH), 7);
    }

    #[test]
    fn path_targets_with_single_index() {
        for (target, index) in [(4, 2), (6, 6), (5, 10), (7, 14)] {
            assert_eq!(indices_reaching(midpoint_path, target), vec![index]);
        }
        assert_eq!(indices_reaching(midpoint_path, 0), vec![0, 1, 3, 7]);
    }

    #[test]
    fn path_variant_round_trip() {
        let phase = BisectionPath { target: 5 };
        let answer = phase.solve().unwrap();
        assert_eq!(answer, "10 5");
        assert!(phase.check(&answer).is_ok());
    }

    #[test]
    fn solver_reports_unreachable_target() {
        assert!(BisectionSum { target: 12 }.solve().is_err());
        assert!(BisectionPath { target: 8 }.solve().is_err());
    }

    #[test]
    fn recurrence_follows_shifted_fibonacci() {
        let expected = [0, 1, 2, 4, 7, 12, 20, 33, 54, 88];
        for (n, want) in (0..).zip(expected) {
            assert_eq!(recurrence(n, 1), want, "n = {n}");
        }
        assert_eq!(recurrence(9, 3), 264);
    }

    #[test]
    fn recurrence_checks_base_range() {
        let phase = Recurrence {
            iterations: 9,
            base_min: 2,
            base_max: 4,
        };
        assert!(phase.check("176 2").is_ok());
        assert!(phase.check("264 3").is_ok());
        assert!(phase.check("88 1").is_err());
        assert!(phase.check("440 5").is_err());
        assert!(phase.check("177 2").is_err());
        assert_eq!(phase.solve().unwrap(), "176 2");
    }
}
