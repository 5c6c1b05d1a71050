//! Indirect-array phases.
//!
//! Input values are masked to their low four bits and used as offsets
//! into a sixteen-entry table, so `16` and `0` (or `'p'` and `'0'`) are
//! the same offset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Explosion, SolveError};
use crate::parse::two_ints;

use super::{Phase, PhaseResult};

/// Entries in every indirect table.
pub const TABLE_LEN: usize = 16;

/// Offset that ends a [`MaskedWalk`].
pub const SENTINEL: i32 = 15;

/// A walk this long has revisited an offset.
const MAX_HOPS: u32 = 16;

/// Characters whose low four bits are `0..=15`, in that order.
const KEYS: &[u8; TABLE_LEN] = b"pabcdefghijklmno";

/// Offset selected by a number.
fn nibble(value: i32) -> usize {
    usize::try_from(value & 0xf).unwrap_or_default()
}

/// Offset selected by an input character (one per input byte).
fn char_nibble(c: char) -> usize {
    usize::try_from(u32::from(c) & 0xf).unwrap_or_default()
}

/// Printable character that selects `offset`.
#[must_use]
pub fn key_for(offset: usize) -> char {
    char::from(KEYS[offset % TABLE_LEN])
}

fn six_offsets(line: &str) -> Result<Vec<usize>, Explosion> {
    let offsets: Vec<usize> = line.chars().map(char_nibble).collect();
    if offsets.len() != 6 {
        return Err(Explosion::parse(format!(
            "expected 6 characters, found {}",
            offsets.len()
        )));
    }
    Ok(offsets)
}

/// Follow the table from a starting offset until it yields [`SENTINEL`].
///
/// Input is `<start> <sum>`: the walk must take exactly `steps` hops and
/// the offsets it visits must add up to `sum`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedWalk {
    /// Next offset for each offset; a permutation of `0..=15`.
    pub table: [i32; TABLE_LEN],
    /// Required number of hops.
    pub steps: u32,
}

impl MaskedWalk {
    /// Hops and visited-offset sum from `start` to the sentinel.
    ///
    /// Returns `None` if the walk cycles without meeting the sentinel.
    #[must_use]
    pub fn walk(&self, start: i32) -> Option<(u32, i64)> {
        let mut offset = start & 0xf;
        let mut hops = 0u32;
        let mut sum = 0i64;
        while offset != SENTINEL {
            if hops >= MAX_HOPS {
                return None;
            }
            hops += 1;
            offset = self.table[nibble(offset)];
            sum += i64::from(offset);
        }
        Some((hops, sum))
    }

    /// First start offset (and its sum) for every reachable hop count.
    #[must_use]
    pub fn answers(&self) -> BTreeMap<u32, (i32, i64)> {
        let mut answers = BTreeMap::new();
        for start in 0..=SENTINEL {
            if let Some((hops, sum)) = self.walk(start) {
                answers.entry(hops).or_insert((start, sum));
            }
        }
        answers
    }
}

impl Phase for MaskedWalk {
    fn name(&self) -> &'static str {
        "masked_walk"
    }

    fn check(&self, line: &str) -> PhaseResult {
        let (start, claimed) = two_ints(line)?;
        let (hops, sum) = self
            .walk(start)
            .ok_or_else(|| Explosion::rule("walk never reaches the sentinel"))?;
        if hops != self.steps {
            return Err(Explosion::rule(format!(
                "walk took {hops} hops, not {}",
                self.steps
            )));
        }
        if sum != i64::from(claimed) {
            return Err(Explosion::rule("walk sum mismatch"));
        }
        Ok(())
    }

    fn solve(&self) -> Result<String, SolveError> {
        let (start, sum) =
            self.answers()
                .get(&self.steps)
                .copied()
                .ok_or_else(|| SolveError::NoWitness {
                    phase: self.name(),
                    detail: format!("no start reaches {SENTINEL} in {} hops", self.steps),
                })?;
        Ok(format!("{start} {sum}"))
    }
}

/// Six characters select six letters that must spell the target word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterCipher {
    /// Sixteen ASCII letters.
    pub table: String,
    /// Six-letter word to spell.
    pub target: String,
}

impl Phase for LetterCipher {
    fn name(&self) -> &'static str {
        "letter_cipher"
    }

    fn check(&self, line: &str) -> PhaseResult {
        let table = self.table.as_bytes();
        let spelled: Vec<u8> = six_offsets(line)?
            .into_iter()
            .map(|offset| table.get(offset).copied().unwrap_or_default())
            .collect();
        if spelled != self.target.as_bytes() {
            return Err(Explosion::rule("decoded word mismatch"));
        }
        Ok(())
    }

    fn solve(&self) -> Result<String, SolveError> {
        self.target
            .bytes()
            .map(|letter| {
                self.table
                    .bytes()
                    .position(|t| t == letter)
                    .map(key_for)
                    .ok_or_else(|| SolveError::NoWitness {
                        phase: self.name(),
                        detail: format!("letter '{}' missing from table", char::from(letter)),
                    })
            })
            .collect()
    }
}

/// Six characters select six integers that must add up to the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitSum {
    /// Sixteen integers.
    pub table: [i32; TABLE_LEN],
    /// Required total.
    pub target: i32,
}

impl DigitSum {
    /// Six offsets (non-decreasing) whose entries sum to the target.
    #[must_use]
    pub fn witness(&self) -> Option<[usize; 6]> {
        let mut picked = [0usize; 6];
        self.search(0, 0, 0, &mut picked).then_some(picked)
    }

    fn search(&self, depth: usize, from: usize, acc: i64, picked: &mut [usize; 6]) -> bool {
        if depth == picked.len() {
            return acc == i64::from(self.target);
        }
        for offset in from..TABLE_LEN {
            picked[depth] = offset;
            if self.search(depth + 1, offset, acc + i64::from(self.table[offset]), picked) {
                return true;
            }
        }
        false
    }
}

impl Phase for DigitSum {
    fn name(&self) -> &'static str {
        "digit_sum"
    }

    fn check(&self, line: &str) -> PhaseResult {
        let total: i64 = six_offsets(line)?
            .into_iter()
            .map(|offset| i64::from(self.table[offset]))
            .sum();
        if total != i64::from(self.target) {
            return Err(Explosion::rule("looked-up total mismatch"));
        }
        Ok(())
    }

    fn solve(&self) -> Result<String, SolveError> {
        let picked = self.witness().ok_or_else(|| SolveError::NoWitness {
            phase: self.name(),
            detail: format!("no six entries add up to {}", self.target),
        })?;
        Ok(picked.iter().copied().map(key_for).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::decode_line;

    fn walk() -> MaskedWalk {
        MaskedWalk {
            table: [10, 2, 14, 7, 8, 12, 15, 11, 0, 4, 1, 13, 3, 9, 6, 5],
            steps: 6,
        }
    }

    #[test]
    fn walk_counts_hops_and_sums_offsets() {
        // 5 -> 12 -> 3 -> 7 -> 11 -> 13 -> 9 -> 4 -> 8 -> 0 -> 10 -> 1 -> 2 -> 14 -> 6 -> 15
        assert_eq!(walk().walk(5), Some((15, 115)));
        assert_eq!(walk().walk(14), Some((2, 21)));
        assert_eq!(walk().walk(15), Some((0, 0)));
    }

    #[test]
    fn walk_masks_start_offset() {
        let phase = walk();
        assert_eq!(phase.walk(16), phase.walk(0));
        assert_eq!(phase.walk(-1), phase.walk(15));
        let (hops, sum) = phase.walk(0).unwrap();
        let phase = MaskedWalk { steps: hops, ..phase };
        assert_eq!(
            phase.check(&format!("0 {sum}")).is_ok(),
            phase.check(&format!("16 {sum}")).is_ok()
        );
        assert!(phase.check(&format!("16 {sum}")).is_ok());
    }

    #[test]
    fn walk_rejects_wrong_hops_or_sum() {
        let phase = walk();
        let (start, sum) = phase.answers()[&6];
        assert!(phase.check(&format!("{start} {sum}")).is_ok());
        assert!(phase.check(&format!("{start} {}", sum + 1)).is_err());
        assert!(phase.check("15 0").is_err());
    }

    #[test]
    fn walk_detects_cycles_missing_the_sentinel() {
        let mut table: [i32; TABLE_LEN] = std::array::from_fn(|i| i32::try_from(i).unwrap());
        table.swap(0, 1);
        let phase = MaskedWalk { table, steps: 1 };
        assert_eq!(phase.walk(0), None);
        assert!(phase.check("0 1").is_err());
    }

    #[test]
    fn walk_solver_reports_unreachable_hops() {
        let mut phase = walk();
        phase.steps = 16;
        assert!(phase.solve().is_err());
    }

    fn cipher() -> LetterCipher {
        LetterCipher {
            table: "isrveawhobpnutfg".to_string(),
            target: "giants".to_string(),
        }
    }

    #[test]
    fn cipher_decodes_low_nibbles() {
        // o=0x6f, p=0x70, e=0x65, k=0x6b, m=0x6d, a=0x61
        assert!(cipher().check("opekma").is_ok());
        assert!(cipher().check("OPEKMA").is_ok());
        assert!(cipher().check("opekmb").is_err());
    }

    #[test]
    fn cipher_counts_high_bytes_once() {
        // 0xef and 0xf0 share the low nibbles of 'o' and 'p'
        let line = decode_line(&[0xef, 0xf0, b'e', b'k', b'm', b'a']);
        assert!(cipher().check(&line).is_ok());
        assert!(cipher().check(&decode_line("ékma".as_bytes())).is_err());
    }

    #[test]
    fn cipher_needs_exactly_six_characters() {
        assert!(matches!(
            cipher().check("opekm"),
            Err(Explosion::StructuralParseFailure(_))
        ));
        assert!(cipher().check("opekmaa").is_err());
    }

    #[test]
    fn cipher_solution_round_trips() {
        let answer = cipher().solve().unwrap();
        assert_eq!(answer.len(), 6);
        assert!(cipher().check(&answer).is_ok());
    }

    #[test]
    fn cipher_solver_reports_missing_letter() {
        let phase = LetterCipher {
            target: "zigzag".to_string(),
            ..cipher()
        };
        assert!(phase.solve().is_err());
    }

    fn digits() -> DigitSum {
        DigitSum {
            table: [2, 10, 6, 1, 12, 16, 9, 3, 4, 7, 14, 5, 11, 8, 15, 13],
            target: 58,
        }
    }

    #[test]
    fn digit_sum_adds_looked_up_entries() {
        // a b c d e f -> 10 + 6 + 1 + 12 + 16 + 9 = 54
        let mut phase = digits();
        phase.target = 54;
        assert!(phase.check("abcdef").is_ok());
        assert!(phase.check("abcdeg").is_err());
        let high = decode_line(&[0xe1, 0xe2, 0xe3, 0xe4, 0xe5, 0xe6]);
        assert!(phase.check(&high).is_ok());
    }

    #[test]
    fn digit_sum_solution_round_trips() {
        let phase = digits();
        let answer = phase.solve().unwrap();
        assert!(phase.check(&answer).is_ok(), "{answer}");
    }

    #[test]
    fn digit_sum_unreachable_target() {
        let phase = DigitSum {
            table: [1; TABLE_LEN],
            target: 7,
        };
        assert_eq!(phase.witness(), None);
        assert!(phase.solve().is_err());
    }
}
