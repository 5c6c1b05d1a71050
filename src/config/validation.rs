//! Bomb validation
//!
//! Runs after a bomb file has been deserialized. Checks that each slot
//! holds a variant that belongs there and that every static table admits
//! exactly the answers its solver will produce.
//!
//! Validation collects ALL errors (doesn't stop at first) to provide
//! comprehensive feedback to bomb authors.

use std::collections::HashSet;

use crate::config::schema::BombConfig;
use crate::driver::input::MAX_LINE;
use crate::error::{Severity, ValidationIssue};
use crate::phase::bisection::{
    self, MAX_ITERATIONS, indices_reaching, midpoint_path, midpoint_sum,
};
use crate::phase::indirect::{SENTINEL, TABLE_LEN};
use crate::phase::jump_table::{CASES, FALL_THROUGH_LAST_LEGAL};
use crate::phase::secret::{MAX_ANSWER, MIN_ANSWER};
use crate::phase::{PHASE_COUNT, Phase, PhaseVariant, SecretPhase};

// ============================================================================
// Public API
// ============================================================================

/// Result of bomb validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Bomb validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a bomb and returns every issue found.
    pub fn validate(&mut self, bomb: &BombConfig) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_secret_phrase(&bomb.secret_phrase);
        self.validate_slots(&bomb.phases);
        for (i, variant) in bomb.phases.iter().enumerate() {
            self.validate_variant(&format!("phases[{i}]"), variant);
        }
        if let Some(secret) = &bomb.secret {
            self.validate_secret(secret);
        }

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Bomb-level checks
    // ========================================================================

    fn validate_secret_phrase(&mut self, phrase: &str) {
        if phrase.is_empty() {
            self.add_error("secret_phrase", "Secret phrase cannot be empty");
        } else if phrase.chars().any(char::is_whitespace) {
            self.add_error(
                "secret_phrase",
                "Secret phrase must be a single word (no whitespace)",
            );
        }
    }

    fn validate_slots(&mut self, phases: &[PhaseVariant]) {
        if phases.len() != PHASE_COUNT {
            self.add_error(
                "phases",
                &format!(
                    "A bomb has exactly {PHASE_COUNT} phases, found {}",
                    phases.len()
                ),
            );
        }
        for (i, variant) in phases.iter().enumerate() {
            let slot = i + 1;
            if variant.slot() != slot {
                self.add_error(
                    &format!("phases[{i}].variant"),
                    &format!(
                        "'{}' belongs in phase {}, not phase {slot}",
                        variant.as_phase().name(),
                        variant.slot()
                    ),
                );
            }
        }
    }

    // ========================================================================
    // Variant checks
    // ========================================================================

    fn validate_variant(&mut self, path: &str, variant: &PhaseVariant) {
        match variant {
            PhaseVariant::ExactMatch(p) => self.validate_phrase(path, &p.phrase),
            PhaseVariant::Incremental | PhaseVariant::Doubling | PhaseVariant::JumpDirect(_) => {}
            PhaseVariant::JumpFallThrough(p) => {
                let legal = (0..CASES)
                    .take_while(|&c| i32::try_from(c).is_ok_and(|c| c <= FALL_THROUGH_LAST_LEGAL));
                for case in legal {
                    if i32::try_from(p.accumulate(case)).is_err() {
                        self.add_error(
                            &format!("{path}.deltas"),
                            &format!("Running total from case {case} overflows 32 bits"),
                        );
                    }
                }
            }
            PhaseVariant::JumpLetter(p) => {
                if let Some(bad) = p.letters.iter().find(|c| !c.is_ascii_graphic()) {
                    self.add_error(
                        &format!("{path}.letters"),
                        &format!("Letter {bad:?} cannot be typed as a single token"),
                    );
                }
            }
            PhaseVariant::BisectionSum(p) => {
                self.validate_fold_target(path, indices_reaching(midpoint_sum, p.target));
            }
            PhaseVariant::BisectionPath(p) => {
                self.validate_fold_target(path, indices_reaching(midpoint_path, p.target));
            }
            PhaseVariant::Recurrence(p) => {
                if p.iterations > MAX_ITERATIONS {
                    self.add_error(
                        &format!("{path}.iterations"),
                        &format!("Iteration count exceeds {MAX_ITERATIONS}"),
                    );
                } else if p.base_min > p.base_max {
                    self.add_error(&format!("{path}.base_min"), "Base range is empty");
                } else {
                    let extremes = [p.base_min, p.base_max]
                        .map(|b| bisection::recurrence(p.iterations, i64::from(b)));
                    if extremes.iter().any(|&v| i32::try_from(v).is_err()) {
                        self.add_error(
                            path,
                            "Recurrence values for this base range overflow 32 bits",
                        );
                    }
                }
            }
            PhaseVariant::MaskedWalk(p) => {
                let seen: HashSet<i32> = p.table.iter().copied().collect();
                if seen.len() != TABLE_LEN || !p.table.iter().all(|v| (0..=SENTINEL).contains(v))
                {
                    self.add_error(
                        &format!("{path}.table"),
                        "Table must be a permutation of 0..=15",
                    );
                } else if !p.answers().contains_key(&p.steps) {
                    self.add_error(
                        &format!("{path}.steps"),
                        &format!("No start offset reaches 15 in {} hops", p.steps),
                    );
                } else if p.steps == 0 {
                    self.add_warning(&format!("{path}.steps"), "Zero hops makes the walk trivial");
                }
            }
            PhaseVariant::LetterCipher(p) => {
                if p.table.len() != TABLE_LEN || !p.table.is_ascii() {
                    self.add_error(
                        &format!("{path}.table"),
                        "Table must be 16 ASCII characters",
                    );
                } else if p.target.len() != 6 || !p.target.is_ascii() {
                    self.add_error(
                        &format!("{path}.target"),
                        "Target must be 6 ASCII characters",
                    );
                } else if let Some(missing) = p.target.chars().find(|&c| !p.table.contains(c)) {
                    self.add_error(
                        &format!("{path}.target"),
                        &format!("Letter '{missing}' does not appear in the table"),
                    );
                }
            }
            PhaseVariant::DigitSum(p) => {
                if p.witness().is_none() {
                    self.add_error(
                        &format!("{path}.target"),
                        &format!("No six table entries add up to {}", p.target),
                    );
                }
            }
            PhaseVariant::ListReorder(p) => {
                let distinct: HashSet<i32> = p.values.iter().copied().collect();
                if distinct.len() != p.values.len() {
                    self.add_warning(
                        &format!("{path}.values"),
                        "Duplicate node values allow more than one accepted order",
                    );
                }
            }
        }
    }

    fn validate_phrase(&mut self, path: &str, phrase: &str) {
        let path = format!("{path}.phrase");
        if phrase.trim().is_empty() {
            self.add_error(&path, "Phrase cannot be blank");
        } else if phrase.contains(['\n', '\r']) {
            self.add_error(&path, "Phrase must fit on one line");
        } else if phrase.len() >= MAX_LINE - 1 {
            self.add_error(&path, "Phrase is longer than an input line");
        } else if phrase.trim() != phrase {
            self.add_warning(&path, "Phrase has leading or trailing whitespace");
        }
    }

    fn validate_fold_target(&mut self, path: &str, indices: Vec<i32>) {
        let path = format!("{path}.target");
        match indices.as_slice() {
            [] => self.add_error(&path, "No index in [0, 14] produces this target"),
            [_] => {}
            many => self.add_error(
                &path,
                &format!("Target is ambiguous: indices {many:?} all produce it"),
            ),
        }
    }

    fn validate_secret(&mut self, secret: &SecretPhase) {
        if !secret.is_search_tree() {
            self.add_error("secret.values", "Values do not form a binary search tree");
        }
        if secret
            .values
            .iter()
            .any(|&v| !(MIN_ANSWER..=MAX_ANSWER).contains(&i64::from(v)))
        {
            self.add_error(
                "secret.values",
                &format!("Values must lie in {MIN_ANSWER}..={MAX_ANSWER}"),
            );
        }
        if secret.solve().is_err() {
            self.add_error("secret.target", "No node produces this path code");
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
