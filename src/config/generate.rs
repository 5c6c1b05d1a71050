//! Seeded bomb generation.
//!
//! A bomb is picked by a six-letter selection string, one letter per
//! slot (`"abacac"`), and a seed. Every table, target and phrase comes
//! from a [`StdRng`] seeded once, so the same selection and seed always
//! produce the same bomb.
//!
//! | Slot | `a` | `b` | `c` |
//! |------|-----|-----|-----|
//! | 1 | exact match, pool A | exact match, pool B | exact match, pool C |
//! | 2 | doubling | incremental | |
//! | 3 | jump direct | jump fall-through | jump letter |
//! | 4 | bisection sum | bisection path | recurrence |
//! | 5 | masked walk | letter cipher | digit sum |
//! | 6 | list reorder | | |

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

use crate::config::schema::{BombConfig, DEFAULT_SECRET_PHRASE};
use crate::config::validation::Validator;
use crate::error::ConfigError;
use crate::phase::bisection::{HIGH, LOW, indices_reaching, midpoint_path, midpoint_sum};
use crate::phase::indirect::{SENTINEL, TABLE_LEN};
use crate::phase::linked_list::NODES;
use crate::phase::secret::{MAX_ANSWER, MIN_ANSWER, TREE_NODES};
use crate::phase::{
    BisectionPath, BisectionSum, DigitSum, ExactMatch, JumpDirect, JumpFallThrough, JumpLetter,
    LetterCipher, ListReorder, MaskedWalk, PHASE_COUNT, PhaseVariant, Recurrence, SecretPhase,
};

/// Letters each slot offers, slot 1 first.
pub const SLOT_LETTERS: [&str; PHASE_COUNT] = ["abc", "ab", "abc", "abc", "abc", "a"];

const PHRASES: [&[&str]; 3] = [
    &[
        "Public speaking is very easy.",
        "Border relations with Canada have never been better.",
        "I can see Russia from my house!",
        "Wheels within wheels.",
    ],
    &[
        "The future will be better tomorrow.",
        "We have to stand with our North Korean allies.",
        "I am the mayor. I can do anything I want.",
        "Verbosity leads to unclear, inarticulate things.",
    ],
    &[
        "All your base are belong to us.",
        "Crikey! I have lost my mojo!",
        "When a problem comes along, you must zip it!",
        "So you think you can stop the bomb with a phrase?",
    ],
];

const CIPHER_WORDS: &[&str] = &[
    "giants", "bruins", "flyers", "devils", "sabres", "oilers", "titans", "ravens", "eagles",
];

// ============================================================================
// Phase selection
// ============================================================================

/// One variant letter per phase slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSelection([u8; PHASE_COUNT]);

impl PhaseSelection {
    /// Draws a letter for every slot from the letters it offers.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self(std::array::from_fn(|slot| {
            SLOT_LETTERS[slot]
                .as_bytes()
                .choose(&mut *rng)
                .copied()
                .unwrap_or(b'a')
        }))
    }

    /// Letter chosen for the zero-based `slot`.
    #[must_use]
    pub const fn letter(&self, slot: usize) -> u8 {
        self.0[slot]
    }
}

impl FromStr for PhaseSelection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |expected: String| ConfigError::InvalidValue {
            field: "phases".to_string(),
            value: s.to_string(),
            expected,
        };

        let bytes = s.as_bytes();
        if bytes.len() != PHASE_COUNT {
            return Err(invalid(format!("{PHASE_COUNT} letters, one per phase")));
        }
        for (slot, (&letter, offered)) in bytes.iter().zip(SLOT_LETTERS).enumerate() {
            if !offered.as_bytes().contains(&letter) {
                return Err(invalid(format!(
                    "phase {} to be one of '{offered}'",
                    slot + 1
                )));
            }
        }
        let mut letters = [0u8; PHASE_COUNT];
        letters.copy_from_slice(bytes);
        Ok(Self(letters))
    }
}

impl fmt::Display for PhaseSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &letter in &self.0 {
            write!(f, "{}", char::from(letter))?;
        }
        Ok(())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds a randomized bomb.
#[derive(Debug, Clone)]
pub struct BombBuilder {
    seed: u64,
    selection: Option<PhaseSelection>,
    bomb_id: u32,
    secret_phrase: String,
}

impl BombBuilder {
    /// Starts a builder for `seed` with a random selection.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            selection: None,
            bomb_id: 0,
            secret_phrase: DEFAULT_SECRET_PHRASE.to_string(),
        }
    }

    /// Fixes the variant letter of every slot.
    #[must_use]
    pub const fn selection(mut self, selection: PhaseSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Sets the bomb identifier.
    #[must_use]
    pub const fn bomb_id(mut self, bomb_id: u32) -> Self {
        self.bomb_id = bomb_id;
        self
    }

    /// Overrides the secret passphrase.
    #[must_use]
    pub fn secret_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.secret_phrase = phrase.into();
        self
    }

    /// Generates and validates the bomb.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the result does not
    /// validate, which only a bad secret phrase can cause.
    pub fn build(&self) -> Result<BombConfig, ConfigError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let selection = self
            .selection
            .unwrap_or_else(|| PhaseSelection::random(&mut rng));

        let phases = (0..PHASE_COUNT)
            .map(|slot| variant_for(slot, selection.letter(slot), &mut rng))
            .collect();
        let bomb = BombConfig {
            bomb_id: self.bomb_id,
            secret_phrase: self.secret_phrase.clone(),
            phases,
            secret: Some(secret_tree(&mut rng)),
        };

        let result = Validator::new().validate(&bomb);
        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: "<generated>".to_string(),
                errors: result.errors,
            });
        }
        tracing::debug!(
            seed = self.seed,
            selection = %selection,
            phases = %bomb.describe(),
            "bomb generated"
        );
        Ok(bomb)
    }
}

// ============================================================================
// Variant generators
// ============================================================================

fn variant_for(slot: usize, letter: u8, rng: &mut StdRng) -> PhaseVariant {
    match (slot + 1, letter) {
        (1, _) => {
            let pool = PHRASES[usize::from(letter.saturating_sub(b'a')) % PHRASES.len()];
            PhaseVariant::ExactMatch(ExactMatch {
                phrase: pool.choose(rng).copied().unwrap_or_default().to_string(),
            })
        }
        (2, b'a') => PhaseVariant::Doubling,
        (2, _) => PhaseVariant::Incremental,
        (3, b'a') => PhaseVariant::JumpDirect(JumpDirect {
            values: std::array::from_fn(|_| rng.random_range(100..1000)),
        }),
        (3, b'b') => PhaseVariant::JumpFallThrough(JumpFallThrough {
            deltas: std::array::from_fn(|_| rng.random_range(-999..=999)),
        }),
        (3, _) => PhaseVariant::JumpLetter(JumpLetter {
            values: std::array::from_fn(|_| rng.random_range(100..1000)),
            letters: std::array::from_fn(|_| char::from(rng.random_range(b'a'..=b'z'))),
        }),
        (4, b'a') => PhaseVariant::BisectionSum(BisectionSum {
            target: unique_fold_target(midpoint_sum, rng),
        }),
        (4, b'b') => PhaseVariant::BisectionPath(BisectionPath {
            target: unique_fold_target(midpoint_path, rng),
        }),
        (4, _) => {
            let base_min = rng.random_range(1..=4);
            PhaseVariant::Recurrence(Recurrence {
                iterations: rng.random_range(5..=12),
                base_min,
                base_max: base_min + rng.random_range(0..=3),
            })
        }
        (5, b'a') => masked_walk(rng),
        (5, b'b') => letter_cipher(rng),
        (5, _) => {
            let table: [i32; TABLE_LEN] = std::array::from_fn(|_| rng.random_range(1..=20));
            let target = (0..6).map(|_| table[rng.random_range(0..TABLE_LEN)]).sum();
            PhaseVariant::DigitSum(DigitSum { table, target })
        }
        _ => list_reorder(rng),
    }
}

/// A fold value that exactly one index in `[LOW, HIGH]` produces.
fn unique_fold_target(fold: fn(i32, i32, i32) -> i32, rng: &mut StdRng) -> i32 {
    let candidates: Vec<i32> = (LOW..=HIGH)
        .map(|i| fold(i, LOW, HIGH))
        .filter(|&value| indices_reaching(fold, value).len() == 1)
        .collect();
    candidates
        .choose(rng)
        .copied()
        .unwrap_or_else(|| fold(HIGH, LOW, HIGH))
}

/// Links all sixteen offsets into one cycle so every start reaches the
/// sentinel.
fn masked_walk(rng: &mut StdRng) -> PhaseVariant {
    let mut order: Vec<i32> = (0..=SENTINEL).collect();
    order.shuffle(rng);
    let mut table = [0i32; TABLE_LEN];
    for (k, &offset) in order.iter().enumerate() {
        let next = order[(k + 1) % order.len()];
        if let Ok(slot) = usize::try_from(offset) {
            table[slot] = next;
        }
    }
    PhaseVariant::MaskedWalk(MaskedWalk {
        table,
        steps: rng.random_range(1..=15),
    })
}

fn letter_cipher(rng: &mut StdRng) -> PhaseVariant {
    let target = CIPHER_WORDS.choose(rng).copied().unwrap_or("giants");
    let mut letters: Vec<u8> = Vec::with_capacity(TABLE_LEN);
    for b in target.bytes() {
        if !letters.contains(&b) {
            letters.push(b);
        }
    }
    while letters.len() < TABLE_LEN {
        letters.push(rng.random_range(b'a'..=b'z'));
    }
    letters.shuffle(rng);
    PhaseVariant::LetterCipher(LetterCipher {
        table: letters.into_iter().map(char::from).collect(),
        target: target.to_string(),
    })
}

fn list_reorder(rng: &mut StdRng) -> PhaseVariant {
    let mut values = [0i32; NODES];
    let picks = rand::seq::index::sample(rng, 999, NODES);
    for (value, pick) in values.iter_mut().zip(picks) {
        *value = i32::try_from(pick).map_or(1, |p| p + 1);
    }
    PhaseVariant::ListReorder(ListReorder { values })
}

/// Fifteen distinct values laid out as a perfect search tree, with the
/// path code of one random node as target.
fn secret_tree(rng: &mut StdRng) -> SecretPhase {
    let range = usize::try_from(MAX_ANSWER - MIN_ANSWER + 1).unwrap_or(1000);
    let mut sorted: Vec<i32> = rand::seq::index::sample(rng, range, TREE_NODES)
        .into_iter()
        .filter_map(|i| i32::try_from(i).ok())
        .map(|i| i + 1)
        .collect();
    sorted.sort_unstable();

    let mut values = [0i32; TREE_NODES];
    let mut next = sorted.into_iter();
    fill_in_order(0, &mut values, &mut next);

    let mut tree = SecretPhase { values, target: 0 };
    let node = values.choose(rng).copied().unwrap_or(values[0]);
    tree.target = i32::try_from(tree.path_code(i64::from(node))).unwrap_or_default();
    tree
}

fn fill_in_order(
    slot: usize,
    values: &mut [i32; TREE_NODES],
    next: &mut impl Iterator<Item = i32>,
) {
    if slot >= TREE_NODES {
        return;
    }
    fill_in_order(2 * slot + 1, values, next);
    values[slot] = next.next().unwrap_or_default();
    fill_in_order(2 * slot + 2, values, next);
}
