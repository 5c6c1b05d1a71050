//! `bomblab` - binary bomb puzzles
//!
//! A bomb is six input-checking phases run in a fixed order, each drawn
//! from a small catalog of variants, plus a secret phase unlocked by a
//! passphrase. Every variant also knows how to produce an answer it
//! accepts.

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod observability;
pub mod parse;
pub mod phase;
