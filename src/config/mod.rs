//! Bomb configuration
//!
//! Loads, validates and generates bomb files: the per-slot variant choice
//! plus every static table the chosen variants check against.

pub mod generate;
pub mod loader;
pub mod schema;
pub mod validation;

pub use generate::{BombBuilder, PhaseSelection};
pub use loader::{BombLoader, LoadResult, LoaderOptions, load_bomb};
pub use schema::{BombConfig, DEFAULT_SECRET_PHRASE};
pub use validation::{ValidationResult, Validator};
