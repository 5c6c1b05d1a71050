//! `bomblab build`
//!
//! Generates a bomb file from a phase selection and a seed.

use std::io::Write;

use crate::cli::args::BuildArgs;
use crate::config::BombBuilder;
use crate::error::BombError;

/// Generate a bomb and print or save it as YAML.
///
/// # Errors
///
/// Returns a config error if the bomb does not validate (a bad secret
/// phrase), or an I/O error if the output cannot be written.
pub fn run(args: &BuildArgs) -> Result<(), BombError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut builder = BombBuilder::new(seed).bomb_id(args.id);
    if let Some(selection) = args.phases {
        builder = builder.selection(selection);
    }
    if let Some(phrase) = &args.secret_phrase {
        builder = builder.secret_phrase(phrase.clone());
    }

    let bomb = builder.build()?;
    let yaml = serde_yaml::to_string(&bomb)?;
    tracing::info!(seed, bomb_id = bomb.bomb_id, phases = %bomb.describe(), "bomb built");

    match &args.output {
        Some(path) => std::fs::write(path, yaml)?,
        None => std::io::stdout().lock().write_all(yaml.as_bytes())?,
    }
    Ok(())
}
