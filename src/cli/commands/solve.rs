//! `bomblab solve`
//!
//! Writes one accepted line per phase, in order: the file a grader keeps
//! next to each bomb.

use std::io::Write;

use crate::cli::args::SolveArgs;
use crate::config::{BombConfig, BombLoader};
use crate::error::BombError;
use crate::phase::Phase;

/// Index of the line that carries the secret passphrase.
const PASSPHRASE_LINE: usize = 3;

/// Answer lines for `bomb`.
///
/// With `with_secret`, the passphrase is appended to the phase 4 line and
/// the secret phase's answer follows the sixth line.
///
/// # Errors
///
/// Returns [`BombError::Solve`] if a variant has no answer; validated
/// bombs never do.
pub fn solution(bomb: &BombConfig, with_secret: bool) -> Result<Vec<String>, BombError> {
    let mut lines = bomb
        .phases
        .iter()
        .map(|variant| variant.solve().map_err(BombError::from))
        .collect::<Result<Vec<_>, _>>()?;

    if with_secret {
        if let Some(line) = lines.get_mut(PASSPHRASE_LINE) {
            line.push(' ');
            line.push_str(&bomb.secret_phrase);
        }
        lines.push(bomb.secret_phase().solve()?);
    }
    Ok(lines)
}

/// Print or save the solution of a bomb.
///
/// # Errors
///
/// Returns a config error if the bomb does not load, a solve error if a
/// phase has no answer, or an I/O error if the output cannot be written.
pub fn run(args: &SolveArgs) -> Result<(), BombError> {
    let loaded = BombLoader::with_defaults().load(&args.bomb)?;
    let lines = solution(&loaded.bomb, args.with_secret)?;
    let mut text = lines.join("\n");
    text.push('\n');

    match &args.output {
        Some(path) => {
            std::fs::write(path, text)?;
            tracing::info!(output = %path.display(), lines = lines.len(), "solution written");
        }
        None => std::io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}
