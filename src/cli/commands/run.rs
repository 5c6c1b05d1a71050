//! `bomblab run`
//!
//! Loads a bomb and runs it against an optional answer file followed by
//! stdin.

use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::cli::args::RunArgs;
use crate::config::BombLoader;
use crate::driver::input::InputReader;
use crate::driver::{BombDriver, Outcome};
use crate::error::BombError;
use crate::observability::EventEmitter;

/// Run a bomb.
///
/// # Errors
///
/// Returns a config error if the bomb does not load, an I/O error if the
/// answer file or event file cannot be opened, and otherwise whatever the
/// driver reports (explosion or premature end of input).
pub fn run(args: &RunArgs) -> Result<Outcome, BombError> {
    tracing::info!(bomb = %args.bomb.display(), "loading bomb");
    let loaded = BombLoader::with_defaults().load(&args.bomb)?;

    let stdin: Box<dyn BufRead + Send> = Box::new(BufReader::new(std::io::stdin()));
    let mut input = match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                BombError::Io(std::io::Error::new(
                    e.kind(),
                    format!("couldn't open {}: {e}", path.display()),
                ))
            })?;
            let grade = args.grading();
            tracing::debug!(input = %path.display(), grade, "reading answer file");
            InputReader::with_file(Box::new(BufReader::new(file)), stdin, grade)
        }
        None => InputReader::interactive(stdin),
    };

    let events = match &args.events {
        Some(path) => EventEmitter::from_file(path)?,
        None => EventEmitter::noop(),
    };

    // Unlocked handle: the Ctrl-C handler prints while a read is pending.
    let mut out = std::io::stdout();
    let outcome = BombDriver::new(&loaded.bomb, &mut input, &mut out, &events).run()?;
    tracing::info!(?outcome, events = events.event_count(), "run finished");
    Ok(outcome)
}
