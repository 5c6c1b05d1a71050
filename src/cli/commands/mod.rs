//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod build;
pub mod completions;
pub mod run;
pub mod solve;
pub mod validate;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::BombError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// Every handler is synchronous; the binary calls this on a blocking
/// thread so the async runtime stays free for signal handling.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), BombError> {
    match cli.command {
        Commands::Run(args) => run::run(&args).map(|_| ()),
        Commands::Solve(args) => solve::run(&args),
        Commands::Build(args) => build::run(&args),
        Commands::Validate(args) => validate::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
