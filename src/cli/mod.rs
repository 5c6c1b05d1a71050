//! Command-line interface
//!
//! Argument parsing and command dispatch for the `bomblab` binary.

pub mod args;
pub mod commands;

use crate::error::ExitCode;

/// Exit code for a failed parse: help and version requests succeed,
/// anything else is a usage error.
#[must_use]
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        ExitCode::USAGE_ERROR
    } else {
        ExitCode::SUCCESS
    }
}
