//! Diagnostic logging for bomb runs.
//!
//! The bomb talks to its player on stdout, so every log line goes to
//! stderr and nothing here may print to stdout. Verbosity raises only the
//! `bomblab` target; dependencies stay at `warn` unless
//! `BOMBLAB_LOG_LEVEL` supplies a full filter.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding a filter that replaces the `-v` flags.
pub const LOG_LEVEL_ENV: &str = "BOMBLAB_LOG_LEVEL";

/// Shape of log lines on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Plain text, colored when stderr is a terminal.
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

/// Level for the `bomblab` target at a given `-v` count.
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directive used when `BOMBLAB_LOG_LEVEL` is unset.
#[must_use]
pub fn default_directive(verbosity: u8) -> String {
    match verbosity {
        0 => "warn".to_string(),
        v => format!("warn,bomblab={}", level_for(v)),
    }
}

/// Whether log lines should carry ANSI colors.
#[must_use]
pub fn use_ansi(color: ColorChoice, stderr_is_terminal: bool, no_color: bool) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stderr_is_terminal && !no_color,
    }
}

/// Installs the global subscriber; later calls are no-ops.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let ansi = use_ansi(
        color,
        std::io::stderr().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
    );

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr);
    let _ = match format {
        LogFormat::Human => builder.with_ansi(ansi).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
