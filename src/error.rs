//! Error types for `bomblab`
//!
//! The hierarchy mirrors the process exit codes: configuration problems,
//! I/O problems, a detonated bomb, and premature end of input are all
//! reported through [`BombError`] and mapped by [`BombError::exit_code`].

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `bomblab` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution (bomb defused, solution written, config valid)
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// The bomb exploded
    pub const EXPLODED: i32 = 8;

    /// Input ended before every phase received a line
    pub const PREMATURE_EOF: i32 = 9;

    /// Interrupted by SIGINT (Ctrl+C) during a run
    pub const INTERRUPTED: i32 = 16;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `bomblab` operations.
#[derive(Debug, Error)]
pub enum BombError {
    /// Bomb configuration loading, validation, or generation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A phase rejected its input line
    #[error("phase {phase} exploded: {source}")]
    Exploded {
        /// One-based phase number (7 for the secret phase)
        phase: usize,
        /// Why the phase rejected its input
        #[source]
        source: Explosion,
    },

    /// Input source failure
    #[error(transparent)]
    Input(#[from] InputError),

    /// Solution generator failure
    #[error(transparent)]
    Solve(#[from] SolveError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl BombError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Exploded { .. } => ExitCode::EXPLODED,
            Self::Input(InputError::PrematureEof { .. }) => ExitCode::PREMATURE_EOF,
            Self::Input(InputError::Io(_)) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Solve(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Bomb configuration loading, validation and generation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the bomb file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the bomb file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced bomb file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during bomb validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "phases[4].table")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Validation failure that prevents the bomb from being used
    Error,
    /// Potential issue that does not prevent loading
    Warning,
}

// ============================================================================
// Phase Errors
// ============================================================================

/// Why a phase rejected its input.
///
/// Both kinds detonate the bomb the same way; the distinction only
/// reaches the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Explosion {
    /// Too few tokens or the wrong shape of input
    #[error("structural parse failure: {0}")]
    StructuralParseFailure(String),

    /// Tokens parsed but broke the phase's rule
    #[error("rule violation: {0}")]
    RuleViolation(String),
}

impl Explosion {
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        Self::StructuralParseFailure(msg.into())
    }

    pub(crate) fn rule(msg: impl Into<String>) -> Self {
        Self::RuleViolation(msg.into())
    }
}

// ============================================================================
// Input Errors
// ============================================================================

/// Errors raised by the line source feeding the driver.
#[derive(Debug, Error)]
pub enum InputError {
    /// Input ran dry before the phase could be given a line
    #[error("premature EOF while waiting for phase {phase}")]
    PrematureEof {
        /// One-based phase number that was waiting
        phase: usize,
    },

    /// Underlying read failure
    #[error("input I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Solver Errors
// ============================================================================

/// Solution generator failures.
///
/// A validated bomb always has a solution, so any of these points at a
/// broken table rather than at user input.
#[derive(Debug, Error)]
pub enum SolveError {
    /// A table lookup found no entry for a configured constant
    #[error("no solution for {phase}: {detail}")]
    NoWitness {
        /// Variant name
        phase: &'static str,
        /// What could not be found
        detail: String,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `bomblab` operations.
pub type Result<T> = std::result::Result<T, BombError>;

// ============================================================================
// Tests
// ============================================================================
