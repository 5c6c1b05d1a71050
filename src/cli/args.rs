//! CLI argument definitions
//!
//! All Clap derive structs for `bomblab` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::PhaseSelection;
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Binary bomb: six input puzzles, one wrong line and it explodes.
#[derive(Parser, Debug)]
#[command(name = "bomblab", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "BOMBLAB_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true, env = "BOMBLAB_LOG_FORMAT")]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a bomb, reading answers from a file and then stdin.
    Run(RunArgs),

    /// Print an answer line for every phase of a bomb.
    Solve(SolveArgs),

    /// Generate a randomized bomb file.
    Build(BuildArgs),

    /// Validate bomb files without running them.
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

/// Environment variable whose presence alone turns grading on.
pub const GRADE_ENV: &str = "GRADE_BOMB";

impl Commands {
    /// Whether this command runs a live bomb that owns Ctrl-C.
    #[must_use]
    pub const fn arms_bomb(&self) -> bool {
        matches!(self, Self::Run(_))
    }
}

/// Arguments for `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the bomb file.
    #[arg(short, long, env = "BOMBLAB_BOMB")]
    pub bomb: PathBuf,

    /// Answer file read before stdin.
    pub input: Option<PathBuf>,

    /// Exit successfully when the answer file runs out.
    ///
    /// Also on whenever `GRADE_BOMB` is set, whatever its value.
    #[arg(long)]
    pub grade: bool,

    /// Append result events as JSON lines to this file.
    #[arg(long, env = "BOMBLAB_EVENTS")]
    pub events: Option<PathBuf>,
}

impl RunArgs {
    /// Whether running out of answers in the file ends the run cleanly.
    #[must_use]
    pub fn grading(&self) -> bool {
        self.grade || std::env::var_os(GRADE_ENV).is_some()
    }
}

/// Arguments for `solve`.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Path to the bomb file.
    #[arg(short, long, env = "BOMBLAB_BOMB")]
    pub bomb: PathBuf,

    /// Also unlock and answer the secret phase.
    #[arg(long)]
    pub with_secret: bool,

    /// Write the answers to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// One variant letter per phase (e.g. `abacac`); random when omitted.
    #[arg(short, long)]
    pub phases: Option<PhaseSelection>,

    /// RNG seed; random when omitted.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Bomb identifier.
    #[arg(long, default_value_t = 0)]
    pub id: u32,

    /// Word that unlocks the secret phase.
    #[arg(long)]
    pub secret_phrase: Option<String>,

    /// Write the bomb file here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Bomb files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_with_answer_file() {
        let cli =
            Cli::try_parse_from(["bomblab", "run", "--bomb", "bomb.yaml", "answers.txt"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("Expected RunArgs");
        };
        assert_eq!(args.input, Some(PathBuf::from("answers.txt")));
    }

    #[test]
    fn test_grade_flag() {
        let cli = Cli::try_parse_from(["bomblab", "run", "--bomb", "b.yaml", "--grade", "a.txt"]);
        assert!(cli.is_ok(), "Failed to parse: {cli:?}");
        let Commands::Run(args) = cli.unwrap().command else {
            panic!("Expected RunArgs");
        };
        assert!(args.grade);
    }

    #[test]
    fn test_only_run_arms_bomb() {
        let run = Cli::try_parse_from(["bomblab", "run", "--bomb", "b.yaml"]).unwrap();
        assert!(run.command.arms_bomb());
        for args in [
            &["bomblab", "solve", "--bomb", "b.yaml"][..],
            &["bomblab", "build"],
            &["bomblab", "validate", "b.yaml"],
            &["bomblab", "version"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert!(!cli.command.arms_bomb(), "{args:?}");
        }
    }

    #[test]
    fn test_build_parses_selection() {
        let cli =
            Cli::try_parse_from(["bomblab", "build", "--phases", "abacac", "--seed", "7"]).unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("Expected BuildArgs");
        };
        assert_eq!(args.phases.map(|p| p.to_string()), Some("abacac".to_string()));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.id, 0);
    }

    #[test]
    fn test_build_rejects_bad_selection() {
        let cli = Cli::try_parse_from(["bomblab", "build", "--phases", "zzzzzz"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_validate_requires_files() {
        assert!(Cli::try_parse_from(["bomblab", "validate"]).is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["bomblab", "-vvv", "version"]).unwrap();
        assert_eq!(cli.verbose, 3);
        assert!(!cli.quiet);
        assert_eq!(cli.log_format, LogFormat::Human);
    }

    #[test]
    fn test_json_log_format() {
        let cli = Cli::try_parse_from(["bomblab", "version", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_help_output() {
        let err = Cli::try_parse_from(["bomblab", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let err = Cli::try_parse_from(["bomblab", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
