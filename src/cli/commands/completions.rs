//! Shell completion generation

use clap::CommandFactory;

use crate::cli::args::{Cli, CompletionsArgs, Shell};

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => Self::Bash,
            Shell::Zsh => Self::Zsh,
            Shell::Fish => Self::Fish,
            Shell::PowerShell => Self::PowerShell,
            Shell::Elvish => Self::Elvish,
        }
    }
}

/// Completion script for `shell`.
#[must_use]
pub fn render(shell: Shell) -> Vec<u8> {
    let mut script = Vec::new();
    clap_complete::generate(
        clap_complete::Shell::from(shell),
        &mut Cli::command(),
        "bomblab",
        &mut script,
    );
    script
}

/// Print a shell completion script to stdout.
pub fn run(args: &CompletionsArgs) {
    use std::io::Write;

    let _ = std::io::stdout().lock().write_all(&render(args.shell));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_names_subcommands() {
        let script = String::from_utf8(render(Shell::Bash)).unwrap();
        for sub in ["run", "solve", "build", "validate"] {
            assert!(script.contains(sub), "missing {sub}");
        }
    }
}
