//! `bomblab` - binary bomb puzzles

use std::io::Write;
use std::time::Duration;

use clap::Parser;

use bomblab::cli::args::Cli;
use bomblab::cli::{commands, usage_exit_code};
use bomblab::error::{BombError, ExitCode, InputError};
use bomblab::observability::init_logging;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(usage_exit_code(&err));
        }
    };

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    if cli.command.arms_bomb() {
        tokio::spawn(interrupt_handler());
    }

    let result = tokio::task::spawn_blocking(move || commands::dispatch(cli)).await;

    match result {
        Ok(Ok(())) => std::process::exit(ExitCode::SUCCESS),
        Ok(Err(e)) => {
            // The driver has already told the user what happened.
            if !matches!(
                e,
                BombError::Exploded { .. } | BombError::Input(InputError::PrematureEof { .. })
            ) {
                eprintln!("error: {e}");
            }
            std::process::exit(e.exit_code());
        }
        Err(join) => {
            eprintln!("error: {join}");
            std::process::exit(ExitCode::ERROR);
        }
    }
}

/// Answers Ctrl-C while a bomb is live, then exits.
async fn interrupt_handler() {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    println!("So you think you can stop the bomb with ctrl-c, do you?");
    tokio::time::sleep(Duration::from_secs(3)).await;
    print!("Well...");
    let _ = std::io::stdout().flush();
    tokio::time::sleep(Duration::from_secs(1)).await;
    println!("OK. :-)");
    std::process::exit(ExitCode::INTERRUPTED);
}
