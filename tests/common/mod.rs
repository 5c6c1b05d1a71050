//! Shared integration-test harness for running the `bomblab` binary as a
//! child process.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use bomblab::config::{BombBuilder, BombConfig, PhaseSelection};

/// Runs `bomblab` with the given arguments and no stdin.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Output {
    spawn_with_stdin(args, "")
}

/// Runs `bomblab` with the given arguments, feeding `stdin` and then
/// closing it.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_with_stdin(args: &[&str], stdin: &str) -> Output {
    spawn_with_env(args, stdin, &[])
}

/// Runs `bomblab` like [`spawn_with_stdin`] with extra environment
/// variables set on the child.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_with_env(args: &[&str], stdin: &str, vars: &[(&str, &str)]) -> Output {
    let bin = env!("CARGO_BIN_EXE_bomblab");
    let mut child = Command::new(bin)
        .args(args)
        .arg("--quiet")
        .env_remove("GRADE_BOMB")
        .env_remove("BOMBLAB_BOMB")
        .env_remove("BOMBLAB_EVENTS")
        .envs(vars.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn bomblab");

    child
        .stdin
        .take()
        .expect("stdin not captured")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for bomblab")
}

/// Generates a bomb and writes it into `dir` as `bomb.yaml`.
#[allow(clippy::missing_panics_doc)]
pub fn write_bomb(dir: &Path, selection: &str, seed: u64) -> (PathBuf, BombConfig) {
    let selection: PhaseSelection = selection.parse().expect("bad selection");
    let bomb = BombBuilder::new(seed)
        .selection(selection)
        .bomb_id(21)
        .build()
        .expect("generated bomb should validate");
    let path = dir.join("bomb.yaml");
    std::fs::write(&path, serde_yaml::to_string(&bomb).expect("serialize bomb"))
        .expect("write bomb");
    (path, bomb)
}

/// Answer lines for every ordinary phase.
#[allow(clippy::missing_panics_doc)]
pub fn answers(bomb: &BombConfig) -> Vec<String> {
    bomb.phases
        .iter()
        .map(|v| v.solve().expect("validated bomb has answers"))
        .collect()
}

/// Lossy stdout of a finished process.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
