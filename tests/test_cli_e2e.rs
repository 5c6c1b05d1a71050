mod common;

use common::{answers, spawn_command, spawn_with_env, spawn_with_stdin, stdout, write_bomb};

use bomblab::error::ExitCode;

// ============================================================================
// version / completions
// ============================================================================

#[test]
fn version_human() {
    let output = spawn_command(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("bomblab "));
}

#[test]
fn version_json() {
    let output = spawn_command(&["version", "--format", "json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["name"], "bomblab");
    assert_eq!(parsed["phase_letters"].as_array().map(Vec::len), Some(6));
}

#[test]
fn completions_bash() {
    let output = spawn_command(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("bomblab"));
}

// ============================================================================
// build / validate / solve
// ============================================================================

#[test]
fn build_is_reproducible_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("built.yaml");
    let path_str = path.to_str().unwrap();

    let args = ["build", "--phases", "bacbca", "--seed", "42", "--id", "9"];
    let first = spawn_command(&args);
    assert!(first.status.success());
    let second = spawn_command(&args);
    assert_eq!(first.stdout, second.stdout);

    let mut with_output = args.to_vec();
    with_output.extend(["-o", path_str]);
    assert!(spawn_command(&with_output).status.success());
    assert_eq!(std::fs::read(&path).unwrap(), first.stdout);

    let output = spawn_command(&["validate", path_str]);
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(stdout(&output).contains(": ok"));
}

#[test]
fn build_rejects_bad_selection() {
    let output = spawn_command(&["build", "--phases", "abcabc"]);
    assert_eq!(output.status.code(), Some(ExitCode::USAGE_ERROR));
}

#[test]
fn unknown_command_is_usage_error() {
    let output = spawn_command(&["detonate"]);
    assert_eq!(output.status.code(), Some(ExitCode::USAGE_ERROR));
    let output = spawn_command(&["--help"]);
    assert!(output.status.success());
}

#[test]
fn validate_reports_every_file_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let (good, _) = write_bomb(dir.path(), "aaaaaa", 1);
    let bad = dir.path().join("bad.yaml");
    std::fs::write(&bad, "bomb_id: 1\nphases: []\n").unwrap();

    let output = spawn_command(&[
        "validate",
        "--format",
        "json",
        good.to_str().unwrap(),
        bad.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(ExitCode::CONFIG_ERROR));
    let reports: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(reports[0]["valid"], true);
    assert_eq!(reports[1]["valid"], false);
    assert!(!reports[1]["errors"].as_array().unwrap().is_empty());
}

#[test]
fn solve_prints_one_line_per_phase() {
    let dir = tempfile::tempdir().unwrap();
    let (path, bomb) = write_bomb(dir.path(), "cbbaba", 3);
    let output = spawn_command(&["solve", "--bomb", path.to_str().unwrap()]);
    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(String::from).collect();
    assert_eq!(lines, answers(&bomb));
}

// ============================================================================
// run
// ============================================================================

#[test]
fn solution_file_defuses_bomb() {
    let dir = tempfile::tempdir().unwrap();
    let (path, _) = write_bomb(dir.path(), "abacac", 5);
    let solution = dir.path().join("solution.txt");

    let output = spawn_command(&[
        "solve",
        "--bomb",
        path.to_str().unwrap(),
        "-o",
        solution.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let output = spawn_command(&[
        "run",
        "--bomb",
        path.to_str().unwrap(),
        solution.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Phase 1 defused."));
    assert!(text.contains("Congratulations! You've defused the bomb!"));
    assert!(!text.contains("Curses"));
}

#[test]
fn secret_solution_unlocks_secret_phase() {
    let dir = tempfile::tempdir().unwrap();
    let (path, _) = write_bomb(dir.path(), "bbcbca", 8);
    let solution = dir.path().join("solution.txt");

    assert!(
        spawn_command(&[
            "solve",
            "--bomb",
            path.to_str().unwrap(),
            "--with-secret",
            "-o",
            solution.to_str().unwrap(),
        ])
        .status
        .success()
    );

    let output = spawn_command(&[
        "run",
        "--bomb",
        path.to_str().unwrap(),
        solution.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Curses, you've found the secret phase!"));
    assert!(text.contains("Wow! You've defused the secret stage!"));
}

#[test]
fn partial_file_then_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let (path, bomb) = write_bomb(dir.path(), "aaaaaa", 13);
    let lines = answers(&bomb);
    let partial = dir.path().join("partial.txt");
    std::fs::write(&partial, lines[..3].join("\n")).unwrap();

    let output = spawn_with_stdin(
        &[
            "run",
            "--bomb",
            path.to_str().unwrap(),
            partial.to_str().unwrap(),
        ],
        &lines[3..].join("\n"),
    );
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(stdout(&output).contains("Congratulations!"));
}

#[test]
fn wrong_answer_explodes() {
    let dir = tempfile::tempdir().unwrap();
    let (path, bomb) = write_bomb(dir.path(), "aaaaaa", 2);
    let mut lines = answers(&bomb);
    lines[1] = "1 2 4 8 16 33".to_string();
    let events = dir.path().join("events.jsonl");

    let output = spawn_with_stdin(
        &[
            "run",
            "--bomb",
            path.to_str().unwrap(),
            "--events",
            events.to_str().unwrap(),
        ],
        &lines.join("\n"),
    );
    assert_eq!(output.status.code(), Some(ExitCode::EXPLODED));
    let text = stdout(&output);
    assert!(text.contains("BOOM!!!\nThe bomb has blown up."));
    assert!(!text.contains("That's number 2."));

    let events: Vec<serde_json::Value> = std::fs::read_to_string(&events)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let last = events.last().unwrap();
    assert_eq!(last["type"], "BombExploded");
    assert_eq!(last["phase"], 2);
    assert_eq!(last["notification"], "21:exploded:2:1 2 4 8 16 33");
}

#[test]
fn stdin_running_out_is_premature_eof() {
    let dir = tempfile::tempdir().unwrap();
    let (path, bomb) = write_bomb(dir.path(), "aaaaaa", 4);
    let lines = answers(&bomb);

    let output = spawn_with_stdin(
        &["run", "--bomb", path.to_str().unwrap()],
        &lines[..2].join("\n"),
    );
    assert_eq!(output.status.code(), Some(ExitCode::PREMATURE_EOF));
    assert!(stdout(&output).contains("Error: Premature EOF on stdin"));
}

#[test]
fn grading_partial_file_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let (path, bomb) = write_bomb(dir.path(), "aaaaaa", 6);
    let partial = dir.path().join("partial.txt");
    std::fs::write(&partial, answers(&bomb)[..4].join("\n")).unwrap();

    let output = spawn_command(&[
        "run",
        "--bomb",
        path.to_str().unwrap(),
        "--grade",
        partial.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(!stdout(&output).contains("Congratulations"));
}

#[test]
fn any_grade_bomb_value_turns_grading_on() {
    let dir = tempfile::tempdir().unwrap();
    let (path, bomb) = write_bomb(dir.path(), "aaaaaa", 6);
    let partial = dir.path().join("partial.txt");
    std::fs::write(&partial, answers(&bomb)[..4].join("\n")).unwrap();
    let args = ["run", "--bomb", path.to_str().unwrap(), partial.to_str().unwrap()];

    let output = spawn_command(&args);
    assert_eq!(output.status.code(), Some(ExitCode::PREMATURE_EOF));

    for value in ["0", "", "false"] {
        let output = spawn_with_env(&args, "", &[("GRADE_BOMB", value)]);
        assert!(output.status.success(), "GRADE_BOMB={value:?}");
    }
}

#[test]
fn missing_bomb_file_is_config_error() {
    let output = spawn_command(&["run", "--bomb", "/nonexistent/bomb.yaml"]);
    assert_eq!(output.status.code(), Some(ExitCode::CONFIG_ERROR));
    assert!(String::from_utf8_lossy(&output.stderr).contains("file not found"));
}
