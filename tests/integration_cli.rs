//! Integration tests for `fourten` start-up failures

use std::process::{Command, Stdio};

fn fourten(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_fourten"))
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to run fourten")
}

#[test]
fn test_missing_config_is_reported_plainly() {
    let output = fourten(&["--config", "/nonexistent/fourten.toml"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Cannot read config file '/nonexistent/fourten.toml'"));
    assert!(!stderr.contains("Io {"));
}

#[test]
fn test_bad_seed_is_reported_plainly() {
    let output = fourten(&["--seed", "abc"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Invalid seed: abc"));
    assert!(!stderr.contains('"'));
}

#[test]
fn test_shipped_corpus_plays_to_farewell() {
    let corpus = concat!(env!("CARGO_MANIFEST_DIR"), "/puzzles/puzzles.json");
    let output = fourten(&["--corpus", corpus, "--no-color", "--seed", "1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Puzzle 1 #"));
    assert!(stdout.trim_end().ends_with("Thanks for playing!"));
}
