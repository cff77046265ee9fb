//! CLI tests for the `keyhole` binary.
//!
//! Spawns the binary against temp-directory configs and verifies exit codes
//! for found, not-found, and invalid-config runs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use keyhole::exit_codes;
use keyhole::io::config::{OracleConfig, SolverConfig, write_config};

fn write_local_config(dir: &Path, correct_key: &str, latency_ms: u64) {
    let cfg = SolverConfig {
        search_limit: None,
        oracle: OracleConfig {
            local_key: correct_key.to_string(),
            local_latency_ms: latency_ms,
            ..OracleConfig::default()
        },
    };
    write_config(&dir.join("keyhole.toml"), &cfg).expect("write config");
}

#[test]
fn solve_finds_the_local_key() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_local_config(temp.path(), "zat", 0);

    let output = Command::new(env!("CARGO_BIN_EXE_keyhole"))
        .current_dir(temp.path())
        .args(["solve", "--no-input"])
        .output()
        .expect("keyhole solve");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("A correct key was found."));
    assert!(stdout.contains("'zat'"));
}

#[test]
fn solve_reports_duplicate_key_as_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_local_config(temp.path(), "tt", 0);

    let status = Command::new(env!("CARGO_BIN_EXE_keyhole"))
        .current_dir(temp.path())
        .args(["solve", "--no-input"])
        .status()
        .expect("keyhole solve");

    assert_eq!(status.code(), Some(exit_codes::NOT_FOUND));
}

#[test]
fn solve_honors_the_limit_flag() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_local_config(temp.path(), "zta", 0);

    let status = Command::new(env!("CARGO_BIN_EXE_keyhole"))
        .current_dir(temp.path())
        .args(["solve", "--no-input", "--limit", "1"])
        .status()
        .expect("keyhole solve");

    assert_eq!(status.code(), Some(exit_codes::NOT_FOUND));
}

#[test]
fn solve_rejects_a_malformed_correct_key() {
    let temp = tempfile::tempdir().expect("tempdir");
    // Structurally valid TOML; the key itself fails oracle validation.
    std::fs::write(
        temp.path().join("keyhole.toml"),
        "[oracle]\nmode = \"local\"\nlocal_key = \"$3 2\"\nlocal_latency_ms = 0\n",
    )
    .expect("write config");

    let status = Command::new(env!("CARGO_BIN_EXE_keyhole"))
        .current_dir(temp.path())
        .args(["solve", "--no-input"])
        .status()
        .expect("keyhole solve");

    assert_eq!(status.code(), Some(exit_codes::INVALID));
}

#[test]
fn stop_command_ends_an_interactive_search() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_local_config(temp.path(), "zta", 100);

    let mut child = Command::new(env!("CARGO_BIN_EXE_keyhole"))
        .current_dir(temp.path())
        .arg("solve")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .expect("spawn keyhole solve");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"s\n")
        .expect("write stop command");

    let status = child.wait().expect("wait");
    assert_eq!(status.code(), Some(exit_codes::NOT_FOUND));
}

#[test]
fn init_writes_a_default_config_once() {
    let temp = tempfile::tempdir().expect("tempdir");

    let status = Command::new(env!("CARGO_BIN_EXE_keyhole"))
        .current_dir(temp.path())
        .arg("init")
        .status()
        .expect("keyhole init");
    assert_eq!(status.code(), Some(exit_codes::OK));
    assert!(temp.path().join("keyhole.toml").exists());

    let status = Command::new(env!("CARGO_BIN_EXE_keyhole"))
        .current_dir(temp.path())
        .arg("init")
        .status()
        .expect("keyhole init again");
    assert_eq!(status.code(), Some(exit_codes::INVALID));
}
