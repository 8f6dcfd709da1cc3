//! Integration tests for the `tidings` CLI binary.
//!
//! These run the real binary against recorded event files and check the
//! wire text, rendered output, and exit codes.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `tidings` binary with env isolation.
///
/// Clears all `TIDINGS_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn tidings_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("tidings");
    cmd.env("HOME", "/tmp/tidings-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/tidings-cli-test-nonexistent")
        .env_remove("TIDINGS_OUTPUT")
        .env_remove("TIDINGS_TOAST__DURATION_MS")
        .env_remove("TIDINGS_BACKEND__EVENT_CHANNEL")
        .env_remove("TIDINGS_DEFAULTS__OUTPUT")
        .env_remove("TIDINGS_DEFAULTS__COLOR")
        .env_remove("TIDINGS_LOG__FILTER")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn events_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

const ALL_CHANNELS: &str = r#"{"type":"allChannels","payload":[{"id":1,"url":"https://a.example/feed","title":"Alpha","date":"2024-01-01","subscribed":true}]}"#;
const NEW_CHANNEL: &str = r#"{"type":"newChannel","payload":{"id":2,"url":"https://b.example/feed","title":"Beta","date":"2024-02-01","subscribed":true}}"#;
const NEW_ITEMS: &str = r#"{"type":"newItems","payload":[{"id":10,"feed_id":2,"read":false,"date":"2024-02-02","content":"","title":"Hello"}]}"#;

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = tidings_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Expected 'Usage' in output:\n{stderr}");
}

#[test]
fn test_help_flag() {
    tidings_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("emit")
            .and(predicate::str::contains("replay"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    tidings_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tidings"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    tidings_cmd().arg("frobnicate").assert().code(2);
}

// ── Emit ────────────────────────────────────────────────────────────

#[test]
fn test_emit_subscribe_writes_wire_line() {
    tidings_cmd()
        .args(["emit", "subscribe", "https://x"])
        .assert()
        .success()
        .stdout("{\"cmd\":\"subscribe\",\"url\":\"https://x\"}\n");
}

#[test]
fn test_emit_items_uses_camel_case_kind() {
    tidings_cmd()
        .args(["emit", "items", "4"])
        .assert()
        .success()
        .stdout("{\"cmd\":\"getItemsByFeed\",\"id\":4}\n");
}

#[test]
fn test_emit_rejects_non_numeric_id() {
    tidings_cmd()
        .args(["emit", "unsubscribe", "abc"])
        .assert()
        .code(2);
}

// ── Replay ──────────────────────────────────────────────────────────

#[test]
fn test_replay_json_output() {
    let file = events_file(&[ALL_CHANNELS, NEW_CHANNEL, NEW_ITEMS]);
    let output = tidings_cmd()
        .args(["replay", "-o", "json"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["applied"], 3);
    assert_eq!(summary["skipped"], 0);
    assert_eq!(summary["channels"][0]["title"], "Beta");
    assert_eq!(summary["channels"][1]["title"], "Alpha");
    assert_eq!(summary["items"][0]["id"], 10);
}

#[test]
fn test_replay_table_output() {
    let file = events_file(&[ALL_CHANNELS, NEW_CHANNEL]);
    tidings_cmd()
        .arg("replay")
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Alpha")
                .and(predicate::str::contains("Beta"))
                .and(predicate::str::contains("Subscribed")),
        );
}

#[test]
fn test_replay_reads_stdin() {
    tidings_cmd()
        .args(["replay", "-o", "plain", "-"])
        .write_stdin(format!("{ALL_CHANNELS}\n{NEW_CHANNEL}\n"))
        .assert()
        .success()
        .stdout("2\n1\n");
}

#[test]
fn test_replay_open_marks_item() {
    let file = events_file(&[ALL_CHANNELS, NEW_CHANNEL, NEW_ITEMS]);
    let output = tidings_cmd()
        .args(["replay", "-o", "json-compact", "--open", "10"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["open_item"], 10);
}

#[test]
fn test_replay_skips_bad_lines_with_error_toast() {
    let file = events_file(&[ALL_CHANNELS, "not json", r#"{"type":"bogus","payload":1}"#]);
    let output = tidings_cmd()
        .args(["replay", "-o", "json"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["applied"], 1);
    assert_eq!(summary["skipped"], 2);
    assert_eq!(summary["toast"]["error"], true);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unreadable"), "Expected toast on stderr:\n{stderr}");
}

#[test]
fn test_replay_strict_fails_on_bad_line() {
    let file = events_file(&[ALL_CHANNELS, "not json"]);
    tidings_cmd()
        .args(["replay", "--strict"])
        .arg(file.path())
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Line 2"));
}

#[test]
fn test_replay_missing_file_is_io_error() {
    tidings_cmd()
        .args(["replay", "/tmp/tidings-cli-test-nonexistent/events.jsonl"])
        .assert()
        .code(74);
}

#[test]
fn test_backend_error_event_shows_toast() {
    let file = events_file(&[r#"{"type":"error","payload":"feed unreachable"}"#]);
    tidings_cmd()
        .arg("replay")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("feed unreachable"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    tidings_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_defaults() {
    tidings_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("duration_ms = 3500"));
}

#[test]
fn test_invalid_toast_duration_from_env() {
    tidings_cmd()
        .env("TIDINGS_TOAST__DURATION_MS", "0")
        .args(["emit", "channels"])
        .assert()
        .code(1);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    tidings_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}
