//! Integration tests for the `airlift` CLI binary.
//!
//! These tests validate argument parsing, help output, document
//! handling, and exit codes — all without a live dashboard. Documents
//! that stop at the gate (unknown class, static verification failures,
//! reserved-only) never open a connection, so a dead base URL is fine.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `airlift` binary with env isolation.
///
/// Clears all `AIRLIFT_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn airlift_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("airlift");
    cmd.env("HOME", "/tmp/airlift-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/airlift-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("AIRLIFT_PROFILE")
        .env_remove("AIRLIFT_BASE_URL")
        .env_remove("AIRLIFT_API_KEY")
        .env_remove("AIRLIFT_INSECURE")
        .env_remove("AIRLIFT_TIMEOUT");
    cmd
}

/// Write a document to a temp file, returning the guard and its path.
fn temp_doc(contents: &str) -> (tempfile::NamedTempFile, String) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    let path = file.path().display().to_string();
    (file, path)
}

/// Flags for an offline run: the URL is unroutable, but gate-only
/// documents never dial it.
const OFFLINE_FLAGS: [&str; 4] = ["--base-url", "http://127.0.0.1:1", "--api-key", "test-key"];

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = airlift_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = String::from_utf8_lossy(&output.stderr).to_string()
        + &String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    airlift_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("access-point")
            .and(predicate::str::contains("apply"))
            .and(predicate::str::contains("verify")),
    );
}

#[test]
fn test_version_flag() {
    airlift_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("airlift"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    airlift_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    airlift_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_apply_without_dashboard_config_fails() {
    let (_guard, path) = temp_doc("steps:\n  - noop\n");
    airlift_cmd()
        .args(["apply", &path])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No dashboard configured"));
}

#[test]
fn test_unknown_profile_is_an_error() {
    let (_guard, path) = temp_doc("steps:\n  - noop\n");
    airlift_cmd()
        .args(["apply", "--profile", "lab", &path])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("lab"));
}

// ── Document errors ─────────────────────────────────────────────────

#[test]
fn test_missing_document_file() {
    airlift_cmd()
        .args(&OFFLINE_FLAGS)
        .args(["verify", "/nonexistent/airlift-doc.yaml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn test_malformed_yaml_document() {
    let (_guard, path) = temp_doc("cisco: [unbalanced\n");
    airlift_cmd()
        .args(&OFFLINE_FLAGS)
        .args(["verify", &path])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not valid YAML"));
}

// ── Gate behavior ───────────────────────────────────────────────────

#[test]
fn test_reserved_only_document_is_clean_success() {
    let (_guard, path) = temp_doc("steps:\n  - bring up guest wifi\n");
    airlift_cmd()
        .args(&OFFLINE_FLAGS)
        .args(["verify", &path])
        .assert()
        .success();

    airlift_cmd()
        .args(&OFFLINE_FLAGS)
        .args(["apply", &path])
        .assert()
        .success();
}

#[test]
fn test_unknown_device_class_fails_verification() {
    let (_guard, path) = temp_doc("unknownvendor:\n  SSID: X\n");
    airlift_cmd()
        .args(&OFFLINE_FLAGS)
        .args(["verify", &path])
        .assert()
        .code(5)
        .stdout(predicate::str::contains("Unknown device class"))
        .stderr(predicate::str::contains("failed verification"));
}

#[test]
fn test_unknown_device_class_apply_reports_nothing_applied() {
    let (_guard, path) = temp_doc("unknownvendor:\n  SSID: X\n");
    airlift_cmd()
        .args(&OFFLINE_FLAGS)
        .args(["apply", &path])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("No sections were applied"));
}

#[test]
fn test_psk_security_without_key_is_rejected() {
    let (_guard, path) = temp_doc(
        "cisco:\n  SSID: Guest\n  security: wpa2\n  networkID: N_1\n",
    );
    airlift_cmd()
        .args(&OFFLINE_FLAGS)
        .args(["verify", &path])
        .assert()
        .code(5)
        .stdout(predicate::str::contains("requires"));
}

#[test]
fn test_valid_static_section_passes_verification() {
    let (_guard, path) = temp_doc(
        "cisco:\n  SSID: Guest\n  security: wpa2\n  key: abc123\n  networkID: N_1\n",
    );
    airlift_cmd()
        .args(&OFFLINE_FLAGS)
        .args(["verify", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("verified"));
}

#[test]
fn test_quiet_suppresses_report_output() {
    let (_guard, path) = temp_doc(
        "cisco:\n  SSID: Guest\n  security: wpa2\n  key: abc123\n  networkID: N_1\n",
    );
    airlift_cmd()
        .args(&OFFLINE_FLAGS)
        .args(["--quiet", "verify", &path])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
