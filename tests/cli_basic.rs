//! Integration tests for argument handling and fatal configuration errors.
//!
//! None of these reach the network: every case either stops in clap or
//! aborts while loading configs.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

/// Helper: get a Command for the `m3u8sync` binary with a clean environment.
fn m3u8sync() -> Command {
    let mut cmd = Command::cargo_bin("m3u8sync").expect("binary 'm3u8sync' should be built");
    cmd.env_remove("ENDPOINT")
        .env_remove("FOLDER_NAME")
        .env_remove("RUST_LOG");
    cmd
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_lists_options() {
    m3u8sync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: m3u8sync"))
        .stdout(predicate::str::contains("<CONFIG>..."))
        .stdout(predicate::str::contains("--endpoint"))
        .stdout(predicate::str::contains("--folder"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--retries"))
        .stdout(predicate::str::contains("--retry-delay"))
        .stdout(predicate::str::contains("--fail-on-error"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("ENDPOINT"))
        .stdout(predicate::str::contains("FOLDER_NAME"));
}

#[test]
fn version_flag_shows_semver() {
    m3u8sync()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^m3u8sync \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_config_is_usage_error() {
    m3u8sync()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("<CONFIG>"));
}

#[test]
fn zero_retries_rejected() {
    m3u8sync()
        .args(["--retries", "0", "streams.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--retries"));
}

#[test]
fn unknown_format_rejected() {
    m3u8sync()
        .args(["--format", "yaml", "streams.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("possible values"));
}

// ─── Fatal configuration errors ──────────────────────────────────────────────

#[test]
fn missing_config_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    m3u8sync()
        .current_dir(dir.path())
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config file not found"))
        .stderr(predicate::str::contains("does-not-exist.json"));
}

#[test]
fn malformed_config_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("broken.json");
    fs::write(&config, r#"[{"id": "abc""#).unwrap();

    m3u8sync()
        .current_dir(dir.path())
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn bad_second_config_aborts_before_any_record() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    fs::write(&good, r#"[{"id": "abc", "slug": "chan1"}]"#).unwrap();
    let out = dir.path().join("out");

    m3u8sync()
        .args(["--endpoint", "http://127.0.0.1:9", "--folder"])
        .arg(&out)
        .arg(&good)
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Processing").not());

    assert!(!out.exists());
}

#[test]
fn invalid_endpoint_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("streams.json");
    fs::write(&config, "[]").unwrap();

    m3u8sync()
        .args(["--endpoint", "ftp://example.com"])
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid endpoint"));
}

#[test]
fn empty_config_reports_zero_counts() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("streams.json");
    fs::write(&config, "[]").unwrap();

    m3u8sync()
        .current_dir(dir.path())
        .args(["--endpoint", "http://127.0.0.1:9", "--fail-on-error"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 0 stream(s)"))
        .stdout(predicate::str::contains("Done → 0 success / 0 failed"));
}
