//! CLI integration tests.
//!
//! These tests invoke the pulsetrack binary and verify command output and
//! exit codes.

#![allow(deprecated)] // cargo_bin is deprecated but still works

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a Command for the pulsetrack binary.
fn pulsetrack() -> Command {
    let mut cmd = Command::cargo_bin("pulsetrack").unwrap();
    cmd.env_remove("PULSETRACK_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Helper to create a temp directory with .pulsetrack/config.json whose
/// sources respond immediately.
fn setup_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join(".pulsetrack");
    fs::create_dir_all(&data_dir).unwrap();

    let config = r#"{
        "heart_rate": { "delay_ms": 0, "min_bpm": 70, "max_bpm": 70 },
        "steps": { "delay_ms": 0, "min_count": 5000, "max_count": 5000 },
        "logging": { "level": "warn" }
    }"#;
    fs::write(data_dir.join("config.json"), config).unwrap();

    temp
}

// ============================================================================
// Basic CLI tests
// ============================================================================

#[test]
fn test_help_flag() {
    pulsetrack()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("fetch"));
}

#[test]
fn test_version_flag() {
    pulsetrack()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pulsetrack"));
}

#[test]
fn test_unknown_command() {
    pulsetrack().arg("sync").assert().failure();
}

// ============================================================================
// Fetch command tests
// ============================================================================

#[test]
fn test_fetch_prints_both_metrics() {
    let temp = setup_project();

    pulsetrack()
        .current_dir(temp.path())
        .arg("fetch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Heart Rate"))
        .stdout(predicate::str::contains("70 BPM"))
        .stdout(predicate::str::contains("5000 steps"));
}

#[test]
fn test_fetch_lists_heart_rate_first() {
    let temp = setup_project();

    let output = pulsetrack()
        .current_dir(temp.path())
        .arg("fetch")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let heart = stdout.find("Heart Rate").unwrap();
    let steps = stdout.find("Steps").unwrap();
    assert!(heart < steps);
}

#[test]
fn test_fetch_json() {
    let temp = setup_project();

    let output = pulsetrack()
        .current_dir(temp.path())
        .args(["fetch", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let metrics = report["metrics"].as_array().unwrap();
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[0]["name"], "Heart Rate");
    assert_eq!(metrics[0]["value"], "70 BPM");
    assert_eq!(metrics[1]["name"], "Steps");
    assert_eq!(metrics[1]["value"], "5000 steps");
    assert_ne!(metrics[0]["id"], metrics[1]["id"]);
    assert!(report["error"].is_null());
    assert!(report["updated_at"].is_string());
}

#[test]
fn test_fetch_with_explicit_config_path() {
    let temp = setup_project();
    let config_path = temp.path().join(".pulsetrack/config.json");
    let elsewhere = TempDir::new().unwrap();

    pulsetrack()
        .current_dir(elsewhere.path())
        .arg("--config")
        .arg(&config_path)
        .arg("fetch")
        .assert()
        .success()
        .stdout(predicate::str::contains("70 BPM"));
}

#[test]
fn test_invalid_config_file() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join(".pulsetrack");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("config.json"), "{ not json").unwrap();

    pulsetrack()
        .current_dir(temp.path())
        .arg("fetch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_inverted_range_in_config_file() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join(".pulsetrack");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(
        data_dir.join("config.json"),
        r#"{ "steps": { "min_count": 10, "max_count": 5 } }"#,
    )
    .unwrap();

    pulsetrack()
        .current_dir(temp.path())
        .arg("fetch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("steps.min_count"));
}

// ============================================================================
// Config command tests
// ============================================================================

#[test]
fn test_config_show() {
    let temp = setup_project();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pulsetrack config"))
        .stdout(predicate::str::contains("heart_rate"))
        .stdout(predicate::str::contains("tick_rate_ms"));
}

#[test]
fn test_config_show_section() {
    let temp = setup_project();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "show", "--section", "steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_count"))
        .stdout(predicate::str::contains("min_bpm").not());
}

#[test]
fn test_config_show_unknown_section() {
    let temp = setup_project();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "show", "--section", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown section"));
}

#[test]
fn test_config_get() {
    let temp = setup_project();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "get", "steps.min_count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5000\n"));
}

#[test]
fn test_config_get_default_value() {
    let temp = setup_project();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "get", "dashboard.tick_rate_ms"])
        .assert()
        .success()
        .stdout(predicate::str::diff("100\n"));
}

#[test]
fn test_config_get_unknown_key() {
    let temp = setup_project();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "get", "nonexistent.key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_set() {
    let temp = setup_project();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "set", "heart_rate.max_bpm", "120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("70 → 120"));

    let saved = fs::read_to_string(temp.path().join(".pulsetrack/config.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved["heart_rate"]["max_bpm"], 120);
}

#[test]
fn test_config_set_invalid_value() {
    let temp = setup_project();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "set", "steps.delay_ms", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for delay_ms"));
}

#[test]
fn test_config_set_rejects_inverted_range() {
    let temp = setup_project();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "set", "steps.max_count", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "get", "steps.max_count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5000\n"));
}

#[test]
fn test_config_set_creates_file() {
    let temp = TempDir::new().unwrap();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "set", "dashboard.load_on_start", "no"])
        .assert()
        .success();

    assert!(temp.path().join(".pulsetrack/config.json").exists());
}

#[test]
fn test_config_keys() {
    pulsetrack()
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("heart_rate.delay_ms"))
        .stdout(predicate::str::contains("logging.level"));
}

#[test]
fn test_config_set_repairs_inverted_range() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join(".pulsetrack");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(
        data_dir.join("config.json"),
        r#"{ "steps": { "delay_ms": 0, "min_count": 10, "max_count": 5 } }"#,
    )
    .unwrap();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "show", "--section", "steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("min_count"));

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "get", "steps.min_count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("10\n"));

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "set", "steps.min_count", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10 → 1"));

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "get", "steps.min_count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

#[test]
fn test_config_set_keeps_rejecting_while_still_inverted() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join(".pulsetrack");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(
        data_dir.join("config.json"),
        r#"{ "steps": { "min_count": 10, "max_count": 5 } }"#,
    )
    .unwrap();

    pulsetrack()
        .current_dir(temp.path())
        .args(["config", "set", "steps.delay_ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
