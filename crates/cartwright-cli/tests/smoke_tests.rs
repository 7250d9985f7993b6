//! Smoke tests for the cartwright binary

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/purchase_order.json");

/// The binary with no suite settings leaking in from the environment
fn cartwright() -> Command {
    let mut cmd = Command::cargo_bin("cartwright").expect("cartwright binary should exist");
    for var in [
        "CARTWRIGHT_CONFIG",
        "CARTWRIGHT_BASE_URL",
        "CARTWRIGHT_HISTORY_EMAIL",
        "CARTWRIGHT_HISTORY_PASSWORD",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    cartwright()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_subcommands() {
    cartwright()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check-fixture"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_unknown_scenario_fails() {
    cartwright()
        .args(["run", "--simulate", "--scenario", "refund-flow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refund-flow"));
}

// ============================================================================
// check-fixture
// ============================================================================

#[test]
fn test_check_fixture_on_repo_data() {
    cartwright()
        .args(["--color", "never", "check-fixture", FIXTURE])
        .assert()
        .success()
        .stderr(predicate::str::contains("asha.rao@example.com / ADIDAS ORIGINAL"))
        .stderr(predicate::str::contains("2 valid records"));
}

#[test]
fn test_check_fixture_rejects_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"Product": "ZARA COAT 3"}"#).unwrap();

    cartwright()
        .arg("check-fixture")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_prints_effective_yaml() {
    cartwright()
        .args(["config", "--base-url", "http://localhost:4200/client"])
        .env("CARTWRIGHT_HISTORY_EMAIL", "a@b.c")
        .env("CARTWRIGHT_HISTORY_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:4200/client"))
        .stdout(predicate::str::contains("checkout_country: Indi"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_config_rejects_bad_url() {
    cartwright()
        .args(["config", "--base-url", "localhost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));
}

// ============================================================================
// run --simulate
// ============================================================================

#[test]
fn test_simulated_run_writes_report() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("reports/suite.json");

    cartwright()
        .args(["--color", "never", "run", "--simulate", "--fixture", FIXTURE])
        .args(["--history-email", "asha.rao@example.com"])
        .args(["--history-password", "Secret#123"])
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stderr(predicate::str::contains("PASSED 3 runs"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["outcomes"].as_array().unwrap().len(), 3);
    assert_eq!(json["outcomes"][2]["scenario"], "order-history-check");
    assert_eq!(json["outcomes"][2]["status"], "passed");
}

#[test]
fn test_verbose_run_prints_run_id() {
    cartwright()
        .args(["--color", "never", "-v", "run", "--simulate", "--fixture", FIXTURE])
        .args(["--scenario", "purchase-flow", "--limit", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Run id "));

    cartwright()
        .args(["--color", "never", "run", "--simulate", "--fixture", FIXTURE])
        .args(["--scenario", "purchase-flow", "--limit", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Run id ").not());
}

#[test]
fn test_simulated_run_without_history_credentials_fails() {
    cartwright()
        .args(["--color", "never", "run", "--simulate", "--fixture", FIXTURE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Suite failed: 1 failed, 0 skipped"));
}

#[test]
fn test_simulated_run_with_limit() {
    cartwright()
        .args(["--color", "never", "run", "--simulate", "--fixture", FIXTURE])
        .args(["--scenario", "purchase-flow", "--limit", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("PASSED 1 runs"));
}
