//! End-to-end checks of the vz-cli binary

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("vz-cli")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("entities"))
        .stdout(predicate::str::contains("prognosis"));
}

#[test]
fn test_invalid_url_is_rejected() {
    Command::cargo_bin("vz-cli")
        .unwrap()
        .args(["--url", "not-a-url", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url must start with http"));
}

#[test]
fn test_unreachable_api_keeps_configured_url() {
    // Nothing listens on the discard port, so both checks fail.
    Command::cargo_bin("vz-cli")
        .unwrap()
        .args(["--url", "http://127.0.0.1:9/", "--timeout", "2", "--format", "json", "resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""resolved": "http://127.0.0.1:9""#));
}

#[test]
fn test_health_fails_when_unreachable() {
    Command::cargo_bin("vz-cli")
        .unwrap()
        .args(["--url", "http://127.0.0.1:9", "--timeout", "2", "health"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not responding"));
}
