use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be monotonic")
        .as_nanos();
    path.push(format!("xlint-smoke-{prefix}-{}-{nanos}", std::process::id()));
    fs::create_dir_all(&path).expect("must create temp dir");
    path
}

fn xlint() -> Command {
    let mut command = Command::cargo_bin("xlint").expect("binary must build");
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn valid_document_exits_zero() {
    let root = temp_dir("valid");
    let api = root.join("api.yaml");
    fs::write(&api, "openapi: 3.1.0\ninfo:\n  title: x\n  version: 1\n").expect("must write");

    xlint()
        .arg("validate")
        .arg(&api)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 document(s) checked: 0 error(s), 0 warning(s)"));
}

#[test]
fn missing_extension_exits_one() {
    let root = temp_dir("invalid");
    let api = root.join("api.yaml");
    let config = root.join("xlint.yaml");
    fs::write(&api, "openapi: 3.1.0\ninfo:\n  title: x\n  version: 1\n").expect("must write");
    fs::write(
        &config,
        "customExtensions:\n  - name: x-required\n    location: root\n    type: string\n",
    )
    .expect("must write");

    xlint()
        .arg("validate")
        .arg(&api)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "error [x-required] Missing required custom extension: x-required",
        ));
}

#[test]
fn missing_input_exits_two_with_message() {
    let root = temp_dir("missing");
    xlint()
        .arg("validate")
        .arg(root.join("absent.yaml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    let root = temp_dir("verbose");
    let api = root.join("api.json");
    fs::write(&api, r#"{"openapi":"3.1.0","info":{"title":"x","version":"1"}}"#).expect("must write");

    xlint()
        .args(["--verbose", "validate", "--format", "json"])
        .arg(&api)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("validating document"));
}

#[test]
fn rules_check_reports_bad_names() {
    let root = temp_dir("rules");
    let config = root.join("xlint.yaml");
    fs::write(
        &config,
        "customExtensions:\n  - name: owner\n    location: tags\n    type: string\n",
    )
    .expect("must write");

    xlint()
        .args(["rules", "check", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("must start with `x-`"));
}
