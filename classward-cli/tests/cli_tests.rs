//! End-to-end tests for the classward binary

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn manifest(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn classward(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_classward"))
        .args(args)
        .env_remove("CLASSWARD_CONFIG")
        .output()
        .unwrap()
}

const VALID: &str = r#"{ "classes": [
    { "name": "Parent", "policy": "strong",
      "members": [ { "name": "f", "kind": "abstract" } ] },
    { "name": "Child", "bases": ["Parent"],
      "members": [ { "name": "f", "kind": "method" } ] } ] }"#;

const SHADOWING: &str = r#"{ "classes": [
    { "name": "Parent", "bases": ["SafeBase"],
      "members": [ { "name": "g", "kind": "method" } ] },
    { "name": "Child", "bases": ["Parent"],
      "members": [ { "name": "g", "kind": "method" } ] },
    { "name": "Other", "bases": ["Parent"],
      "members": [ { "name": "__init__", "kind": "method" } ] } ] }"#;

#[test]
fn check_accepts_valid_manifest() {
    let file = manifest(VALID);
    let output = classward(&["check", file.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 accepted, 0 rejected"));
}

#[test]
fn check_fails_on_rejected_class() {
    let file = manifest(SHADOWING);
    let output = classward(&["check", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Method g is already implemented in class Parent."));
    assert!(stdout.contains("2 accepted, 1 rejected"));
}

#[test]
fn check_json_output() {
    let file = manifest(SHADOWING);
    let output = classward(&[
        "check",
        file.path().to_str().unwrap(),
        "--format",
        "json",
        "--fail-fast",
    ]);
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["accepted"], 1);
    assert_eq!(report["rejected"], 1);
    assert_eq!(report["classes"].as_array().map(Vec::len), Some(2));
    assert_eq!(report["classes"][1]["accepted"], false);
}

#[test]
fn config_file_sets_format() {
    let file = manifest(VALID);
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[output]\nformat = \"json\"").unwrap();

    let output = classward(&[
        "--config",
        config.path().to_str().unwrap(),
        "check",
        file.path().to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["rejected"], 0);
}

#[test]
fn inspect_describes_class() {
    let file = manifest(VALID);
    let output = classward(&[
        "inspect",
        file.path().to_str().unwrap(),
        "Child",
        "--format",
        "json",
    ]);
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["policy"], "strong");
    assert_eq!(summary["mro"], serde_json::json!(["Parent"]));
    assert_eq!(summary["abstract_methods"], serde_json::json!([]));
}

#[test]
fn inspect_rejected_class_fails() {
    let file = manifest(SHADOWING);
    let output = classward(&["inspect", file.path().to_str().unwrap(), "Child"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Class Child was rejected"));
}

#[test]
fn missing_manifest_is_reported() {
    let output = classward(&["check", "/nonexistent/manifest.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read manifest"));
}
