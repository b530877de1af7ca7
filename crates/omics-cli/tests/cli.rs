//! Runs the `omicsguard` binary and checks the stdout/stderr/exit contract.

use std::path::Path;
use std::process::{Command, Output};

const ID_SCHEMA: &str =
    r#"{"type":"object","required":["id"],"properties":{"id":{"type":"string"}}}"#;

fn omicsguard(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_omicsguard"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn omicsguard")
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn valid_document_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.json", ID_SCHEMA);
    let data = write(dir.path(), "data.json", r#"{"id": "PROBAND001"}"#);

    let output = omicsguard(&["--schema", &schema, "--data", &data]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "true\n");
}

#[test]
fn invalid_document_exits_one_with_violations_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.json", ID_SCHEMA);
    let data = write(dir.path(), "data.json", r#"{"id": 123}"#);

    let output = omicsguard(&["--schema", &schema, "--data", &data]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "false\n");
    assert!(stderr.contains(" - [id] "), "{stderr}");
}

#[test]
fn unreadable_schema_exits_one_without_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "data.json", "{}");

    let output = omicsguard(&["--schema", "{\n  \"type\": [", "--data", &data]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr.contains("could not load schema"), "{stderr}");
}

#[test]
fn missing_data_argument_is_a_usage_error() {
    let output = omicsguard(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
