use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn obd_doctor(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_obd-doctor"))
        .arg("--config")
        .arg(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should run")
}

#[test]
fn test_invalid_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = obd_doctor(dir.path(), &["--format", "jsn", "history", "list"]);

    assert!(
        !output.status.success(),
        "Invalid --format values should cause a non-zero exit"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid value"),
        "stderr should explain invalid format value. stderr: {stderr}"
    );
}

#[test]
fn test_scan_without_adapter_fails() {
    let dir = TempDir::new().unwrap();
    let output = obd_doctor(dir.path(), &["scan"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Bluetooth not supported"), "stderr: {stderr}");
    assert!(!dir.path().join(".obd-doctor/history.json").exists());
}

#[test]
fn test_demo_scan_score_only() {
    let dir = TempDir::new().unwrap();
    let output = obd_doctor(dir.path(), &["scan", "--demo", "--score"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "30\n");
    assert!(dir.path().join(".obd-doctor/history.json").exists());
}

#[test]
fn test_delete_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let output = obd_doctor(dir.path(), &["history", "delete", "12345"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no record with id 12345"), "stderr: {stderr}");
}

#[test]
fn test_vin_lookup() {
    let dir = TempDir::new().unwrap();
    let output = obd_doctor(dir.path(), &["--lang", "en", "vin", "5YJ3E1EA7LF000001"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Tesla Model not specified (2020)\n"
    );
    assert!(!dir.path().join(".obd-doctor/history.json").exists());
}

#[test]
fn test_explain_json() {
    let dir = TempDir::new().unwrap();
    let output = obd_doctor(
        dir.path(),
        &["--lang", "en", "--format", "json", "explain", "P0300", "P9999"],
    );
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["code"], "P0300");
    assert_eq!(json[1]["estimatedRepairCost"], "??? AZN");
}
