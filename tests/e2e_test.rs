use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn obd_doctor(dir: &Path, args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_obd-doctor"))
        .arg("--config")
        .arg(dir)
        .args(["--lang", "en"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should run");
    assert!(
        output.status.success(),
        "obd-doctor {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_e2e_scan_repair_verify_cycle() {
    let dir = TempDir::new().unwrap();
    let initial = dir.path().join("initial.json");
    let repaired = dir.path().join("repaired.json");
    std::fs::write(
        &initial,
        r#"{"vin": "JTDKB20U093000001", "deviceName": "Vgate iCar", "faultCodes": ["P0300", "P0171", "P0420"]}"#,
    )
    .unwrap();
    std::fs::write(
        &repaired,
        r#"{"vin": "JTDKB20U093000001", "deviceName": "Vgate iCar", "faultCodes": ["P0420", "P0562"]}"#,
    )
    .unwrap();

    let scan = json(&obd_doctor(
        dir.path(),
        &["--format", "json", "scan", "--from", initial.to_str().unwrap()],
    ));
    assert_eq!(scan["record"]["make"], "Toyota");
    assert_eq!(scan["record"]["healthScore"], 55);

    let verify = json(&obd_doctor(
        dir.path(),
        &["--format", "json", "verify", "--from", repaired.to_str().unwrap()],
    ));
    assert_eq!(verify["record"]["scanType"], "post-repair");
    assert_eq!(verify["comparison"]["resolved_codes"], serde_json::json!(["P0300", "P0171"]));
    assert_eq!(verify["comparison"]["persisting_codes"], serde_json::json!(["P0420"]));
    assert_eq!(verify["comparison"]["new_codes"], serde_json::json!(["P0562"]));
    // 55 -> 85
    assert_eq!(verify["comparison"]["health_improvement"], 30);

    let history = json(&obd_doctor(dir.path(), &["--format", "json", "history", "list"]));
    let records = history["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["scanType"], "post-repair");
    assert_eq!(history["monthly_count"], 2);

    let share = obd_doctor(dir.path(), &["share"]);
    let text = String::from_utf8_lossy(&share.stdout);
    assert!(text.contains("Health: 85%"));

    let id = records[1]["id"].as_str().unwrap().to_string();
    obd_doctor(dir.path(), &["history", "delete", &id]);
    let stats = obd_doctor(dir.path(), &["history", "stats"]);
    assert_eq!(String::from_utf8_lossy(&stats.stdout), "1\n");

    obd_doctor(dir.path(), &["history", "clear"]);
    let stats = obd_doctor(dir.path(), &["history", "stats"]);
    assert_eq!(String::from_utf8_lossy(&stats.stdout), "0\n");
}

#[test]
fn test_e2e_demo_cycle() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("obd-doctor.toml"),
        "[history]\npath = \"data/scans.json\"\n",
    )
    .unwrap();

    obd_doctor(dir.path(), &["scan", "--demo"]);
    let verify = json(&obd_doctor(
        dir.path(),
        &["--format", "json", "verify", "--demo"],
    ));
    let resolved = verify["comparison"]["resolved_codes"].as_array().unwrap();
    assert!(resolved.is_empty() || resolved.len() == 2);
    assert!(dir.path().join("data/scans.json").exists());

    let chat = obd_doctor(dir.path(), &["chat", "how is my car?"]);
    assert!(String::from_utf8_lossy(&chat.stdout).contains("BMW"));
}

#[test]
fn test_e2e_malformed_history_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".obd-doctor")).unwrap();
    std::fs::write(dir.path().join(".obd-doctor/history.json"), "garbage").unwrap();

    let stats = obd_doctor(dir.path(), &["history", "stats"]);
    assert_eq!(String::from_utf8_lossy(&stats.stdout), "0\n");
}

#[test]
fn test_e2e_live_samples() {
    let dir = TempDir::new().unwrap();
    let live = obd_doctor(dir.path(), &["live", "--samples", "3"]);
    let lines: Vec<_> = String::from_utf8_lossy(&live.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(lines.len(), 3);
    let sample: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(sample["fuelStatus"], "Closed Loop");
}
