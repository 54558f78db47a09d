use chrono::{TimeZone, Utc};
use obd_doctor::comparison::compare;
use obd_doctor::diagnostic::{
    DiagnosticResult, FaultCode, RecordId, ScanType, VehicleIdentity,
};
use obd_doctor::history::History;
use obd_doctor::i18n::Language;
use obd_doctor::insight::{explain_all, LocalInsight};
use obd_doctor::reporter::cli::CliReporter;
use obd_doctor::reporter::json::JsonReporter;
use obd_doctor::reporter::{score_only, share_text, Reporter};

const VIN: &str = "WBA8E1105K0000001";

fn make_record(id: u64, codes: &[&str], scan_type: ScanType) -> DiagnosticResult {
    DiagnosticResult::new(
        RecordId::from_millis(id),
        VIN,
        VehicleIdentity {
            make: "BMW".to_string(),
            model: "X5".to_string(),
            year: 2019,
        },
        Utc.timestamp_millis_opt(id as i64).unwrap(),
        codes
            .iter()
            .map(|c| FaultCode::from_code(c, Language::Ru))
            .collect(),
        scan_type,
    )
}

#[test]
fn test_json_output_structure() {
    let record = make_record(1_000, &["P0300", "P0171"], ScanType::Initial);
    let output = JsonReporter.format(&record, None, Language::En);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["record"]["healthScore"].as_u64().unwrap(), 60);
    assert_eq!(json["health"]["critical_penalty"].as_u64().unwrap(), 25);
    assert_eq!(json["health"]["warning_penalty"].as_u64().unwrap(), 10);
    assert_eq!(json["health"]["label"], "Fair");
    assert_eq!(
        json["record"]["errors"][1]["description"],
        "System too lean (Bank 1)"
    );
    assert!(json["comparison"].is_null());
}

#[test]
fn test_json_output_with_comparison() {
    let before = make_record(1_000, &["P0300", "P0171"], ScanType::Initial);
    let after = make_record(2_000, &["P0171"], ScanType::PostRepair);
    let cmp = compare(&before, &after).unwrap();

    let output = JsonReporter.format(&after, Some(&cmp), Language::En);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["comparison"]["before_id"], "1000");
    assert_eq!(json["comparison"]["resolved_codes"][0], "P0300");
    assert_eq!(json["comparison"]["persisting_codes"][0], "P0171");
    assert_eq!(json["comparison"]["health_improvement"].as_i64().unwrap(), 30);
}

#[test]
fn test_json_history() {
    let mut history = History::new(10);
    history.append(make_record(1_000, &[], ScanType::Initial));
    history.append(make_record(2_000, &["P0420"], ScanType::Initial));
    let output = JsonReporter.format_history(&history, 2, Language::En);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["monthly_count"].as_u64().unwrap(), 2);
    assert_eq!(json["max_entries"].as_u64().unwrap(), 10);
    assert_eq!(json["records"][0]["id"], "2000");
}

#[test]
fn test_json_insights() {
    let faults = vec![FaultCode::from_code("P0420", Language::En)];
    let insights = explain_all(&LocalInsight, &faults, Language::En);
    let output = JsonReporter.format_insights(&insights, Language::En);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json[0]["code"], "P0420");
    assert_eq!(json[0]["estimatedRepairCost"], "300 - 1500 AZN");
}

#[test]
fn test_cli_output_mentions_codes_and_comparison() {
    let before = make_record(1_000, &["P0300", "P0171"], ScanType::Initial);
    let after = make_record(2_000, &["P0171", "B0001"], ScanType::PostRepair);
    let cmp = compare(&before, &after).unwrap();

    let output = CliReporter.format(&after, Some(&cmp), Language::En);
    assert!(output.contains("P0171"));
    assert!(output.contains("B0001"));
    assert!(output.contains(VIN));
    assert!(output.contains("Resolved"));
    assert!(output.contains("Driver frontal airbag deployment control"));
}

#[test]
fn test_cli_output_without_errors() {
    let record = make_record(1_000, &[], ScanType::Initial);
    let output = CliReporter.format(&record, None, Language::Az);
    assert!(output.contains("Xəta aşkar edilmədi"));
}

#[test]
fn test_share_text() {
    let record = make_record(1_767_225_600_000, &["P0300", "P0171"], ScanType::Initial);
    let text = share_text(&record, Language::En);
    assert!(text.contains("Vehicle: BMW X5"));
    assert!(text.contains(&format!("VIN: {VIN}")));
    assert!(text.contains("Health: 60%"));
    assert!(text.contains("P0300: Random/multiple cylinder misfire detected (Critical)"));
    assert!(text.contains("P0171: System too lean (Bank 1) (Warning)"));
    assert!(text.contains("Date: 2026-01-01 00:00"));
}

#[test]
fn test_share_text_no_errors() {
    let record = make_record(1_000, &[], ScanType::Initial);
    let text = share_text(&record, Language::Ru);
    assert!(text.contains("Ошибок не обнаружено"));
    assert!(text.contains("100%"));
}

#[test]
fn test_score_only_output() {
    let record = make_record(1_000, &["P0420"], ScanType::Initial);
    assert_eq!(score_only(&record), "90\n");
}
