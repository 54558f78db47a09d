use chrono::{TimeZone, Utc};
use obd_doctor::diagnostic::{
    DiagnosticResult, FaultCode, RecordId, ScanType, Severity, System, VehicleIdentity,
};
use obd_doctor::i18n::Language;

fn make_record(codes: &[&str], lang: Language) -> DiagnosticResult {
    DiagnosticResult::new(
        RecordId::from_millis(1_767_225_600_000),
        "WBA8E1105K0000001",
        VehicleIdentity {
            make: "BMW".to_string(),
            model: "X5".to_string(),
            year: 2019,
        },
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        codes.iter().map(|c| FaultCode::from_code(c, lang)).collect(),
        ScanType::Initial,
    )
}

#[test]
fn test_fault_from_known_code() {
    let f = FaultCode::from_code("C0034", Language::Ru);
    assert_eq!(f.code, "C0034");
    assert_eq!(f.system, System::Brakes);
    assert_eq!(f.severity, Severity::High);
    assert_eq!(f.description, "Датчик скорости правого переднего колеса");
}

#[test]
fn test_fault_from_unknown_code() {
    let f = FaultCode::from_code(" u0100 ", Language::En);
    assert_eq!(f.code, "U0100");
    assert_eq!(f.system, System::Engine);
    assert_eq!(f.severity, Severity::Medium);
    assert_eq!(f.description, "Technical system error");
}

#[test]
fn test_health_score_derived_from_errors() {
    assert_eq!(make_record(&[], Language::En).health_score(), 100);
    assert_eq!(make_record(&["P0420"], Language::En).health_score(), 90);
    assert_eq!(make_record(&["P0300", "B0001"], Language::En).health_score(), 30);
}

#[test]
fn test_relocalized_is_a_projection() {
    let original = make_record(&["P0300", "U0100"], Language::Ru);
    let az = original.relocalized(Language::Az);

    assert_eq!(az.errors()[0].description, "Çoxsaylı alışdırma buraxılışları aşkar edildi");
    // unknown codes keep whatever description they had
    assert_eq!(az.errors()[1].description, original.errors()[1].description);
    assert_eq!(
        original.errors()[0].description,
        "Обнаружены множественные пропуски зажигания"
    );
    assert_eq!(az.id(), original.id());
    assert_eq!(az.health_score(), original.health_score());
    assert_eq!(az.errors()[0].severity, original.errors()[0].severity);
}

#[test]
fn test_vehicle_name() {
    let record = make_record(&[], Language::En);
    assert_eq!(record.vehicle_name(), "BMW X5");
}

#[test]
fn test_record_id_from_datetime() {
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let id = RecordId::from_datetime(at);
    assert_eq!(id.millis(), 1_767_225_600_000);
    assert_eq!(id.created_at(), Some(at));
    assert_eq!(id.to_string(), "1767225600000");
    assert_eq!("1767225600000".parse::<RecordId>().unwrap(), id);
    assert_eq!(id.next(), Some(RecordId::from_millis(1_767_225_600_001)));
}

#[test]
fn test_record_id_next_at_the_top_of_the_range() {
    let top = RecordId::from_millis(u64::MAX);
    assert_eq!(top.next(), None);
    assert_eq!(top.created_at(), None);
}

#[test]
fn test_deserialized_record_recomputes_health_score() {
    let json = r#"{
        "id": "1767225600000",
        "vin": "WBA8E1105K0000001",
        "year": 2019,
        "make": "BMW",
        "timestamp": "2026-01-01T00:00:00Z",
        "errors": [
            {"code": "P0420", "description": "cat", "system": "EXHAUST", "severity": "low"}
        ],
        "healthScore": 100,
        "scanType": "initial"
    }"#;
    let record: DiagnosticResult = serde_json::from_str(json).unwrap();
    assert_eq!(record.errors().len(), 1);
    assert_eq!(record.health_score(), 95);
    assert_eq!(record.model(), None);
}

#[test]
fn test_deserialized_record_without_score() {
    let json = r#"{
        "id": "1767225600000",
        "vin": "WBA8E1105K0000001",
        "year": 2019,
        "timestamp": "2026-01-01T00:00:00Z",
        "errors": [],
        "scanType": "post-repair"
    }"#;
    let record: DiagnosticResult = serde_json::from_str(json).unwrap();
    assert_eq!(record.health_score(), 100);
    assert_eq!(record.scan_type(), ScanType::PostRepair);
}

#[test]
fn test_serialized_record_reads_back_equal() {
    let record = make_record(&["P0300", "C0034"], Language::En);
    let json = serde_json::to_string(&record).unwrap();
    let back: DiagnosticResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
    assert_eq!(back.health_score(), 30);
}

#[test]
fn test_display() {
    assert_eq!(format!("{}", Severity::High), "high");
    assert_eq!(format!("{}", System::Airbags), "AIRBAGS");
    assert_eq!(format!("{}", ScanType::PostRepair), "post-repair");
    assert!(System::Engine.is_critical());
    assert!(System::Brakes.is_critical());
    assert!(!System::Fuel.is_critical());
}

#[test]
fn test_record_serialization() {
    let record = make_record(&["P0171"], Language::En);
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"id\":\"1767225600000\""));
    assert!(json.contains("\"healthScore\":90"));
    assert!(json.contains("\"scanType\":\"initial\""));
    assert!(json.contains("\"system\":\"FUEL\""));
    assert!(json.contains("\"severity\":\"medium\""));

    let back: DiagnosticResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
