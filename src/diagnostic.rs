use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog;
use crate::i18n::Language;
use crate::scoring::health_score;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultCode {
    pub code: String,
    pub description: String,
    pub system: System,
    pub severity: Severity,
}

impl FaultCode {
    /// Builds a fault from a raw code, taking system, severity and
    /// description from the catalog. Unknown codes are treated as
    /// medium-severity engine faults.
    pub fn from_code(code: &str, lang: Language) -> Self {
        let code = code.trim().to_uppercase();
        match catalog::lookup(&code) {
            Some(entry) => FaultCode {
                description: entry.description(lang).to_string(),
                system: entry.system,
                severity: entry.severity,
                code,
            },
            None => FaultCode {
                description: crate::i18n::Text::TechnicalSystemError
                    .get(lang)
                    .to_string(),
                system: System::Engine,
                severity: Severity::Medium,
                code,
            },
        }
    }

    /// Catalog description in `lang`, or the stored one for unknown codes.
    pub fn localized_description(&self, lang: Language) -> &str {
        catalog::lookup(&self.code)
            .map(|entry| entry.description(lang))
            .unwrap_or(&self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum System {
    Engine,
    Transmission,
    Fuel,
    Brakes,
    Airbags,
    Electronics,
    Exhaust,
}

impl System {
    /// Engine, brakes and airbags carry the critical penalty regardless of
    /// the fault's stated severity.
    pub fn is_critical(&self) -> bool {
        matches!(self, System::Engine | System::Brakes | System::Airbags)
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            System::Engine => write!(f, "ENGINE"),
            System::Transmission => write!(f, "TRANSMISSION"),
            System::Fuel => write!(f, "FUEL"),
            System::Brakes => write!(f, "BRAKES"),
            System::Airbags => write!(f, "AIRBAGS"),
            System::Electronics => write!(f, "ELECTRONICS"),
            System::Exhaust => write!(f, "EXHAUST"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanType {
    Initial,
    PostRepair,
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanType::Initial => write!(f, "initial"),
            ScanType::PostRepair => write!(f, "post-repair"),
        }
    }
}

/// Creation time in Unix milliseconds, stored as a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RecordId(u64);

impl RecordId {
    pub fn from_millis(millis: u64) -> Self {
        RecordId(millis)
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        RecordId(at.timestamp_millis().max(0) as u64)
    }

    pub fn millis(&self) -> u64 {
        self.0
    }

    /// The smallest id strictly greater than `self`, if there is one.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(RecordId)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.0)
            .ok()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0.to_string()
    }
}

impl TryFrom<String> for RecordId {
    type Error = std::num::ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map(RecordId)
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecordId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleIdentity {
    pub make: String,
    pub model: String,
    pub year: i32,
}

/// One completed scan. The health score is always derived from `errors`,
/// including when a record is deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDiagnosticResult")]
pub struct DiagnosticResult {
    id: RecordId,
    vin: String,
    year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    timestamp: DateTime<Utc>,
    errors: Vec<FaultCode>,
    health_score: u32,
    scan_type: ScanType,
}

impl DiagnosticResult {
    pub fn new(
        id: RecordId,
        vin: impl Into<String>,
        vehicle: VehicleIdentity,
        timestamp: DateTime<Utc>,
        errors: Vec<FaultCode>,
        scan_type: ScanType,
    ) -> Self {
        let health_score = health_score(&errors);
        DiagnosticResult {
            id,
            vin: vin.into(),
            year: vehicle.year,
            make: Some(vehicle.make).filter(|m| !m.is_empty()),
            model: Some(vehicle.model).filter(|m| !m.is_empty()),
            timestamp,
            errors,
            health_score,
            scan_type,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn vin(&self) -> &str {
        &self.vin
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn make(&self) -> Option<&str> {
        self.make.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn errors(&self) -> &[FaultCode] {
        &self.errors
    }

    pub fn health_score(&self) -> u32 {
        self.health_score
    }

    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    /// "Make Model" for display, skipping missing parts.
    pub fn vehicle_name(&self) -> String {
        [self.make(), self.model()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A copy with known fault descriptions re-rendered in `lang`.
    pub fn relocalized(&self, lang: Language) -> DiagnosticResult {
        let errors = self
            .errors
            .iter()
            .map(|e| FaultCode {
                description: e.localized_description(lang).to_string(),
                ..e.clone()
            })
            .collect();
        DiagnosticResult {
            errors,
            ..self.clone()
        }
    }
}

/// Wire shape of a stored record. The stored score is only compared
/// against the recomputed one.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDiagnosticResult {
    id: RecordId,
    vin: String,
    year: i32,
    #[serde(default)]
    make: Option<String>,
    #[serde(default)]
    model: Option<String>,
    timestamp: DateTime<Utc>,
    errors: Vec<FaultCode>,
    #[serde(default)]
    health_score: Option<u32>,
    scan_type: ScanType,
}

impl From<RawDiagnosticResult> for DiagnosticResult {
    fn from(raw: RawDiagnosticResult) -> Self {
        let score = health_score(&raw.errors);
        if let Some(stored) = raw.health_score.filter(|stored| *stored != score) {
            tracing::debug!(
                id = %raw.id,
                stored,
                computed = score,
                "stored health score did not match its faults"
            );
        }
        DiagnosticResult {
            id: raw.id,
            vin: raw.vin,
            year: raw.year,
            make: raw.make,
            model: raw.model,
            timestamp: raw.timestamp,
            errors: raw.errors,
            health_score: score,
            scan_type: raw.scan_type,
        }
    }
}
