use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};

use crate::comparison::{compare, ComparisonResult};
use crate::connection::{ScanReadout, ScanRequest, Scanner};
use crate::diagnostic::{DiagnosticResult, FaultCode, RecordId, ScanType, VehicleIdentity};
use crate::error::{HistoryError, ScanError};
use crate::history::History;
use crate::i18n::Language;
use crate::vin::{identity_from_device, VinDecoder};

pub struct ScanOutcome {
    pub record: DiagnosticResult,
    /// Present for a post-repair scan when history holds an initial scan of
    /// the same VIN.
    pub comparison: Option<ComparisonResult>,
    /// Whether the VIN decoder identified the vehicle.
    pub vin_decoded: bool,
}

/// Runs scans against a scanner, scores them and keeps the history.
pub struct DiagnosticSession<D> {
    history: History,
    decoder: D,
    language: Language,
    fallback_year: Option<i32>,
    history_path: Option<PathBuf>,
}

impl<D: VinDecoder> DiagnosticSession<D> {
    pub fn new(history: History, decoder: D, language: Language) -> Self {
        DiagnosticSession {
            history,
            decoder,
            language,
            fallback_year: None,
            history_path: None,
        }
    }

    /// Opens the history file at `path`. Scans save back to it as they are
    /// recorded; other edits are saved by `persist`.
    pub fn open(path: &Path, max_entries: usize, decoder: D, language: Language) -> Self {
        let mut session = DiagnosticSession::new(History::load(path, max_entries), decoder, language);
        session.history_path = Some(path.to_path_buf());
        session
    }

    /// Year used when the VIN cannot be decoded. Defaults to the scan year.
    pub fn with_fallback_year(mut self, year: Option<i32>) -> Self {
        self.fallback_year = year;
        self
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Edits made here reach the history file only through `persist`.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn scan(
        &mut self,
        scanner: &mut dyn Scanner,
        request: &ScanRequest,
    ) -> Result<ScanOutcome, ScanError> {
        self.scan_at(scanner, request, Utc::now())
    }

    pub fn scan_at(
        &mut self,
        scanner: &mut dyn Scanner,
        request: &ScanRequest,
        now: DateTime<Utc>,
    ) -> Result<ScanOutcome, ScanError> {
        let readout = scanner.acquire(request)?;
        tracing::debug!(
            vin = %readout.vin,
            device = %readout.device_name,
            codes = readout.fault_codes.len(),
            scan_type = %request.scan_type,
            "scanner readout received"
        );

        let fallback_year = self.fallback_year.unwrap_or_else(|| now.year());
        let (identity, vin_decoded) = match self.decoder.decode(&readout.vin, self.language) {
            Ok(identity) => (identity, true),
            Err(e) => {
                tracing::warn!(vin = %readout.vin, error = %e, "VIN not decoded, using device name");
                (
                    identity_from_device(&readout.device_name, fallback_year, self.language),
                    false,
                )
            }
        };

        let record = build_record(
            &readout,
            request.scan_type,
            identity,
            now,
            &self.history,
            self.language,
        );

        let comparison = match record.scan_type() {
            ScanType::PostRepair => self
                .history
                .find_latest_by_vin_and_type(record.vin(), ScanType::Initial)
                .and_then(|before| compare(before, &record)),
            ScanType::Initial => None,
        };

        tracing::info!(
            id = %record.id(),
            vin = %record.vin(),
            health = record.health_score(),
            faults = record.errors().len(),
            "scan recorded"
        );
        self.history.append(record.clone());
        self.persist()?;

        Ok(ScanOutcome {
            record,
            comparison,
            vin_decoded,
        })
    }

    /// Identity for a VIN without scanning. Nothing is added to history.
    pub fn lookup_vehicle(&self, vin: &str, now: DateTime<Utc>) -> VehicleIdentity {
        let fallback_year = self.fallback_year.unwrap_or_else(|| now.year());
        self.decoder
            .decode(vin, self.language)
            .unwrap_or_else(|e| {
                tracing::debug!(vin, error = %e, "VIN lookup fell back to placeholder");
                identity_from_device("", fallback_year, self.language)
            })
    }

    /// Writes history back to the file it was opened from, if any.
    pub fn persist(&self) -> Result<(), HistoryError> {
        match &self.history_path {
            Some(path) => self.history.save(path),
            None => Ok(()),
        }
    }
}

/// Turns a readout into a scored record. The id is the creation time in
/// milliseconds, moved up a millisecond at a time only while it is already
/// taken in `history`.
pub fn build_record(
    readout: &ScanReadout,
    scan_type: ScanType,
    identity: VehicleIdentity,
    now: DateTime<Utc>,
    history: &History,
    lang: Language,
) -> DiagnosticResult {
    let id = unused_id(RecordId::from_datetime(now), history);

    let errors: Vec<FaultCode> = readout
        .fault_codes
        .iter()
        .map(|code| FaultCode::from_code(code, lang))
        .collect();

    DiagnosticResult::new(id, readout.vin.trim(), identity, now, errors, scan_type)
}

fn unused_id(mut id: RecordId, history: &History) -> RecordId {
    while history.get(id).is_some() {
        match id.next() {
            Some(next) => id = next,
            None => {
                tracing::warn!(%id, "no free record id above a stored one, reusing it");
                break;
            }
        }
    }
    id
}
