use std::path::Path;

use chrono::{DateTime, Datelike, TimeZone};

use crate::diagnostic::{DiagnosticResult, RecordId, ScanType};
use crate::error::HistoryError;

pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Past scans, newest first, never longer than `max_entries`.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<DiagnosticResult>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        History::new(DEFAULT_MAX_ENTRIES)
    }
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        if max_entries == 0 {
            tracing::warn!("history cap of 0 raised to 1");
        }
        History {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Builds a history from records already ordered newest first.
    pub fn from_records(records: Vec<DiagnosticResult>, max_entries: usize) -> Self {
        let mut history = History::new(max_entries);
        history.entries = records;
        history.entries.truncate(history.max_entries);
        history
    }

    pub fn append(&mut self, record: DiagnosticResult) {
        self.entries.insert(0, record);
        if self.entries.len() > self.max_entries {
            let evicted = self.entries.len() - self.max_entries;
            self.entries.truncate(self.max_entries);
            tracing::debug!(evicted, "history full, dropped oldest records");
        }
    }

    pub fn remove(&mut self, id: RecordId) -> Option<DiagnosticResult> {
        let pos = self.entries.iter().position(|r| r.id() == id)?;
        Some(self.entries.remove(pos))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Records created in the same calendar month and year as `now`, judged
    /// in `now`'s time zone.
    pub fn monthly_count<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> usize {
        let tz = now.timezone();
        self.entries
            .iter()
            .filter_map(|r| r.id().created_at())
            .map(|created| created.with_timezone(&tz))
            .filter(|created| created.year() == now.year() && created.month() == now.month())
            .count()
    }

    pub fn find_latest_by_vin_and_type(
        &self,
        vin: &str,
        scan_type: ScanType,
    ) -> Option<&DiagnosticResult> {
        self.entries
            .iter()
            .find(|r| r.vin() == vin && r.scan_type() == scan_type)
    }

    pub fn get(&self, id: RecordId) -> Option<&DiagnosticResult> {
        self.entries.iter().find(|r| r.id() == id)
    }

    pub fn latest(&self) -> Option<&DiagnosticResult> {
        self.entries.first()
    }

    /// Highest id ever handed out among the retained records.
    pub fn latest_id(&self) -> Option<RecordId> {
        self.entries.iter().map(|r| r.id()).max()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Reads the history file. Anything unreadable counts as an empty
    /// history.
    pub fn load(path: &Path, max_entries: usize) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return History::new(max_entries);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read history, starting empty");
                return History::new(max_entries);
            }
        };
        match serde_json::from_str::<Vec<DiagnosticResult>>(&contents) {
            Ok(records) => History::from_records(records, max_entries),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse history, starting empty");
                History::new(max_entries)
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
