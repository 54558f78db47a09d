//! Error types for the scan pipeline and its collaborators

use thiserror::Error;

/// Reading a VIN and fault codes from the scanner did not produce data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AcquisitionError {
    /// The user dismissed the device picker. Not an error for reporting
    /// purposes.
    #[error("Scan cancelled")]
    Cancelled,

    /// No device, no adapter or unreadable data; the user may retry.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

impl AcquisitionError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AcquisitionError::Cancelled)
    }
}

/// VIN decoding failed. Callers fall back to a local or placeholder identity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid VIN: {0}")]
    InvalidVin(String),

    #[error("Unknown manufacturer for WMI {0}")]
    UnknownManufacturer(String),

    #[error("VIN decoder unavailable: {0}")]
    Unavailable(String),
}

/// Insight or chat service failed. Callers fall back to local text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InsightError {
    #[error("Insight service unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed insight response: {0}")]
    Malformed(String),
}

/// Writing the history file failed. Reads never fail.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to write history: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A scan either produced no data or its record could not be saved.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    /// The record is in memory but the history file was not written.
    #[error(transparent)]
    History(#[from] HistoryError),
}

impl ScanError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ScanError::Acquisition(e) if e.is_cancelled())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}
