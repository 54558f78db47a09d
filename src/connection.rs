//! Scanner adapters. None of these speak OBD2; they hand the session an
//! already-decoded VIN and list of fault codes.

use std::path::PathBuf;

use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::diagnostic::ScanType;
use crate::error::AcquisitionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReadout {
    pub vin: String,
    pub device_name: String,
    pub fault_codes: Vec<String>,
}

/// What the session asks the scanner for. A verification rescan carries the
/// vehicle it is verifying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub scan_type: ScanType,
    pub vin: Option<String>,
    pub device_name: Option<String>,
    pub demo: bool,
}

impl ScanRequest {
    pub fn initial(demo: bool) -> Self {
        ScanRequest {
            scan_type: ScanType::Initial,
            vin: None,
            device_name: None,
            demo,
        }
    }

    pub fn post_repair(vin: impl Into<String>, device_name: Option<String>, demo: bool) -> Self {
        ScanRequest {
            scan_type: ScanType::PostRepair,
            vin: Some(vin.into()),
            device_name,
            demo,
        }
    }
}

pub trait Scanner {
    fn acquire(&mut self, request: &ScanRequest) -> Result<ScanReadout, AcquisitionError>;
}

pub const DEMO_DEVICE_NAME: &str = "BMW X5 (Demo)";
const DEMO_VIN_PREFIX: &str = "WBA8E110";
const DEMO_INITIAL_CODES: &[&str] = &["P0300", "P0171", "B0001"];
const DEMO_REPAIRED_CODES: &[&str] = &["P0171"];
const VIN_CHARS: &[u8] = b"0123456789ABCDEFGHJKLMNPRSTUVWXYZ";

/// Simulated adapter with a random VIN and a fixed fault pattern. A rescan
/// clears everything but the lean-mixture code about half the time.
pub struct DemoScanner<R = ThreadRng> {
    rng: R,
}

impl DemoScanner<ThreadRng> {
    pub fn new() -> Self {
        DemoScanner { rng: rand::rng() }
    }
}

impl Default for DemoScanner<ThreadRng> {
    fn default() -> Self {
        DemoScanner::new()
    }
}

impl<R: Rng> DemoScanner<R> {
    pub fn with_rng(rng: R) -> Self {
        DemoScanner { rng }
    }

    fn random_vin(&mut self) -> String {
        let mut vin = String::from(DEMO_VIN_PREFIX);
        for _ in 0..(17 - DEMO_VIN_PREFIX.len()) {
            let idx = self.rng.random_range(0..VIN_CHARS.len());
            vin.push(VIN_CHARS[idx] as char);
        }
        vin
    }

    /// One idle-engine sensor sample.
    pub fn live_sample(&mut self) -> LiveData {
        LiveData {
            rpm: self.rng.random_range(750..800),
            speed: 0,
            coolant_temp: 92.0,
            load: 12.0 + self.rng.random_range(0.0..3.0),
            voltage: 14.1 + self.rng.random_range(0.0..0.2),
            intake_temp: 35.0 + self.rng.random_range(0.0..2.0),
            throttle: 14.5,
            maf: 2.8 + self.rng.random_range(0.0..0.4),
            timing: 12.0 + self.rng.random_range(0.0..4.0),
            fuel_trim_short: -2.0 + self.rng.random_range(0.0..4.0),
            fuel_trim_long: 3.2,
            fuel_status: "Closed Loop".to_string(),
        }
    }
}

impl<R: Rng> Scanner for DemoScanner<R> {
    fn acquire(&mut self, request: &ScanRequest) -> Result<ScanReadout, AcquisitionError> {
        let (vin, codes) = match request.scan_type {
            ScanType::Initial => (self.random_vin(), DEMO_INITIAL_CODES),
            ScanType::PostRepair => {
                let vin = match &request.vin {
                    Some(vin) => vin.clone(),
                    None => self.random_vin(),
                };
                let codes = if self.rng.random_bool(0.5) {
                    DEMO_REPAIRED_CODES
                } else {
                    DEMO_INITIAL_CODES
                };
                (vin, codes)
            }
        };
        Ok(ScanReadout {
            vin,
            device_name: request
                .device_name
                .clone()
                .unwrap_or_else(|| DEMO_DEVICE_NAME.to_string()),
            fault_codes: codes.iter().map(|c| c.to_string()).collect(),
        })
    }
}

/// Replays a readout captured to a JSON file.
#[derive(Debug, Clone)]
pub struct ReplayScanner {
    path: PathBuf,
}

impl ReplayScanner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ReplayScanner { path: path.into() }
    }
}

impl Scanner for ReplayScanner {
    fn acquire(&mut self, _request: &ScanRequest) -> Result<ScanReadout, AcquisitionError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            AcquisitionError::ConnectionFailed(format!("{}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            AcquisitionError::ConnectionFailed(format!("{}: {e}", self.path.display()))
        })
    }
}

/// Stand-in for a machine without a Bluetooth adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdapterScanner;

impl Scanner for NoAdapterScanner {
    fn acquire(&mut self, _request: &ScanRequest) -> Result<ScanReadout, AcquisitionError> {
        Err(AcquisitionError::ConnectionFailed(
            "Bluetooth not supported".to_string(),
        ))
    }
}

/// The user closed the device picker without choosing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelledScanner;

impl Scanner for CancelledScanner {
    fn acquire(&mut self, _request: &ScanRequest) -> Result<ScanReadout, AcquisitionError> {
        Err(AcquisitionError::Cancelled)
    }
}

/// Fixed readout, returned on every scan.
#[derive(Debug, Clone)]
pub struct StaticScanner {
    readout: ScanReadout,
}

impl StaticScanner {
    pub fn new(readout: ScanReadout) -> Self {
        StaticScanner { readout }
    }
}

impl Scanner for StaticScanner {
    fn acquire(&mut self, _request: &ScanRequest) -> Result<ScanReadout, AcquisitionError> {
        Ok(self.readout.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveData {
    pub rpm: u32,
    pub speed: u32,
    pub coolant_temp: f64,
    pub load: f64,
    pub voltage: f64,
    pub intake_temp: f64,
    pub throttle: f64,
    pub maf: f64,
    pub timing: f64,
    pub fuel_trim_short: f64,
    pub fuel_trim_long: f64,
    pub fuel_status: String,
}
