use std::sync::OnceLock;

use regex::Regex;

use crate::catalog;
use crate::diagnostic::VehicleIdentity;
use crate::error::DecodeError;
use crate::i18n::{Language, Text};

/// VIN reported by a scanner that could not read one.
pub const VIN_READING_FAILED: &str = "VIN_READING_FAILED";

fn vin_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").expect("valid VIN regex"))
}

/// 17 characters, digits and capital letters except I, O and Q.
pub fn is_valid_vin(vin: &str) -> bool {
    vin_pattern().is_match(vin)
}

/// Maps a VIN to make, model and year. Implementations may be remote and may
/// fail at any time.
pub trait VinDecoder {
    fn decode(&self, vin: &str, lang: Language) -> Result<VehicleIdentity, DecodeError>;
}

/// Offline decoder keyed by the manufacturer prefix and the model-year
/// character.
#[derive(Debug, Clone)]
pub struct LocalVinDecoder {
    fallback_year: i32,
}

impl LocalVinDecoder {
    pub fn new(fallback_year: i32) -> Self {
        LocalVinDecoder { fallback_year }
    }
}

impl VinDecoder for LocalVinDecoder {
    fn decode(&self, vin: &str, lang: Language) -> Result<VehicleIdentity, DecodeError> {
        let vin = vin.trim();
        if vin == VIN_READING_FAILED || vin.len() < 3 || !vin.is_ascii() {
            return Err(DecodeError::InvalidVin(vin.to_string()));
        }

        let wmi = &vin[..3];
        let make = catalog::manufacturer(wmi)
            .ok_or_else(|| DecodeError::UnknownManufacturer(wmi.to_uppercase()))?;
        let year = vin
            .chars()
            .nth(9)
            .and_then(catalog::model_year)
            .unwrap_or(self.fallback_year);

        Ok(VehicleIdentity {
            make: make.to_string(),
            model: Text::ModelNotSpecified.get(lang).to_string(),
            year,
        })
    }
}

/// Tries `primary` first and the local tables second.
pub struct FallbackDecoder<P> {
    primary: P,
    local: LocalVinDecoder,
}

impl<P: VinDecoder> FallbackDecoder<P> {
    pub fn new(primary: P, local: LocalVinDecoder) -> Self {
        FallbackDecoder { primary, local }
    }
}

impl<P: VinDecoder> VinDecoder for FallbackDecoder<P> {
    fn decode(&self, vin: &str, lang: Language) -> Result<VehicleIdentity, DecodeError> {
        if vin == VIN_READING_FAILED {
            return self.local.decode(vin, lang);
        }
        match self.primary.decode(vin, lang) {
            Ok(identity) => Ok(identity),
            Err(e) => {
                tracing::warn!(vin, error = %e, "VIN decode failed, using local tables");
                self.local.decode(vin, lang)
            }
        }
    }
}

impl<T: VinDecoder + ?Sized> VinDecoder for Box<T> {
    fn decode(&self, vin: &str, lang: Language) -> Result<VehicleIdentity, DecodeError> {
        (**self).decode(vin, lang)
    }
}

/// Identity used when no decoder recognises the VIN: the device name's first
/// word as make and the rest as model.
pub fn identity_from_device(device_name: &str, year: i32, lang: Language) -> VehicleIdentity {
    let mut words = device_name.split_whitespace();
    let make = words
        .next()
        .map(str::to_string)
        .unwrap_or_else(|| Text::UnknownModel.get(lang).to_string());
    let model = words.collect::<Vec<_>>().join(" ");
    VehicleIdentity { make, model, year }
}
