use crate::diagnostic::{FaultCode, Severity};
use crate::i18n::{Language, Text};

pub const CRITICAL_PENALTY: u32 = 25;
pub const WARNING_PENALTY: u32 = 10;
pub const MINOR_PENALTY: u32 = 5;

const TWO_CRITICAL_CAP: u32 = 30;
const ONE_CRITICAL_CAP: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyBucket {
    Critical,
    Warning,
    Minor,
}

impl PenaltyBucket {
    pub fn of(fault: &FaultCode) -> Self {
        if fault.severity == Severity::High || fault.system.is_critical() {
            PenaltyBucket::Critical
        } else if fault.severity == Severity::Medium {
            PenaltyBucket::Warning
        } else {
            PenaltyBucket::Minor
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            PenaltyBucket::Critical => CRITICAL_PENALTY,
            PenaltyBucket::Warning => WARNING_PENALTY,
            PenaltyBucket::Minor => MINOR_PENALTY,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Penalties {
    pub critical: u32,
    pub warning: u32,
    pub minor: u32,
}

impl Penalties {
    pub fn total(&self) -> u32 {
        self.critical + self.warning + self.minor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Good,
    Fair,
    Poor,
}

impl HealthBand {
    pub fn of(score: u32) -> Self {
        match score {
            76..=100 => HealthBand::Good,
            41..=75 => HealthBand::Fair,
            _ => HealthBand::Poor,
        }
    }

    pub fn label(&self, lang: Language) -> &'static str {
        match self {
            HealthBand::Good => Text::Good.get(lang),
            HealthBand::Fair => Text::Fair.get(lang),
            HealthBand::Poor => Text::Poor.get(lang),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub value: u32,
    pub band: HealthBand,
    pub penalties: Penalties,
}

pub fn compute_score(errors: &[FaultCode]) -> ScoreResult {
    let mut penalties = Penalties::default();

    for fault in errors {
        let bucket = PenaltyBucket::of(fault);
        let slot = match bucket {
            PenaltyBucket::Critical => &mut penalties.critical,
            PenaltyBucket::Warning => &mut penalties.warning,
            PenaltyBucket::Minor => &mut penalties.minor,
        };
        *slot += bucket.points();
    }

    let raw = 100u32.saturating_sub(penalties.total());

    // One critical fault caps the car at 60, two or more at 30, however
    // clean the rest of the list is.
    let value = if penalties.critical >= 2 * CRITICAL_PENALTY {
        raw.min(TWO_CRITICAL_CAP)
    } else if penalties.critical >= CRITICAL_PENALTY {
        raw.min(ONE_CRITICAL_CAP)
    } else {
        raw
    };

    ScoreResult {
        value,
        band: HealthBand::of(value),
        penalties,
    }
}

pub fn health_score(errors: &[FaultCode]) -> u32 {
    compute_score(errors).value
}
