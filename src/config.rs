use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::history::DEFAULT_MAX_ENTRIES;
use crate::i18n::Language;

pub const CONFIG_FILE: &str = "obd-doctor.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub history: HistoryConfig,
    pub vehicle: VehicleConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub language: Language,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: PathBuf,
    pub max_entries: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Year for vehicles whose VIN cannot be decoded. Unset means the
    /// current year.
    pub fallback_year: Option<i32>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            path: PathBuf::from(".obd-doctor/history.json"),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Config {
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        if config.history.max_entries == 0 {
            return Err(ConfigError::Invalid(
                "history.max_entries must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// History file location; relative paths resolve against `config_dir`.
    pub fn history_path(&self, config_dir: &Path) -> PathBuf {
        if self.history.path.is_absolute() {
            self.history.path.clone()
        } else {
            config_dir.join(&self.history.path)
        }
    }
}
