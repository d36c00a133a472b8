//! Configuration loading
//!
//! Settings are resolved in the following priority order:
//! 1. Environment variables
//! 2. cadence.toml config file
//! 3. Defaults
//!
//! A missing config file is not an error: it means an empty taxonomy and
//! the service's primary calendar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Default path of the config file
const DEFAULT_CONFIG_PATH: &str = "cadence.toml";

/// Main configuration for cadence
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Calendar to ingest from; `None` means the service's primary calendar
    #[serde(default)]
    pub calendar_id: Option<String>,

    /// First day of the ingestion window (YYYY-MM-DD)
    #[serde(default)]
    pub history_start: Option<NaiveDate>,

    /// Seed categories, in resolution priority order
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

/// One seed category
///
/// The order of `[[categories]]` entries in the file is the order the
/// resolver tries them in, so it is an observable tie-break.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Canonical category name
    pub name: String,

    /// Known label variants that map to this category
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from the default locations.
    ///
    /// Checks `CADENCE_CONFIG` first, then `./cadence.toml`. When neither
    /// exists, returns defaults with environment overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("CADENCE_CONFIG") {
            return Self::from_toml_file(path);
        }

        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            return Self::from_toml_file(DEFAULT_CONFIG_PATH);
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override settings from environment variables.
    fn apply_env_overrides(&mut self) {
        if let Ok(id) = std::env::var("CADENCE_CALENDAR_ID") {
            if !id.is_empty() {
                self.calendar_id = Some(id);
            }
        }
    }
}
