//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the tide-scout.toml file.
//! It names the forecast site, the locations to scrape, and where the CSV goes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "tide-scout.toml";

/// Application configuration loaded from tide-scout.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Forecast site and locations
    pub source: SourceConfig,
    /// Export settings
    pub output: OutputConfig,
}

/// Where forecast pages come from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Site root, e.g. "https://www.tide-forecast.com"
    pub base_url: String,
    /// Location identifiers as they appear in page URLs (e.g. "Half-Moon-Bay-California")
    pub locations: Vec<String>,
}

/// Export configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// CSV file written at the end of the run
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: SourceConfig {
                base_url: "https://www.tide-forecast.com".to_string(),
                locations: vec![
                    "Half-Moon-Bay-California".to_string(),
                    "Huntington-Beach".to_string(),
                    "Providence-Rhode-Island".to_string(),
                    "Wrightsville-Beach-North-Carolina".to_string(),
                ],
            },
            output: OutputConfig {
                path: PathBuf::from("low_daylight_forecast.csv"),
            },
        }
    }
}

impl Config {
    /// Load configuration from tide-scout.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        locations = config.source.locations.len(),
                        "loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save current configuration as pretty TOML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }
}
