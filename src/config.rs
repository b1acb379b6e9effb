use crate::constants::DEFAULT_ROW_LIMIT;
use crate::error::{Result, TrackerError};
use serde::Deserialize;
use std::fs;
use tracing::warn;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub row_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            TrackerError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path, e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Loads `config.toml`, falling back to defaults when the file is
    /// missing or unreadable so a bare checkout still runs.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default configuration: {}", e);
                Self::default()
            }
        }
    }
}
