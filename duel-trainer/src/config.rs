use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Training run settings, loadable from TOML. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Games to play
    pub games: usize,
    /// Reinforcement factor, in (0, 1)
    pub factor: f64,
    /// Seed for the players; entropy when absent
    pub seed: Option<u64>,
    /// Weights file, read at start and written at the end
    pub weights: PathBuf,
    /// Games between progress reports
    pub report_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            games: 1000,
            factor: 0.75,
            seed: None,
            weights: PathBuf::from("weights.json"),
            report_every: 100,
        }
    }
}

impl TrainConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: TrainConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games == 0 {
            return Err(ConfigError::Validation("games must be > 0".into()));
        }
        if !(self.factor > 0.0 && self.factor < 1.0) {
            return Err(ConfigError::Validation("factor must be in (0, 1)".into()));
        }
        if self.report_every == 0 {
            return Err(ConfigError::Validation("report_every must be > 0".into()));
        }
        Ok(())
    }
}
