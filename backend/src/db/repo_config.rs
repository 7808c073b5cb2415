//! Repository configuration file support.
//!
//! This module provides utilities for reading repository configuration from
//! TOML configuration files.
//!
//! ```toml
//! [repository]
//! type = "simulated"            # or "fixture"
//! dataset = "data/shipments.json"
//!
//! [simulation]
//! min_delay_ms = 400
//! max_delay_ms = 1200
//! failure_rate = 0.1
//!
//! [fixture]
//! error = "Failed to load shipment data"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use super::factory::RepositoryType;
use super::repositories::SimulationConfig;
use super::repository::RepositoryError;

/// Standard `repository.toml` locations, in priority order.
const DEFAULT_LOCATIONS: [&str; 3] = ["repository.toml", "backend/repository.toml", "../repository.toml"];

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub fixture: FixtureSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
    /// Dataset to serve instead of the bundled one.
    #[serde(default)]
    pub dataset: Option<PathBuf>,
}

/// Latency and failure settings of the simulated repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

/// Settings of the deterministic fixture repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureSettings {
    /// When set, every fetch fails with this message.
    #[serde(default)]
    pub error: Option<String>,
}

fn default_min_delay_ms() -> u64 {
    400
}

fn default_max_delay_ms() -> u64 {
    1200
}

fn default_failure_rate() -> f64 {
    0.1
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            failure_rate: default_failure_rate(),
        }
    }
}

impl SimulationSettings {
    /// Convert to a validated [`SimulationConfig`].
    pub fn to_simulation_config(&self) -> Result<SimulationConfig, RepositoryError> {
        let config = SimulationConfig {
            min_delay: Duration::from_millis(self.min_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            failure_rate: self.failure_rate,
        };
        config.validate()?;
        Ok(config)
    }
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse repository configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// First existing `repository.toml` among the standard locations,
    /// relative to the working directory.
    ///
    /// Searches for `repository.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn find_default_location() -> Option<PathBuf> {
        Self::find_default_location_in(Path::new("."))
    }

    /// Same search as [`Self::find_default_location`], rooted at `base`.
    pub fn find_default_location_in(base: &Path) -> Option<PathBuf> {
        DEFAULT_LOCATIONS
            .iter()
            .map(|relative| base.join(relative))
            .find(|path| path.is_file())
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }
}
