//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::dataset;
use super::repo_config::RepositoryConfig;
use super::repositories::{FixtureRepository, SimulatedRepository, SimulationConfig};
use super::repository::{RepositoryError, RepositoryResult, ShipmentRepository};
use crate::models::Shipment;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Deterministic fixed data (or fixed error)
    Fixture,
    /// Randomized latency and failures
    Simulated,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("fixture", "simulated")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixture" | "static" => Ok(Self::Fixture),
            "simulated" | "simulation" | "demo" => Ok(Self::Simulated),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to the simulated source, which is what
    /// interactive demos expect.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(Self::Simulated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixture => "fixture",
            Self::Simulated => "simulated",
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use shiptrack::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Fixture, None).unwrap();
/// assert_eq!(repo.source_name(), "fixture");
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// Without a configuration the bundled dataset is served and the
    /// simulation uses its default latency and failure rate.
    pub fn create(
        repo_type: RepositoryType,
        config: Option<&RepositoryConfig>,
    ) -> RepositoryResult<Arc<dyn ShipmentRepository>> {
        match config {
            Some(config) => Self::from_repository_config_as(repo_type, config),
            None => RepositoryBuilder::new().repository_type(repo_type).build(),
        }
    }

    /// Create a fixture repository over `shipments`.
    pub fn create_fixture(shipments: Vec<Shipment>) -> Arc<dyn ShipmentRepository> {
        Arc::new(FixtureRepository::new(shipments))
    }

    /// Create a fixture repository that always fails with `message`.
    pub fn create_failing(message: impl Into<String>) -> Arc<dyn ShipmentRepository> {
        Arc::new(FixtureRepository::failing(message))
    }

    /// Create a simulated repository over `shipments`.
    pub fn create_simulated(
        shipments: Vec<Shipment>,
        config: SimulationConfig,
    ) -> RepositoryResult<Arc<dyn ShipmentRepository>> {
        Ok(Arc::new(SimulatedRepository::new(shipments, config)?))
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` environment variable to determine which
    /// repository to create.
    pub fn from_env() -> RepositoryResult<Arc<dyn ShipmentRepository>> {
        RepositoryBuilder::new().from_env().build()
    }

    /// Create repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn ShipmentRepository>> {
        RepositoryBuilder::new().from_config_file(config_path)?.build()
    }

    fn from_repository_config_as(
        repo_type: RepositoryType,
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn ShipmentRepository>> {
        RepositoryBuilder::new()
            .from_repository_config(config)?
            .repository_type(repo_type)
            .build()
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```
/// use shiptrack::db::{RepositoryBuilder, RepositoryType, SimulationConfig};
///
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Simulated)
///     .simulation(SimulationConfig::instant())
///     .build()
///     .unwrap();
/// assert_eq!(repo.source_name(), "simulated");
/// ```
#[derive(Debug, Clone)]
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    dataset: Option<PathBuf>,
    simulation: SimulationConfig,
    fixture_error: Option<String>,
}

impl RepositoryBuilder {
    /// Create a new repository builder with default settings.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::Simulated,
            dataset: None,
            simulation: SimulationConfig::default(),
            fixture_error: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Serve the dataset at `path` instead of the bundled one.
    pub fn dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset = Some(path.into());
        self
    }

    /// Set the simulation settings.
    pub fn simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    /// Make the fixture repository fail every fetch with `message`.
    pub fn fixture_error(mut self, message: impl Into<String>) -> Self {
        self.fixture_error = Some(message.into());
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Self {
        self.repo_type = RepositoryType::from_env();
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(self, config_path: P) -> RepositoryResult<Self> {
        let repo_config = RepositoryConfig::from_file(config_path)?;
        self.from_repository_config(&repo_config)
    }

    /// Apply an already parsed configuration.
    pub fn from_repository_config(mut self, config: &RepositoryConfig) -> RepositoryResult<Self> {
        self.repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        self.dataset = config.repository.dataset.clone();
        self.simulation = config.simulation.to_simulation_config()?;
        self.fixture_error = config.fixture.error.clone();
        Ok(self)
    }

    /// Build the repository instance.
    pub fn build(self) -> RepositoryResult<Arc<dyn ShipmentRepository>> {
        let shipments = match &self.dataset {
            Some(path) => dataset::load_shipments_file(path)?,
            None => dataset::bundled_shipments()?,
        };
        info!(
            "Creating {} repository over {} shipments",
            self.repo_type.as_str(),
            shipments.len()
        );

        match self.repo_type {
            RepositoryType::Fixture => Ok(match self.fixture_error {
                Some(message) => RepositoryFactory::create_failing(message),
                None => RepositoryFactory::create_fixture(shipments),
            }),
            RepositoryType::Simulated => {
                RepositoryFactory::create_simulated(shipments, self.simulation)
            }
        }
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
