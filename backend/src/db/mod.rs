//! Data-source module for shipment retrieval.
//!
//! This module provides abstractions over where shipments come from via the
//! Repository pattern, allowing different sources to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (dashboard session, REST API)        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - fetch + logging          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                 │
//! ┌───▼──────────────┐     ┌──────────▼──────────────┐
//! │ Fixture          │     │ Simulated               │
//! │ (deterministic)  │     │ (random delay/failure)  │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```no_run
//! use shiptrack::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env()?;
//!     let shipments = services::fetch_shipments(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

pub mod dataset;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

pub use services::{fetch_shipments, health_check};

pub use repo_config::RepositoryConfig;

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repositories::{FixtureRepository, SimulatedRepository, SimulationConfig};
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, ShipmentRepository};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Environment variable naming an explicit repository configuration file.
pub const CONFIG_ENV_VAR: &str = "SHIPTRACK_CONFIG";

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn ShipmentRepository>> = OnceLock::new();

/// Resolve the repository from configuration.
///
/// Priority: `SHIPTRACK_CONFIG` file > `repository.toml` in a standard
/// location > `REPOSITORY_TYPE` environment variable.
pub fn create_selected_repository() -> RepositoryResult<Arc<dyn ShipmentRepository>> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        log::info!("Loading repository configuration from {}", path);
        return RepositoryFactory::from_config_file(path);
    }
    if let Some(path) = RepositoryConfig::find_default_location() {
        log::info!("Loading repository configuration from {}", path.display());
        return RepositoryFactory::from_config_file(path);
    }
    RepositoryFactory::from_env()
}

/// Initialize the global repository singleton for the selected source.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = create_selected_repository().map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn ShipmentRepository>> {
    if REPOSITORY.get().is_none() {
        init_repository()?;
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
