//! High-level data-source service layer.
//!
//! Repository-agnostic operations with the logging the dashboard relies on.
//!
//! # Usage
//!
//! ```no_run
//! use shiptrack::db::{services, repositories::FixtureRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = FixtureRepository::bundled()?;
//!     let shipments = services::fetch_shipments(&repo).await?;
//!     println!("Found {} shipments", shipments.len());
//!     Ok(())
//! }
//! ```

use std::time::Instant;

use log::{info, warn};

use super::repository::{RepositoryResult, ShipmentRepository};
use crate::models::Shipment;

/// Check if the data source is healthy.
///
/// This is a simple pass-through to the repository's health check.
pub async fn health_check<R: ShipmentRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Fetch every shipment, logging the outcome.
pub async fn fetch_shipments<R: ShipmentRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<Shipment>> {
    let started = Instant::now();
    info!("Fetching shipments from {} source", repo.source_name());

    match repo.get_all_shipments().await {
        Ok(shipments) => {
            info!(
                "Loaded {} shipments from {} source in {:?}",
                shipments.len(),
                repo.source_name(),
                started.elapsed()
            );
            Ok(shipments)
        }
        Err(e) => {
            warn!(
                "Shipment fetch from {} source failed after {:?}: {}",
                repo.source_name(),
                started.elapsed(),
                e
            );
            Err(e.with_operation("fetch_shipments"))
        }
    }
}
