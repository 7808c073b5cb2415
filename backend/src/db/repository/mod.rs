//! Repository trait for shipment retrieval.
//!
//! The dashboard only ever needs one operation from its data source: fetch
//! every shipment. Implementations decide where the records come from and how
//! the fetch may fail.
//!
//! - [`error`]: Error types for repository operations

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::models::Shipment;

/// Data boundary of the dashboard.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Check if the data source is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the source is healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Fetch the full list of shipments.
    ///
    /// No filtering or pagination happens at this boundary.
    ///
    /// # Returns
    /// * `Ok(Vec<Shipment>)` - Every shipment, in source order
    /// * `Err(RepositoryError)` - If the fetch fails
    async fn get_all_shipments(&self) -> RepositoryResult<Vec<Shipment>>;

    /// Short name of the implementation, used in logs and health output.
    fn source_name(&self) -> &'static str;
}
