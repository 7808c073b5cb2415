//! Deterministic in-memory repository.
//!
//! Always answers the same way: either a fixed list of shipments or a fixed
//! error. Used by tests and by deployments that want the dashboard without the
//! simulated latency and failures.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::db::dataset;
use crate::db::repository::*;
use crate::models::Shipment;

#[derive(Debug, Clone)]
enum FixtureOutcome {
    Shipments(Arc<Vec<Shipment>>),
    Failure(String),
}

/// Repository returning a fixed fixture or a fixed error.
///
/// # Example
/// ```
/// use shiptrack::db::repositories::FixtureRepository;
/// use shiptrack::db::repository::ShipmentRepository;
/// use shiptrack::models::Shipment;
///
/// # tokio_test_block(async {
/// let repo = FixtureRepository::new(vec![Shipment::new("SHP-1", "Acme", "A", "B")]);
/// let shipments = repo.get_all_shipments().await.unwrap();
/// assert_eq!(shipments.len(), 1);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FixtureRepository {
    outcome: FixtureOutcome,
}

impl FixtureRepository {
    /// Repository that always returns `shipments`.
    pub fn new(shipments: Vec<Shipment>) -> Self {
        Self {
            outcome: FixtureOutcome::Shipments(Arc::new(shipments)),
        }
    }

    /// Repository whose every fetch fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: FixtureOutcome::Failure(message.into()),
        }
    }

    /// Repository serving the bundled dataset.
    pub fn bundled() -> RepositoryResult<Self> {
        Ok(Self::new(dataset::bundled_shipments()?))
    }

    /// Repository serving a dataset read from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        Ok(Self::new(dataset::load_shipments_file(path)?))
    }

    /// Number of shipments served, `None` for a failing fixture.
    pub fn len(&self) -> Option<usize> {
        match &self.outcome {
            FixtureOutcome::Shipments(shipments) => Some(shipments.len()),
            FixtureOutcome::Failure(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

#[async_trait]
impl ShipmentRepository for FixtureRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn get_all_shipments(&self) -> RepositoryResult<Vec<Shipment>> {
        match &self.outcome {
            FixtureOutcome::Shipments(shipments) => Ok(shipments.as_ref().clone()),
            FixtureOutcome::Failure(message) => Err(RepositoryError::unavailable_with_context(
                message.clone(),
                ErrorContext::new("get_all_shipments").with_entity("shipment"),
            )),
        }
    }

    fn source_name(&self) -> &'static str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_fixture() {
        let repo = FixtureRepository::new(vec![
            Shipment::new("SHP-1", "Acme", "A", "B"),
            Shipment::new("SHP-2", "Globex", "C", "D"),
        ]);
        let shipments = repo.get_all_shipments().await.unwrap();
        assert_eq!(shipments.len(), 2);
        assert_eq!(shipments[1].key(), "SHP-2");
        assert_eq!(repo.len(), Some(2));
    }

    #[tokio::test]
    async fn test_failing_fixture() {
        let repo = FixtureRepository::failing("Failed to load shipment data");
        let err = repo.get_all_shipments().await.unwrap_err();
        assert_eq!(err.message(), "Failed to load shipment data");
        assert_eq!(err.context().operation.as_deref(), Some("get_all_shipments"));
        assert_eq!(repo.len(), None);
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_bundled_fixture() {
        let repo = FixtureRepository::bundled().unwrap();
        assert!(!repo.is_empty());
        assert_eq!(repo.source_name(), "fixture");
    }
}
