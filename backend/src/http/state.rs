//! Application state for the HTTP server.

use std::sync::Arc;
use crate::db::repository::ShipmentRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Data source every page load fetches from
    pub repository: Arc<dyn ShipmentRepository>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn ShipmentRepository>) -> Self {
        Self { repository }
    }
}
