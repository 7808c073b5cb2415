//! Data Transfer Objects for the HTTP API.
//!
//! Dashboard view models already derive Serialize/Deserialize and are
//! re-exported from the routes module.

use serde::{Deserialize, Serialize};

pub use crate::models::{Milestone, Shipment};
pub use crate::routes::dashboard::{DashboardView, LoadPhase};
pub use crate::routes::shipment_list::{MilestoneEntry, ShipmentRow};
pub use crate::services::dashboard::DashboardQuery;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Name of the configured data source
    pub source: String,
    /// Data source status
    pub data_source: String,
}

/// Raw shipment list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentListResponse {
    /// Shipments in source order
    pub shipments: Vec<Shipment>,
    /// Total count
    pub total: usize,
}

impl From<Vec<Shipment>> for ShipmentListResponse {
    fn from(shipments: Vec<Shipment>) -> Self {
        Self {
            total: shipments.len(),
            shipments,
        }
    }
}
