pub mod dashboard;
pub mod shipment_list;

/// Path of the health endpoint.
pub const HEALTH: &str = "/health";
/// Path of the raw shipment list, relative to the `/v1` prefix.
pub const LIST_SHIPMENTS: &str = "/shipments";
/// Path of the derived dashboard view, relative to the `/v1` prefix.
pub const GET_DASHBOARD: &str = "/dashboard";
