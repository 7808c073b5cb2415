//! Service layer for business logic and orchestration.
//!
//! Services sit between the data source and the HTTP layer: pure shipment
//! helpers plus the page-load orchestration of the dashboard.

pub mod dashboard;
pub mod shipment_utils;

pub use dashboard::{load_session, open_dashboard, DashboardQuery};
pub use shipment_utils::{
    format_date, format_date_at, get_latest_milestone, get_latest_milestone_time,
    has_inconsistent_data, sort_milestones_chronologically,
};
