//! Dashboard page-load orchestration.
//!
//! Drives a [`DashboardSession`] through its fetch lifecycle against a
//! repository and applies the user's view settings.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::db::repository::ShipmentRepository;
use crate::db::services as db_services;
use crate::routes::dashboard::{DashboardSession, SessionError};

/// View settings supplied by the user for one page load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub sort_by_most_recent: bool,
    /// Shipment id to expand once the list is loaded.
    #[serde(default)]
    pub expanded: Option<String>,
}

/// Run the single fetch of a session: `Idle → Loading → {Loaded, Failed}`.
///
/// A failed fetch is recorded in the session, not returned as an error; the
/// only error is calling this on a session that already left `Idle`.
pub async fn load_session<R: ShipmentRepository + ?Sized>(
    repo: &R,
    session: &mut DashboardSession,
) -> Result<(), SessionError> {
    session.begin_loading()?;
    let outcome = db_services::fetch_shipments(repo).await;
    session.finish(outcome)?;
    debug!("Dashboard session settled in phase {}", session.phase());
    Ok(())
}

/// Open a fresh session, load it and apply `query`.
pub async fn open_dashboard<R: ShipmentRepository + ?Sized>(
    repo: &R,
    query: &DashboardQuery,
) -> Result<DashboardSession, SessionError> {
    let mut session = DashboardSession::new();
    load_session(repo, &mut session).await?;

    session.set_filter_text(query.filter.clone());
    session.set_sort_by_most_recent(query.sort_by_most_recent);
    if let Some(id) = query.expanded.as_deref() {
        session.toggle_expanded(id);
    }
    Ok(session)
}
