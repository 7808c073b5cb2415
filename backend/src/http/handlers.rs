//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! existing service layer for business logic.

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{DashboardQuery, DashboardView, HealthResponse, ShipmentListResponse};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::services::dashboard as dashboard_service;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the data source answers.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let source_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "available".to_string(),
        Ok(false) => "unavailable".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        source: state.repository.source_name().to_string(),
        data_source: source_status,
    }))
}

// =============================================================================
// Shipments
// =============================================================================

/// GET /v1/shipments
///
/// Every shipment as delivered by the data source. A failed fetch maps to 503.
pub async fn list_shipments(
    State(state): State<AppState>,
) -> HandlerResult<ShipmentListResponse> {
    let shipments = db_services::fetch_shipments(state.repository.as_ref()).await?;
    Ok(Json(shipments.into()))
}

/// GET /v1/dashboard?filter=&sort_by_most_recent=&expanded=
///
/// One complete page load. A failed fetch is part of the view (`state: "failed"`),
/// not an HTTP error.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> HandlerResult<DashboardView> {
    let session = dashboard_service::open_dashboard(state.repository.as_ref(), &query).await?;
    Ok(Json(session.view()))
}
