//! Shipment dataset loading.
//!
//! The default dataset ships inside the binary; alternative datasets can be
//! read from disk with [`load_shipments_file`].

use std::fs;
use std::path::Path;

use super::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::Shipment;

const BUNDLED_SHIPMENTS: &str = include_str!("../../data/shipments.json");

/// Parse a JSON document holding a top-level array of shipment records.
pub fn parse_shipments(json: &str) -> RepositoryResult<Vec<Shipment>> {
    let shipments: Vec<Shipment> = serde_json::from_str(json)?;
    Ok(shipments)
}

/// Shipments bundled with the crate.
pub fn bundled_shipments() -> RepositoryResult<Vec<Shipment>> {
    parse_shipments(BUNDLED_SHIPMENTS).map_err(|e| e.with_operation("bundled_shipments"))
}

/// Read and parse a shipment dataset from disk.
pub fn load_shipments_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Vec<Shipment>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        RepositoryError::configuration(format!(
            "Failed to read dataset {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_shipments(&content).map_err(|e| match e {
        RepositoryError::ValidationError { message, context } => {
            RepositoryError::validation_with_context(
                message,
                ErrorContext {
                    details: Some(match context.details {
                        Some(details) => format!("{}, path={}", details, path.display()),
                        None => format!("path={}", path.display()),
                    }),
                    ..context
                },
            )
        }
        other => other,
    })
}
