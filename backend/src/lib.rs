//! # Shiptrack
//!
//! Backend of a shipment tracking dashboard.
//!
//! Shipments are fetched from a pluggable data source, then shaped into a
//! filterable, sortable, expandable list that flags records with missing or
//! malformed milestone data instead of rejecting them. The view models are
//! exposed as JSON through an Axum REST API.
//!
//! ## Architecture
//!
//! - [`models`]: Shipment and milestone records, timestamp parsing
//! - [`db`]: Data sources behind the repository pattern (fixture, simulated)
//! - [`services`]: Pure shipment helpers and page-load orchestration
//! - [`routes`]: Dashboard and list view state holders and their derivations
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
