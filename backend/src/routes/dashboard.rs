//! Page view: fetch lifecycle, filter text, sort toggle and the derived list.
//!
//! A [`DashboardSession`] holds the state of one page load. Everything shown
//! on the page is computed from it by [`DashboardSession::view_at`], a pure
//! function of the current state and the clock.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shipment_list::{build_rows, ExpansionState, ShipmentRow};
use crate::db::repository::RepositoryError;
use crate::models::Shipment;
use crate::services::shipment_utils::{get_latest_milestone_time, has_inconsistent_data};

pub const LOADING_MESSAGE: &str = "Loading shipments…";
pub const AGGREGATE_WARNING: &str =
    "Data incomplete or inconsistent for some shipments. Missing or invalid timestamps are handled";
pub const NO_MATCHES: &str = "No shipments match your current filters.";
pub const LOAD_ERROR_PREFIX: &str = "Failed to load shipment data";
pub const FALLBACK_LOAD_ERROR: &str =
    "Failed to load shipment data. Please try refreshing the page.";

/// Shipments matching `filter_text`, optionally ordered most recent first.
///
/// Blank filter text keeps every shipment. Matching is a case-insensitive
/// substring test on the customer name, a missing customer counting as empty.
/// Sorting is stable, so shipments with equal keys keep their source order.
pub fn filter_and_sort<'a>(
    shipments: &'a [Shipment],
    filter_text: &str,
    sort_by_most_recent: bool,
) -> Vec<&'a Shipment> {
    let query = filter_text.trim().to_lowercase();

    let mut list: Vec<&Shipment> = if query.is_empty() {
        shipments.iter().collect()
    } else {
        shipments
            .iter()
            .filter(|s| {
                s.customer
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&query)
            })
            .collect()
    };

    if sort_by_most_recent {
        list.sort_by_key(|s| std::cmp::Reverse(get_latest_milestone_time(s)));
    }

    list
}

/// Whether any of the given shipments needs a data-quality warning.
pub fn has_any_inconsistencies(shipments: &[&Shipment]) -> bool {
    shipments.iter().any(|s| has_inconsistent_data(s))
}

/// User-facing message for a failed load.
pub fn load_error_message(error: &RepositoryError) -> String {
    let message = error.message().trim();
    if message.is_empty() {
        FALLBACK_LOAD_ERROR.to_string()
    } else {
        format!("{}: {}", LOAD_ERROR_PREFIX, message)
    }
}

/// Phase of the fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Fetch lifecycle: `Idle → Loading → {Loaded, Failed}`.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(Arc<[Shipment]>),
    Failed(String),
}

impl LoadState {
    pub fn phase(&self) -> LoadPhase {
        match self {
            Self::Idle => LoadPhase::Idle,
            Self::Loading => LoadPhase::Loading,
            Self::Loaded(_) => LoadPhase::Loaded,
            Self::Failed(_) => LoadPhase::Failed,
        }
    }
}

/// Illegal lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: LoadPhase,
    },
}

/// Everything the page renders, derived from a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub state: LoadPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub show_inconsistency_banner: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub filter_text: String,
    pub sort_by_most_recent: bool,
    pub expanded_id: Option<String>,
    /// Shipments loaded from the source.
    pub total: usize,
    /// Shipments left after filtering.
    pub visible: usize,
    pub rows: Vec<ShipmentRow>,
}

/// State of one page load.
#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    load: LoadState,
    filter_text: String,
    sort_by_most_recent: bool,
    expansion: ExpansionState,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LoadPhase {
        self.load.phase()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Enter `Loading`. Only legal once, from `Idle`.
    pub fn begin_loading(&mut self) -> Result<(), SessionError> {
        match self.load {
            LoadState::Idle => {
                self.load = LoadState::Loading;
                Ok(())
            }
            _ => Err(SessionError::InvalidTransition {
                action: "begin loading",
                phase: self.phase(),
            }),
        }
    }

    /// Settle the fetch. Only legal while `Loading`; the outcome is terminal.
    pub fn finish(
        &mut self,
        outcome: Result<Vec<Shipment>, RepositoryError>,
    ) -> Result<(), SessionError> {
        if !matches!(self.load, LoadState::Loading) {
            return Err(SessionError::InvalidTransition {
                action: "finish loading",
                phase: self.phase(),
            });
        }
        self.load = match outcome {
            Ok(shipments) => {
                self.expansion.reset();
                LoadState::Loaded(shipments.into())
            }
            Err(e) => LoadState::Failed(load_error_message(&e)),
        };
        Ok(())
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
    }

    pub fn sort_by_most_recent(&self) -> bool {
        self.sort_by_most_recent
    }

    pub fn set_sort_by_most_recent(&mut self, enabled: bool) {
        self.sort_by_most_recent = enabled;
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Expand or collapse a row (accordion).
    pub fn toggle_expanded(&mut self, id: &str) {
        self.expansion.toggle(id);
    }

    /// Loaded shipments in source order; empty until loaded.
    pub fn shipments(&self) -> &[Shipment] {
        match &self.load {
            LoadState::Loaded(shipments) => &shipments[..],
            _ => &[],
        }
    }

    /// Shipments after filtering and sorting.
    pub fn visible_shipments(&self) -> Vec<&Shipment> {
        filter_and_sort(self.shipments(), &self.filter_text, self.sort_by_most_recent)
    }

    /// Derive the page as of the wall clock.
    pub fn view(&self) -> DashboardView {
        self.view_at(Utc::now())
    }

    /// Derive the page, formatting relative times against `now`.
    pub fn view_at(&self, now: DateTime<Utc>) -> DashboardView {
        let mut view = DashboardView {
            state: self.phase(),
            loading_message: None,
            error: None,
            show_inconsistency_banner: false,
            banner: None,
            empty_message: None,
            filter_text: self.filter_text.clone(),
            sort_by_most_recent: self.sort_by_most_recent,
            expanded_id: self.expansion.expanded_id().map(str::to_string),
            total: self.shipments().len(),
            visible: 0,
            rows: Vec::new(),
        };

        match &self.load {
            LoadState::Idle => {}
            LoadState::Loading => view.loading_message = Some(LOADING_MESSAGE.to_string()),
            LoadState::Failed(message) => view.error = Some(message.clone()),
            LoadState::Loaded(_) => {
                let visible = self.visible_shipments();
                view.visible = visible.len();
                view.show_inconsistency_banner = has_any_inconsistencies(&visible);
                if view.show_inconsistency_banner {
                    view.banner = Some(AGGREGATE_WARNING.to_string());
                }
                if visible.is_empty() {
                    view.empty_message = Some(NO_MATCHES.to_string());
                }
                view.rows = build_rows(&visible, &self.expansion, now);
            }
        }

        view
    }
}
