//! List view: one summary row per shipment, expandable to its milestones.
//!
//! Expansion follows accordion semantics: at most one shipment id is expanded
//! at a time, selecting it again collapses it and selecting another row moves
//! the expansion there.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Milestone, Shipment};
use crate::services::shipment_utils::{
    format_date_at, get_latest_milestone, has_inconsistent_data, has_invalid_timestamp,
    sort_milestones_chronologically,
};

pub const ROW_WARNING: &str = "Data incomplete or inconsistent for this shipment.";
pub const MILESTONE_WARNING: &str = "This milestone has incomplete or invalid timestamp data.";
pub const NO_MILESTONES: &str = "No milestones available.";
pub const UNKNOWN_CUSTOMER: &str = "(unknown customer)";
pub const UNKNOWN_LOCATION: &str = "(unknown)";
pub const NOT_AVAILABLE: &str = "N/A";

/// Which shipment, if any, is currently expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    expanded_id: Option<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expanded_id(&self) -> Option<&str> {
        self.expanded_id.as_deref()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_id.as_deref() == Some(id)
    }

    /// Collapse `id` if it is expanded, otherwise expand it alone.
    pub fn toggle(&mut self, id: &str) {
        if self.is_expanded(id) {
            self.expanded_id = None;
        } else {
            self.expanded_id = Some(id.to_string());
        }
    }

    /// Forget the expansion, e.g. after the shipment list is reloaded.
    pub fn reset(&mut self) {
        self.expanded_id = None;
    }
}

/// One milestone line inside an expanded row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: String,
    pub timestamp: Option<String>,
    pub display_time: String,
    pub invalid_timestamp: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl MilestoneEntry {
    fn from_milestone(milestone: &Milestone, now: DateTime<Utc>) -> Self {
        let invalid = has_invalid_timestamp(milestone);
        Self {
            id: milestone.id.clone(),
            status: milestone.status.clone(),
            timestamp: milestone.timestamp.clone(),
            display_time: format_date_at(milestone.timestamp(), now),
            invalid_timestamp: invalid,
            warning: invalid.then(|| MILESTONE_WARNING.to_string()),
        }
    }
}

/// Summary card for one shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRow {
    pub id: String,
    pub customer: String,
    pub origin: String,
    pub destination: String,
    pub latest_status: String,
    pub latest_time: String,
    pub inconsistent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub expanded: bool,
    /// Accessible label of the expand/collapse control.
    pub toggle_label: String,
    /// Chronological milestones; only present while expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<MilestoneEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_milestones_message: Option<String>,
}

/// Build the row for a single shipment.
pub fn build_row(shipment: &Shipment, expansion: &ExpansionState, now: DateTime<Utc>) -> ShipmentRow {
    let id = shipment.key().to_string();
    let latest = get_latest_milestone(shipment);
    let inconsistent = has_inconsistent_data(shipment);
    let expanded = expansion.is_expanded(&id);

    let (milestones, empty_milestones_message) = if expanded {
        let entries: Vec<MilestoneEntry> = sort_milestones_chronologically(&shipment.milestones)
            .into_iter()
            .map(|m| MilestoneEntry::from_milestone(m, now))
            .collect();
        let empty = entries.is_empty().then(|| NO_MILESTONES.to_string());
        (Some(entries), empty)
    } else {
        (None, None)
    };

    ShipmentRow {
        toggle_label: format!(
            "{} shipment {}",
            if expanded { "Collapse" } else { "Expand" },
            id
        ),
        id,
        customer: shipment
            .customer
            .clone()
            .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()),
        origin: shipment
            .origin
            .clone()
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        destination: shipment
            .destination
            .clone()
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        latest_status: latest
            .map(|m| m.status.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        latest_time: match latest.and_then(Milestone::timestamp) {
            Some(ts) if !ts.is_empty() => format_date_at(Some(ts), now),
            _ => NOT_AVAILABLE.to_string(),
        },
        inconsistent,
        warning: inconsistent.then(|| ROW_WARNING.to_string()),
        expanded,
        milestones,
        empty_milestones_message,
    }
}

/// Build rows for the visible shipments, in order.
pub fn build_rows(
    shipments: &[&Shipment],
    expansion: &ExpansionState,
    now: DateTime<Utc>,
) -> Vec<ShipmentRow> {
    shipments
        .iter()
        .map(|shipment| build_row(shipment, expansion, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap()
    }

    fn shipment() -> Shipment {
        Shipment::new("SHP-1", "Acme", "Rotterdam", "Oslo").with_milestones(vec![
            Milestone::new("Picked up", Some("2024-01-02T12:00:00Z")),
            Milestone::new("Customs", None),
            Milestone::new("Created", Some("2024-01-01T12:00:00Z")),
        ])
    }

    #[test]
    fn test_toggle_accordion() {
        let mut state = ExpansionState::new();
        state.toggle("a");
        assert!(state.is_expanded("a"));
        state.toggle("b");
        assert!(!state.is_expanded("a"));
        assert!(state.is_expanded("b"));
        state.toggle("b");
        assert_eq!(state.expanded_id(), None);
    }

    #[test]
    fn test_reset_collapses() {
        let mut state = ExpansionState::new();
        state.toggle("a");
        state.reset();
        assert!(!state.is_expanded("a"));
    }

    #[test]
    fn test_collapsed_row_summary() {
        let row = build_row(&shipment(), &ExpansionState::new(), now());
        assert_eq!(row.id, "SHP-1");
        assert_eq!(row.latest_status, "Picked up");
        assert_eq!(row.latest_time, "Yesterday");
        assert!(row.inconsistent);
        assert_eq!(row.warning.as_deref(), Some(ROW_WARNING));
        assert!(!row.expanded);
        assert_eq!(row.toggle_label, "Expand shipment SHP-1");
        assert!(row.milestones.is_none());
    }

    #[test]
    fn test_expanded_row_lists_milestones_chronologically() {
        let mut state = ExpansionState::new();
        state.toggle("SHP-1");
        let row = build_row(&shipment(), &state, now());
        assert!(row.expanded);
        assert_eq!(row.toggle_label, "Collapse shipment SHP-1");

        let milestones = row.milestones.unwrap();
        let statuses: Vec<&str> = milestones.iter().map(|m| m.status.as_str()).collect();
        assert_eq!(statuses, vec!["Created", "Picked up", "Customs"]);
        assert_eq!(milestones[0].display_time, "2 days ago");
        assert_eq!(milestones[2].display_time, "No timestamp");
        assert!(milestones[2].invalid_timestamp);
        assert_eq!(milestones[2].warning.as_deref(), Some(MILESTONE_WARNING));
        assert!(!milestones[0].invalid_timestamp);
        assert!(row.empty_milestones_message.is_none());
    }

    #[test]
    fn test_empty_milestones_flagged_only_at_row_level() {
        let bare = Shipment::new("SHP-2", "Acme", "A", "B");
        let mut state = ExpansionState::new();
        state.toggle("SHP-2");
        let row = build_row(&bare, &state, now());
        assert!(row.inconsistent);
        assert_eq!(row.milestones, Some(vec![]));
        assert_eq!(row.empty_milestones_message.as_deref(), Some(NO_MILESTONES));
        assert_eq!(row.latest_status, NOT_AVAILABLE);
        assert_eq!(row.latest_time, NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_fields_use_fallbacks() {
        let partial = Shipment {
            id: Some("SHP-3".into()),
            ..Default::default()
        };
        let row = build_row(&partial, &ExpansionState::new(), now());
        assert_eq!(row.customer, UNKNOWN_CUSTOMER);
        assert_eq!(row.origin, UNKNOWN_LOCATION);
        assert_eq!(row.destination, UNKNOWN_LOCATION);
    }

    #[test]
    fn test_build_rows_preserves_order() {
        let a = Shipment::new("A", "x", "y", "z");
        let b = Shipment::new("B", "x", "y", "z");
        let rows = build_rows(&[&b, &a], &ExpansionState::new(), now());
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }
}
