//! Shipment and milestone records as delivered by the data source.
//!
//! The model tolerates incomplete data: every core field may be missing or
//! `null`, and `milestones` may be absent or not an array at all. Validity is
//! a derived property computed in [`crate::services::shipment_utils`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Read any JSON scalar as text. `null` stays `None`; numbers, booleans and
/// nested values keep their JSON rendering so they can still be flagged.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_status<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer).map(Option::unwrap_or_default)
}

/// Anything other than an array becomes an empty sequence. Array entries that
/// are not milestone objects are dropped.
fn lenient_milestones<'de, D>(deserializer: D) -> Result<Vec<Milestone>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// One event in a shipment's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
}

impl Milestone {
    pub fn new(status: impl Into<String>, timestamp: Option<&str>) -> Self {
        Self {
            id: None,
            status: status.into(),
            timestamp: timestamp.map(str::to_string),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}

/// A tracked delivery record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Shipment {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient_milestones")]
    pub milestones: Vec<Milestone>,
}

impl Shipment {
    /// Shipment with all core fields set and no milestones.
    pub fn new(
        id: impl Into<String>,
        customer: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            customer: Some(customer.into()),
            origin: Some(origin.into()),
            destination: Some(destination.into()),
            milestones: Vec::new(),
        }
    }

    pub fn with_milestones(mut self, milestones: Vec<Milestone>) -> Self {
        self.milestones = milestones;
        self
    }

    /// Identifier used for expansion state; a missing id maps to `""`.
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}
