//! Core data models persisted in the corpus.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Payload attribute holding the project name.
pub const FIELD_PROJECT: &str = "project";
/// Payload attribute holding the merge-request title.
pub const FIELD_TITLE: &str = "title";
/// Payload attribute holding the merge-request description.
pub const FIELD_DESCRIPTION: &str = "description";
/// Payload attribute holding the normalized diff text.
pub const FIELD_CHANGES: &str = "changes";
/// Payload attribute holding the generated review.
pub const FIELD_REVIEW: &str = "review";
/// Payload attribute holding the RFC3339 creation time.
pub const FIELD_TIMESTAMP: &str = "timestamp";

/// One persisted review. Created once per successful generation, never updated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRecord {
    pub project: String,
    pub title: String,
    pub description: String,
    /// Normalized diff the review was generated from.
    pub changes: String,
    pub review: String,
    pub timestamp: DateTime<Utc>,
}

impl ReviewRecord {
    /// Flat attribute map stored as the point payload.
    ///
    /// The timestamp is written as RFC3339 UTC with second precision.
    pub fn to_payload_json(&self) -> Value {
        let mut m = Map::new();
        m.insert(FIELD_PROJECT.into(), Value::String(self.project.clone()));
        m.insert(FIELD_TITLE.into(), Value::String(self.title.clone()));
        m.insert(FIELD_DESCRIPTION.into(), Value::String(self.description.clone()));
        m.insert(FIELD_CHANGES.into(), Value::String(self.changes.clone()));
        m.insert(FIELD_REVIEW.into(), Value::String(self.review.clone()));
        m.insert(
            FIELD_TIMESTAMP.into(),
            Value::String(self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        Value::Object(m)
    }
}

/// Short view of a stored review, used by lookups that list several records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub project: String,
    pub title: String,
    pub review: String,
}

impl ReviewSummary {
    /// Builds a summary from a JSON payload; missing attributes become empty strings.
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            project: str_field(payload, FIELD_PROJECT),
            title: str_field(payload, FIELD_TITLE),
            review: str_field(payload, FIELD_REVIEW),
        }
    }
}

/// Reads a string attribute from a JSON payload (empty if absent or not a string).
pub(crate) fn str_field(payload: &Value, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
