//! Inbound merge-request event, as delivered by the GitLab webhook.

use std::collections::BTreeMap;

use serde::Deserialize;

/// `object_kind` value of the only event type the pipeline reviews.
pub const MERGE_REQUEST_KIND: &str = "merge_request";

/// Per-file change set keyed by file path.
///
/// A `BTreeMap` keeps iteration sorted by path, so normalization is
/// reproducible across runs.
pub type ChangeSet = BTreeMap<String, FileChange>;

/// Merge-request webhook payload (only the fields the pipeline reads).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeRequestEvent {
    #[serde(default)]
    pub object_kind: String,
    #[serde(default)]
    pub project: Project,
    #[serde(default)]
    pub object_attributes: ObjectAttributes,
}

impl MergeRequestEvent {
    /// Whether this event is a merge-request event.
    pub fn is_merge_request(&self) -> bool {
        self.object_kind == MERGE_REQUEST_KIND
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectAttributes {
    #[serde(default)]
    pub title: String,
    /// GitLab sends `null` for an empty description.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub changes: ChangeSet,
}

/// One file's diff fragment with its old/new path labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileChange {
    #[serde(default)]
    pub diff: String,
    #[serde(default)]
    pub old_path: String,
    #[serde(default)]
    pub new_path: String,
}
