//! Change-set normalization into the canonical diff text.
//!
//! The same text is used as the retrieval query, inside the prompt, and as
//! the persisted `changes` attribute.

use crate::event::ChangeSet;

/// Concatenates every file section as `File: <path>\nDiff:\n<diff>\n\n`, in path order.
///
/// Never fails; an empty change set yields an empty string. No size cap.
pub fn normalize_changes(changes: &ChangeSet) -> String {
    let mut out = String::new();
    for (path, change) in changes {
        out.push_str("File: ");
        out.push_str(path);
        out.push_str("\nDiff:\n");
        out.push_str(&change.diff);
        out.push_str("\n\n");
    }
    out
}
