//! Activities - the named tasks a board tracks.

use serde::{Deserialize, Serialize};

use crate::types::ActivityId;

/// A trackable named task.
///
/// `last_duration_ms` holds the length of the most recently completed
/// activation interval. It is overwritten, not accumulated, each time the
/// activity transitions from active to inactive; cumulative totals come from
/// [`activity_summary`](crate::activity_summary) instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique identifier within the board.
    pub id: ActivityId,

    /// Human-readable name, mutable via rename.
    pub name: String,

    /// Duration of the most recently completed interval, in milliseconds.
    #[serde(rename = "lastDuration", default)]
    pub last_duration_ms: i64,
}

impl Activity {
    /// Creates a new activity with no completed interval yet.
    pub fn new(id: ActivityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            last_duration_ms: 0,
        }
    }
}
