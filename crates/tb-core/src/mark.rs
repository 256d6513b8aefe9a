//! Timeline marks - timestamped activation transitions.

use serde::{Deserialize, Serialize};

use crate::types::ActivityId;

/// A timestamped transition recording which activity (or none) became active.
///
/// `activity: None` is a stop marker: nothing is active starting at this
/// instant. The reference is logical - marks hold only the id, and resolution
/// happens through the owning board's activity map, so a deleted activity can
/// never leave a dangling link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mark {
    /// When the transition occurred, in epoch milliseconds.
    pub time: i64,

    /// The activity that became active, or `None` for a stop marker.
    #[serde(
        rename = "activityId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub activity: Option<ActivityId>,
}

impl Mark {
    /// Creates a mark activating the given activity (or stopping, if `None`).
    pub const fn new(time: i64, activity: Option<ActivityId>) -> Self {
        Self { time, activity }
    }

    /// Returns true if this mark is a stop marker.
    pub const fn is_stop(&self) -> bool {
        self.activity.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_marker_omits_activity_in_json() {
        let mark = Mark::new(1000, None);
        let json = serde_json::to_value(&mark).unwrap();
        assert_eq!(json, serde_json::json!({"time": 1000}));
        assert!(mark.is_stop());
    }

    #[test]
    fn activation_mark_serde_roundtrip() {
        let mark = Mark::new(1000, Some(ActivityId::new("a1").unwrap()));
        let json = serde_json::to_string(&mark).unwrap();
        assert_eq!(json, r#"{"time":1000,"activityId":"a1"}"#);
        let parsed: Mark = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, mark);
    }
}
