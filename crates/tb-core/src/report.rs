//! Report engine: timeline slices turned into segments and summaries.
//!
//! Segments partition exactly the sub-ranges of `[start, min(end, now)]`
//! where an activity was active. Idle time is implicit - a gap between
//! segments - and stop markers never produce output.

use std::collections::HashMap;

use serde::Serialize;

use crate::board::Board;
use crate::types::ActivityId;

/// A contiguous stretch of one activity being active.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Segment {
    /// The activity that was running.
    #[serde(rename = "activityId")]
    pub activity: ActivityId,

    /// When the segment starts, in epoch milliseconds.
    #[serde(rename = "segmentStart")]
    pub start: i64,

    /// How long the activity ran, in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: i64,
}

/// Per-activity aggregate over a window.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ActivitySummary {
    /// The activity id.
    #[serde(rename = "activityId")]
    pub id: ActivityId,

    /// The activity's name at report time.
    pub name: String,

    /// Sum of this activity's segment durations, in milliseconds.
    #[serde(rename = "totalDuration")]
    pub total_ms: i64,

    /// Number of segments (activations) in the window.
    #[serde(rename = "activationCount")]
    pub activations: usize,
}

/// Reconstructs the activity segments inside `[start, min(end, now)]`.
///
/// An activity already running strictly before `start` contributes a
/// synthesized leading segment beginning at `start`; an activity still
/// running at the end of the slice is clamped to `min(end, now)`. A window
/// that clips to nothing, such as one lying entirely in the future, yields
/// no segments, and marks past the clip never contribute.
pub fn activity_segments(board: &Board, start: i64, end: i64, now: i64) -> Vec<Segment> {
    let clipped_end = end.min(now);
    if clipped_end <= start {
        return Vec::new();
    }
    let slice = board.marks_between(start, clipped_end);
    let mut segments = Vec::new();

    // A mark exactly at `start` belongs to the slice, so only a strictly
    // earlier mark can carry an activity into the window.
    if let Some(prev) = board.prior_mark(start) {
        if prev.time < start {
            if let Some(activity) = &prev.activity {
                let until = slice.first().map_or(clipped_end, |mark| mark.time);
                segments.push(Segment {
                    activity: activity.clone(),
                    start,
                    duration_ms: until - start,
                });
            }
        }
    }

    for pair in slice.windows(2) {
        if let Some(activity) = &pair[0].activity {
            segments.push(Segment {
                activity: activity.clone(),
                start: pair[0].time,
                duration_ms: pair[1].time - pair[0].time,
            });
        }
    }

    // The final mark is open-ended; clamp it to the window.
    if let Some(last) = slice.last() {
        if let Some(activity) = &last.activity {
            segments.push(Segment {
                activity: activity.clone(),
                start: last.time,
                duration_ms: clipped_end - last.time,
            });
        }
    }

    segments
}

/// Aggregates [`activity_segments`] per activity: total duration and
/// activation count. Order is unspecified; presentation layers sort.
pub fn activity_summary(board: &Board, start: i64, end: i64, now: i64) -> Vec<ActivitySummary> {
    let mut totals: HashMap<ActivityId, ActivitySummary> = HashMap::new();
    for segment in activity_segments(board, start, end, now) {
        let entry = totals
            .entry(segment.activity.clone())
            .or_insert_with(|| ActivitySummary {
                name: board
                    .activity(&segment.activity)
                    .map_or_else(|| segment.activity.to_string(), |a| a.name.clone()),
                id: segment.activity,
                total_ms: 0,
                activations: 0,
            });
        entry.total_ms += segment.duration_ms;
        entry.activations += 1;
    }
    totals.into_values().collect()
}
