//! Boards - the entity store holding activities, the timeline, and recency.
//!
//! A board exclusively owns its activities in an id-keyed map; marks and the
//! recency list carry only ids and resolve through that map on read, so no
//! structure can dangle after a delete. All mutations are atomic: they
//! validate first and either fully apply or leave the board untouched.
//!
//! Timeline invariants, upheld after every mutation:
//! - mark times are non-decreasing (ties permitted)
//! - no two consecutive stop markers, and no leading stop marker
//! - the running activity, if any, is the last mark's reference
//! - the recency list holds each activity at most once, last-activated last

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activity::Activity;
use crate::mark::Mark;
use crate::search::{Bound, locate};
use crate::types::{ActivityId, BoardId};

/// Errors surfaced by board mutations.
///
/// All of these leave the board in its pre-call state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A new mark's time precedes the latest recorded mark. Never clamped:
    /// it signals a clock or import inconsistency the caller must resolve.
    #[error("mark time {time} precedes the last recorded mark at {last}")]
    OutOfOrder { time: i64, last: i64 },

    /// A merge batch overlaps the existing timeline; the batch is rejected
    /// wholesale rather than interleaved.
    #[error(
        "batch range [{batch_first}, {batch_last}] overlaps timeline range [{first}, {last}]"
    )]
    RangeConflict {
        batch_first: i64,
        batch_last: i64,
        first: i64,
        last: i64,
    },

    /// A mutation referenced an activity id absent from the board.
    #[error("no activity with id {id}")]
    NotFound { id: ActivityId },
}

/// A named collection of activities sharing one timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique identifier.
    pub id: BoardId,

    /// Human-readable name.
    pub name: String,

    #[serde(default)]
    activities: HashMap<ActivityId, Activity>,

    #[serde(default)]
    timeline: Vec<Mark>,

    #[serde(default)]
    recency: Vec<ActivityId>,
}

impl Board {
    /// Creates an empty board. Use [`Factory`](crate::Factory) rather than
    /// minting ids by hand.
    pub fn new(id: BoardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            activities: HashMap::new(),
            timeline: Vec::new(),
            recency: Vec::new(),
        }
    }

    // ========== Read views ==========

    /// Looks up an activity by id.
    pub fn activity(&self, id: &ActivityId) -> Option<&Activity> {
        self.activities.get(id)
    }

    /// All activities, in no particular order.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.values()
    }

    /// The full ascending timeline.
    pub fn timeline(&self) -> &[Mark] {
        &self.timeline
    }

    /// Activity ids ordered by last activation, most recent last.
    pub fn recency(&self) -> &[ActivityId] {
        &self.recency
    }

    /// The most recent mark, if any.
    pub fn last_mark(&self) -> Option<&Mark> {
        self.timeline.last()
    }

    /// The currently running activity: the last mark's reference.
    pub fn current_activity(&self) -> Option<&ActivityId> {
        self.timeline.last().and_then(|mark| mark.activity.as_ref())
    }

    // ========== Timeline queries ==========

    /// Marks with `start <= time <= end`, as a slice of the timeline.
    pub fn marks_between(&self, start: i64, end: i64) -> &[Mark] {
        let key = |mark: &Mark| mark.time;
        let Some(lo) = locate(&start, &self.timeline, key, Bound::Ceiling) else {
            return &[];
        };
        let Some(hi) = locate(&end, &self.timeline, key, Bound::Floor) else {
            return &[];
        };
        if lo > hi {
            return &[];
        }
        &self.timeline[lo..=hi]
    }

    /// The last mark at or before `time`.
    pub fn prior_mark(&self, time: i64) -> Option<&Mark> {
        locate(&time, &self.timeline, |mark| mark.time, Bound::Floor)
            .map(|pos| &self.timeline[pos])
    }

    /// The first mark at or after `time`.
    pub fn next_mark(&self, time: i64) -> Option<&Mark> {
        locate(&time, &self.timeline, |mark| mark.time, Bound::Ceiling)
            .map(|pos| &self.timeline[pos])
    }

    // ========== Mutations ==========

    /// Inserts an activity (replacing any same-id entry) and marks it as the
    /// most recently touched.
    pub fn add_activity(&mut self, activity: Activity) {
        let id = activity.id.clone();
        self.activities.insert(id.clone(), activity);
        self.touch_recency(&id);
    }

    /// Renames an activity in place. No timeline effect.
    pub fn rename_activity(
        &mut self,
        id: &ActivityId,
        name: impl Into<String>,
    ) -> Result<(), BoardError> {
        let activity = self
            .activities
            .get_mut(id)
            .ok_or_else(|| BoardError::NotFound { id: id.clone() })?;
        activity.name = name.into();
        Ok(())
    }

    /// Removes an activity and every logical reference to it.
    ///
    /// Marks that pointed at the deleted activity degrade to stop markers;
    /// the timeline is then re-normalized so no run of consecutive stop
    /// markers (and no leading one) survives the deletion.
    pub fn delete_activity(&mut self, id: &ActivityId) -> Result<(), BoardError> {
        if self.activities.remove(id).is_none() {
            return Err(BoardError::NotFound { id: id.clone() });
        }
        self.recency.retain(|entry| entry != id);
        for mark in &mut self.timeline {
            if mark.activity.as_ref() == Some(id) {
                mark.activity = None;
            }
        }
        let pruned = self.normalize_timeline();
        tracing::debug!(board = %self.id, activity = %id, pruned, "deleted activity");
        Ok(())
    }

    /// Records that `activity` (or nothing, for a stop) became active at `time`.
    ///
    /// Starting the already-running activity - including stopping when nothing
    /// runs - is a no-op. Otherwise the running activity's `last_duration_ms`
    /// is closed out and a new mark is appended.
    pub fn start_activity(
        &mut self,
        activity: Option<&ActivityId>,
        time: i64,
    ) -> Result<(), BoardError> {
        if let Some(id) = activity {
            if !self.activities.contains_key(id) {
                return Err(BoardError::NotFound { id: id.clone() });
            }
        }
        if let Some(last) = self.timeline.last() {
            if time < last.time {
                return Err(BoardError::OutOfOrder {
                    time,
                    last: last.time,
                });
            }
        }
        if self.current_activity() == activity {
            return Ok(());
        }

        // Close out the interval of whatever was running.
        let running = self
            .timeline
            .last()
            .and_then(|mark| mark.activity.clone().map(|id| (id, mark.time)));
        if let Some((id, started_at)) = running {
            if let Some(entry) = self.activities.get_mut(&id) {
                entry.last_duration_ms = time - started_at;
            }
        }

        self.timeline.push(Mark::new(time, activity.cloned()));
        if let Some(id) = activity {
            self.touch_recency(id);
        }
        Ok(())
    }

    /// Records that nothing is active starting at `time`.
    pub fn stop_activity(&mut self, time: i64) -> Result<(), BoardError> {
        self.start_activity(None, time)
    }

    /// Upserts each activity by id, independent of timeline state.
    ///
    /// Used for batch import; the recency list is left untouched.
    pub fn bulk_update_activities(&mut self, activities: impl IntoIterator<Item = Activity>) {
        for activity in activities {
            self.activities.insert(activity.id.clone(), activity);
        }
    }

    /// Appends a pre-sorted batch of marks to one end of the timeline.
    ///
    /// The batch must sit entirely before or entirely after the existing
    /// range; anything overlapping or interleaved is rejected wholesale with
    /// [`BoardError::RangeConflict`]. Every referenced activity must already
    /// be present (upsert first via [`Self::bulk_update_activities`]).
    ///
    /// Returns `false` when the batch was empty and nothing merged.
    pub fn merge_history(&mut self, batch: Vec<Mark>) -> Result<bool, BoardError> {
        if batch.is_empty() {
            return Ok(false);
        }
        debug_assert!(batch.is_sorted_by_key(|mark| mark.time));
        for mark in &batch {
            if let Some(id) = &mark.activity {
                if !self.activities.contains_key(id) {
                    return Err(BoardError::NotFound { id: id.clone() });
                }
            }
        }

        let merged = batch.len();
        if self.timeline.is_empty() {
            self.timeline = batch;
        } else {
            let first = self.timeline[0].time;
            let last = self.timeline[self.timeline.len() - 1].time;
            let batch_first = batch[0].time;
            let batch_last = batch[batch.len() - 1].time;
            if batch_last < first {
                self.timeline.splice(0..0, batch);
            } else if last < batch_first {
                self.timeline.extend(batch);
            } else {
                return Err(BoardError::RangeConflict {
                    batch_first,
                    batch_last,
                    first,
                    last,
                });
            }
        }
        // Collapse any stop-marker run created at the seam.
        let pruned = self.normalize_timeline();
        tracing::debug!(board = %self.id, merged, pruned, "merged history batch");
        Ok(true)
    }

    /// Moves `id` to the most-recent end of the recency list.
    fn touch_recency(&mut self, id: &ActivityId) {
        self.recency.retain(|entry| entry != id);
        self.recency.push(id.clone());
    }

    /// Collapses each run of consecutive stop markers to its first mark and
    /// drops a leading stop marker. Returns how many marks were removed.
    fn normalize_timeline(&mut self) -> usize {
        let before = self.timeline.len();
        let mut after_stop = false;
        self.timeline.retain(|mark| {
            let keep = !(mark.is_stop() && after_stop);
            if keep {
                after_stop = mark.is_stop();
            }
            keep
        });
        if self.timeline.first().is_some_and(Mark::is_stop) {
            self.timeline.remove(0);
        }
        before - self.timeline.len()
    }
}
