//! Import command: bulk activity upsert plus a history merge.
//!
//! The batch file is JSON shaped like
//! `{ "activities": [{id, name, lastDuration}], "timeline": [{time, activityId?}] }`.
//! The timeline must be sorted ascending and sit entirely before or after the
//! board's existing range; an overlapping batch is rejected wholesale.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use tb_core::{Activity, Boards, Mark};

use super::util;

#[derive(Debug, Deserialize)]
struct ImportBatch {
    #[serde(default)]
    activities: Vec<Activity>,

    #[serde(default)]
    timeline: Vec<Mark>,
}

pub fn run(boards: &mut Boards, file: &Path) -> Result<()> {
    let payload = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let batch: ImportBatch = serde_json::from_str(&payload)
        .with_context(|| format!("invalid JSON in {}", file.display()))?;
    if !batch.timeline.is_sorted_by_key(|mark| mark.time) {
        bail!("import timeline must be sorted ascending by time");
    }

    let board = util::current_board_mut(boards)?;
    let activities = batch.activities.len();
    board.bulk_update_activities(batch.activities);
    let marks = batch.timeline.len();
    let merged = board
        .merge_history(batch.timeline)
        .context("import rejected")?;

    if merged {
        println!(
            "Imported {activities} activities and {marks} marks into {}",
            board.name
        );
    } else {
        println!("Upserted {activities} activities; no marks to merge.");
    }
    Ok(())
}
