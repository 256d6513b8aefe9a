//! Activity management subcommands (add, list, rename, delete).

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use tb_core::{Activity, Boards, Factory, Generator};

use super::util;

pub fn add<G: Generator>(boards: &mut Boards, factory: &Factory<G>, name: &str) -> Result<()> {
    let activity = factory.create_activity(name)?;
    let id = activity.id.clone();
    let board = util::current_board_mut(boards)?;
    board.add_activity(activity);
    println!("Added {name} ({id}) to board {}", board.name);
    Ok(())
}

pub fn rename(boards: &mut Boards, needle: &str, name: &str) -> Result<()> {
    let board = util::current_board_mut(boards)?;
    let id = util::resolve_activity(board, needle)?;
    board
        .rename_activity(&id, name)
        .context("failed to rename activity")?;
    println!("Renamed {id} to {name}");
    Ok(())
}

pub fn delete(boards: &mut Boards, needle: &str) -> Result<()> {
    let board = util::current_board_mut(boards)?;
    let id = util::resolve_activity(board, needle)?;
    let name = board
        .activity(&id)
        .map(|activity| activity.name.clone())
        .unwrap_or_default();
    board
        .delete_activity(&id)
        .context("failed to delete activity")?;
    println!("Deleted {name} ({id})");
    Ok(())
}

/// Row for `tb list --json`.
#[derive(Debug, Serialize)]
struct ActivityRow<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "lastDuration")]
    last_duration_ms: i64,
}

pub fn list<W: Write>(writer: &mut W, boards: &Boards, json: bool) -> Result<()> {
    let board = util::current_board(boards)?;

    // Most recently activated first; never-activated activities follow by name.
    let mut ordered: Vec<&Activity> = board
        .recency()
        .iter()
        .rev()
        .filter_map(|id| board.activity(id))
        .collect();
    let mut rest: Vec<&Activity> = board
        .activities()
        .filter(|activity| !board.recency().contains(&activity.id))
        .collect();
    rest.sort_by(|a, b| a.name.cmp(&b.name));
    ordered.extend(rest);

    if json {
        let rows: Vec<ActivityRow<'_>> = ordered
            .iter()
            .map(|activity| ActivityRow {
                id: activity.id.as_str(),
                name: &activity.name,
                last_duration_ms: activity.last_duration_ms,
            })
            .collect();
        serde_json::to_writer_pretty(&mut *writer, &rows)?;
        writeln!(writer)?;
        return Ok(());
    }

    if ordered.is_empty() {
        writeln!(writer, "No activities on board {}.", board.name)?;
        return Ok(());
    }
    writeln!(writer, "Activities on {}:", board.name)?;
    for activity in ordered {
        if activity.last_duration_ms > 0 {
            writeln!(
                writer,
                "- {} ({}) last {}",
                activity.name,
                activity.id,
                util::format_duration(activity.last_duration_ms)
            )?;
        } else {
            writeln!(writer, "- {} ({})", activity.name, activity.id)?;
        }
    }
    Ok(())
}
