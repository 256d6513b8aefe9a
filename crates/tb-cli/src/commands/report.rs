//! Report and summary commands over a time window.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

use tb_core::{Boards, activity_segments, activity_summary};

use crate::ReportArgs;

use super::util;

// ========== Period Date Calculation ==========

/// Converts a local date at midnight to UTC.
/// Handles DST ambiguity by picking the earlier time.
fn local_midnight_to_utc(local_date: NaiveDate) -> DateTime<Utc> {
    let midnight = local_date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight) {
        // Single or ambiguous (DST fall-back): use the earlier time
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            // DST spring-forward gap at midnight is rare but possible;
            // 1am local is guaranteed to exist
            let one_am = local_date.and_time(NaiveTime::from_hms_opt(1, 0, 0).unwrap());
            Local
                .from_local_datetime(&one_am)
                .unwrap()
                .with_timezone(&Utc)
        }
    }
}

/// Resolves the report window as `[start, end)` epoch milliseconds.
///
/// `--from`/`--to` select whole local days (inclusive end date); `--week`
/// runs Monday to next Monday; `--day` (and no flag at all) is today.
pub fn period_bounds(args: &ReportArgs, today: NaiveDate) -> (i64, i64) {
    if args.day {
        return day_bounds(today);
    }
    if args.week {
        let days_since_monday = today.weekday().num_days_from_monday();
        let monday = today - chrono::Duration::days(i64::from(days_since_monday));
        let next_monday = monday + chrono::Duration::days(7);
        return (
            local_midnight_to_utc(monday).timestamp_millis(),
            local_midnight_to_utc(next_monday).timestamp_millis(),
        );
    }
    if let Some(from) = args.from {
        let to = args.to.unwrap_or(from);
        return (
            local_midnight_to_utc(from).timestamp_millis(),
            local_midnight_to_utc(to + chrono::Duration::days(1)).timestamp_millis(),
        );
    }
    day_bounds(today)
}

/// `[local midnight, next local midnight)` around one date.
fn day_bounds(day: NaiveDate) -> (i64, i64) {
    (
        local_midnight_to_utc(day).timestamp_millis(),
        local_midnight_to_utc(day + chrono::Duration::days(1)).timestamp_millis(),
    )
}

/// Formats an epoch-milliseconds instant as local wall-clock time.
fn format_local(ms: i64) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map_or_else(|| format!("@{ms}"), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

pub fn run_report<W: Write>(
    writer: &mut W,
    boards: &Boards,
    start_ms: i64,
    end_ms: i64,
    now_ms: i64,
    json: bool,
) -> Result<()> {
    let board = util::current_board(boards)?;
    let segments = activity_segments(board, start_ms, end_ms, now_ms);

    if json {
        serde_json::to_writer_pretty(&mut *writer, &segments)?;
        writeln!(writer)?;
        return Ok(());
    }

    if segments.is_empty() {
        writeln!(writer, "No activity on board {} in this period.", board.name)?;
        return Ok(());
    }
    let mut total = 0;
    for segment in &segments {
        let name = board
            .activity(&segment.activity)
            .map_or_else(|| segment.activity.to_string(), |a| a.name.clone());
        writeln!(
            writer,
            "{}  {:<24} {}",
            format_local(segment.start),
            name,
            util::format_duration(segment.duration_ms)
        )?;
        total += segment.duration_ms;
    }
    writeln!(writer, "Total: {}", util::format_duration(total))?;
    Ok(())
}

pub fn run_summary<W: Write>(
    writer: &mut W,
    boards: &Boards,
    start_ms: i64,
    end_ms: i64,
    now_ms: i64,
    json: bool,
) -> Result<()> {
    let board = util::current_board(boards)?;
    let mut summary = activity_summary(board, start_ms, end_ms, now_ms);
    // Core order is unspecified; sort for presentation.
    summary.sort_by(|a, b| b.total_ms.cmp(&a.total_ms).then_with(|| a.name.cmp(&b.name)));

    if json {
        serde_json::to_writer_pretty(&mut *writer, &summary)?;
        writeln!(writer)?;
        return Ok(());
    }

    if summary.is_empty() {
        writeln!(writer, "No activity on board {} in this period.", board.name)?;
        return Ok(());
    }
    for entry in &summary {
        writeln!(
            writer,
            "{:<24} {:>10}  x{}",
            entry.name,
            util::format_duration(entry.total_ms),
            entry.activations
        )?;
    }
    Ok(())
}
