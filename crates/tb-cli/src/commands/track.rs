//! Tracking subcommands (start, stop, status).

use std::io::Write;

use anyhow::{Context, Result};

use tb_core::{Boards, Factory, Generator};

use super::util;

/// Starts `needle` on the current board. Returns whether the board changed;
/// starting the activity that is already running is a no-op.
pub fn start<G: Generator>(
    boards: &mut Boards,
    factory: &Factory<G>,
    needle: &str,
) -> Result<bool> {
    let now = factory.now_ms();
    let board = util::current_board_mut(boards)?;
    let id = util::resolve_activity(board, needle)?;
    let name = board
        .activity(&id)
        .map(|activity| activity.name.clone())
        .unwrap_or_default();
    if board.current_activity() == Some(&id) {
        println!("{name} is already running.");
        return Ok(false);
    }
    board
        .start_activity(Some(&id), now)
        .context("failed to start activity")?;
    println!("Started {name} ({id})");
    Ok(true)
}

/// Stops whatever is running. Returns whether the board changed; stopping
/// an idle board is a no-op.
pub fn stop<G: Generator>(boards: &mut Boards, factory: &Factory<G>) -> Result<bool> {
    let now = factory.now_ms();
    let board = util::current_board_mut(boards)?;
    let Some(running) = board.current_activity().cloned() else {
        println!("Nothing is running.");
        return Ok(false);
    };
    board.stop_activity(now).context("failed to stop activity")?;
    let name = board
        .activity(&running)
        .map(|activity| activity.name.clone())
        .unwrap_or_default();
    let duration = board
        .activity(&running)
        .map_or(0, |activity| activity.last_duration_ms);
    println!("Stopped {name} after {}", util::format_duration(duration));
    Ok(true)
}

pub fn status<W: Write>(writer: &mut W, boards: &Boards, now_ms: i64) -> Result<()> {
    let board = util::current_board(boards)?;
    writeln!(writer, "Board: {} ({})", board.name, board.id)?;

    match board.last_mark() {
        Some(mark) => match &mark.activity {
            Some(id) => {
                let name = board
                    .activity(id)
                    .map_or_else(|| id.to_string(), |activity| activity.name.clone());
                writeln!(
                    writer,
                    "Running: {name} (for {})",
                    util::format_duration(now_ms - mark.time)
                )?;
            }
            None => writeln!(writer, "Idle.")?,
        },
        None => writeln!(writer, "Idle.")?,
    }

    if board.recency().is_empty() {
        return Ok(());
    }
    writeln!(writer, "Recent activities:")?;
    for id in board.recency().iter().rev() {
        let Some(activity) = board.activity(id) else {
            continue;
        };
        if activity.last_duration_ms > 0 {
            writeln!(
                writer,
                "- {} (last {})",
                activity.name,
                util::format_duration(activity.last_duration_ms)
            )?;
        } else {
            writeln!(writer, "- {}", activity.name)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use tb_core::FixedGenerator;

    fn sample_boards() -> Boards {
        let factory = Factory::new(FixedGenerator::new(0));
        let mut boards = Boards::new();
        let mut board = factory.create_board("Personal").unwrap();
        board.add_activity(factory.create_activity("Reading").unwrap());
        board.add_activity(factory.create_activity("Writing").unwrap());
        boards.add_board(board);
        boards
    }

    #[test]
    fn start_and_stop_update_the_timeline() {
        let mut boards = sample_boards();
        let factory = Factory::new(FixedGenerator::new(10_000));

        assert!(start(&mut boards, &factory, "Reading").unwrap());
        assert!(boards.current_board().unwrap().current_activity().is_some());

        let factory = Factory::new(FixedGenerator::new(70_000));
        assert!(stop(&mut boards, &factory).unwrap());

        let board = boards.current_board().unwrap();
        assert!(board.current_activity().is_none());
        assert_eq!(board.timeline().len(), 2);
        let reading = util::resolve_activity(board, "Reading").unwrap();
        assert_eq!(board.activity(&reading).unwrap().last_duration_ms, 60_000);
    }

    #[test]
    fn redundant_start_and_idle_stop_report_no_change() {
        let mut boards = sample_boards();
        let factory = Factory::new(FixedGenerator::new(10_000));

        assert!(!stop(&mut boards, &factory).unwrap());
        assert!(boards.current_board().unwrap().timeline().is_empty());

        assert!(start(&mut boards, &factory, "Reading").unwrap());
        assert!(!start(&mut boards, &factory, "Reading").unwrap());
        assert_eq!(boards.current_board().unwrap().timeline().len(), 1);
    }

    #[test]
    fn status_shows_running_activity_and_recency() {
        let mut boards = sample_boards();
        {
            let board = boards.current_board_mut().unwrap();
            let writing = util::resolve_activity(board, "Writing").unwrap();
            board.start_activity(Some(&writing), 1000).unwrap();
            board.stop_activity(31_000).unwrap();
            let reading = util::resolve_activity(board, "Reading").unwrap();
            board.start_activity(Some(&reading), 40_000).unwrap();
        }

        let mut output = Vec::new();
        status(&mut output, &boards, 100_000).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Board: Personal (id-1)
        Running: Reading (for 1m 0s)
        Recent activities:
        - Reading
        - Writing (last 30s)
        ");
    }

    #[test]
    fn status_reports_idle_board() {
        let boards = sample_boards();
        let mut output = Vec::new();
        status(&mut output, &boards, 0).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Idle."));
    }
}
