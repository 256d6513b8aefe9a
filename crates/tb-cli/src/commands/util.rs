//! Shared helpers for subcommands.

use anyhow::{Result, bail};

use tb_core::{ActivityId, Board, BoardId, Boards};

/// The current board, or a hint to create one.
pub fn current_board(boards: &Boards) -> Result<&Board> {
    match boards.current_board() {
        Some(board) => Ok(board),
        None => bail!("no current board; run `tb board create <name>`"),
    }
}

/// Mutable access to the current board, or a hint to create one.
pub fn current_board_mut(boards: &mut Boards) -> Result<&mut Board> {
    match boards.current_board_mut() {
        Some(board) => Ok(board),
        None => bail!("no current board; run `tb board create <name>`"),
    }
}

/// Resolves an activity argument by exact id first, then by exact name.
pub fn resolve_activity(board: &Board, needle: &str) -> Result<ActivityId> {
    if let Ok(id) = ActivityId::new(needle) {
        if board.activity(&id).is_some() {
            return Ok(id);
        }
    }
    let mut matches = board.activities().filter(|activity| activity.name == needle);
    match (matches.next(), matches.next()) {
        (Some(activity), None) => Ok(activity.id.clone()),
        (Some(_), Some(_)) => bail!("activity name {needle:?} is ambiguous; use the id"),
        (None, _) => bail!("no activity matching {needle:?} on board {:?}", board.name),
    }
}

/// Resolves a board argument by exact id first, then by exact name.
pub fn resolve_board(boards: &Boards, needle: &str) -> Result<BoardId> {
    if let Ok(id) = BoardId::new(needle) {
        if boards.board(&id).is_some() {
            return Ok(id);
        }
    }
    let mut matches = boards.boards().filter(|board| board.name == needle);
    match (matches.next(), matches.next()) {
        (Some(board), None) => Ok(board.id.clone()),
        (Some(_), Some(_)) => bail!("board name {needle:?} is ambiguous; use the id"),
        (None, _) => bail!("no board matching {needle:?}"),
    }
}

/// Formats milliseconds as a duration string.
///
/// Returns "Xh Ym" if >= 1 hour, "Xm Ys" if >= 1 minute, "Xs" otherwise.
/// Negative durations render as "0s".
pub fn format_duration(ms: i64) -> String {
    if ms < 0 {
        return "0s".to_string();
    }
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
