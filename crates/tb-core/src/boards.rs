//! The snapshot root: every board plus the current selection.
//!
//! Serializes to the durable snapshot shape:
//! `{ "boards": { id: board, ... }, "currentBoardId": id }`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::BoardId;

/// The top-level collection of boards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Boards {
    #[serde(default)]
    boards: HashMap<BoardId, Board>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_board_id: Option<BoardId>,
}

impl Boards {
    /// Creates an empty collection with no current board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a board and makes it current.
    pub fn add_board(&mut self, board: Board) {
        self.current_board_id = Some(board.id.clone());
        self.boards.insert(board.id.clone(), board);
    }

    /// Drops a board. The current selection degrades to none if it pointed
    /// at the removed board.
    pub fn delete_board(&mut self, id: &BoardId) {
        self.boards.remove(id);
        if self.current_board_id.as_ref() == Some(id) {
            self.current_board_id = None;
        }
    }

    /// Looks up a board by id.
    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.get(id)
    }

    /// Mutable lookup by id.
    pub fn board_mut(&mut self, id: &BoardId) -> Option<&mut Board> {
        self.boards.get_mut(id)
    }

    /// All boards, in no particular order.
    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.values()
    }

    /// Number of boards.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// True when no boards exist.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Makes `id` the current board. Returns false if no such board exists.
    pub fn set_current(&mut self, id: &BoardId) -> bool {
        if self.boards.contains_key(id) {
            self.current_board_id = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// The currently selected board, if the selection still resolves.
    pub fn current_board(&self) -> Option<&Board> {
        self.current_board_id
            .as_ref()
            .and_then(|id| self.boards.get(id))
    }

    /// Mutable access to the currently selected board.
    pub fn current_board_mut(&mut self) -> Option<&mut Board> {
        let id = self.current_board_id.clone()?;
        self.boards.get_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::factory::{Factory, FixedGenerator};

    #[test]
    fn add_board_selects_it() {
        let factory = Factory::new(FixedGenerator::new(0));
        let mut boards = Boards::new();
        let personal = factory.create_board("Personal").unwrap();
        let work = factory.create_board("Work").unwrap();
        let work_id = work.id.clone();

        boards.add_board(personal);
        boards.add_board(work);
        assert_eq!(boards.current_board().unwrap().id, work_id);
        assert_eq!(boards.len(), 2);
    }

    #[test]
    fn delete_board_degrades_current_selection() {
        let factory = Factory::new(FixedGenerator::new(0));
        let mut boards = Boards::new();
        let board = factory.create_board("Personal").unwrap();
        let id = board.id.clone();
        boards.add_board(board);

        boards.delete_board(&id);
        assert!(boards.current_board().is_none());
        assert!(boards.is_empty());
    }

    #[test]
    fn set_current_requires_existing_board() {
        let factory = Factory::new(FixedGenerator::new(0));
        let mut boards = Boards::new();
        let board = factory.create_board("Personal").unwrap();
        let id = board.id.clone();
        boards.add_board(board);

        assert!(boards.set_current(&id));
        assert!(!boards.set_current(&BoardId::new("ghost").unwrap()));
        assert_eq!(boards.current_board().unwrap().id, id);
    }

    #[test]
    fn snapshot_shape_matches_durable_format() {
        let factory = Factory::new(FixedGenerator::new(0));
        let mut boards = Boards::new();
        let mut board = factory.create_board("Personal").unwrap();
        let activity = factory.create_activity("Reading").unwrap();
        let activity_id = activity.id.clone();
        board.add_activity(activity);
        board.start_activity(Some(&activity_id), 1000).unwrap();
        board.stop_activity(5000).unwrap();
        boards.add_board(board);

        let json = serde_json::to_value(&boards).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "boards": {
                    "id-1": {
                        "id": "id-1",
                        "name": "Personal",
                        "activities": {
                            "id-2": {"id": "id-2", "name": "Reading", "lastDuration": 4000}
                        },
                        "timeline": [
                            {"time": 1000, "activityId": "id-2"},
                            {"time": 5000}
                        ],
                        "recency": ["id-2"]
                    }
                },
                "currentBoardId": "id-1"
            })
        );

        let parsed: Boards = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, boards);
    }
}
