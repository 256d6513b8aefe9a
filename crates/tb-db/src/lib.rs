//! Storage layer for the timeboard tracker.
//!
//! Persists the full [`Boards`] snapshot as a JSON value in a `SQLite`
//! key/value table using `rusqlite`. The snapshot shape is fixed by the
//! serde derives in `tb-core` (`boards` / `currentBoardId` / `timeline` /
//! `lastDuration`), so durable data stays compatible with other readers of
//! the same format.
//!
//! # Thread Safety
//!
//! [`Database`] wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`. For multi-threaded access use a `Mutex<Database>` or separate
//! instances per thread.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use tb_core::Boards;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored snapshot failed to encode or decode.
    #[error("snapshot encoding error for key {key}: {source}")]
    Snapshot {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- Snapshots table: one JSON document per key
            -- updated_at: ISO 8601 (e.g., '2024-01-15T10:30:00Z')
            CREATE TABLE IF NOT EXISTS snapshots (
                key TEXT PRIMARY KEY,
                updated_at TEXT NOT NULL,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Loads the snapshot stored under `key`, or `None` if absent.
    pub fn load_snapshot(&self, key: &str) -> Result<Option<Boards>, DbError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        let Some(value) = value else {
            tracing::debug!(key, "no snapshot found");
            return Ok(None);
        };
        let boards = serde_json::from_str(&value).map_err(|source| DbError::Snapshot {
            key: key.to_string(),
            source,
        })?;
        tracing::debug!(key, bytes = value.len(), "loaded snapshot");
        Ok(Some(boards))
    }

    /// Writes the snapshot under `key`, replacing any previous value.
    pub fn save_snapshot(&mut self, key: &str, boards: &Boards) -> Result<(), DbError> {
        let value = serde_json::to_string(boards).map_err(|source| DbError::Snapshot {
            key: key.to_string(),
            source,
        })?;
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn.execute(
            "INSERT INTO snapshots (key, updated_at, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET updated_at = ?2, value = ?3",
            params![key, updated_at, value],
        )?;
        tracing::debug!(key, bytes = value.len(), "saved snapshot");
        Ok(())
    }

    /// Removes the snapshot stored under `key`, if any.
    pub fn delete_snapshot(&mut self, key: &str) -> Result<bool, DbError> {
        let removed = self
            .conn
            .execute("DELETE FROM snapshots WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tb_core::{Factory, FixedGenerator};

    fn sample_boards() -> Boards {
        let factory = Factory::new(FixedGenerator::new(0));
        let mut boards = Boards::new();
        let mut board = factory.create_board("Personal").unwrap();
        let activity = factory.create_activity("Reading").unwrap();
        let activity_id = activity.id.clone();
        board.add_activity(activity);
        board.start_activity(Some(&activity_id), 1000).unwrap();
        board.stop_activity(5000).unwrap();
        boards.add_board(board);
        boards
    }

    #[test]
    fn load_missing_snapshot_returns_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.load_snapshot("boards").unwrap().is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let mut db = Database::open_in_memory().unwrap();
        let boards = sample_boards();

        db.save_snapshot("boards", &boards).unwrap();
        let loaded = db.load_snapshot("boards").unwrap().unwrap();
        assert_eq!(loaded, boards);
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let mut db = Database::open_in_memory().unwrap();
        let boards = sample_boards();
        db.save_snapshot("boards", &Boards::new()).unwrap();
        db.save_snapshot("boards", &boards).unwrap();

        let loaded = db.load_snapshot("boards").unwrap().unwrap();
        assert_eq!(loaded, boards);
    }

    #[test]
    fn delete_snapshot_reports_removal() {
        let mut db = Database::open_in_memory().unwrap();
        db.save_snapshot("boards", &Boards::new()).unwrap();

        assert!(db.delete_snapshot("boards").unwrap());
        assert!(!db.delete_snapshot("boards").unwrap());
        assert!(db.load_snapshot("boards").unwrap().is_none());
    }

    #[test]
    fn snapshot_persists_across_reopen() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("tb.db");
        let boards = sample_boards();

        {
            let mut db = Database::open(&path).unwrap();
            db.save_snapshot("boards", &boards).unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.load_snapshot("boards").unwrap().unwrap(), boards);
    }
}
