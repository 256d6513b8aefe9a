//! Injected clock/id provider and the entity factory.
//!
//! Boards and activities are only constructed through [`Factory`], which
//! consumes a [`Generator`] for timestamps and unique ids. Injecting the
//! generator keeps creation deterministic in tests (fixed clock, counted ids)
//! without any module-level singleton.

use std::cell::Cell;

use chrono::Utc;
use uuid::Uuid;

use crate::activity::Activity;
use crate::board::Board;
use crate::types::{ActivityId, BoardId, ValidationError};

/// Supplies wall-clock timestamps and unique identifiers.
pub trait Generator {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> i64;

    /// A fresh opaque unique identifier.
    fn new_id(&self) -> String;
}

/// Production generator: chrono wall clock and random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGenerator;

impl Generator for SystemGenerator {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic generator for tests: a settable clock and counted ids.
#[derive(Debug, Default)]
pub struct FixedGenerator {
    now_ms: Cell<i64>,
    counter: Cell<u64>,
}

impl FixedGenerator {
    /// Creates a generator whose clock reads `now_ms`.
    pub const fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
            counter: Cell::new(0),
        }
    }

    /// Moves the clock to `now_ms`.
    pub fn set_now(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }
}

impl Generator for FixedGenerator {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }

    fn new_id(&self) -> String {
        let next = self.counter.get() + 1;
        self.counter.set(next);
        format!("id-{next}")
    }
}

/// Constructs boards and activities with consistent ids and timestamps.
#[derive(Debug)]
pub struct Factory<G> {
    generator: G,
}

impl<G: Generator> Factory<G> {
    /// Wraps a generator.
    pub const fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Current time per the injected generator.
    pub fn now_ms(&self) -> i64 {
        self.generator.now_ms()
    }

    /// Allocates an empty board with a fresh id.
    pub fn create_board(&self, name: impl Into<String>) -> Result<Board, ValidationError> {
        let id = BoardId::new(self.generator.new_id())?;
        Ok(Board::new(id, name))
    }

    /// Allocates an activity with a fresh id, not yet attached to any board.
    pub fn create_activity(&self, name: impl Into<String>) -> Result<Activity, ValidationError> {
        let id = ActivityId::new(self.generator.new_id())?;
        Ok(Activity::new(id, name))
    }
}
