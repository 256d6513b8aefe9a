//! Core domain logic for the timeboard tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Boards: named collections of activities sharing one timeline
//! - Timeline mutations: start/stop/rename/delete with atomic error handling
//! - Boundary search: ceiling/floor binary search for slicing by time window
//! - Reports: activity segments and per-activity summaries over a window

pub mod activity;
pub mod board;
pub mod boards;
pub mod factory;
pub mod mark;
pub mod report;
pub mod search;
pub mod types;

pub use activity::Activity;
pub use board::{Board, BoardError};
pub use boards::Boards;
pub use factory::{Factory, FixedGenerator, Generator, SystemGenerator};
pub use mark::Mark;
pub use report::{ActivitySummary, Segment, activity_segments, activity_summary};
pub use search::{Bound, locate};
pub use types::{ActivityId, BoardId, ValidationError};
