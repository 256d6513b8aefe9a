//! CLI subcommand implementations.

pub mod activity;
pub mod board;
pub mod import;
pub mod report;
pub mod track;
pub mod util;
