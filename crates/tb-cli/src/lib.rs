//! Timeboard CLI library.
//!
//! This crate provides the `tb` command-line interface over the core board
//! model and the snapshot store.

mod cli;
pub mod commands;
mod config;

pub use cli::{BoardAction, Cli, Commands, ReportArgs};
pub use config::Config;
