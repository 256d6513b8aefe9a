//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Timeboard activity tracker.
///
/// Tracks which named activity is running on a board as an append-only
/// timeline, and reports how time was spent over arbitrary windows.
#[derive(Debug, Parser)]
#[command(name = "tb", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current board, the running activity, and recent activities.
    Status,

    /// Add an activity to the current board.
    Add {
        /// Activity name.
        name: String,
    },

    /// List activities on the current board, most recently used first.
    List {
        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Rename an activity.
    Rename {
        /// Activity id or exact name.
        activity: String,

        /// The new name.
        name: String,
    },

    /// Delete an activity and prune its timeline references.
    Delete {
        /// Activity id or exact name.
        activity: String,
    },

    /// Start an activity now, stopping whatever was running.
    Start {
        /// Activity id or exact name.
        activity: String,
    },

    /// Stop the running activity now.
    Stop,

    /// List activity segments over a period.
    Report(ReportArgs),

    /// Show per-activity totals over a period.
    Summary(ReportArgs),

    /// Manage boards.
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },

    /// Import activities and history marks from a JSON file.
    Import {
        /// Path to the batch file.
        file: PathBuf,
    },
}

/// Period selection shared by `report` and `summary`.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Today, local midnight to midnight. This is the default.
    #[arg(long)]
    pub day: bool,

    /// This week, Monday to Monday local time.
    #[arg(long, conflicts_with = "day")]
    pub week: bool,

    /// Period start date (YYYY-MM-DD, local). Overrides --day/--week.
    #[arg(long, conflicts_with_all = ["day", "week"])]
    pub from: Option<NaiveDate>,

    /// Period end date, inclusive (YYYY-MM-DD, local). Defaults to --from.
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,

    /// Output JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Board management subcommands.
#[derive(Debug, Subcommand)]
pub enum BoardAction {
    /// Create a board and make it current.
    Create {
        /// Board name.
        name: String,
    },

    /// List boards.
    List,

    /// Switch the current board.
    Use {
        /// Board id or exact name.
        board: String,
    },
}
