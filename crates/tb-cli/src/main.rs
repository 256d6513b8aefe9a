use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tb_cli::commands::{activity, board, import, report, track};
use tb_cli::{BoardAction, Cli, Commands, Config};
use tb_core::{Boards, Factory, SystemGenerator};

/// Key the full boards snapshot is stored under.
const SNAPSHOT_KEY: &str = "boards";

/// Load config and open the database, ensuring the parent directory exists.
fn open_database(cli: &Cli) -> Result<(tb_db::Database, Config)> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = tb_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

/// Load the snapshot, seeding a default board on first run.
fn load_boards(
    db: &tb_db::Database,
    factory: &Factory<SystemGenerator>,
) -> Result<(Boards, bool)> {
    if let Some(boards) = db.load_snapshot(SNAPSHOT_KEY)? {
        return Ok((boards, false));
    }
    let mut boards = Boards::new();
    boards.add_board(factory.create_board("Personal")?);
    tracing::info!("no snapshot found; seeded default board");
    Ok((boards, true))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let factory = Factory::new(SystemGenerator);
    let (mut db, _config) = open_database(&cli)?;
    let (mut boards, seeded) = load_boards(&db, &factory)?;
    let mut stdout = io::stdout();

    let mut mutated = seeded;
    match &cli.command {
        Some(Commands::Status) => {
            track::status(&mut stdout, &boards, factory.now_ms())?;
        }
        Some(Commands::Add { name }) => {
            activity::add(&mut boards, &factory, name)?;
            mutated = true;
        }
        Some(Commands::List { json }) => {
            activity::list(&mut stdout, &boards, *json)?;
        }
        Some(Commands::Rename {
            activity: needle,
            name,
        }) => {
            activity::rename(&mut boards, needle, name)?;
            mutated = true;
        }
        Some(Commands::Delete { activity: needle }) => {
            activity::delete(&mut boards, needle)?;
            mutated = true;
        }
        Some(Commands::Start { activity: needle }) => {
            mutated |= track::start(&mut boards, &factory, needle)?;
        }
        Some(Commands::Stop) => {
            mutated |= track::stop(&mut boards, &factory)?;
        }
        Some(Commands::Report(args)) => {
            let (start_ms, end_ms) = report::period_bounds(args, Local::now().date_naive());
            report::run_report(&mut stdout, &boards, start_ms, end_ms, factory.now_ms(), args.json)?;
        }
        Some(Commands::Summary(args)) => {
            let (start_ms, end_ms) = report::period_bounds(args, Local::now().date_naive());
            report::run_summary(&mut stdout, &boards, start_ms, end_ms, factory.now_ms(), args.json)?;
        }
        Some(Commands::Board { action }) => match action {
            BoardAction::Create { name } => {
                board::create(&mut boards, &factory, name)?;
                mutated = true;
            }
            BoardAction::List => board::list(&mut stdout, &boards)?,
            BoardAction::Use { board: needle } => {
                board::switch(&mut boards, needle)?;
                mutated = true;
            }
        },
        Some(Commands::Import { file }) => {
            import::run(&mut boards, file)?;
            mutated = true;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    // Persistence is best-effort: a failed save keeps the previous durable
    // snapshot in place and must not fail the command that already ran.
    if mutated {
        if let Err(err) = db.save_snapshot(SNAPSHOT_KEY, &boards) {
            tracing::warn!(%err, "failed to persist snapshot");
        }
    }

    Ok(())
}
