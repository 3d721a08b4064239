use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use clk_cli::commands::{
    add, archive, list, move_entry, remove, report, restart, set, show, start, status, stop,
};
use clk_cli::{Cli, Commands, Config};
use clk_core::EntryStore;
use clk_store::SqliteStore;

/// Load config and open the ledger, ensuring the parent directory exists.
fn open_store(config_path: Option<&Path>) -> Result<EntryStore<SqliteStore>> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let store = SqliteStore::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    Ok(EntryStore::new(store))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut store = open_store(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Start {
            r#type,
            message,
            at,
        } => start::run(
            &mut out,
            &mut store,
            r#type.as_deref(),
            message.as_deref(),
            at.as_deref(),
        )?,
        Commands::Stop { id, r#type, message } => {
            stop::run(
                &mut out,
                &mut store,
                id.as_deref(),
                r#type.as_deref(),
                message.as_deref(),
            )?;
        }
        Commands::Restart { id } => restart::run(&mut out, &mut store, id.as_deref())?,
        Commands::Status { id } => status::run(&mut out, &store, id.as_deref())?,
        Commands::Show { id } => show::run(&mut out, &store, id.as_deref())?,
        Commands::Set { id, field, value } => {
            set::run(&mut out, &mut store, id.as_deref(), field, value.as_deref())?;
        }
        Commands::Move { id, to } => move_entry::run(&mut out, &mut store, id.as_deref(), to)?,
        Commands::Add {
            start,
            end,
            r#type,
            message,
        } => add::run(
            &mut out,
            &mut store,
            start,
            end,
            r#type.as_deref(),
            message.as_deref(),
        )?,
        Commands::Remove { id } => remove::run(&mut out, &mut store, id.as_deref())?,
        Commands::Archive { id, filter } => {
            archive::run(&mut out, &mut store, id.as_deref(), filter, true)?;
        }
        Commands::Unarchive { id, filter } => {
            archive::run(&mut out, &mut store, id.as_deref(), filter, false)?;
        }
        Commands::List { filter } => list::run(&mut out, &store, filter)?,
        Commands::Report { filter } => report::run(&mut out, &store, filter)?,
    }

    out.flush()?;
    Ok(())
}
