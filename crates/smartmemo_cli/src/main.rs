//! `smartmemo` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the memo store.
//! - Dispatch one subcommand per invocation.

use clap::Parser;
use log::{info, warn};
use smartmemo_core::db::open_db;
use smartmemo_core::{core_version, init_logging, AppConfig, MemoStore, SqliteKvStore};
use std::error::Error;
use std::io::Write;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = log_dir;
    }

    // Logging is diagnostics only; a bad log dir must not block memo access.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir_str()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut out = std::io::stdout().lock();
    if let Commands::Version = cli.command {
        writeln!(out, "smartmemo {}", core_version())?;
        return Ok(());
    }

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = open_db(&config.db_path)?;
    let mut store = MemoStore::initialize(SqliteKvStore::new(&conn));
    info!(
        "event=cli_command module=cli status=start memos={}",
        store.len()
    );

    let result = match cli.command {
        Commands::List { search } => commands::list(&store, &search, &mut out),
        Commands::Show { id } => commands::show(&store, &id, &mut out),
        Commands::Add { title, content } => commands::add(&mut store, title, content, &mut out),
        Commands::Edit { id, title, content } => {
            commands::edit(&mut store, &id, title, content, &mut out)
        }
        Commands::Rm { id } => commands::remove(&mut store, &id, &mut out),
        Commands::Star { id } => commands::star(&mut store, &id, &mut out),
        Commands::Version => Ok(()),
    };

    if let Err(err) = &result {
        warn!("event=cli_command module=cli status=error error={err}");
    }
    result
}
