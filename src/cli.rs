//! Command-line entry point.
//!
//! This module provides the argument parsing and startup logic, allowing
//! the binary to be a thin wrapper. Everything here is testable.

use crate::config::AppConfig;
use crate::error::Result;
use crate::event_log::{events, EventLog};
use crate::menu::run_menu;
use crate::store::SqliteStore;
use clap::Parser;
use serde_json::json;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Multi-account to-do list manager.
///
/// Starts an interactive menu. Accounts and tasks are kept in a local
/// `SQLite` file (`todo.db` unless configured otherwise in
/// `todo-config.yaml`).
#[derive(Parser, Debug)]
#[command(name = "todo-accounts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database file to use instead of the configured one. A relative path
    /// resolves against the current directory, not `--config-dir`
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Directory containing `todo-config.yaml`; relative paths resolve here
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,
}

impl Cli {
    /// The database path after applying the config file and the flag.
    #[must_use]
    pub fn database_path(&self, config: &AppConfig) -> PathBuf {
        self.database.as_ref().map_or_else(
            || config.resolved_database_path(&self.config_dir),
            Clone::clone,
        )
    }
}

/// Load configuration, open the store and run the menu to completion.
///
/// # Errors
///
/// Returns an error if the config cannot be parsed, the schema cannot be
/// created, or the terminal cannot be read or written.
pub fn run<R: BufRead, W: Write>(cli: &Cli, input: R, output: W) -> Result<()> {
    let config = AppConfig::load_from(&cli.config_dir)?;
    let log = EventLog::from_config(&config, &cli.config_dir);
    let store = SqliteStore::new(cli.database_path(&config))?;

    log.record(
        events::STARTUP,
        &json!({
            "version": crate::VERSION,
            "database": store.db_path().display().to_string(),
        }),
    );

    run_menu(&store, input, output, &log)
}
