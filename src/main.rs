//! CLI binary for `todo_accounts`.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the library.

use clap::Parser;
use std::io;
use std::process::ExitCode;
use todo_accounts::cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
