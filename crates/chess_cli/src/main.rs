//! Two-player chess at one terminal.
//!
//! Reads one command per line from stdin and answers on stdout. Logs go to
//! stderr so they never interleave with the game output.

mod command;
mod config;
mod session;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use game_store::{GameStore, JsonFileStore, MemoryStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::HELP;
use crate::config::{CliArgs, Settings, DEFAULT_CONFIG_FILE};
use crate::session::Session;

fn print_usage() {
    println!("chess_cli - two players, one board");
    println!();
    println!("Usage:");
    println!("  chess_cli [--config FILE] [--data-dir DIR] [--player1 NAME] [--player2 NAME]");
    println!("            [--player1-color white|black]");
    println!();
    println!("Settings are read from {DEFAULT_CONFIG_FILE} when present; flags override them.");
    println!("RUST_LOG overrides the log_level setting.");
    println!();
    println!("{HELP}");
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_store(settings: &Settings) -> Box<dyn GameStore> {
    match JsonFileStore::open(&settings.data_dir) {
        Ok(store) if store.is_available() => {
            info!(dir = %store.root().display(), "using file store");
            Box::new(store)
        }
        Ok(store) => {
            warn!(dir = %store.root().display(), "data directory is not writable, games will not persist");
            Box::new(MemoryStore::new())
        }
        Err(e) => {
            warn!(error = %e, "cannot open data directory, games will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = CliArgs::parse(&args)?;
    if cli.help {
        print_usage();
        return Ok(());
    }
    let settings = Settings::resolve(&cli)?;
    init_tracing(&settings.log_level);

    let store = open_store(&settings);
    let mut session = Session::start(settings, store);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", session.render())?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(error = %e, "stdin closed");
                break;
            }
        };
        let Some(reply) = session.handle(&line) else {
            break;
        };
        if !reply.is_empty() {
            writeln!(stdout, "{reply}")?;
        }
        stdout.flush()?;
    }
    info!(moves = session.game().history().len(), "session ended");
    Ok(())
}
