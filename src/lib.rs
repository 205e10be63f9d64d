//! qrattend library root.
//! Exposes the CLI parser, the high-level run() function and the
//! record store / recorder / export modules used by the front-ends.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command),
        Commands::Scan { .. } => cli::commands::scan::handle(&cli.command, cfg),
        Commands::Mark { .. } => cli::commands::mark::handle(&cli.command, cfg),
        Commands::Payload { .. } => cli::commands::payload::handle(&cli.command),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Search { .. } => cli::commands::search::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once and handed down explicitly
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(custom_ledger) = &cli.ledger {
        cfg.ledger = custom_ledger.clone();
    }

    dispatch(&cli, &cfg)
}
