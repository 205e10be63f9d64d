use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{Recorder, ScanLogic};
use crate::db::RecordStore;
use crate::errors::AppResult;
use crate::export::ExportSink;
use crate::ui::messages::{header, info};
use std::fs::File;
use std::io::{self, BufReader};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan { file } = cmd {
        let mut store = RecordStore::open_initialized(&cfg.database)?;
        let sink = ExportSink::new(&cfg.ledger);
        let mut recorder = Recorder::new(&mut store, Some(&sink));

        header("Attendance scanning");

        let summary = match file {
            Some(path) => {
                info(format!("Reading payloads from {}", path));
                let reader = BufReader::new(File::open(path)?);
                ScanLogic::run(&mut recorder, reader)?
            }
            None => {
                info("Waiting for scanned payloads on stdin (Ctrl-D to stop)…");
                ScanLogic::run(&mut recorder, io::stdin().lock())?
            }
        };

        println!();
        info(format!(
            "Scan finished: {} accepted, {} duplicate, {} unreadable, {} failed",
            summary.accepted, summary.duplicates, summary.rejected, summary.failed
        ));
    }
    Ok(())
}
