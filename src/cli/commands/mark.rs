use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Recorder;
use crate::db::RecordStore;
use crate::errors::AppResult;
use crate::export::ExportSink;
use crate::models::RecordResult;
use crate::ui::messages::{accepted, duplicate};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Mark { payload } = cmd {
        let mut store = RecordStore::open_initialized(&cfg.database)?;
        let sink = ExportSink::new(&cfg.ledger);
        let mut recorder = Recorder::new(&mut store, Some(&sink));

        match recorder.record_attendance(payload)? {
            RecordResult::Accepted {
                order_id,
                student_id,
                name,
                timestamp,
            } => accepted(format!(
                "Attendance marked for {name} ({student_id}): #{order_id} at {}",
                timestamp.format("%Y-%m-%d %H:%M:%S")
            )),
            RecordResult::Duplicate { name, existing, .. } => duplicate(format!(
                "Attendance already marked for {name} today (#{} at {})",
                existing.order_id,
                existing.timestamp_str()
            )),
        }
    }
    Ok(())
}
