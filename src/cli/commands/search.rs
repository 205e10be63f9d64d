use crate::cli::commands::print_events;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::RecordStore;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Search { student_id } = cmd {
        let store = RecordStore::open_initialized(&cfg.database)?;
        let events = store.search(student_id.trim())?;

        if events.is_empty() {
            warning(format!(
                "No attendance records found for Student ID: {}",
                student_id
            ));
            return Ok(());
        }

        success(format!(
            "Found {} record(s) for Student ID: {}",
            events.len(),
            student_id
        ));
        print_events(&events);
    }
    Ok(())
}
