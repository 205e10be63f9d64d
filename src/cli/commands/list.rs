use crate::cli::commands::print_events;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::RecordStore;
use crate::errors::AppResult;
use crate::models::{SortKey, SortOrder};
use crate::ui::messages::info;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        date: date_arg,
        today,
        sort,
        order,
    } = cmd
    {
        let key = SortKey::parse(sort)?;
        let dir = SortOrder::parse(order)?;

        let filter = if *today {
            Some(date::today())
        } else {
            date_arg.as_deref().map(date::parse_date).transpose()?
        };

        let store = RecordStore::open_initialized(&cfg.database)?;
        let events = store.query_all(filter, key, dir)?;

        if events.is_empty() {
            match filter {
                Some(d) => info(format!("No attendance records for {}", d)),
                None => info("No attendance records."),
            }
            return Ok(());
        }

        print_events(&events);
        println!(
            "\n{} record(s), sorted by {} {}",
            events.len(),
            key.column(),
            dir.sql().to_lowercase()
        );
    }
    Ok(())
}
