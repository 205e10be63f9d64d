use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::RecordStore;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::export::logic::ExportRequest;
use crate::models::{SortKey, SortOrder};
use crate::utils::date;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        date: date_arg,
        sort,
        order,
        force,
    } = cmd
    {
        let req = ExportRequest {
            format: *format,
            file: Path::new(file),
            day: date_arg.as_deref().map(date::parse_date).transpose()?,
            sort: SortKey::parse(sort)?,
            order: SortOrder::parse(order)?,
            sheet_title: &cfg.sheet_title,
            force: *force,
        };

        let store = RecordStore::open_initialized(&cfg.database)?;
        ExportLogic::export(&store, &req)?;
    }
    Ok(())
}
