// src/export/mod.rs

mod dump;
mod excel_date;
mod fs_utils;
mod json_csv;
pub mod ledger;
pub mod logic;
mod model;
mod xlsx;

pub use dump::render_full_dump;
pub use ledger::ExportSink;
pub use logic::ExportLogic;
pub use model::{DUMP_HEADERS, EventExport, LEDGER_HEADERS};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for file exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}
