// src/export/logic.rs

use crate::db::RecordStore;
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::{ExportFormat, notify_export_success, render_full_dump};
use crate::models::{SortKey, SortOrder};
use crate::ui::messages::{info, warning};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Options of one bulk export.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub format: ExportFormat,
    pub file: &'a Path,
    pub day: Option<NaiveDate>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub sheet_title: &'a str,
    pub force: bool,
}

/// High-level bulk export: store query → in-memory dump → file.
pub struct ExportLogic;

impl ExportLogic {
    /// Returns the number of exported rows.
    pub fn export(store: &RecordStore, req: &ExportRequest<'_>) -> AppResult<usize> {
        ensure_writable(req.file, req.force)?;

        let rows = store.query_all(req.day, req.sort, req.order)?;

        if rows.is_empty() {
            warning("No attendance records found for the selection, exporting header only.");
        }

        info(format!(
            "Exporting {} record(s) to {}: {}",
            rows.len(),
            req.format.as_str().to_uppercase(),
            req.file.display()
        ));

        let blob = render_full_dump(&rows, req.format, req.sheet_title)?;
        fs::write(req.file, blob)?;

        ttlog_or_warn(
            store.conn(),
            "export",
            req.format.as_str(),
            &format!("{} rows → {}", rows.len(), req.file.display()),
        );

        notify_export_success(&req.format.as_str().to_uppercase(), req.file);
        Ok(rows.len())
    }
}
