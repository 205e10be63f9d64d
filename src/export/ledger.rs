// src/export/ledger.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{LEDGER_HEADERS, event_to_row};
use crate::models::AttendanceEvent;
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Append-only CSV mirror of accepted marks kept at the scanning station.
///
/// The ledger is derived data: the record store stays authoritative and a
/// failed append never undoes a committed mark.
#[derive(Debug, Clone)]
pub struct ExportSink {
    path: PathBuf,
}

impl ExportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the ledger with its header row if it is missing or empty.
    pub fn ensure_initialized(&self) -> AppResult<()> {
        let needs_header = fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        if !needs_header {
            return Ok(());
        }

        let mut wtr = csv::Writer::from_writer(self.open_append()?);
        wtr.write_record(LEDGER_HEADERS)
            .map_err(|e| self.unavailable(e))?;
        wtr.flush().map_err(|e| self.unavailable(e))?;
        Ok(())
    }

    /// Append one row for an accepted mark.
    pub fn append(&self, event: &AttendanceEvent) -> AppResult<()> {
        self.ensure_initialized()?;

        let mut wtr = csv::Writer::from_writer(self.open_append()?);
        wtr.write_record(event_to_row(event))
            .map_err(|e| self.unavailable(e))?;
        wtr.flush().map_err(|e| self.unavailable(e))?;
        Ok(())
    }

    /// Number of data rows (header excluded); `0` when the ledger does not exist yet.
    pub fn row_count(&self) -> AppResult<usize> {
        Ok(self.rows()?.len())
    }

    /// Data rows in file order, header excluded.
    pub fn rows(&self) -> AppResult<Vec<Vec<String>>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = csv::Reader::from_path(&self.path).map_err(|e| self.unavailable(e))?;

        let mut out = Vec::new();
        for rec in rdr.records() {
            let rec = rec.map_err(|e| self.unavailable(e))?;
            out.push(rec.iter().map(str::to_string).collect());
        }
        Ok(out)
    }

    fn open_append(&self) -> AppResult<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))
    }

    fn unavailable<E: Display>(&self, e: E) -> AppError {
        AppError::SinkUnavailable(format!("{}: {}", self.path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn event(order_id: i64, sid: &str, name: &str) -> AttendanceEvent {
        let ts = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        AttendanceEvent {
            order_id,
            student_id: sid.into(),
            name: name.into(),
            timestamp: ts,
            day: ts.date(),
        }
    }

    #[test]
    fn initialization_writes_header_once() {
        let tmp = TempDir::new().unwrap();
        let sink = ExportSink::new(tmp.path().join("ledger.csv"));

        sink.ensure_initialized().unwrap();
        sink.ensure_initialized().unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content, "Order,Student ID,Name,Timestamp\n");
        assert_eq!(sink.row_count().unwrap(), 0);
    }

    #[test]
    fn appends_rows_in_order() {
        let tmp = TempDir::new().unwrap();
        let sink = ExportSink::new(tmp.path().join("ledger.csv"));

        sink.append(&event(1, "S1", "Alice")).unwrap();
        sink.append(&event(2, "S2", "Doe, John")).unwrap();

        let rows = sink.rows().unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["1", "S1", "Alice", "2025-06-02 09:00:00"],
                vec!["2", "S2", "Doe, John", "2025-06-02 09:00:00"],
            ]
        );
    }

    #[test]
    fn unwritable_location_is_sink_unavailable() {
        let tmp = TempDir::new().unwrap();
        let sink = ExportSink::new(tmp.path().join("missing-dir").join("ledger.csv"));

        let err = sink.append(&event(1, "S1", "Alice")).unwrap_err();
        assert!(matches!(err, AppError::SinkUnavailable(_)));
    }
}
