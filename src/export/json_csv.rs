// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{DUMP_HEADERS, EventExport, event_to_row};
use crate::models::AttendanceEvent;

/// Pretty-printed JSON array of dump rows.
pub(crate) fn render_json(events: &[AttendanceEvent]) -> AppResult<Vec<u8>> {
    let rows: Vec<EventExport> = events.iter().map(EventExport::from).collect();

    serde_json::to_vec_pretty(&rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))
}

/// CSV with the dump header, written even when there are no rows.
pub(crate) fn render_csv(events: &[AttendanceEvent]) -> AppResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(DUMP_HEADERS)
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;

    for ev in events {
        wtr.write_record(event_to_row(ev))
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))
}
