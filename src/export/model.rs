// src/export/model.rs

use crate::models::AttendanceEvent;
use serde::Serialize;

/// Header of the scanning-station ledger (incremental, append-only).
pub const LEDGER_HEADERS: [&str; 4] = ["Order", "Student ID", "Name", "Timestamp"];

/// Header of the on-demand full dump.
pub const DUMP_HEADERS: [&str; 4] = ["ID", "Student ID", "Name", "Timestamp"];

/// Flat export row; serde names match the dump header.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EventExport {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Student ID")]
    pub student_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl From<&AttendanceEvent> for EventExport {
    fn from(ev: &AttendanceEvent) -> Self {
        Self {
            id: ev.order_id,
            student_id: ev.student_id.clone(),
            name: ev.name.clone(),
            timestamp: ev.timestamp_str(),
        }
    }
}

/// Row values in header order.
pub(crate) fn event_to_row(e: &AttendanceEvent) -> [String; 4] {
    [
        e.order_id.to_string(),
        e.student_id.clone(),
        e.name.clone(),
        e.timestamp_str(),
    ]
}
