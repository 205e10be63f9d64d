use crate::utils::date::TIMESTAMP_FORMAT;
use chrono::{NaiveDate, NaiveDateTime};

/// One attendance mark as stored in the `attendance` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEvent {
    pub order_id: i64,
    pub student_id: String,
    pub name: String,
    pub timestamp: NaiveDateTime,
    /// Day bucket (`timestamp.date()`), the second half of the uniqueness key.
    pub day: NaiveDate,
}

impl AttendanceEvent {
    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Outcome of a single scan handed to the recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordResult {
    Accepted {
        order_id: i64,
        student_id: String,
        name: String,
        timestamp: NaiveDateTime,
    },
    /// Same-day mark already present; nothing was written.
    Duplicate {
        student_id: String,
        name: String,
        existing: AttendanceEvent,
    },
}

impl RecordResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RecordResult::Accepted { .. })
    }

    pub fn student_id(&self) -> &str {
        match self {
            RecordResult::Accepted { student_id, .. } => student_id,
            RecordResult::Duplicate { student_id, .. } => student_id,
        }
    }
}
