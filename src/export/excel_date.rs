// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveDateTime};

pub(crate) const EXCEL_DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Excel serial number (days since 1899-12-30, fractional part = time of day).
pub(crate) fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    Some(days + secs / 86400.0)
}
