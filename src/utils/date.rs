use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

/// Storage / export format of attendance timestamps (second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local time truncated to whole seconds.
pub fn now_seconds() -> NaiveDateTime {
    truncate_to_seconds(Local::now().naive_local())
}

pub fn truncate_to_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_nanosecond(0).unwrap_or(dt)
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DAY_FORMAT).map_err(|_| AppError::InvalidDate(s.to_string()))
}

pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_drops_subsecond_part() {
        let dt = NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_milli_opt(8, 15, 30, 999)
            .unwrap();
        let t = truncate_to_seconds(dt);
        assert_eq!(t.format(TIMESTAMP_FORMAT).to_string(), "2025-03-04 08:15:30");
        assert_eq!(t.nanosecond(), 0);
    }

    #[test]
    fn parses_day_and_timestamp() {
        assert!(parse_date("2025-03-04").is_ok());
        assert!(matches!(parse_date("04/03/2025"), Err(AppError::InvalidDate(_))));
        assert!(parse_timestamp("2025-03-04 08:15:30").is_ok());
        assert!(parse_timestamp("2025-03-04T08:15").is_err());
    }
}
