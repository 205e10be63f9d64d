//! Scanning-station loop: decoded badge payloads arrive one per line.

use crate::core::recorder::Recorder;
use crate::errors::{AppError, AppResult};
use crate::models::RecordResult;
use crate::ui::messages::{accepted, duplicate, error, warning};
use crate::utils::date::now_seconds;
use chrono::NaiveDateTime;
use std::io::BufRead;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub accepted: usize,
    pub duplicates: usize,
    /// Lines that were not a valid payload.
    pub rejected: usize,
    /// Valid payloads that could not be stored (database errors).
    pub failed: usize,
}

pub struct ScanLogic;

impl ScanLogic {
    pub fn run<R: BufRead>(recorder: &mut Recorder<'_>, input: R) -> AppResult<ScanSummary> {
        Self::run_with_clock(recorder, input, now_seconds)
    }

    /// Process every non-blank line of `input`.
    ///
    /// Undecodable lines, malformed payloads and store failures are reported
    /// and skipped; only an error reading `input` itself stops the loop.
    pub fn run_with_clock<R, C>(
        recorder: &mut Recorder<'_>,
        mut input: R,
        mut clock: C,
    ) -> AppResult<ScanSummary>
    where
        R: BufRead,
        C: FnMut() -> NaiveDateTime,
    {
        let mut summary = ScanSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    warning(format!("Ignored unreadable badge: not valid UTF-8 ({e})"));
                    summary.rejected += 1;
                    continue;
                }
            };

            let data = line.trim();
            if data.is_empty() {
                continue;
            }

            match recorder.record_attendance_at(data, clock()) {
                Ok(RecordResult::Accepted {
                    order_id,
                    student_id,
                    name,
                    timestamp,
                }) => {
                    accepted(format!(
                        "#{order_id} {name} ({student_id}) marked at {}",
                        timestamp.format("%H:%M:%S")
                    ));
                    summary.accepted += 1;
                }
                Ok(RecordResult::Duplicate { name, existing, .. }) => {
                    duplicate(format!(
                        "{name} already marked today (#{} at {})",
                        existing.order_id,
                        existing.timestamp.format("%H:%M:%S")
                    ));
                    summary.duplicates += 1;
                }
                Err(AppError::MalformedPayload(msg)) => {
                    warning(format!("Ignored unreadable badge: {msg}"));
                    summary.rejected += 1;
                }
                Err(e) => {
                    error(format!("Scan not recorded: {e}"));
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RecordStore;
    use chrono::NaiveDate;
    use std::io::Cursor;

    #[test]
    fn mixed_input_is_tallied() {
        let mut store = RecordStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        let mut rec = Recorder::new(&mut store, None);

        let input = Cursor::new(
            "ID: S1, Name: Alice\n\
             \n\
             garbage\n\
             ID: S1, Name: Alice\n\
             {\"v\":1,\"id\":\"S2\",\"name\":\"Bob\"}\n",
        );
        let clock = || {
            NaiveDate::from_ymd_opt(2025, 2, 2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        };

        let summary = ScanLogic::run_with_clock(&mut rec, input, clock).unwrap();
        assert_eq!(
            summary,
            ScanSummary {
                accepted: 2,
                duplicates: 1,
                rejected: 1,
                failed: 0,
            }
        );
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let mut store = RecordStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        let mut rec = Recorder::new(&mut store, None);

        let mut input = b"ID: S1, Name: Alice\n".to_vec();
        input.extend_from_slice(&[0xFF, 0xFE, b'\n']);
        input.extend_from_slice(b"ID: S2, Name: Bob");

        let clock = || {
            NaiveDate::from_ymd_opt(2025, 2, 2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        };

        let summary = ScanLogic::run_with_clock(&mut rec, Cursor::new(input), clock).unwrap();
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(store.search("S2").unwrap().len(), 1);
    }
}
