//! Once-per-day attendance recording.

use crate::db::RecordStore;
use crate::db::log::ttlog_or_warn;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::export::ExportSink;
use crate::models::{AttendanceEvent, Payload, RecordResult};
use crate::ui::messages::warning;
use crate::utils::date::{now_seconds, truncate_to_seconds};
use chrono::NaiveDateTime;
use rusqlite::Connection;

pub struct Recorder<'a> {
    store: &'a mut RecordStore,
    sink: Option<&'a ExportSink>,
}

enum Decision {
    Existing(AttendanceEvent),
    Inserted(i64),
}

impl<'a> Recorder<'a> {
    pub fn new(store: &'a mut RecordStore, sink: Option<&'a ExportSink>) -> Self {
        Self { store, sink }
    }

    /// Record a scanned payload at the current local time.
    pub fn record_attendance(&mut self, payload: &str) -> AppResult<RecordResult> {
        self.record_attendance_at(payload, now_seconds())
    }

    /// Record a scanned payload at `now` (truncated to whole seconds).
    ///
    /// Writes at most one store row and one ledger row. A malformed payload
    /// writes nothing; a ledger failure is reported but the mark stays.
    pub fn record_attendance_at(
        &mut self,
        payload: &str,
        now: NaiveDateTime,
    ) -> AppResult<RecordResult> {
        let Payload { student_id, name } = Payload::decode(payload)?;
        let timestamp = truncate_to_seconds(now);

        let decision = self
            .store
            .with_transaction(|tx| decide(tx, &student_id, &name, timestamp))?;

        match decision {
            // re-scans are routine: reported to the caller, not audited
            Decision::Existing(existing) => Ok(RecordResult::Duplicate {
                student_id,
                name,
                existing,
            }),
            Decision::Inserted(order_id) => {
                let event = AttendanceEvent {
                    order_id,
                    student_id,
                    name,
                    timestamp,
                    day: timestamp.date(),
                };

                ttlog_or_warn(
                    self.store.conn(),
                    "scan",
                    &event.student_id,
                    &format!("#{} {} at {}", order_id, event.name, event.timestamp_str()),
                );
                self.mirror(&event);

                Ok(RecordResult::Accepted {
                    order_id,
                    student_id: event.student_id,
                    name: event.name,
                    timestamp,
                })
            }
        }
    }

    fn mirror(&self, event: &AttendanceEvent) {
        let Some(sink) = self.sink else {
            return;
        };

        if let Err(e) = sink.append(event) {
            warning(format!(
                "Attendance #{} saved, but the ledger was not updated: {}",
                event.order_id, e
            ));
            ttlog_or_warn(
                self.store.conn(),
                "sink_failed",
                &event.student_id,
                &format!("#{}: {}", event.order_id, e),
            );
        }
    }
}

/// Check-then-insert, run inside one IMMEDIATE transaction.
fn decide(
    conn: &Connection,
    student_id: &str,
    name: &str,
    timestamp: NaiveDateTime,
) -> AppResult<Decision> {
    if let Some(existing) = queries::find_event_for_day(conn, student_id, timestamp.date())? {
        return Ok(Decision::Existing(existing));
    }

    insert_or_existing(conn, student_id, name, timestamp)
}

/// Insert the mark; if the per-day UNIQUE constraint fires, the row that
/// holds the slot is returned instead.
fn insert_or_existing(
    conn: &Connection,
    student_id: &str,
    name: &str,
    timestamp: NaiveDateTime,
) -> AppResult<Decision> {
    match queries::insert_event(conn, student_id, name, timestamp) {
        Ok(order_id) => Ok(Decision::Inserted(order_id)),
        // another writer got there first: report its row as the duplicate
        Err(err @ AppError::ConstraintViolation { .. }) => {
            match queries::find_event_for_day(conn, student_id, timestamp.date())? {
                Some(existing) => Ok(Decision::Existing(existing)),
                None => Err(err),
            }
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn store() -> RecordStore {
        let s = RecordStore::open_in_memory().unwrap();
        s.initialize().unwrap();
        s
    }

    #[test]
    fn same_day_rescan_is_duplicate() {
        let mut s = store();
        let mut rec = Recorder::new(&mut s, None);

        let first = rec.record_attendance_at("ID: S1, Name: Alice", at(6, 8, 0)).unwrap();
        let second = rec.record_attendance_at("ID: S1, Name: Alice", at(6, 15, 30)).unwrap();

        assert!(first.is_accepted());
        match second {
            RecordResult::Duplicate { existing, .. } => {
                assert_eq!(existing.timestamp, at(6, 8, 0));
            }
            other => panic!("expected duplicate, got {other:?}"),
        }
        assert_eq!(s.count().unwrap(), 1);
    }

    #[test]
    fn duplicates_are_not_audited() {
        let mut s = store();
        let mut rec = Recorder::new(&mut s, None);

        for minute in 0..5 {
            rec.record_attendance_at("ID: S1, Name: Alice", at(6, 8, minute)).unwrap();
        }

        let audit: Vec<String> = crate::db::log::load_log(s.conn())
            .unwrap()
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(audit, ["scan"]);
    }

    #[test]
    fn unique_constraint_race_reports_holder_as_duplicate() {
        let mut s = store();
        let holder = s.insert("S1", "Alice", at(6, 8, 0)).unwrap();

        // the lookup is skipped, as if another writer committed in between
        let decision = s
            .with_transaction(|tx| insert_or_existing(tx, "S1", "Alice", at(6, 9, 0)))
            .unwrap();

        match decision {
            Decision::Existing(existing) => {
                assert_eq!(existing.order_id, holder);
                assert_eq!(existing.timestamp, at(6, 8, 0));
            }
            Decision::Inserted(id) => panic!("second row {id} inserted for the same day"),
        }
        assert_eq!(s.count().unwrap(), 1);
    }

    #[test]
    fn next_day_is_accepted_again() {
        let mut s = store();
        let mut rec = Recorder::new(&mut s, None);

        let a = rec.record_attendance_at("ID: S1, Name: Alice", at(6, 8, 0)).unwrap();
        let b = rec.record_attendance_at("ID: S1, Name: Alice", at(7, 8, 0)).unwrap();

        match (a, b) {
            (
                RecordResult::Accepted { order_id: x, .. },
                RecordResult::Accepted { order_id: y, .. },
            ) => assert!(x < y),
            other => panic!("expected two accepted marks, got {other:?}"),
        }
    }

    #[test]
    fn malformed_payload_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let sink = ExportSink::new(tmp.path().join("ledger.csv"));
        let mut s = store();
        let mut rec = Recorder::new(&mut s, Some(&sink));

        let err = rec.record_attendance_at("garbage", at(6, 8, 0)).unwrap_err();
        assert!(matches!(err, AppError::MalformedPayload(_)));

        assert_eq!(s.count().unwrap(), 0);
        assert!(!sink.path().exists());
    }

    #[test]
    fn accepted_mark_is_mirrored_once() {
        let tmp = TempDir::new().unwrap();
        let sink = ExportSink::new(tmp.path().join("ledger.csv"));
        let mut s = store();
        let mut rec = Recorder::new(&mut s, Some(&sink));

        rec.record_attendance_at("ID: S1, Name: Alice", at(6, 8, 0)).unwrap();
        rec.record_attendance_at("ID: S1, Name: Alice", at(6, 8, 0)).unwrap();

        assert_eq!(
            sink.rows().unwrap(),
            vec![vec!["1", "S1", "Alice", "2025-10-06 08:00:00"]]
        );
    }

    #[test]
    fn sink_failure_keeps_store_row() {
        let tmp = TempDir::new().unwrap();
        let sink = ExportSink::new(tmp.path().join("no-such-dir").join("ledger.csv"));
        let mut s = store();
        let mut rec = Recorder::new(&mut s, Some(&sink));

        let res = rec.record_attendance_at("ID: S1, Name: Alice", at(6, 8, 0)).unwrap();
        assert!(res.is_accepted());
        assert_eq!(s.count().unwrap(), 1);

        let failures: i64 = s
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'sink_failed'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(failures, 1);
    }

    #[test]
    fn subsecond_clock_is_truncated() {
        let mut s = store();
        let mut rec = Recorder::new(&mut s, None);
        let now = NaiveDate::from_ymd_opt(2025, 10, 6)
            .unwrap()
            .and_hms_micro_opt(8, 0, 1, 750_000)
            .unwrap();

        match rec.record_attendance_at("ID: S1, Name: Alice", now).unwrap() {
            RecordResult::Accepted { timestamp, .. } => {
                use chrono::Timelike;
                assert_eq!((timestamp.second(), timestamp.nanosecond()), (1, 0));
            }
            other => panic!("expected accepted, got {other:?}"),
        }
    }
}
