//! Statement-level access to the `attendance` table.
//!
//! Functions take a plain `&Connection` so they work both on the store's
//! connection and inside a `Transaction` (which derefs to `Connection`).

use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEvent, SortKey, SortOrder};
use crate::utils::date::{DAY_FORMAT, TIMESTAMP_FORMAT, parse_date, parse_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

const SELECT_EVENTS: &str = "SELECT order_id, student_id, name, timestamp, day FROM attendance";

pub fn map_row(row: &Row) -> rusqlite::Result<AttendanceEvent> {
    let ts_str: String = row.get("timestamp")?;
    let day_str: String = row.get("day")?;

    let timestamp = parse_timestamp(&ts_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let day = parse_date(&day_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(AttendanceEvent {
        order_id: row.get("order_id")?,
        student_id: row.get("student_id")?,
        name: row.get("name")?,
        timestamp,
        day,
    })
}

/// Existing mark for `student_id` in the given day bucket, if any.
pub fn find_event_for_day(
    conn: &Connection,
    student_id: &str,
    day: NaiveDate,
) -> AppResult<Option<AttendanceEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT order_id, student_id, name, timestamp, day FROM attendance
         WHERE student_id = ?1 AND day = ?2
         LIMIT 1",
    )?;

    let day_str = day.format(DAY_FORMAT).to_string();
    let found = stmt
        .query_row(params![student_id, day_str], map_row)
        .optional()?;

    Ok(found)
}

/// Insert a new mark and return its order id.
/// A same-day row for the student surfaces as `ConstraintViolation`.
pub fn insert_event(
    conn: &Connection,
    student_id: &str,
    name: &str,
    timestamp: NaiveDateTime,
) -> AppResult<i64> {
    let day_str = timestamp.date().format(DAY_FORMAT).to_string();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO attendance (student_id, name, timestamp, day)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    let res = stmt.execute(params![
        student_id,
        name,
        timestamp.format(TIMESTAMP_FORMAT).to_string(),
        day_str,
    ]);

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == ErrorCode::ConstraintViolation
                && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Err(AppError::ConstraintViolation {
                student_id: student_id.to_string(),
                day: day_str,
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// All marks, optionally restricted to one day, in the requested order.
///
/// Ties are broken on `order_id` in the same direction, so ascending and
/// descending listings are exact reverses of each other.
pub fn load_events(
    conn: &Connection,
    day: Option<NaiveDate>,
    key: SortKey,
    order: SortOrder,
) -> AppResult<Vec<AttendanceEvent>> {
    let dir = order.sql();
    let order_clause = if key == SortKey::OrderId {
        format!("ORDER BY order_id {dir}")
    } else {
        format!("ORDER BY {} {dir}, order_id {dir}", key.column())
    };

    let mut events = Vec::new();

    match day {
        None => {
            let mut stmt = conn.prepare(&format!("{SELECT_EVENTS} {order_clause}"))?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                events.push(r?);
            }
        }
        Some(d) => {
            let mut stmt =
                conn.prepare(&format!("{SELECT_EVENTS} WHERE day = ?1 {order_clause}"))?;
            let rows = stmt.query_map([d.format(DAY_FORMAT).to_string()], map_row)?;
            for r in rows {
                events.push(r?);
            }
        }
    }

    Ok(events)
}

pub fn load_events_by_student(
    conn: &Connection,
    student_id: &str,
) -> AppResult<Vec<AttendanceEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT order_id, student_id, name, timestamp, day FROM attendance
         WHERE student_id = ?1
         ORDER BY order_id ASC",
    )?;

    let rows = stmt.query_map([student_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_events(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))?;
    Ok(n)
}
