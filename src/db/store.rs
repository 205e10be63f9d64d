//! SQLite-backed record store for attendance marks.

use crate::db::initialize::init_db;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{AttendanceEvent, SortKey, SortOrder};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open (or create) the store at `path`. Call [`RecordStore::initialize`]
    /// before the first read or write.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Open and initialize in one step.
    pub fn open_initialized(path: impl AsRef<Path>) -> AppResult<Self> {
        let store = Self::open(path)?;
        store.initialize()?;
        Ok(store)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Create or upgrade the schema. Idempotent.
    pub fn initialize(&self) -> AppResult<()> {
        init_db(&self.conn)
    }

    /// Existing mark for `student_id` on the calendar day of `as_of`.
    pub fn find_todays_event(
        &self,
        student_id: &str,
        as_of: NaiveDateTime,
    ) -> AppResult<Option<AttendanceEvent>> {
        queries::find_event_for_day(&self.conn, student_id, as_of.date())
    }

    pub fn insert(&self, student_id: &str, name: &str, timestamp: NaiveDateTime) -> AppResult<i64> {
        queries::insert_event(&self.conn, student_id, name, timestamp)
    }

    pub fn query_all(
        &self,
        filter: Option<NaiveDate>,
        key: SortKey,
        order: SortOrder,
    ) -> AppResult<Vec<AttendanceEvent>> {
        queries::load_events(&self.conn, filter, key, order)
    }

    pub fn search(&self, student_id: &str) -> AppResult<Vec<AttendanceEvent>> {
        queries::load_events_by_student(&self.conn, student_id)
    }

    pub fn count(&self) -> AppResult<i64> {
        queries::count_events(&self.conn)
    }

    /// Run `func` inside an IMMEDIATE transaction: the write lock is taken
    /// before the first read. Commits on `Ok`, rolls back on `Err`.
    pub fn with_transaction<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> AppResult<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
