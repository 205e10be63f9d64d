use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

const DAY_BUCKET_MIGRATION: &str = "20250301_0001_attendance_day_bucket";

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `attendance` table exists (SQLite names are case-insensitive,
/// so the scanner's old `Attendance` table matches too).
fn attendance_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND lower(name)='attendance'",
    )?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn attendance_columns(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info('attendance')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?.to_ascii_lowercase());
    }
    Ok(out)
}

/// Create the `attendance` table with the modern schema (day bucket + per-day uniqueness).
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            order_id    INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id  TEXT NOT NULL,
            name        TEXT NOT NULL,
            timestamp   TEXT NOT NULL,
            day         TEXT NOT NULL,
            UNIQUE(student_id, day)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_day ON attendance(day);
        CREATE INDEX IF NOT EXISTS idx_attendance_timestamp ON attendance(timestamp);
        "#,
    )?;
    Ok(())
}

/// Rebuild a legacy `attendance` table (no `day` column) into the modern schema.
///
/// Legacy layouts use either `order_id` (scanner) or `id` (web app) as key.
/// Rows whose timestamp cannot be bucketed are dropped; for same-day
/// duplicates the lowest key wins.
fn migrate_legacy_attendance(conn: &Connection, columns: &[String]) -> Result<()> {
    let key = if columns.iter().any(|c| c == "order_id") {
        "order_id"
    } else {
        "id"
    };

    warning("Legacy attendance table detected, adding day bucket...");

    let legacy_rows: i64 = conn.query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))?;

    // dropped without commit on any error, which rolls the rebuild back
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(&format!(
        r#"
        ALTER TABLE attendance RENAME TO attendance_legacy;

        CREATE TABLE attendance (
            order_id    INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id  TEXT NOT NULL,
            name        TEXT NOT NULL,
            timestamp   TEXT NOT NULL,
            day         TEXT NOT NULL,
            UNIQUE(student_id, day)
        );

        INSERT INTO attendance (order_id, student_id, name, timestamp, day)
        SELECT l.{key}, l.student_id, IFNULL(l.name, ''), l.timestamp, DATE(l.timestamp)
        FROM attendance_legacy l
        WHERE l.student_id IS NOT NULL
          AND DATE(l.timestamp) IS NOT NULL
          AND l.{key} = (
              SELECT MIN(o.{key}) FROM attendance_legacy o
              WHERE o.student_id = l.student_id
                AND DATE(o.timestamp) = DATE(l.timestamp)
          );

        UPDATE sqlite_sequence
            SET seq = (SELECT MAX(seq) FROM sqlite_sequence
                       WHERE name IN ('attendance', 'attendance_legacy'))
        WHERE name = 'attendance';

        DROP TABLE attendance_legacy;

        CREATE INDEX IF NOT EXISTS idx_attendance_day ON attendance(day);
        CREATE INDEX IF NOT EXISTS idx_attendance_timestamp ON attendance(timestamp);
        "#
    ))?;

    let kept: i64 = tx.query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [
            DAY_BUCKET_MIGRATION.to_string(),
            format!("Rebuilt attendance with day bucket ({kept} of {legacy_rows} rows kept)"),
        ],
    )?;

    tx.commit()?;

    success(format!(
        "Migration applied: {} → {} of {} rows kept",
        DAY_BUCKET_MIGRATION, kept, legacy_rows
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and by `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !attendance_table_exists(conn)? {
        create_attendance_table(conn)?;
        return Ok(());
    }

    let columns = attendance_columns(conn)?;
    if columns.iter().any(|c| c == "day") {
        // already modern, only make sure the indexes are there
        create_attendance_table(conn)?;
    } else {
        migrate_legacy_attendance(conn, &columns)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_gets_modern_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let cols = attendance_columns(&conn).unwrap();
        assert_eq!(cols, ["order_id", "student_id", "name", "timestamp", "day"]);
    }

    #[test]
    fn legacy_scanner_table_is_rebuilt() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE Attendance (
                order_id INTEGER PRIMARY KEY AUTOINCREMENT,
                student_id TEXT,
                name TEXT,
                timestamp TEXT,
                UNIQUE(student_id, timestamp)
            );
            INSERT INTO Attendance (student_id, name, timestamp) VALUES
                ('S1', 'Alice', '2025-02-03 08:00:00'),
                ('S1', 'Alice', '2025-02-03 09:30:00'),
                ('S2', 'Bob',   '2025-02-03 08:05:00'),
                ('S1', 'Alice', '2025-02-04 08:00:00');
            "#,
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        let rows: Vec<(i64, String, String)> = conn
            .prepare("SELECT order_id, student_id, day FROM attendance ORDER BY order_id")
            .unwrap()
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            rows,
            vec![
                (1, "S1".to_string(), "2025-02-03".to_string()),
                (3, "S2".to_string(), "2025-02-03".to_string()),
                (4, "S1".to_string(), "2025-02-04".to_string()),
            ]
        );

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, 1);
    }

    #[test]
    fn failed_legacy_rebuild_rolls_back() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE attendance (
                order_id INTEGER PRIMARY KEY AUTOINCREMENT,
                student_id TEXT,
                timestamp TEXT
            );
            INSERT INTO attendance (student_id, timestamp)
                VALUES ('S1', '2025-02-03 08:00:00');
            "#,
        )
        .unwrap();

        // no `name` column: the copy step fails half-way through
        assert!(run_pending_migrations(&conn).is_err());

        assert!(conn.is_autocommit());
        assert_eq!(
            attendance_columns(&conn).unwrap(),
            ["order_id", "student_id", "timestamp"]
        );
        let leftovers: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'attendance_legacy'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn legacy_web_table_with_id_key_is_rebuilt() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE attendance (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                student_id TEXT NOT NULL,
                name TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );
            INSERT INTO attendance (student_id, name, timestamp)
                VALUES ('S7', 'Carol', '2025-01-10 10:00:00');
            "#,
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        let (id, day): (i64, String) = conn
            .query_row("SELECT order_id, day FROM attendance", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(day, "2025-01-10");

        // new rows continue after the legacy key
        conn.execute(
            "INSERT INTO attendance (student_id, name, timestamp, day)
             VALUES ('S8', 'Dan', '2025-01-10 10:01:00', '2025-01-10')",
            [],
        )
        .unwrap();
        assert_eq!(conn.last_insert_rowid(), 2);
    }
}
