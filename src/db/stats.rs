use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW, colorize_missing};
use rusqlite::Connection;
use std::fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub total_events: i64,
    pub students: i64,
    pub days: i64,
    pub first_day: Option<String>,
    pub last_day: Option<String>,
}

pub fn collect_stats(conn: &Connection) -> AppResult<DbStats> {
    let stats = conn.query_row(
        "SELECT COUNT(*), COUNT(DISTINCT student_id), COUNT(DISTINCT day), MIN(day), MAX(day)
         FROM attendance",
        [],
        |row| {
            Ok(DbStats {
                total_events: row.get(0)?,
                students: row.get(1)?,
                days: row.get(2)?,
                first_day: row.get(3)?,
                last_day: row.get(4)?,
            })
        },
    )?;
    Ok(stats)
}

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    let stats = collect_stats(conn)?;

    println!(
        "{}• Attendance marks:{} {}{}{}",
        CYAN, RESET, GREEN, stats.total_events, RESET
    );
    println!("{}• Students:{} {}", CYAN, RESET, stats.students);
    println!("{}• Days with marks:{} {}", CYAN, RESET, stats.days);

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", colorize_missing(stats.first_day.clone()));
    println!("    to:   {}", colorize_missing(stats.last_day.clone()));

    if stats.days > 0 {
        let avg = stats.total_events as f64 / stats.days as f64;
        println!("{}• Average marks/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
