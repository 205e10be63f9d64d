pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod mark;
pub mod payload;
pub mod scan;
pub mod search;

use crate::models::AttendanceEvent;
use crate::utils::table::Table;

/// Render records as a console table (shared by `list` and `search`).
pub(crate) fn print_events(events: &[AttendanceEvent]) {
    let mut table = Table::new(&["Order", "Student ID", "Name", "Timestamp"]);
    for ev in events {
        table.add_row(vec![
            ev.order_id.to_string(),
            ev.student_id.clone(),
            ev.name.clone(),
            ev.timestamp_str(),
        ]);
    }
    print!("{}", table.render());
}
