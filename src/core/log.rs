use crate::db::log::{LogEntry, load_log};
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use rusqlite::Connection;
use unicode_width::UnicodeWidthStr;

const MAX_OP_WIDTH: usize = 40;

/// ANSI colour per audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "scan" => Colour::Green,
        "sink_failed" => Colour::Red,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn op_target(entry: &LogEntry) -> String {
    if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;

        if entries.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|e| UnicodeWidthStr::width(op_target(e).as_str()))
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);

        println!("📜 Internal log:\n");

        for entry in &entries {
            let visible = truncate(&op_target(entry), MAX_OP_WIDTH);
            let padding = " ".repeat(op_w.saturating_sub(UnicodeWidthStr::width(visible.as_str())));

            // only the operation word is coloured
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => {
                    format!("{} {}", color_for_operation(&entry.operation).paint(op), rest)
                }
                None => color_for_operation(&entry.operation)
                    .paint(visible.as_str())
                    .to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                entry.date,
                colored,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
