//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        let columns = headers
            .iter()
            .map(|h| Column {
                header: h.to_string(),
                width: UnicodeWidthStr::width(*h),
            })
            .collect();

        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row, widening columns to fit (names may contain wide glyphs).
    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, value) in self.columns.iter_mut().zip(row.iter()) {
            col.width = col.width.max(UnicodeWidthStr::width(value.as_str()));
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for col in &self.columns {
            push_cell(&mut out, &col.header, col.width);
        }
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&"-".repeat(total));
        out.push('\n');

        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let value = row.get(i).map(String::as_str).unwrap_or("");
                push_cell(&mut out, value, col.width);
            }
            out.push('\n');
        }

        out
    }
}

fn push_cell(out: &mut String, value: &str, width: usize) {
    out.push_str(value);
    let pad = width.saturating_sub(UnicodeWidthStr::width(value));
    out.push_str(&" ".repeat(pad + 1));
}
