// src/export/dump.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::json_csv::{render_csv, render_json};
use crate::export::xlsx::render_xlsx;
use crate::models::AttendanceEvent;

/// Build a fresh export artifact in memory: header plus one row per event,
/// columns `ID, Student ID, Name, Timestamp`.
pub fn render_full_dump(
    rows: &[AttendanceEvent],
    format: ExportFormat,
    sheet_title: &str,
) -> AppResult<Vec<u8>> {
    match format {
        ExportFormat::Csv => render_csv(rows),
        ExportFormat::Json => render_json(rows),
        ExportFormat::Xlsx => render_xlsx(rows, sheet_title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(order_id: i64, sid: &str, name: &str, day: u32) -> AttendanceEvent {
        let ts = NaiveDate::from_ymd_opt(2025, 4, day)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        AttendanceEvent {
            order_id,
            student_id: sid.into(),
            name: name.into(),
            timestamp: ts,
            day: ts.date(),
        }
    }

    #[test]
    fn csv_dump_has_header_plus_one_row_per_event() {
        let rows = vec![
            event(1, "S1", "Alice", 1),
            event(2, "S2", "Doe, John", 1),
            event(5, "007", "Bond", 2),
        ];
        let blob = render_full_dump(&rows, ExportFormat::Csv, "Attendance Records").unwrap();

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(blob.as_slice());
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), rows.len() + 1);
        assert_eq!(records[0].iter().collect::<Vec<_>>(), ["ID", "Student ID", "Name", "Timestamp"]);
        assert_eq!(
            records[2].iter().collect::<Vec<_>>(),
            ["2", "S2", "Doe, John", "2025-04-01 08:30:00"]
        );
        assert_eq!(&records[3][1], "007");
    }

    #[test]
    fn empty_csv_dump_is_header_only() {
        let blob = render_full_dump(&[], ExportFormat::Csv, "x").unwrap();
        assert_eq!(String::from_utf8(blob).unwrap(), "ID,Student ID,Name,Timestamp\n");
    }

    #[test]
    fn json_dump_uses_header_names() {
        let blob = render_full_dump(&[event(3, "S1", "Alice", 1)], ExportFormat::Json, "x").unwrap();
        let v: serde_json::Value = serde_json::from_slice(&blob).unwrap();
        assert_eq!(v[0]["ID"], 3);
        assert_eq!(v[0]["Student ID"], "S1");
        assert_eq!(v[0]["Timestamp"], "2025-04-01 08:30:00");
    }

    #[test]
    fn xlsx_dump_is_a_zip_container() {
        let blob = render_full_dump(
            &[event(1, "S1", "Alice", 1)],
            ExportFormat::Xlsx,
            "Attendance Records",
        )
        .unwrap();
        assert!(blob.starts_with(b"PK"));
    }

    #[test]
    fn xlsx_rejects_invalid_sheet_title() {
        let res = render_full_dump(&[], ExportFormat::Xlsx, "bad/title");
        assert!(res.is_err());
    }
}
