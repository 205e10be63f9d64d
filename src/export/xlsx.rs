// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{EXCEL_DATETIME_FORMAT, naive_datetime_to_excel_serial};
use crate::export::model::{DUMP_HEADERS, event_to_row};
use crate::models::AttendanceEvent;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use unicode_width::UnicodeWidthStr;

const COL_ORDER: u16 = 0;
const COL_TIMESTAMP: u16 = 3;

/// XLSX workbook with styled header, banded rows and auto column widths.
pub(crate) fn render_xlsx(events: &[AttendanceEvent], sheet_title: &str) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(sheet_title).map_err(to_export_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in DUMP_HEADERS.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = DUMP_HEADERS
        .iter()
        .map(|h| UnicodeWidthStr::width(*h))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, ev) in events.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        let values = event_to_row(ev);

        for (col, value) in values.iter().enumerate() {
            let col = col as u16;
            write_cell(worksheet, row, col, ev, value, band_color)?;

            let c = col as usize;
            col_widths[c] = col_widths[c].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save_to_buffer().map_err(to_export_error)
}

/// Order ids are numbers, timestamps are Excel datetimes, everything else
/// (student ids included, they may carry leading zeros) stays text.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    ev: &AttendanceEvent,
    text: &str,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match col {
        COL_ORDER => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet
                .write_number_with_format(row, col, ev.order_id as f64, &fmt)
                .map_err(to_export_error)?;
        }
        COL_TIMESTAMP => {
            if let Some(serial) = naive_datetime_to_excel_serial(&ev.timestamp) {
                let fmt = base.set_num_format(EXCEL_DATETIME_FORMAT);
                worksheet
                    .write_number_with_format(row, col, serial, &fmt)
                    .map_err(to_export_error)?;
            } else {
                worksheet
                    .write_string_with_format(row, col, text, &base)
                    .map_err(to_export_error)?;
            }
        }
        _ => {
            worksheet
                .write_string_with_format(row, col, text, &base)
                .map_err(to_export_error)?;
        }
    }

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX error: {e}"))
}
