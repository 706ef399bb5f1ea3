//! Spreadsheet rendering for attendance exports.
//!
//! The workbook has a single sheet: a highlighted header row followed by one
//! row per record. It is built in memory and handed back as bytes, so no
//! temporary file outlives the request.

use attendance_core::{
    errors::{AttendanceError, AttendanceResult},
    models::export::ExportRow,
    validation::DATE_FORMAT,
};
use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};

pub const CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const DOWNLOAD_FILENAME: &str = "attendance.xlsx";
pub const SHEET_NAME: &str = "Attendance";

pub const HEADERS: [&str; 7] = [
    "Date",
    "Morning In",
    "Morning Out",
    "Afternoon In",
    "Afternoon Out",
    "Status",
    "Overtime",
];

const HEADER_FILL: u32 = 0xFFFF00;
const COLUMN_WIDTH: f64 = 14.0;

pub fn render_workbook(rows: &[ExportRow], currency_symbol: &str) -> AttendanceResult<Vec<u8>> {
    build_workbook(rows, currency_symbol).map_err(|e| AttendanceError::Export(e.to_string()))
}

fn build_workbook(rows: &[ExportRow], currency_symbol: &str) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL));

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(0, col, title, &header)?;
        sheet.set_column_width(col, COLUMN_WIDTH)?;
    }

    for (row_num, row) in (1u32..).zip(rows) {
        sheet.write_string(row_num, 0, row.date.format(DATE_FORMAT).to_string())?;
        sheet.write_string(row_num, 1, row.morning_in.as_str())?;
        sheet.write_string(row_num, 2, row.morning_out.as_str())?;
        sheet.write_string(row_num, 3, row.afternoon_in.as_str())?;
        sheet.write_string(row_num, 4, row.afternoon_out.as_str())?;
        sheet.write_string(row_num, 5, row.status.as_str())?;
        sheet.write_string(row_num, 6, row.formatted_overtime(currency_symbol))?;
    }

    workbook.save_to_buffer()
}
