use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::AttendanceResult,
    models::attendance::{AttendanceRecord, AttendanceStatus},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default, alias = "funcionario_id")]
    pub employee_id: Option<Value>,
    #[serde(default, alias = "inicio")]
    pub start_date: Option<Value>,
    #[serde(default, alias = "fim")]
    pub end_date: Option<Value>,
    #[serde(default, alias = "todos")]
    pub all_dates: Option<Value>,
}

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A validated export selection. `range: None` selects every date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportQuery {
    pub employee_id: i64,
    pub range: Option<DateRange>,
}

/// One spreadsheet row: the stored fields plus the recomputed overtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub morning_in: String,
    pub morning_out: String,
    pub afternoon_in: String,
    pub afternoon_out: String,
    pub status: AttendanceStatus,
    pub overtime: Decimal,
}

impl ExportRow {
    pub fn from_record(record: &AttendanceRecord) -> AttendanceResult<Self> {
        Ok(Self {
            date: record.date,
            morning_in: record.morning_in.clone(),
            morning_out: record.morning_out.clone(),
            afternoon_in: record.afternoon_in.clone(),
            afternoon_out: record.afternoon_out.clone(),
            status: record.status,
            overtime: record.overtime()?,
        })
    }

    pub fn formatted_overtime(&self, currency_symbol: &str) -> String {
        format!("{}{:.2}", currency_symbol, self.overtime)
    }
}

/// Builds export rows, recomputing every row's overtime from its clock fields.
pub fn export_rows(records: &[AttendanceRecord]) -> AttendanceResult<Vec<ExportRow>> {
    records.iter().map(ExportRow::from_record).collect()
}
