use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{errors::AttendanceResult, overtime::compute_overtime};

/// Stored in every clock field of an absent day.
pub const ABSENT_MARKER: &str = "AUSENTE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(alias = "Presente")]
    Present,
    #[serde(alias = "Ausente")]
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown attendance status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for AttendanceStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" | "Presente" => Ok(AttendanceStatus::Present),
            "Absent" | "Ausente" => Ok(AttendanceStatus::Absent),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub morning_in: String,
    pub morning_out: String,
    pub afternoon_in: String,
    pub afternoon_out: String,
}

impl AttendanceRecord {
    /// Overtime owed for this day, derived from the stored clock fields.
    pub fn overtime(&self) -> AttendanceResult<Decimal> {
        compute_overtime(
            &self.morning_in,
            &self.morning_out,
            &self.afternoon_in,
            &self.afternoon_out,
            self.status,
        )
    }
}

/// Raw attendance submission. Fields are kept as untyped JSON so that missing,
/// malformed and mistyped values are all reported together, field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordAttendanceRequest {
    #[serde(default, alias = "funcionario_id")]
    pub employee_id: Option<Value>,
    #[serde(default, alias = "data")]
    pub date: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default, alias = "entrada_manha")]
    pub morning_in: Option<Value>,
    #[serde(default, alias = "saida_manha")]
    pub morning_out: Option<Value>,
    #[serde(default, alias = "entrada_tarde")]
    pub afternoon_in: Option<Value>,
    #[serde(default, alias = "saida_tarde")]
    pub afternoon_out: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAttendanceResponse {
    pub id: i64,
    pub overtime_credited: Decimal,
}

/// A validated submission, ready to be persisted. Absent days already carry
/// the absent marker in all four clock fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub morning_in: String,
    pub morning_out: String,
    pub afternoon_in: String,
    pub afternoon_out: String,
}

impl NewAttendance {
    pub fn overtime(&self) -> AttendanceResult<Decimal> {
        compute_overtime(
            &self.morning_in,
            &self.morning_out,
            &self.afternoon_in,
            &self.afternoon_out,
            self.status,
        )
    }

    pub fn into_record(self, id: i64) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee_id: self.employee_id,
            date: self.date,
            status: self.status,
            morning_in: self.morning_in,
            morning_out: self.morning_out,
            afternoon_in: self.afternoon_in,
            afternoon_out: self.afternoon_out,
        }
    }
}
