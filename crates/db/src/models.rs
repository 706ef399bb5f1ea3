use attendance_core::models::{
    attendance::{AttendanceRecord, AttendanceStatus},
    employee::Employee,
};
use chrono::NaiveDate;
use eyre::{Result, eyre};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: i64,
    pub name: String,
    pub overtime_balance: Decimal,
}

impl From<DbEmployee> for Employee {
    fn from(row: DbEmployee) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            overtime_balance: row.overtime_balance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub status: String,
    pub morning_in: String,
    pub morning_out: String,
    pub afternoon_in: String,
    pub afternoon_out: String,
}

impl TryFrom<DbAttendanceRecord> for AttendanceRecord {
    type Error = eyre::Report;

    fn try_from(row: DbAttendanceRecord) -> Result<Self> {
        let status = row
            .status
            .parse::<AttendanceStatus>()
            .map_err(|e| eyre!("Attendance record {} is corrupt: {}", row.id, e))?;

        Ok(AttendanceRecord {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            status,
            morning_in: row.morning_in,
            morning_out: row.morning_out,
            afternoon_in: row.afternoon_in,
            afternoon_out: row.afternoon_out,
        })
    }
}
