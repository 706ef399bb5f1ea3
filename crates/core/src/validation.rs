//! Request validation. Each validator collects every field-level problem of a
//! request before failing, and on success yields the typed command the
//! storage layer accepts.

use chrono::NaiveDate;
use serde_json::Value;

use crate::{
    errors::{AttendanceResult, ValidationErrors},
    models::{
        attendance::{ABSENT_MARKER, AttendanceStatus, NewAttendance, RecordAttendanceRequest},
        employee::{CreateEmployeeRequest, NewEmployee},
        export::{DateRange, ExportQuery, ExportRequest},
    },
    overtime::{CLOCK_FORMAT, ShiftTimes},
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const CLOCK_FIELDS: [&str; 4] = ["morning_in", "morning_out", "afternoon_in", "afternoon_out"];

pub fn validate_new_employee(request: &CreateEmployeeRequest) -> AttendanceResult<NewEmployee> {
    let name = match text_field(request.name.as_ref()) {
        Ok(name) => name.map(str::trim).unwrap_or_default(),
        Err(message) => return Err(ValidationErrors::single("name", message).into()),
    };
    if name.is_empty() {
        return Err(ValidationErrors::single("name", "Employee name is required").into());
    }

    Ok(NewEmployee {
        name: name.to_string(),
    })
}

pub fn validate_attendance(request: &RecordAttendanceRequest) -> AttendanceResult<NewAttendance> {
    let mut errors = ValidationErrors::new();

    let employee_id = match parse_employee_id(request.employee_id.as_ref()) {
        Ok(id) => Some(id),
        Err(message) => {
            errors.push("employee_id", message);
            None
        }
    };

    let date = match parse_date(request.date.as_ref()) {
        Ok(date) => Some(date),
        Err(message) => {
            errors.push("date", message);
            None
        }
    };

    let status = match parse_status(request.status.as_ref()) {
        Ok(status) => Some(status),
        Err(message) => {
            errors.push("status", message);
            None
        }
    };

    let clock = match status {
        Some(AttendanceStatus::Absent) => Some(absent_clock()),
        Some(AttendanceStatus::Present) => match present_clock(request) {
            Ok(clock) => Some(clock),
            Err(clock_errors) => {
                for error in clock_errors.errors() {
                    errors.push(error.field.clone(), error.message.clone());
                }
                None
            }
        },
        None => None,
    };

    match (employee_id, date, status, clock) {
        (Some(employee_id), Some(date), Some(status), Some([mi, mo, ai, ao])) if errors.is_empty() => {
            Ok(NewAttendance {
                employee_id,
                date,
                status,
                morning_in: mi,
                morning_out: mo,
                afternoon_in: ai,
                afternoon_out: ao,
            })
        }
        _ => Err(errors.into()),
    }
}

pub fn validate_export(request: &ExportRequest) -> AttendanceResult<ExportQuery> {
    let mut errors = ValidationErrors::new();

    let employee_id = match parse_employee_id(request.employee_id.as_ref()) {
        Ok(id) => id,
        Err(message) => {
            errors.push("employee_id", message);
            0
        }
    };

    let all_dates = match parse_flag(request.all_dates.as_ref()) {
        Ok(flag) => flag,
        Err(message) => {
            errors.push("all_dates", message);
            false
        }
    };

    if all_dates {
        return errors.into_result(ExportQuery {
            employee_id,
            range: None,
        });
    }

    let start = parse_date(request.start_date.as_ref())
        .map_err(|message| errors.push("start_date", message))
        .ok();
    let end = parse_date(request.end_date.as_ref())
        .map_err(|message| errors.push("end_date", message))
        .ok();

    let range = match (start, end) {
        (Some(start), Some(end)) if start > end => {
            errors.push("end_date", "End date must not be earlier than start date");
            None
        }
        (Some(start), Some(end)) => Some(DateRange { start, end }),
        _ => None,
    };

    errors.into_result(ExportQuery { employee_id, range })
}

/// Accepts a positive JSON integer or a string holding one.
pub fn parse_employee_id(value: Option<&Value>) -> Result<i64, String> {
    let id = match value {
        None | Some(Value::Null) => return Err("Employee id is required".to_string()),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err("Invalid employee id".to_string()),
    }
}

/// Reads an optional string field. A missing field and `null` both read as
/// `None`; any other non-string value is rejected.
pub fn text_field(value: Option<&Value>) -> Result<Option<&str>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(other) => Err(format!("Expected a string, got {}", other)),
    }
}

/// Missing and `null` mean `false`.
pub fn parse_flag(value: Option<&Value>) -> Result<bool, String> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(format!("Expected true or false, got {}", other)),
    }
}

pub fn parse_status(value: Option<&Value>) -> Result<AttendanceStatus, String> {
    match text_field(value)? {
        Some(text) => text
            .parse()
            .map_err(|_| "Invalid status (use Present or Absent)".to_string()),
        None => Err("Status is required".to_string()),
    }
}

pub fn parse_date(value: Option<&Value>) -> Result<NaiveDate, String> {
    let value = text_field(value)?.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err("Date is required".to_string());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{}' (use YYYY-MM-DD)", value))
}

fn absent_clock() -> [String; 4] {
    std::array::from_fn(|_| ABSENT_MARKER.to_string())
}

fn present_clock(request: &RecordAttendanceRequest) -> Result<[String; 4], ValidationErrors> {
    let values = [
        &request.morning_in,
        &request.morning_out,
        &request.afternoon_in,
        &request.afternoon_out,
    ];

    let mut errors = ValidationErrors::new();
    let mut texts = [""; 4];
    for ((field, value), text) in CLOCK_FIELDS.iter().zip(values).zip(texts.iter_mut()) {
        match text_field(value.as_ref()) {
            Ok(value) => *text = value.unwrap_or_default(),
            Err(message) => errors.push(*field, message),
        }
    }

    let shift = match ShiftTimes::parse(texts[0], texts[1], texts[2], texts[3]) {
        Ok(shift) if errors.is_empty() => shift,
        Ok(_) => return Err(errors),
        Err(parse_errors) => {
            // A mistyped field already carries its own error
            for error in parse_errors.errors() {
                if !errors.fields().any(|field| field == error.field) {
                    errors.push(error.field.clone(), error.message.clone());
                }
            }
            return Err(errors);
        }
    };

    if shift.morning_out < shift.morning_in {
        errors.push("morning_out", "Morning check-out is earlier than check-in");
    }
    if shift.afternoon_out < shift.afternoon_in {
        errors.push("afternoon_out", "Afternoon check-out is earlier than check-in");
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok([
        shift.morning_in.format(CLOCK_FORMAT).to_string(),
        shift.morning_out.format(CLOCK_FORMAT).to_string(),
        shift.afternoon_in.format(CLOCK_FORMAT).to_string(),
        shift.afternoon_out.format(CLOCK_FORMAT).to_string(),
    ])
}
