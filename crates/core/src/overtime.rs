//! # Overtime Calculator
//!
//! Overtime is time worked outside the nominal shift windows, 08:00-12:00 and
//! 14:00-18:00. Each of the four clock readings is compared against its own
//! window edge independently:
//!
//! - arriving before 08:00 or before 14:00 adds the minutes until the edge
//! - leaving after 12:00 or after 18:00 adds the minutes past the edge
//!
//! A reading equal to an edge adds nothing, and time missing inside a window
//! is never subtracted. Minutes are paid at [`HOURLY_RATE`] per hour and
//! rounded to cents.

use chrono::{NaiveTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    errors::{AttendanceResult, ValidationErrors},
    models::attendance::AttendanceStatus,
};

/// Currency units paid per hour of overtime.
pub const HOURLY_RATE: i64 = 10;

/// Window edges in minutes since midnight.
pub const MORNING_START: i64 = 8 * 60;
pub const MORNING_END: i64 = 12 * 60;
pub const AFTERNOON_START: i64 = 14 * 60;
pub const AFTERNOON_END: i64 = 18 * 60;

pub const CLOCK_FORMAT: &str = "%H:%M";

/// The four clock readings of a worked day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftTimes {
    pub morning_in: NaiveTime,
    pub morning_out: NaiveTime,
    pub afternoon_in: NaiveTime,
    pub afternoon_out: NaiveTime,
}

impl ShiftTimes {
    /// Parses all four readings, reporting every malformed one.
    pub fn parse(
        morning_in: &str,
        morning_out: &str,
        afternoon_in: &str,
        afternoon_out: &str,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut read = |field: &str, value: &str| {
            let parsed = parse_clock(value);
            if parsed.is_none() {
                errors.push(field, format!("Invalid time '{}' (use HH:MM)", value));
            }
            parsed
        };

        let morning_in = read("morning_in", morning_in);
        let morning_out = read("morning_out", morning_out);
        let afternoon_in = read("afternoon_in", afternoon_in);
        let afternoon_out = read("afternoon_out", afternoon_out);

        match (morning_in, morning_out, afternoon_in, afternoon_out) {
            (Some(morning_in), Some(morning_out), Some(afternoon_in), Some(afternoon_out)) => {
                Ok(Self {
                    morning_in,
                    morning_out,
                    afternoon_in,
                    afternoon_out,
                })
            }
            _ => Err(errors),
        }
    }
}

pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).ok()
}

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour() * 60 + time.minute())
}

/// Minutes worked outside the shift windows.
pub fn overtime_minutes(shift: &ShiftTimes) -> i64 {
    let mut minutes = 0;

    let morning_in = minute_of_day(shift.morning_in);
    if morning_in < MORNING_START {
        minutes += MORNING_START - morning_in;
    }

    let morning_out = minute_of_day(shift.morning_out);
    if morning_out > MORNING_END {
        minutes += morning_out - MORNING_END;
    }

    let afternoon_in = minute_of_day(shift.afternoon_in);
    if afternoon_in < AFTERNOON_START {
        minutes += AFTERNOON_START - afternoon_in;
    }

    let afternoon_out = minute_of_day(shift.afternoon_out);
    if afternoon_out > AFTERNOON_END {
        minutes += afternoon_out - AFTERNOON_END;
    }

    minutes
}

pub fn overtime_amount(minutes: i64) -> Decimal {
    (Decimal::from(minutes) * Decimal::from(HOURLY_RATE) / Decimal::from(60))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Overtime owed for one day. Absent days are worth zero and their clock
/// fields are not read.
pub fn compute_overtime(
    morning_in: &str,
    morning_out: &str,
    afternoon_in: &str,
    afternoon_out: &str,
    status: AttendanceStatus,
) -> AttendanceResult<Decimal> {
    match status {
        AttendanceStatus::Absent => Ok(Decimal::ZERO),
        AttendanceStatus::Present => {
            let shift = ShiftTimes::parse(morning_in, morning_out, afternoon_in, afternoon_out)?;
            Ok(overtime_amount(overtime_minutes(&shift)))
        }
    }
}
