use crate::models::DbAttendanceRecord;
use attendance_core::models::{attendance::NewAttendance, export::DateRange};
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres};

pub async fn create_attendance_record<'e, E>(
    executor: E,
    attendance: &NewAttendance,
) -> Result<DbAttendanceRecord>
where
    E: PgExecutor<'e>,
{
    let record = sqlx::query_as::<_, DbAttendanceRecord>(
        r#"
        INSERT INTO attendance_records
            (employee_id, date, status, morning_in, morning_out, afternoon_in, afternoon_out)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, employee_id, date, status, morning_in, morning_out, afternoon_in, afternoon_out
        "#,
    )
    .bind(attendance.employee_id)
    .bind(attendance.date)
    .bind(attendance.status.as_str())
    .bind(&attendance.morning_in)
    .bind(&attendance.morning_out)
    .bind(&attendance.afternoon_in)
    .bind(&attendance.afternoon_out)
    .fetch_one(executor)
    .await?;

    Ok(record)
}

pub async fn get_attendance_by_employee_id(
    pool: &Pool<Postgres>,
    employee_id: i64,
) -> Result<Vec<DbAttendanceRecord>> {
    get_attendance_in_range(pool, employee_id, None).await
}

/// Records of one employee in insertion order, optionally limited to an
/// inclusive date range.
pub async fn get_attendance_in_range(
    pool: &Pool<Postgres>,
    employee_id: i64,
    range: Option<DateRange>,
) -> Result<Vec<DbAttendanceRecord>> {
    let records = sqlx::query_as::<_, DbAttendanceRecord>(
        r#"
        SELECT id, employee_id, date, status, morning_in, morning_out, afternoon_in, afternoon_out
        FROM attendance_records
        WHERE employee_id = $1
          AND ($2::date IS NULL OR date BETWEEN $2 AND $3)
        ORDER BY id ASC
        "#,
    )
    .bind(employee_id)
    .bind(range.map(|r| r.start))
    .bind(range.map(|r| r.end))
    .fetch_all(pool)
    .await?;

    Ok(records)
}
