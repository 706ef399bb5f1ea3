use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;
use attendance_core::{
    errors::AttendanceError,
    models::attendance::{AttendanceRecord, RecordAttendanceRequest, RecordAttendanceResponse},
    validation::validate_attendance,
};

use crate::{
    ApiState,
    extract::{JsonBody, PathParams},
    handlers::employee::find_employee,
    middleware::error_handling::AppError,
};

/// Records one day of attendance and credits its overtime to the employee.
///
/// Validation runs before anything is written. Absent days are stored with
/// the absent marker in every clock field and credit nothing.
#[axum::debug_handler]
pub async fn record_attendance(
    State(state): State<Arc<ApiState>>,
    JsonBody(payload): JsonBody<RecordAttendanceRequest>,
) -> Result<(StatusCode, Json<RecordAttendanceResponse>), AppError> {
    let attendance = validate_attendance(&payload)?;
    let overtime = attendance.overtime()?;
    let employee_id = attendance.employee_id;

    let record = state
        .store
        .record_attendance(attendance, overtime)
        .await
        .map_err(AttendanceError::Database)?
        .ok_or_else(|| {
            AttendanceError::NotFound(format!("Employee {}", employee_id))
        })?;

    tracing::info!(
        "Attendance {} recorded for employee {} on {} ({}), credited {}",
        record.id,
        record.employee_id,
        record.date,
        record.status,
        overtime
    );

    Ok((
        StatusCode::CREATED,
        Json(RecordAttendanceResponse {
            id: record.id,
            overtime_credited: overtime,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_attendance(
    State(state): State<Arc<ApiState>>,
    PathParams(employee_id): PathParams<i64>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    find_employee(&state, employee_id).await?;

    let records = state
        .store
        .list_attendance(employee_id)
        .await
        .map_err(AttendanceError::Database)?;

    Ok(Json(records))
}
