use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;
use attendance_core::{
    errors::AttendanceError,
    models::export::{ExportRequest, export_rows},
    validation::validate_export,
};

use crate::{
    ApiState,
    export::{CONTENT_TYPE, DOWNLOAD_FILENAME, render_workbook},
    extract::JsonBody,
    handlers::employee::find_employee,
    middleware::error_handling::AppError,
};

/// Exports an employee's attendance as a spreadsheet attachment.
///
/// Each row's overtime is recomputed from its clock fields; no stored amount
/// is read, so the sheet always reflects the current calculation rule.
#[axum::debug_handler]
pub async fn export_attendance(
    State(state): State<Arc<ApiState>>,
    JsonBody(payload): JsonBody<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let query = validate_export(&payload)?;
    find_employee(&state, query.employee_id).await?;

    let records = state
        .store
        .attendance_in_range(query.employee_id, query.range)
        .await
        .map_err(AttendanceError::Database)?;

    let rows = export_rows(&records).map_err(|e| AttendanceError::Export(e.to_string()))?;
    let workbook = render_workbook(&rows, &state.currency_symbol)?;

    tracing::info!(
        "Exported {} attendance rows for employee {}",
        rows.len(),
        query.employee_id
    );

    Ok((
        [
            (header::CONTENT_TYPE, CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            ),
        ],
        workbook,
    ))
}
