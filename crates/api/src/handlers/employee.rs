use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;
use attendance_core::{
    errors::AttendanceError,
    models::employee::{CreateEmployeeRequest, CreateEmployeeResponse, Employee},
    validation::validate_new_employee,
};

use crate::{
    ApiState,
    extract::{JsonBody, PathParams},
    middleware::error_handling::AppError,
};

#[axum::debug_handler]
pub async fn create_employee(
    State(state): State<Arc<ApiState>>,
    JsonBody(payload): JsonBody<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<CreateEmployeeResponse>), AppError> {
    let new_employee = validate_new_employee(&payload)?;

    let employee = state
        .store
        .create_employee(new_employee)
        .await
        .map_err(AttendanceError::Database)?;

    tracing::info!("Employee {} registered with id {}", employee.name, employee.id);

    Ok((
        StatusCode::CREATED,
        Json(CreateEmployeeResponse { id: employee.id }),
    ))
}

#[axum::debug_handler]
pub async fn list_employees(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state
        .store
        .list_employees()
        .await
        .map_err(AttendanceError::Database)?;

    Ok(Json(employees))
}

#[axum::debug_handler]
pub async fn get_employee(
    State(state): State<Arc<ApiState>>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<Employee>, AppError> {
    let employee = find_employee(&state, id).await?;
    Ok(Json(employee))
}

/// Loads an employee or fails with a not-found error.
pub(crate) async fn find_employee(state: &ApiState, id: i64) -> Result<Employee, AppError> {
    let employee = state
        .store
        .get_employee(id)
        .await
        .map_err(AttendanceError::Database)?
        .ok_or_else(|| AttendanceError::NotFound(format!("Employee {}", id)))?;

    Ok(employee)
}
