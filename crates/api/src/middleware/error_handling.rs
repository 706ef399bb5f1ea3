//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON bodies so every handler
//! reports failures the same way:
//!
//! - validation failures: `400 { "errors": [{ "field", "message" }] }`
//! - unknown resources: `404 { "error": "..." }`
//! - storage and export failures: `500 { "error": "Internal server error" }`,
//!   with the underlying cause logged rather than returned

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use attendance_core::errors::{AttendanceError, ValidationErrors};

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use attendance_api::middleware::error_handling::AppError;
/// use attendance_core::errors::AttendanceError;
///
/// async fn handler(id: i64) -> Result<Json<i64>, AppError> {
///     if id <= 0 {
///         return Err(AppError(AttendanceError::NotFound(format!("Employee {}", id))));
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub AttendanceError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            AttendanceError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            err @ AttendanceError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": err.to_string() }))).into_response()
            }
            err @ (AttendanceError::Database(_) | AttendanceError::Export(_)) => {
                tracing::error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Allows using `?` on functions returning `AttendanceResult<T>` in handlers.
impl From<AttendanceError> for AppError {
    fn from(err: AttendanceError) -> Self {
        AppError(err)
    }
}

/// Storage failures arrive as `eyre::Report` and become database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(AttendanceError::Database(err))
    }
}

/// Bodies that are not a JSON object never reach the validators.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(ValidationErrors::single("body", rejection.body_text()).into())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(ValidationErrors::single("path", rejection.body_text()).into())
    }
}

/// Maps an AttendanceError to an HTTP response
pub fn map_error(err: AttendanceError) -> Response {
    AppError(err).into_response()
}
