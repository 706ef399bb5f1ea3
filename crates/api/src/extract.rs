//! Request extractors whose rejections use the same `400 { "errors": [...] }`
//! body as validation failures, instead of axum's plain-text responses.

use axum::extract::{FromRequest, FromRequestParts};

use crate::middleware::error_handling::AppError;

/// JSON request body. A body that is not a JSON object is reported on the
/// `body` field.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path parameters. Unparseable segments are reported on the `path` field.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParams<T>(pub T);
