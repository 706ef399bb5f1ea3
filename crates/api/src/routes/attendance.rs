use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/attendance", post(handlers::attendance::record_attendance))
        .route(
            "/attendance/:employee_id",
            get(handlers::attendance::list_attendance),
        )
}
