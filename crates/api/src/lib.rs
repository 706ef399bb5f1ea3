//! # Attendance API
//!
//! The API crate provides the web server for the attendance register. It
//! exposes endpoints for registering employees, recording daily attendance,
//! reading overtime balances and exporting attendance to a spreadsheet.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate requests and drive the attendance store
//! - **Middleware**: Error mapping shared by all handlers
//! - **Extract**: Body and path extractors that reject like validation errors
//! - **Export**: Spreadsheet rendering
//! - **Config**: Environment-driven server configuration
//!
//! Storage sits behind the `AttendanceStore` trait from `attendance-db`, so
//! the same router runs over PostgreSQL, the in-memory store or a mock.

/// Configuration module for API settings
pub mod config;
/// Spreadsheet rendering for attendance exports
pub mod export;
/// Extractors with structured rejections
pub mod extract;
/// Request handlers
pub mod handlers;
/// Error mapping
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use attendance_db::AttendanceStore;
use axum::{Router, http::HeaderValue};
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Employee and attendance storage
    pub store: Arc<dyn AttendanceStore>,

    /// Currency symbol placed before exported amounts
    pub currency_symbol: String,
}

impl ApiState {
    pub fn new(store: Arc<dyn AttendanceStore>, currency_symbol: impl Into<String>) -> Self {
        Self {
            store,
            currency_symbol: currency_symbol.into(),
        }
    }
}

/// Installs the global `tracing` subscriber at the given level.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the router with every endpoint and request tracing, without any
/// deployment-specific layers.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Employee registration and balances
        .merge(routes::employee::routes())
        // Attendance submission and history
        .merge(routes::attendance::routes())
        // Spreadsheet export
        .merge(routes::export::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Applies the configured CORS policy, request timeout and static fallback.
pub fn apply_config(app: Router, config: &config::ApiConfig) -> Router {
    let app = match &config.static_dir {
        Some(dir) => {
            info!("Serving static files from {}", dir);
            app.fallback_service(ServeDir::new(dir))
        }
        None => app,
    };

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    app.layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
}

/// Starts the API server over the given store
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use attendance_api::{config::ApiConfig, start_server};
/// use attendance_db::memory::MemoryAttendanceStore;
///
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::default();
/// start_server(config, Arc::new(MemoryAttendanceStore::new())).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn AttendanceStore>) -> Result<()> {
    let state = Arc::new(ApiState::new(store, config.currency_symbol.clone()));
    let app = apply_config(router(state), &config);

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
