//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the attendance
//! API server. Values come from environment variables (a `.env` file is loaded
//! by the binaries) with defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 7770)
//! - `DATABASE_URL`: PostgreSQL connection string, or `memory://` for the
//!   in-process store (required)
//! - `DATABASE_MAX_CONNECTIONS`: Connection pool size (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `API_STATIC_DIR`: Directory served for paths no route matches
//! - `EXPORT_CURRENCY_SYMBOL`: Prefix of exported overtime amounts (default: "R$")

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

pub const MEMORY_DATABASE_URL: &str = "memory://";

/// Configuration for the attendance API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use attendance_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Static files served as the fallback route (optional)
    pub static_dir: Option<String>,

    /// Currency symbol placed before exported amounts
    pub currency_symbol: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7770,
            database_url: MEMORY_DATABASE_URL.to_string(),
            max_connections: 5,
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: 30,
            static_dir: None,
            currency_symbol: "R$".to_string(),
        }
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT or DATABASE_MAX_CONNECTIONS value cannot be parsed
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        // Network settings
        let host = env::var("API_HOST").unwrap_or(defaults.host);
        let port = match env::var("API_PORT") {
            Ok(port) => port.parse().wrap_err("Invalid API_PORT value")?,
            Err(_) => defaults.port,
        };

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(n) => n.parse().wrap_err("Invalid DATABASE_MAX_CONNECTIONS value")?,
            Err(_) => defaults.max_connections,
        };

        // Logging settings
        let log_level = env::var("LOG_LEVEL")
            .map(|level| parse_log_level(&level))
            .unwrap_or(defaults.log_level);

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.request_timeout);

        // Serving and export settings
        let static_dir = env::var("API_STATIC_DIR").ok().filter(|s| !s.is_empty());
        let currency_symbol =
            env::var("EXPORT_CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol);

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            log_level,
            cors_origins,
            request_timeout,
            static_dir,
            currency_symbol,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:7770")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether records live in process memory instead of PostgreSQL
    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

/// Unknown names fall back to `INFO`.
pub fn parse_log_level(level: &str) -> Level {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
