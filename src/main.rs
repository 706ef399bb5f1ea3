use std::sync::Arc;

use attendance_api::config::ApiConfig;
use attendance_db::{
    AttendanceStore, PgAttendanceStore, create_pool, memory::MemoryAttendanceStore,
    schema::initialize_database,
};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    attendance_api::init_tracing(config.log_level)?;

    let store: Arc<dyn AttendanceStore> = if config.uses_memory_store() {
        warn!("Using the in-memory store; records are lost on shutdown");
        Arc::new(MemoryAttendanceStore::new())
    } else {
        // Create database connection pool
        let db_pool = create_pool(&config.database_url, config.max_connections).await?;

        // Initialize database schema
        initialize_database(&db_pool).await?;
        info!("Connected to PostgreSQL");

        Arc::new(PgAttendanceStore::new(db_pool))
    };

    // Start API server
    attendance_api::start_server(config, store).await?;

    Ok(())
}
