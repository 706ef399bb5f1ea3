use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create employees table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            overtime_balance NUMERIC(12, 2) NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT name_not_blank CHECK (btrim(name) <> '')
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create attendance_records table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_records (
            id BIGSERIAL PRIMARY KEY,
            employee_id BIGINT NOT NULL REFERENCES employees(id),
            date DATE NOT NULL,
            status VARCHAR(16) NOT NULL,
            morning_in VARCHAR(16) NOT NULL,
            morning_out VARCHAR(16) NOT NULL,
            afternoon_in VARCHAR(16) NOT NULL,
            afternoon_out VARCHAR(16) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('Present', 'Absent'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Prepared statements hold one command each, so indexes go one at a time
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_attendance_records_employee_id ON attendance_records(employee_id)",
        "CREATE INDEX IF NOT EXISTS idx_attendance_records_employee_date ON attendance_records(employee_id, date)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
