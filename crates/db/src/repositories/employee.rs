use crate::models::DbEmployee;
use eyre::Result;
use rust_decimal::Decimal;
use sqlx::{PgExecutor, Pool, Postgres};

pub async fn create_employee(pool: &Pool<Postgres>, name: &str) -> Result<DbEmployee> {
    tracing::debug!("Creating employee: name={}", name);

    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        INSERT INTO employees (name)
        VALUES ($1)
        RETURNING id, name, overtime_balance
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Employee created successfully: id={}", employee.id);
    Ok(employee)
}

pub async fn list_employees(pool: &Pool<Postgres>) -> Result<Vec<DbEmployee>> {
    let employees = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, name, overtime_balance
        FROM employees
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(employees)
}

pub async fn get_employee_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbEmployee>> {
    tracing::debug!("Getting employee by id: {}", id);

    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, name, overtime_balance
        FROM employees
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if employee.is_none() {
        tracing::debug!("Employee not found: id={}", id);
    }

    Ok(employee)
}

/// Adds `amount` to the balance in a single statement and returns the new
/// balance, or `None` when the employee does not exist.
pub async fn credit_overtime<'e, E>(executor: E, id: i64, amount: Decimal) -> Result<Option<Decimal>>
where
    E: PgExecutor<'e>,
{
    let balance = sqlx::query_scalar::<_, Decimal>(
        r#"
        UPDATE employees
        SET overtime_balance = overtime_balance + $2
        WHERE id = $1
        RETURNING overtime_balance
        "#,
    )
    .bind(id)
    .bind(amount)
    .fetch_optional(executor)
    .await?;

    Ok(balance)
}
