//! The attendance store: durable bookkeeping of employees and their attendance
//! history, and the only place an overtime balance changes.

use async_trait::async_trait;
use attendance_core::models::{
    attendance::{AttendanceRecord, NewAttendance},
    employee::{Employee, NewEmployee},
    export::DateRange,
};
use eyre::Result;
use rust_decimal::Decimal;

use crate::{
    DbPool,
    repositories::{attendance, employee},
};

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee>;

    async fn list_employees(&self) -> Result<Vec<Employee>>;

    async fn get_employee(&self, id: i64) -> Result<Option<Employee>>;

    /// Persists the record and credits `overtime` to the employee's balance as
    /// one unit: either both writes happen or neither does. Returns `None`
    /// without writing anything when the employee does not exist.
    async fn record_attendance(
        &self,
        attendance: NewAttendance,
        overtime: Decimal,
    ) -> Result<Option<AttendanceRecord>>;

    async fn list_attendance(&self, employee_id: i64) -> Result<Vec<AttendanceRecord>>;

    async fn attendance_in_range(
        &self,
        employee_id: i64,
        range: Option<DateRange>,
    ) -> Result<Vec<AttendanceRecord>>;
}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgAttendanceStore {
    pool: DbPool,
}

impl PgAttendanceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn record_in_transaction(
        &self,
        attendance: NewAttendance,
        overtime: Decimal,
    ) -> Result<Option<AttendanceRecord>> {
        let mut tx = self.pool.begin().await?;

        // Crediting first locks the employee row and tells us whether it exists
        let balance = employee::credit_overtime(&mut *tx, attendance.employee_id, overtime).await?;
        let Some(balance) = balance else {
            tx.rollback().await?;
            return Ok(None);
        };

        let row = attendance::create_attendance_record(&mut *tx, &attendance).await?;
        tx.commit().await?;

        tracing::debug!(
            "Attendance recorded: id={}, employee_id={}, credited={}, balance={}",
            row.id,
            row.employee_id,
            overtime,
            balance
        );

        Ok(Some(row.try_into()?))
    }
}

#[async_trait]
impl AttendanceStore for PgAttendanceStore {
    async fn create_employee(&self, new: NewEmployee) -> Result<Employee> {
        let row = employee::create_employee(&self.pool, &new.name).await?;
        Ok(row.into())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        let rows = employee::list_employees(&self.pool).await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        let row = employee::get_employee_by_id(&self.pool, id).await?;
        Ok(row.map(Employee::from))
    }

    async fn record_attendance(
        &self,
        attendance: NewAttendance,
        overtime: Decimal,
    ) -> Result<Option<AttendanceRecord>> {
        let employee_id = attendance.employee_id;
        self.record_in_transaction(attendance, overtime)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    employee_id,
                    "Attendance transaction failed; record and balance left unchanged"
                );
            })
    }

    async fn list_attendance(&self, employee_id: i64) -> Result<Vec<AttendanceRecord>> {
        attendance::get_attendance_by_employee_id(&self.pool, employee_id)
            .await?
            .into_iter()
            .map(AttendanceRecord::try_from)
            .collect()
    }

    async fn attendance_in_range(
        &self,
        employee_id: i64,
        range: Option<DateRange>,
    ) -> Result<Vec<AttendanceRecord>> {
        attendance::get_attendance_in_range(&self.pool, employee_id, range)
            .await?
            .into_iter()
            .map(AttendanceRecord::try_from)
            .collect()
    }
}
