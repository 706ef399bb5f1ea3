use async_trait::async_trait;
use attendance_core::models::{
    attendance::{AttendanceRecord, NewAttendance},
    employee::{Employee, NewEmployee},
    export::DateRange,
};
use eyre::Result;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::store::AttendanceStore;

/// In-process store for development and tests. Both tables sit behind one
/// lock, so a record and its balance credit are written under the same guard.
#[derive(Debug, Default)]
pub struct MemoryAttendanceStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    employees: Vec<Employee>,
    records: Vec<AttendanceRecord>,
}

impl MemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn create_employee(&self, new: NewEmployee) -> Result<Employee> {
        let mut tables = self.tables.write().await;
        let employee = Employee {
            id: tables.employees.len() as i64 + 1,
            name: new.name,
            overtime_balance: Decimal::ZERO,
        };
        tables.employees.push(employee.clone());
        Ok(employee)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        Ok(self.tables.read().await.employees.clone())
    }

    async fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        let tables = self.tables.read().await;
        Ok(tables.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn record_attendance(
        &self,
        attendance: NewAttendance,
        overtime: Decimal,
    ) -> Result<Option<AttendanceRecord>> {
        let mut tables = self.tables.write().await;
        let Some(employee) = tables
            .employees
            .iter_mut()
            .find(|e| e.id == attendance.employee_id)
        else {
            return Ok(None);
        };
        employee.overtime_balance += overtime;

        let record = attendance.into_record(tables.records.len() as i64 + 1);
        tables.records.push(record.clone());
        Ok(Some(record))
    }

    async fn list_attendance(&self, employee_id: i64) -> Result<Vec<AttendanceRecord>> {
        self.attendance_in_range(employee_id, None).await
    }

    async fn attendance_in_range(
        &self,
        employee_id: i64,
        range: Option<DateRange>,
    ) -> Result<Vec<AttendanceRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .records
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .filter(|r| range.is_none_or(|range| range.contains(r.date)))
            .cloned()
            .collect())
    }
}
