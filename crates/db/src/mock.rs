use async_trait::async_trait;
use attendance_core::models::{
    attendance::{AttendanceRecord, NewAttendance},
    employee::{Employee, NewEmployee},
    export::DateRange,
};
use mockall::mock;
use rust_decimal::Decimal;

use crate::store::AttendanceStore;

// Mock store for handler tests
mock! {
    pub Store {}

    #[async_trait]
    impl AttendanceStore for Store {
        async fn create_employee(&self, employee: NewEmployee) -> eyre::Result<Employee>;

        async fn list_employees(&self) -> eyre::Result<Vec<Employee>>;

        async fn get_employee(&self, id: i64) -> eyre::Result<Option<Employee>>;

        async fn record_attendance(
            &self,
            attendance: NewAttendance,
            overtime: Decimal,
        ) -> eyre::Result<Option<AttendanceRecord>>;

        async fn list_attendance(&self, employee_id: i64) -> eyre::Result<Vec<AttendanceRecord>>;

        async fn attendance_in_range(
            &self,
            employee_id: i64,
            range: Option<DateRange>,
        ) -> eyre::Result<Vec<AttendanceRecord>>;
    }
}
