use attendance_core::models::{
    attendance::{ABSENT_MARKER, AttendanceRecord, AttendanceStatus},
    employee::Employee,
    export::DateRange,
};
use attendance_db::mock::MockStore;
use axum::http::{StatusCode, header};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, absent_day, error_fields, mock_server, present_day};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn employee(id: i64) -> Employee {
    Employee {
        id,
        name: "Ana".to_string(),
        overtime_balance: Decimal::ZERO,
    }
}

fn absent_record(id: i64, employee_id: i64, day: &str) -> AttendanceRecord {
    AttendanceRecord {
        id,
        employee_id,
        date: date(day),
        status: AttendanceStatus::Absent,
        morning_in: ABSENT_MARKER.to_string(),
        morning_out: ABSENT_MARKER.to_string(),
        afternoon_in: ABSENT_MARKER.to_string(),
        afternoon_out: ABSENT_MARKER.to_string(),
    }
}

#[tokio::test]
async fn test_export_returns_spreadsheet_attachment() {
    let ctx = TestContext::new();
    let id = ctx.register("Ana").await;
    ctx.submit(present_day(id, "2024-05-02", ["07:30", "12:00", "14:00", "18:00"]))
        .await;
    ctx.submit(absent_day(id, "2024-05-03")).await;

    let response = ctx
        .server
        .post("/export")
        .json(&json!({
            "employee_id": id,
            "start_date": "2024-05-01",
            "end_date": "2024-05-31",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header(header::CONTENT_TYPE),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"attendance.xlsx\""
    );
    assert_eq!(&response.as_bytes()[..2], b"PK");
}

#[tokio::test]
async fn test_export_reads_requested_range() {
    let mut store = MockStore::new();
    store
        .expect_get_employee()
        .withf(|id| *id == 3)
        .returning(|id| Ok(Some(employee(id))));
    store
        .expect_attendance_in_range()
        .withf(|employee_id, range| {
            *employee_id == 3
                && *range
                    == Some(DateRange {
                        start: date("2024-05-01"),
                        end: date("2024-05-15"),
                    })
        })
        .times(1)
        .returning(|employee_id, _| Ok(vec![absent_record(1, employee_id, "2024-05-06")]));

    let server = mock_server(store);
    let response = server
        .post("/export")
        .json(&json!({
            "funcionario_id": "3",
            "inicio": "2024-05-01",
            "fim": "2024-05-15",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_export_all_dates_ignores_range() {
    let mut store = MockStore::new();
    store
        .expect_get_employee()
        .returning(|id| Ok(Some(employee(id))));
    store
        .expect_attendance_in_range()
        .withf(|_, range| range.is_none())
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let server = mock_server(store);
    let response = server
        .post("/export")
        .json(&json!({
            "employee_id": 3,
            "start_date": "garbage",
            "all_dates": true,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_export_unknown_employee_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/export")
        .json(&json!({ "employee_id": 9, "all_dates": true }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_export_rejects_reversed_range() {
    let mut store = MockStore::new();
    store.expect_get_employee().times(0);
    store.expect_attendance_in_range().times(0);

    let server = mock_server(store);
    let response = server
        .post("/export")
        .json(&json!({
            "employee_id": 3,
            "start_date": "2024-05-15",
            "end_date": "2024-05-01",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec!["end_date"]);
}

#[tokio::test]
async fn test_export_requires_range_without_all_dates() {
    let ctx = TestContext::new();
    let id = ctx.register("Ana").await;

    let response = ctx
        .server
        .post("/export")
        .json(&json!({ "employee_id": id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_fields(&response.json::<Value>()),
        vec!["start_date", "end_date"]
    );
}

#[tokio::test]
async fn test_export_storage_failure_is_a_server_error() {
    let mut store = MockStore::new();
    store
        .expect_get_employee()
        .returning(|id| Ok(Some(employee(id))));
    store
        .expect_attendance_in_range()
        .returning(|_, _| Err(eyre::eyre!("pool timed out")));

    let server = mock_server(store);
    let response = server
        .post("/export")
        .json(&json!({ "employee_id": 3, "all_dates": true }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_export_rejects_mistyped_flag() {
    let mut store = MockStore::new();
    store.expect_get_employee().times(0);
    store.expect_attendance_in_range().times(0);

    let server = mock_server(store);
    let response = server
        .post("/export")
        .json(&json!({
            "employee_id": 3,
            "start_date": "2024-05-01",
            "end_date": "2024-05-31",
            "all_dates": "yes",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec!["all_dates"]);
}
