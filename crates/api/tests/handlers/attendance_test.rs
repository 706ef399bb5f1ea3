use attendance_db::{AttendanceStore, mock::MockStore};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, absent_day, error_fields, mock_server, present_day};

#[tokio::test]
async fn test_present_day_credits_balance() {
    let ctx = TestContext::new();
    let id = ctx.register("Ana").await;

    let response = ctx
        .submit(present_day(id, "2024-05-02", ["07:30", "12:00", "14:00", "18:00"]))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["overtime_credited"], json!(5.0));
    assert_eq!(ctx.balance(id).await, 5.0);
}

#[tokio::test]
async fn test_balance_grows_by_each_credit() {
    let ctx = TestContext::new();
    let id = ctx.register("Ana").await;

    let days = [
        ("2024-05-02", ["07:30", "12:00", "14:00", "18:00"]),
        ("2024-05-03", ["08:00", "12:30", "14:00", "19:00"]),
        ("2024-05-03", ["08:00", "12:00", "14:00", "18:00"]),
    ];

    let mut expected = 0.0;
    for (date, times) in days {
        let before = ctx.balance(id).await;
        let body = ctx.submit(present_day(id, date, times)).await.json::<Value>();
        let credited = body["overtime_credited"].as_f64().unwrap();

        assert_eq!(ctx.balance(id).await, before + credited);
        expected += credited;
    }

    assert_eq!(expected, 20.0);
    assert_eq!(ctx.balance(id).await, 20.0);
}

#[tokio::test]
async fn test_absent_day_leaves_balance_and_marks_fields() {
    let ctx = TestContext::new();
    let id = ctx.register("Ana").await;
    ctx.submit(present_day(id, "2024-05-02", ["07:30", "12:00", "14:00", "18:00"]))
        .await;

    let mut body = absent_day(id, "2024-05-03");
    body["morning_in"] = json!("06:00");
    body["afternoon_out"] = json!("22:00");
    let response = ctx.submit(body).await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["overtime_credited"], json!(0.0));
    assert_eq!(ctx.balance(id).await, 5.0);

    let records = ctx
        .server
        .get(&format!("/attendance/{}", id))
        .await
        .json::<Value>();
    assert_eq!(
        records[1],
        json!({
            "id": 2,
            "employee_id": id,
            "date": "2024-05-03",
            "status": "Absent",
            "morning_in": "AUSENTE",
            "morning_out": "AUSENTE",
            "afternoon_in": "AUSENTE",
            "afternoon_out": "AUSENTE",
        })
    );
}

#[tokio::test]
async fn test_legacy_payload_is_accepted() {
    let ctx = TestContext::new();
    let id = ctx.register("Ana").await;

    let response = ctx
        .submit(json!({
            "funcionario_id": id.to_string(),
            "data": "2024-05-02",
            "status": "Presente",
            "entrada_manha": "07:30",
            "saida_manha": "12:00",
            "entrada_tarde": "14:00",
            "saida_tarde": "18:00",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(ctx.balance(id).await, 5.0);
}

#[rstest]
#[case("date", json!("2024-02-31"))]
#[case("date", json!("tomorrow"))]
#[case("status", json!("OnLeave"))]
#[case("employee_id", json!("abc"))]
#[case("employee_id", json!(0))]
#[case("morning_in", json!("7h30"))]
#[case("status", json!(5))]
#[case("date", json!(20240502))]
#[case("afternoon_out", json!(18.0))]
#[tokio::test]
async fn test_invalid_submission_writes_nothing(#[case] field: &str, #[case] value: Value) {
    let ctx = TestContext::new();
    let id = ctx.register("Ana").await;

    let mut body = present_day(id, "2024-05-02", ["07:30", "12:00", "14:00", "18:00"]);
    body[field] = value;
    let response = ctx.submit(body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec![field]);

    assert!(ctx.store.list_attendance(id).await.unwrap().is_empty());
    let employee = ctx.store.get_employee(id).await.unwrap().unwrap();
    assert_eq!(employee.overtime_balance, dec!(0));
}

#[tokio::test]
async fn test_non_object_body_is_a_field_error() {
    let ctx = TestContext::new();

    let response = ctx.submit(json!(["Present"])).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec!["body"]);
}

#[tokio::test]
async fn test_malformed_history_id_is_a_field_error() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/attendance/abc").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json::<Value>()), vec!["path"]);
}

#[tokio::test]
async fn test_validation_happens_before_storage() {
    let mut store = MockStore::new();
    store.expect_record_attendance().times(0);

    let server = mock_server(store);
    let response = server
        .post("/attendance")
        .json(&json!({ "employee_id": 1, "date": "2024-13-40", "status": "Maybe" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_fields(&response.json::<Value>()),
        vec!["date", "status"]
    );
}

#[tokio::test]
async fn test_store_receives_computed_credit() {
    let mut store = MockStore::new();
    store
        .expect_record_attendance()
        .withf(|attendance, overtime| {
            attendance.employee_id == 7
                && attendance.morning_out == "12:30"
                && *overtime == dec!(15.00)
        })
        .times(1)
        .returning(|attendance, _| Ok(Some(attendance.into_record(31))));

    let server = mock_server(store);
    let response = server
        .post("/attendance")
        .json(&present_day(7, "2024-05-02", ["08:00", "12:30", "14:00", "19:00"]))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "id": 31, "overtime_credited": 15.0 })
    );
}

#[tokio::test]
async fn test_unknown_employee_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .submit(present_day(12, "2024-05-02", ["08:00", "12:00", "14:00", "18:00"]))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Resource not found: Employee 12" })
    );
    assert_eq!(
        ctx.server.get("/attendance/12").await.status_code(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_storage_failure_is_a_server_error() {
    let mut store = MockStore::new();
    store
        .expect_record_attendance()
        .returning(|_, _| Err(eyre::eyre!("connection reset")));

    let server = mock_server(store);
    let response = server
        .post("/attendance")
        .json(&absent_day(1, "2024-05-02"))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal server error" })
    );
}

#[tokio::test]
async fn test_history_lists_only_that_employee() {
    let ctx = TestContext::new();
    let ana = ctx.register("Ana").await;
    let bia = ctx.register("Bia").await;

    ctx.submit(absent_day(ana, "2024-05-01")).await;
    ctx.submit(absent_day(bia, "2024-05-01")).await;
    ctx.submit(absent_day(ana, "2024-05-01")).await;

    let records = ctx
        .server
        .get(&format!("/attendance/{}", ana))
        .await
        .json::<Value>();
    let ids: Vec<i64> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![1, 3]);
}
