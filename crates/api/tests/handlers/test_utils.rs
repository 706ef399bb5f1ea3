use std::sync::Arc;

use attendance_api::{ApiState, router};
use attendance_db::{AttendanceStore, memory::MemoryAttendanceStore, mock::MockStore};
use axum_test::TestServer;
use serde_json::{Value, json};

pub const CURRENCY: &str = "R$";

pub struct TestContext {
    pub store: Arc<MemoryAttendanceStore>,
    pub server: TestServer,
}

impl TestContext {
    /// A server over a fresh in-memory store.
    pub fn new() -> Self {
        let store = Arc::new(MemoryAttendanceStore::new());
        let server = build_server(store.clone());
        Self { store, server }
    }

    pub async fn register(&self, name: &str) -> i64 {
        let response = self
            .server
            .post("/employees")
            .json(&json!({ "name": name }))
            .await;
        response.json::<Value>()["id"].as_i64().unwrap()
    }

    pub async fn balance(&self, id: i64) -> f64 {
        let response = self.server.get(&format!("/employees/{}", id)).await;
        response.json::<Value>()["overtime_balance"].as_f64().unwrap()
    }

    pub async fn submit(&self, body: Value) -> axum_test::TestResponse {
        self.server.post("/attendance").json(&body).await
    }
}

pub fn build_server(store: Arc<dyn AttendanceStore>) -> TestServer {
    let state = Arc::new(ApiState::new(store, CURRENCY));
    TestServer::new(router(state)).unwrap()
}

/// A server whose store is the given mock; unexpected calls panic.
pub fn mock_server(store: MockStore) -> TestServer {
    build_server(Arc::new(store))
}

pub fn present_day(employee_id: i64, date: &str, times: [&str; 4]) -> Value {
    json!({
        "employee_id": employee_id,
        "date": date,
        "status": "Present",
        "morning_in": times[0],
        "morning_out": times[1],
        "afternoon_in": times[2],
        "afternoon_out": times[3],
    })
}

pub fn absent_day(employee_id: i64, date: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "date": date,
        "status": "Absent",
    })
}

pub fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect()
}
