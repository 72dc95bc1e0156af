#![allow(dead_code)]

use api::{ApiConfig, Queries};
use serde_json::{json, Value};
use store::{MemoryStore, Session, SessionContext, User};
use wiremock::MockServer;

pub const TOKEN: &str = "token-123";

pub fn user_json() -> Value {
    json!({
        "id": "u-1",
        "username": "alice",
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-01T00:00:00Z"
    })
}

pub fn user() -> User {
    serde_json::from_value(user_json()).unwrap()
}

pub fn task_json(id: &str, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "status": status,
        "dueDate": null,
        "createdBy": "u-1",
        "createdAt": "2026-10-01T09:00:00Z",
        "updatedAt": "2026-10-01T09:00:00Z"
    })
}

pub fn page_json(tasks: Vec<Value>) -> Value {
    let total = tasks.len();
    json!({
        "message": "Tasks retrieved",
        "data": {
            "tasks": tasks,
            "total": total,
            "page": 1,
            "limit": 10,
            "totalPages": 1
        }
    })
}

pub fn stats_json(not_started: u64, done: u64) -> Value {
    json!({
        "message": "Stats retrieved",
        "data": {
            "total": not_started + done,
            "overdue": 0,
            "byStatus": { "not_started": not_started, "done": done }
        }
    })
}

pub fn envelope(data: Value) -> Value {
    json!({ "message": "ok", "data": data })
}

pub fn anonymous() -> SessionContext {
    SessionContext::new(MemoryStore::new())
}

pub fn signed_in() -> SessionContext {
    let session = anonymous();
    session.begin(Session {
        access_token: TOKEN.to_string(),
        user: user(),
    });
    session
}

pub fn queries(server: &MockServer, session: SessionContext) -> Queries {
    Queries::new(ApiConfig::new(&server.uri()).unwrap(), session)
}
