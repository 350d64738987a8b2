#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

use restaurant_api::{
    config::DatabaseConfig,
    db::connection,
    routes::API_PREFIX,
    state::AppState,
    test_helpers::test_state,
};

pub const SECRET: &str = "test-secret";

pub fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

/// A fresh in-memory SQLite database with the schema synced.
pub async fn sqlite_state() -> Arc<AppState> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_idle: 1,
    };
    let db = connection::connect(&cfg).await.expect("connect sqlite");
    test_state(db, SECRET)
}

pub async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(api_path(path));
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let res = app.clone().oneshot(request).await.unwrap();
    let status = res.status();
    let bytes = body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Registers and verifies a manager; returns its id and bearer token.
pub async fn verified_manager(app: &Router, email: &str) -> (i64, String) {
    verified_user(app, email, "manager").await
}

pub async fn verified_user(app: &Router, email: &str, role: &str) -> (i64, String) {
    let (status, json) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(serde_json::json!({
            "name": "Ada",
            "email": email,
            "password": "password123",
            "phone": "+234-801-0000",
            "role": role
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    let otp = json["data"].as_str().unwrap().to_string();

    let (status, json) = send(
        app,
        "POST",
        "/auth/verify-email",
        None,
        Some(serde_json::json!({ "email": email, "otp": otp })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    (
        json["data"]["id"].as_i64().unwrap(),
        json["data"]["token"].as_str().unwrap().to_string(),
    )
}
