mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{send, sqlite_state, verified_manager};
use restaurant_api::test_helpers::test_router;

#[tokio::test]
async fn register_verify_login_round_trip() {
    let app = test_router(sqlite_state().await);

    let (status, json) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Bola",
            "email": "bola@example.com",
            "password": "password123",
            "phone": "+234-802-0000",
            "role": "customer"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    let otp = json["data"].as_str().unwrap().to_string();
    assert_eq!(otp.len(), 4);
    assert!(otp.chars().all(|c| c.is_ascii_digit()));

    let (status, json) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "bola@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "Forbidden");

    let wrong = if otp == "0000" { "1111" } else { "0000" };
    let (status, json) = send(
        &app,
        "POST",
        "/auth/verify-email",
        None,
        Some(json!({ "email": "bola@example.com", "otp": wrong })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (status, json) = send(
        &app,
        "POST",
        "/auth/verify-email",
        None,
        Some(json!({ "email": "bola@example.com", "otp": otp })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["email_verified"], true);
    assert!(json["data"]["token"].as_str().is_some());
    assert!(json["data"].get("password").is_none());
    assert!(json["data"].get("email_verification_otp").is_none());

    let (status, json) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "bola@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = json["data"]["token"].as_str().unwrap().to_string();

    let (status, json) = send(&app, "GET", "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].get("token").is_none());
}

#[tokio::test]
async fn duplicate_email_and_bad_password_are_rejected() {
    let app = test_router(sqlite_state().await);
    verified_manager(&app, "chi@example.com").await;

    let (status, json) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Chi",
            "email": "chi@example.com",
            "password": "password123",
            "role": "manager"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "Conflict");

    let (status, json) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "chi@example.com", "password": "not-the-one" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Unauthorized");

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn register_validates_fields() {
    let app = test_router(sqlite_state().await);

    let (status, json) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Dayo",
            "email": "dayo@example.com",
            "password": "password123",
            "role": "chef"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "InvalidInput");

    let (status, json) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Dayo",
            "email": "dayo@example.com",
            "password": "short",
            "role": "customer"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}
