//! Password reset tests

mod common;

use chrono::{Duration, Utc};
use common::{create_test_server, create_test_server_with_state, login, signup};
use edupress_app::AccountStore;
use serde_json::{json, Value};

/// Test: reset for an unknown email reports success but sends nothing
#[tokio::test]
async fn test_reset_unknown_email_succeeds() {
    let (server, email_sender) = create_test_server();

    let response = server
        .post("/api/reset_password")
        .json(&json!({ "email": "nobody@example.com" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(email_sender.sent_count(), 0);
}

/// Test: reset responses do not differ between known and unknown emails
#[tokio::test]
async fn test_reset_does_not_leak_account_existence() {
    let (server, _) = create_test_server();

    let known: Value = server
        .post("/api/reset_password")
        .json(&json!({ "email": "student@edupress.com" }))
        .await
        .json();
    let unknown: Value = server
        .post("/api/reset_password")
        .json(&json!({ "email": "ghost@edupress.com" }))
        .await
        .json();

    assert_eq!(known["success"], unknown["success"]);
    assert_eq!(known["notice"]["title"], unknown["notice"]["title"]);
}

/// Test: full reset flow changes the password
#[tokio::test]
async fn test_complete_reset_flow() {
    let (server, email_sender) = create_test_server();

    signup(&server, "Ada", "ada@example.com", "analytical", "student").await;
    server.post("/api/logout").await;

    server
        .post("/api/reset_password")
        .json(&json!({ "email": "ada@example.com" }))
        .await;
    let code = email_sender
        .get_code("ada@example.com")
        .expect("No reset code sent");

    let response = server
        .post("/api/complete_reset")
        .json(&json!({ "code": code, "password": "new-password" }))
        .await;
    assert_eq!(response.status_code(), 200);

    // Old password no longer works
    let response = server
        .post("/api/login")
        .json(&json!({ "email": "ada@example.com", "password": "analytical" }))
        .await;
    assert_eq!(response.status_code(), 401);

    login(&server, "ada@example.com", "new-password").await;
}

/// Test: a reset code works once
#[tokio::test]
async fn test_reset_code_single_use() {
    let (server, email_sender) = create_test_server();

    signup(&server, "Ada", "ada@example.com", "analytical", "student").await;
    server
        .post("/api/reset_password")
        .json(&json!({ "email": "ada@example.com" }))
        .await;
    let code = email_sender.get_code("ada@example.com").unwrap();

    let response = server
        .post("/api/complete_reset")
        .json(&json!({ "code": code, "password": "new-password" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let response = server
        .post("/api/complete_reset")
        .json(&json!({ "code": code, "password": "other-password" }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["reason"], "Invalid reset code");
}

/// Test: a bad code is rejected
#[tokio::test]
async fn test_complete_reset_bad_code() {
    let (server, _) = create_test_server();

    let response = server
        .post("/api/complete_reset")
        .json(&json!({ "code": "000000", "password": "new-password" }))
        .await;
    assert_eq!(response.status_code(), 400);
}

/// Test: the new password must satisfy the length rules
#[tokio::test]
async fn test_complete_reset_short_password() {
    let (server, email_sender) = create_test_server();

    server
        .post("/api/reset_password")
        .json(&json!({ "email": "teacher@edupress.com" }))
        .await;
    let code = email_sender.get_code("teacher@edupress.com").unwrap();

    let response = server
        .post("/api/complete_reset")
        .json(&json!({ "code": code, "password": "short" }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["reason"], "Password too short (minimum 8 characters)");
}

/// Test: a reset code older than 15 minutes is rejected and discarded
#[tokio::test]
async fn test_reset_code_expires() {
    let (server, email_sender, state) = create_test_server_with_state();

    signup(&server, "Ada", "ada@example.com", "analytical", "student").await;
    server.post("/api/logout").await;

    server
        .post("/api/reset_password")
        .json(&json!({ "email": "ada@example.com" }))
        .await;
    let code = email_sender
        .get_code("ada@example.com")
        .expect("No reset code sent");

    state
        .auth
        .accounts()
        .set_reset_created_at(&code, Utc::now() - Duration::minutes(16))
        .unwrap();

    let response = server
        .post("/api/complete_reset")
        .json(&json!({ "code": code, "password": "new-password" }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["reason"], "Reset code expired");

    // The expired code is gone
    assert!(!state.auth.accounts().has_pending_reset("ada@example.com").unwrap());
    let response = server
        .post("/api/complete_reset")
        .json(&json!({ "code": code, "password": "new-password" }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["reason"], "Invalid reset code");

    // The old password still works
    login(&server, "ada@example.com", "analytical").await;
}
