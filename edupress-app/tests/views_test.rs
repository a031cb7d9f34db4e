//! Role-gated view tests

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{create_app, create_test_server, login, MockEmailSender};
use edupress_app::OfflineBackend;
use serde_json::Value;
use tower::ServiceExt;

/// Test: public views render without a session
#[tokio::test]
async fn test_public_views_allowed() {
    let (server, _) = create_test_server();

    for slug in ["home", "courses", "course-detail", "login", "signup", "forgot-password"] {
        let response = server.get(&format!("/views/{slug}")).await;
        assert_eq!(response.status_code(), 200, "view {slug}");
        let body: Value = response.json();
        assert_eq!(body["allowed"], true);
    }
}

/// Test: unknown view is 404
#[tokio::test]
async fn test_unknown_view() {
    let (server, _) = create_test_server();

    let response = server.get("/views/secret-lair").await;
    assert_eq!(response.status_code(), 404);
}

/// Test: gated views redirect to login without a session, remembering the origin
#[tokio::test]
async fn test_gated_view_redirects_to_login() {
    let app = create_app(OfflineBackend, MockEmailSender::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/views/teacher-dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/login?from=/teacher/dashboard"
    );
}

/// Test: teacher-only view, unauthenticated then as a student
#[tokio::test]
async fn test_teacher_view_scenario() {
    let (server, _) = create_test_server();

    let response = server.get("/views/teacher-dashboard").await;
    assert_eq!(response.status_code(), 303);
    let body: Value = response.json();
    assert_eq!(body["redirect"], "login");
    assert_eq!(body["from"], "/teacher/dashboard");

    login(&server, "student@edupress.com", "pw").await;

    let response = server.get("/views/teacher-dashboard").await;
    assert_eq!(response.status_code(), 303);
    let body: Value = response.json();
    assert_eq!(body["allowed"], false);
    assert_eq!(body["redirect"], "student-dashboard");
    assert!(body.get("from").is_none());
}

/// Test: each role reaches its own home view
#[tokio::test]
async fn test_role_homes_allowed() {
    let (server, _) = create_test_server();

    for (email, slug) in [
        ("student@edupress.com", "student-dashboard"),
        ("teacher@edupress.com", "teacher-dashboard"),
        ("admin@edupress.com", "admin-dashboard"),
    ] {
        login(&server, email, "pw").await;
        let response = server.get(&format!("/views/{slug}")).await;
        assert_eq!(response.status_code(), 200, "{email} -> {slug}");
    }
}

/// Test: admins may use teacher views, teachers may not use admin views
#[tokio::test]
async fn test_staff_views() {
    let (server, _) = create_test_server();

    login(&server, "admin@edupress.com", "pw").await;
    let response = server.get("/views/create-course").await;
    assert_eq!(response.status_code(), 200);

    login(&server, "teacher@edupress.com", "pw").await;
    let response = server.get("/views/admin-users").await;
    assert_eq!(response.status_code(), 303);
    let body: Value = response.json();
    assert_eq!(body["redirect"], "teacher-dashboard");
}

/// Test: lessons and quizzes are open to every signed-in role
#[tokio::test]
async fn test_lesson_view_for_any_role() {
    let (server, _) = create_test_server();

    for email in ["student@edupress.com", "teacher@edupress.com", "admin@edupress.com"] {
        login(&server, email, "pw").await;
        assert_eq!(server.get("/views/lesson-view").await.status_code(), 200);
        assert_eq!(server.get("/views/take-quiz").await.status_code(), 200);
    }
}

/// Test: after logout gated views redirect to login again
#[tokio::test]
async fn test_logout_then_gated_view() {
    let (server, _) = create_test_server();

    login(&server, "student@edupress.com", "pw").await;
    assert_eq!(server.get("/views/student-dashboard").await.status_code(), 200);

    server.post("/api/logout").await;
    let response = server.get("/views/student-dashboard").await;
    assert_eq!(response.status_code(), 303);
    let body: Value = response.json();
    assert_eq!(body["redirect"], "login");
}
