// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::helpers::{
    TEST_PASSWORD, create_test_app, login_staff, register_student, seed_program, send,
};

#[tokio::test]
async fn test_register_then_profile() {
    let (state, app) = create_test_app();
    let program_id = seed_program(&state).await;
    let (token, student_id) =
        register_student(&app, &state, program_id, "dewi@campus.test", "2022001").await;

    let (status, body) = send(&app, "GET", "/auth/profile", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["account"]["role"], "student");
    assert_eq!(body["data"]["student"]["student_id"], student_id);
    assert_eq!(body["data"]["student"]["program"]["code"], "IF");
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let (state, app) = create_test_app();
    let program_id = seed_program(&state).await;
    register_student(&app, &state, program_id, "dewi@campus.test", "2022001").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "email": "DEWI@campus.test",
            "password": TEST_PASSWORD,
            "name": "Dewi Lestari",
            "registration_number": "2022009",
            "program_id": program_id,
            "enrollment_year": 2022,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["rule"], "duplicate-email");
}

#[tokio::test]
async fn test_register_missing_field_is_bad_request() {
    let (state, app) = create_test_app();
    let program_id = seed_program(&state).await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "email": "dewi@campus.test", "program_id": program_id })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body.get("rule").is_none());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request_envelope() {
    let (_state, app) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let (state, app) = create_test_app();
    let program_id = seed_program(&state).await;
    register_student(&app, &state, program_id, "dewi@campus.test", "2022001").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "dewi@campus.test", "password": "nope-nope" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_protected_route_requires_bearer_token() {
    let (_state, app) = create_test_app();

    let (status, body) = send(&app, "GET", "/auth/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _body) = send(&app, "GET", "/auth/profile", Some("forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let (state, app) = create_test_app();
    let program_id = seed_program(&state).await;
    let (token, _student_id) =
        register_student(&app, &state, program_id, "dewi@campus.test", "2022001").await;

    let (status, _body) = send(&app, "POST", "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _body) = send(&app, "GET", "/auth/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_student_record_access() {
    let (state, app) = create_test_app();
    let program_id = seed_program(&state).await;
    let (dewi_token, _) =
        register_student(&app, &state, program_id, "dewi@campus.test", "2022001").await;
    let (rina_token, _) =
        register_student(&app, &state, program_id, "rina@campus.test", "2022002").await;
    let admin_token = login_staff(&app, &state, "admin@campus.test", "admin").await;

    let (status, me) = send(&app, "GET", "/students/me", Some(&dewi_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let dewi_account = me["data"]["account_id"].as_i64().unwrap();
    let uri = format!("/students/{dewi_account}");

    let (status, _) = send(&app, "GET", &uri, Some(&rina_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&admin_token),
        Some(json!({ "name": "Dewi Ayu", "semester": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["semester"], 4);

    let (status, _) = send(&app, "GET", "/students/not-a-number", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
