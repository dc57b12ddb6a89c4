// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use serde_json::json;

use super::helpers::{create_test_app, login_staff, register_student, seed_program, send};

#[tokio::test]
async fn test_letter_lifecycle() {
    let (state, app) = create_test_app();
    let program_id = seed_program(&state).await;
    let (student, _) =
        register_student(&app, &state, program_id, "dewi@campus.test", "2022001").await;
    let lecturer = login_staff(&app, &state, "budi@campus.test", "lecturer").await;

    let (status, body) = send(
        &app,
        "POST",
        "/letters",
        Some(&student),
        Some(json!({ "letter_type": "study_certificate", "purpose": "Visa application" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["status"], "pending");
    let letter_id = body["data"]["letter_id"].as_i64().unwrap();
    let uri = format!("/letters/{letter_id}");

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&lecturer),
        Some(json!({ "status": "completed", "note": "Ready for pickup" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");

    let (status, body) = send(&app, "GET", &uri, Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["note"], "Ready for pickup");

    let (status, _) = send(&app, "DELETE", &uri, Some(&lecturer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &uri, Some(&student), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_letter_stats_and_types() {
    let (state, app) = create_test_app();
    let program_id = seed_program(&state).await;
    let (student, _) =
        register_student(&app, &state, program_id, "dewi@campus.test", "2022001").await;
    let admin = login_staff(&app, &state, "admin@campus.test", "admin").await;
    send(
        &app,
        "POST",
        "/letters",
        Some(&student),
        Some(json!({ "letter_type": "other", "purpose": "Bank account" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/letters/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pending"], 1);
    assert_eq!(body["data"]["total"], 1);

    let (status, _) = send(&app, "GET", "/letters/stats", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", "/letters/types", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_unknown_letter_type_is_bad_request() {
    let (state, app) = create_test_app();
    let program_id = seed_program(&state).await;
    let (student, _) =
        register_student(&app, &state, program_id, "dewi@campus.test", "2022001").await;

    let (status, body) = send(
        &app,
        "POST",
        "/letters",
        Some(&student),
        Some(json!({ "letter_type": "transcript", "purpose": "Job" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
