// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use registrar_domain::{DegreeLevel, WeeklyWindow};
use registrar_persistence::{NewCourse, Persistence};
use serde_json::{Value, json};
use time::Duration;
use tower::ServiceExt;

use crate::{AppState, build_router};

pub const TEST_PASSWORD: &str = "hunter22";

/// Creates test app state with in-memory persistence.
pub fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(persistence, Duration::hours(24))
}

pub fn create_test_app() -> (AppState, Router) {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state.clone());
    (app_state, app)
}

pub async fn seed_program(app_state: &AppState) -> i64 {
    app_state
        .persistence
        .lock()
        .await
        .create_program("IF", "Informatics", "Engineering", DegreeLevel::S1)
        .unwrap()
}

pub async fn seed_course(
    app_state: &AppState,
    program_id: i64,
    code: &str,
    credits: u32,
    capacity: u32,
    window: (&str, &str, &str),
) -> i64 {
    app_state
        .persistence
        .lock()
        .await
        .create_course(&NewCourse {
            code: code.to_string(),
            name: format!("Course {code}"),
            credits,
            program_id,
            lecturer_id: None,
            capacity,
            window: WeeklyWindow::parse(window.0, window.1, window.2).unwrap(),
            min_semester: 1,
        })
        .unwrap()
}

/// Sends a request and returns the status with the decoded JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, value)
}

/// Registers a student through the API and returns `(token, student_id)`.
pub async fn register_student(
    app: &Router,
    app_state: &AppState,
    program_id: i64,
    email: &str,
    registration_number: &str,
) -> (String, i64) {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": TEST_PASSWORD,
            "name": "Dewi Lestari",
            "registration_number": registration_number,
            "program_id": program_id,
            "enrollment_year": 2022,
            "semester": 3,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let token: String = body["data"]["token"].as_str().unwrap().to_string();
    let account_id: i64 = body["data"]["account"]["account_id"].as_i64().unwrap();
    let student_id: i64 = app_state
        .persistence
        .lock()
        .await
        .find_student_by_account(account_id)
        .unwrap()
        .unwrap()
        .student_id;
    (token, student_id)
}

/// Creates a staff account directly and logs in through the API.
pub async fn login_staff(app: &Router, app_state: &AppState, email: &str, role: &str) -> String {
    {
        let mut persistence = app_state.persistence.lock().await;
        let account_id: i64 = persistence
            .create_account(email, TEST_PASSWORD, role)
            .unwrap();
        if role == "lecturer" {
            persistence
                .create_lecturer(Some(account_id), "L-001", "Budi Santoso", None)
                .unwrap();
        }
    }

    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

pub fn enroll_body(course_id: i64) -> Value {
    json!({ "course_id": course_id, "academic_year": "2023/2024" })
}

pub async fn enroll(app: &Router, token: &str, course_id: i64) -> (StatusCode, Value) {
    send(app, "POST", "/courses/enroll", Some(token), Some(enroll_body(course_id))).await
}
