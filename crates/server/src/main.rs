// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod seed;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use registrar_api::{
    ApiError, AuthResponse, CourseInfo, CreateLetterRequest, EnrollRequest, EnrollResponse,
    EnrolledCourseInfo, EnrolledCoursesQuery, EnrollmentHistoryInfo, LetterInfo,
    LetterStatsResponse, LetterTypeInfo, LoginRequest, MessageResponse, ProfileResponse,
    RegisterRequest, StudentInfo, UpdateLetterRequest, UpdateStudentRequest, WithdrawRequest,
    WithdrawResponse,
};
use registrar_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::session::SessionAccount;

/// Registrar Server - HTTP server for university course registration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "REGISTRAR_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "REGISTRAR_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Lifetime of a bearer token, in hours
    #[arg(long, env = "REGISTRAR_SESSION_HOURS", default_value_t = 24)]
    session_hours: u16,

    /// Seed a demo catalog when the database has no programs
    #[arg(long, env = "REGISTRAR_SEED_DEMO")]
    seed_demo: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Lifetime of newly issued sessions.
    pub session_ttl: Duration,
}

impl AppState {
    fn new(persistence: Persistence, session_ttl: Duration) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            session_ttl,
        }
    }
}

// ============================================================================
// Response envelope
// ============================================================================

/// Success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    /// Always `true`.
    pub success: bool,
    /// The payload.
    pub data: T,
}

/// Error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error message.
    pub error: String,
    /// Rule tag for rule violations and conflicts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

type ApiJson<T> = Json<SuccessResponse<T>>;

const fn success<T>(data: T) -> ApiJson<T> {
    Json(SuccessResponse {
        success: true,
        data,
    })
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
    /// Rule tag, if any.
    pub rule: Option<String>,
}

impl HttpError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            rule: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            error: self.message,
            rule: self.rule,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let rule: Option<String> = err.rule().map(str::to_string);
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. }
            | ApiError::InvalidInput { .. }
            | ApiError::CredentialPolicyViolation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };
        Self {
            status,
            message: err.to_string(),
            rule,
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected request body");
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// `OK` when healthy.
    status: String,
}

// ============================================================================
// Authentication
// ============================================================================

/// Handler for POST `/auth/register`.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, ApiJson<AuthResponse>), HttpError> {
    let Json(req) = payload?;
    info!(email = ?req.email, "Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AuthResponse =
        registrar_api::register_student(&mut persistence, &req, app_state.session_ttl)?;
    drop(persistence);

    Ok((StatusCode::CREATED, success(response)))
}

/// Handler for POST `/auth/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiJson<AuthResponse>, HttpError> {
    let Json(req) = payload?;
    info!(email = ?req.email, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AuthResponse =
        registrar_api::login(&mut persistence, &req, app_state.session_ttl)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for POST `/auth/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, token): SessionAccount,
) -> Result<ApiJson<MessageResponse>, HttpError> {
    info!(account_id = actor.account_id, "Handling logout request");

    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = registrar_api::logout(&mut persistence, &token)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for GET `/auth/profile`.
async fn handle_profile(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
) -> Result<ApiJson<ProfileResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ProfileResponse = registrar_api::get_profile(&mut persistence, &actor)?;
    drop(persistence);

    Ok(success(response))
}

// ============================================================================
// Students
// ============================================================================

/// Handler for GET `/students/me`.
async fn handle_get_own_student(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
) -> Result<ApiJson<StudentInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: StudentInfo = registrar_api::get_own_student(&mut persistence, &actor)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for GET `/students/{account_id}`.
async fn handle_get_student(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiJson<StudentInfo>, HttpError> {
    let Path(account_id) = path?;

    let mut persistence = app_state.persistence.lock().await;
    let response: StudentInfo = registrar_api::get_student(&mut persistence, &actor, account_id)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for PUT `/students/{account_id}`.
async fn handle_update_student(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateStudentRequest>, JsonRejection>,
) -> Result<ApiJson<StudentInfo>, HttpError> {
    let Path(account_id) = path?;
    let Json(req) = payload?;
    info!(
        account_id,
        updated_by = actor.account_id,
        "Handling update_student request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: StudentInfo =
        registrar_api::update_student(&mut persistence, &actor, account_id, &req)?;
    drop(persistence);

    Ok(success(response))
}

// ============================================================================
// Course registration
// ============================================================================

/// Handler for GET `/courses`.
async fn handle_list_courses(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
) -> Result<ApiJson<Vec<CourseInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<CourseInfo> = registrar_api::list_courses(&mut persistence, &actor)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for GET `/courses/enrolled`.
async fn handle_list_enrolled(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
    query: Result<Query<EnrolledCoursesQuery>, QueryRejection>,
) -> Result<ApiJson<Vec<EnrolledCourseInfo>>, HttpError> {
    let Query(query) = query?;

    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<EnrolledCourseInfo> =
        registrar_api::list_enrolled_courses(&mut persistence, &actor, &query)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for GET `/courses/enroll/history`.
async fn handle_enrollment_history(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
) -> Result<ApiJson<Vec<EnrollmentHistoryInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<EnrollmentHistoryInfo> =
        registrar_api::get_enrollment_history(&mut persistence, &actor)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for POST `/courses/enroll`.
///
/// Runs the registration rules and records the enrollment.
async fn handle_enroll(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
    payload: Result<Json<EnrollRequest>, JsonRejection>,
) -> Result<(StatusCode, ApiJson<EnrollResponse>), HttpError> {
    let Json(req) = payload?;
    info!(
        account_id = actor.account_id,
        course_id = ?req.course_id,
        academic_year = ?req.academic_year,
        "Handling enroll request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: EnrollResponse =
        registrar_api::enroll(&mut persistence, &actor, &req, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok((StatusCode::CREATED, success(response)))
}

/// Handler for DELETE `/courses/enroll`.
async fn handle_withdraw(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
    payload: Result<Json<WithdrawRequest>, JsonRejection>,
) -> Result<ApiJson<WithdrawResponse>, HttpError> {
    let Json(req) = payload?;
    info!(
        account_id = actor.account_id,
        student_id = ?req.student_id,
        course_id = ?req.course_id,
        "Handling withdraw request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: WithdrawResponse = registrar_api::withdraw(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(success(response))
}

// ============================================================================
// Letter requests
// ============================================================================

/// Handler for GET `/letters`.
async fn handle_list_letters(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
) -> Result<ApiJson<Vec<LetterInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<LetterInfo> = registrar_api::list_letters(&mut persistence, &actor)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for POST `/letters`.
async fn handle_create_letter(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
    payload: Result<Json<CreateLetterRequest>, JsonRejection>,
) -> Result<(StatusCode, ApiJson<LetterInfo>), HttpError> {
    let Json(req) = payload?;

    let mut persistence = app_state.persistence.lock().await;
    let letter: LetterInfo = registrar_api::create_letter(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, success(letter)))
}

/// Handler for GET `/letters/{letter_id}`.
async fn handle_get_letter(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiJson<LetterInfo>, HttpError> {
    let Path(letter_id) = path?;

    let mut persistence = app_state.persistence.lock().await;
    let response: LetterInfo = registrar_api::get_letter(&mut persistence, &actor, letter_id)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for PUT `/letters/{letter_id}`.
async fn handle_update_letter(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateLetterRequest>, JsonRejection>,
) -> Result<ApiJson<LetterInfo>, HttpError> {
    let Path(letter_id) = path?;
    let Json(req) = payload?;
    info!(
        letter_id,
        account_id = actor.account_id,
        status = ?req.status,
        "Handling update_letter request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: LetterInfo =
        registrar_api::update_letter(&mut persistence, &actor, letter_id, &req)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for DELETE `/letters/{letter_id}`.
async fn handle_delete_letter(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiJson<MessageResponse>, HttpError> {
    let Path(letter_id) = path?;
    info!(letter_id, account_id = actor.account_id, "Handling delete_letter request");

    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse =
        registrar_api::delete_letter(&mut persistence, &actor, letter_id)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for GET `/letters/stats`.
async fn handle_letter_stats(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _token): SessionAccount,
) -> Result<ApiJson<LetterStatsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LetterStatsResponse = registrar_api::letter_stats(&mut persistence, &actor)?;
    drop(persistence);

    Ok(success(response))
}

/// Handler for GET `/letters/types`.
async fn handle_letter_types(
    SessionAccount(_actor, _token): SessionAccount,
) -> ApiJson<Vec<LetterTypeInfo>> {
    success(registrar_api::letter_types())
}

// ============================================================================
// Operational
// ============================================================================

/// Handler for GET `/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("OK"),
    })
}

/// Handler for GET `/health/db`.
async fn handle_health_db(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<HealthResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    persistence.ping()?;
    drop(persistence);

    Ok(Json(HealthResponse {
        status: String::from("OK"),
    }))
}

async fn handle_not_found() -> HttpError {
    HttpError::new(StatusCode::NOT_FOUND, "Route not found")
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/health/db", get(handle_health_db))
        .route("/auth/register", post(handle_register))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/profile", get(handle_profile))
        .route("/students/me", get(handle_get_own_student))
        .route(
            "/students/{account_id}",
            get(handle_get_student).put(handle_update_student),
        )
        .route("/courses", get(handle_list_courses))
        .route("/courses/enrolled", get(handle_list_enrolled))
        .route(
            "/courses/enroll",
            post(handle_enroll).delete(handle_withdraw),
        )
        .route("/courses/enroll/history", get(handle_enrollment_history))
        .route(
            "/letters",
            get(handle_list_letters).post(handle_create_letter),
        )
        .route("/letters/stats", get(handle_letter_stats))
        .route("/letters/types", get(handle_letter_types))
        .route(
            "/letters/{letter_id}",
            get(handle_get_letter)
                .put(handle_update_letter)
                .delete(handle_delete_letter),
        )
        .fallback(handle_not_found)
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Registrar Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.verify_foreign_key_enforcement()?;

    if args.seed_demo {
        seed::seed_demo_catalog(&mut persistence)?;
    }

    let app_state: AppState = AppState::new(
        persistence,
        Duration::hours(i64::from(args.session_hours)),
    );

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
