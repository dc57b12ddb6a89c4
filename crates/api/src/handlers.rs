// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Each handler validates its request, checks authorization, and calls
//! into persistence or the enrollment rule-checker. Handlers are
//! synchronous; the server owns locking and async.

use registrar::{EnrollmentOutcome, EnrollmentRequest};
use registrar_domain::{
    AcademicYear, CourseOffering, EnrollmentRecord, LetterStatus, LetterType, StudentRecord,
    format_clock_time, validate_person_name, validate_registration_number, validate_semester,
    weekday_name,
};
use registrar_persistence::{
    AccountData, EnrolledCourseData, EnrollmentHistoryData, LecturerData, LetterRequestData,
    LetterStatsData, NewStudentAccount, Persistence, StudentProfileData,
};
use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
use crate::credential_policy::CredentialPolicy;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AccountInfo, AuthResponse, CourseInfo, CreateLetterRequest, EnrollRequest, EnrollResponse,
    EnrolledCourseInfo, EnrolledCoursesQuery, EnrollmentHistoryInfo, EnrollmentInfo,
    LecturerInfo, LetterInfo, LetterStatsResponse, LetterTypeInfo, LoginRequest, MessageResponse,
    ProfileResponse, ProgramInfo, RegisterRequest, StudentInfo, UpdateLetterRequest,
    UpdateStudentRequest, WithdrawRequest, WithdrawResponse,
};

// ============================================================================
// Conversions
// ============================================================================

fn account_info(account: AccountData) -> AccountInfo {
    AccountInfo {
        account_id: account.account_id,
        email: account.email,
        role: account.role,
        is_active: account.is_active,
        created_at: account.created_at,
        last_login_at: account.last_login_at,
    }
}

fn student_info(profile: StudentProfileData) -> StudentInfo {
    StudentInfo {
        student_id: profile.student_id,
        account_id: profile.account_id,
        email: profile.email,
        registration_number: profile.registration_number,
        name: profile.name,
        semester: profile.semester,
        enrollment_year: profile.enrollment_year,
        status: profile.status.as_str().to_string(),
        phone: profile.phone,
        address: profile.address,
        program: ProgramInfo {
            program_id: profile.program_id,
            code: profile.program_code,
            name: profile.program_name,
            faculty: profile.faculty,
            degree_level: profile.degree_level.as_str().to_string(),
        },
    }
}

fn lecturer_info(lecturer: LecturerData) -> LecturerInfo {
    LecturerInfo {
        lecturer_id: lecturer.lecturer_id,
        employee_number: lecturer.employee_number,
        name: lecturer.name,
        program_id: lecturer.program_id,
        phone: lecturer.phone,
    }
}

fn course_info(course: CourseOffering) -> CourseInfo {
    CourseInfo {
        course_id: course.course_id,
        code: course.code,
        name: course.name,
        credits: course.credits,
        capacity: course.capacity,
        day: weekday_name(course.window.day()).to_string(),
        start_time: format_clock_time(course.window.start()),
        end_time: format_clock_time(course.window.end()),
        min_semester: course.min_semester,
        lecturer_id: course.lecturer_id,
        lecturer_name: course.lecturer_name,
    }
}

fn enrollment_info(enrollment: EnrollmentRecord) -> EnrollmentInfo {
    EnrollmentInfo {
        enrollment_id: enrollment.enrollment_id,
        student_id: enrollment.student_id,
        course_id: enrollment.course_id,
        academic_year: enrollment.academic_year.label(),
        semester: enrollment.semester,
        grade: enrollment.grade,
        created_at: enrollment.created_at,
    }
}

fn letter_info(letter: LetterRequestData) -> LetterInfo {
    let letter_type_label: String = letter
        .letter_type
        .parse::<LetterType>()
        .map_or_else(|_| letter.letter_type.clone(), |t| t.label().to_string());
    LetterInfo {
        letter_id: letter.letter_id,
        student_id: letter.student_id,
        student_name: letter.student_name,
        registration_number: letter.registration_number,
        letter_type: letter.letter_type,
        letter_type_label,
        purpose: letter.purpose,
        status: letter.status.as_str().to_string(),
        note: letter.note,
        updated_by: letter.updated_by,
        created_at: letter.created_at,
        updated_at: letter.updated_at,
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

fn require<'a, T: ?Sized>(value: Option<&'a T>, field: &str) -> Result<&'a T, ApiError> {
    value.ok_or_else(|| ApiError::invalid_input(field, format!("{field} is required")))
}

fn require_text<'a>(value: Option<&'a String>, field: &str) -> Result<&'a str, ApiError> {
    let text: &str = require(value, field)?.trim();
    if text.is_empty() {
        return Err(ApiError::invalid_input(
            field,
            format!("{field} cannot be empty"),
        ));
    }
    Ok(text)
}

fn parse_academic_year(value: &str) -> Result<AcademicYear, ApiError> {
    value.trim().parse().map_err(translate_domain_error)
}

/// Resolves the caller's own student record.
fn resolve_student(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<StudentRecord, ApiError> {
    persistence
        .find_student_by_account(actor.account_id)?
        .ok_or_else(|| {
            ApiError::not_found(
                "Student",
                format!("No student record for account {}", actor.account_id),
            )
        })
}

fn load_student_info(
    persistence: &mut Persistence,
    account_id: i64,
) -> Result<StudentInfo, ApiError> {
    persistence
        .get_student_profile(account_id)?
        .map(student_info)
        .ok_or_else(|| {
            ApiError::not_found(
                "Student",
                format!("No student record for account {account_id}"),
            )
        })
}

fn load_account(persistence: &mut Persistence, account_id: i64) -> Result<AccountData, ApiError> {
    persistence
        .get_account_by_id(account_id)?
        .ok_or_else(|| ApiError::not_found("Account", format!("Account {account_id} not found")))
}

// ============================================================================
// Authentication
// ============================================================================

/// Registers a student account and signs it in.
///
/// # Errors
///
/// Returns an error if a field is missing or malformed, the email or
/// registration number is taken, the program does not exist, or storage
/// fails.
pub fn register_student(
    persistence: &mut Persistence,
    request: &RegisterRequest,
    session_ttl: Duration,
) -> Result<AuthResponse, ApiError> {
    let email: &str = require_text(request.email.as_ref(), "email")?;
    let password: &str = require(request.password.as_deref(), "password")?;
    let name: &str = require_text(request.name.as_ref(), "name")?;
    let registration_number: &str =
        require_text(request.registration_number.as_ref(), "registration_number")?;
    let program_id: i64 = *require(request.program_id.as_ref(), "program_id")?;
    let enrollment_year: i64 = *require(request.enrollment_year.as_ref(), "enrollment_year")?;

    CredentialPolicy::default().validate(email, password)?;
    validate_person_name(name).map_err(translate_domain_error)?;
    validate_registration_number(registration_number).map_err(translate_domain_error)?;
    let semester: u8 =
        validate_semester(request.semester.unwrap_or(1)).map_err(translate_domain_error)?;
    let enrollment_year: u16 = u16::try_from(enrollment_year)
        .ok()
        .filter(|year| *year > 0)
        .ok_or_else(|| {
            ApiError::invalid_input(
                "enrollment_year",
                format!("{enrollment_year} is not a valid year"),
            )
        })?;

    let account_id: i64 = persistence.register_student(&NewStudentAccount {
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
        registration_number: registration_number.to_string(),
        program_id,
        enrollment_year,
        semester,
    })?;

    let token: String = AuthenticationService::issue_session(persistence, account_id, session_ttl)?;
    let account: AccountData = load_account(persistence, account_id)?;

    info!(account_id, "Student self-registered");
    Ok(AuthResponse {
        account: account_info(account),
        token,
    })
}

/// Logs in with email and password.
///
/// # Errors
///
/// Returns an error if a field is missing or the credentials are rejected.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
    session_ttl: Duration,
) -> Result<AuthResponse, ApiError> {
    let email: &str = require_text(request.email.as_ref(), "email")?;
    let password: &str = require(request.password.as_deref(), "password")?;
    if password.is_empty() {
        return Err(ApiError::invalid_input("password", "password is required"));
    }

    let (token, _actor, account): (String, AuthenticatedActor, AccountData) =
        AuthenticationService::login(persistence, email, password, session_ttl)?;

    Ok(AuthResponse {
        account: account_info(account),
        token,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(
    persistence: &mut Persistence,
    session_token: &str,
) -> Result<MessageResponse, ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(MessageResponse {
        message: String::from("Logged out"),
    })
}

/// Returns the caller's account with the record for their role.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the role record is missing.
pub fn get_profile(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ProfileResponse, ApiError> {
    let account: AccountData = load_account(persistence, actor.account_id)?;

    let (student, lecturer): (Option<StudentInfo>, Option<LecturerInfo>) = match actor.role {
        Role::Student => (Some(load_student_info(persistence, actor.account_id)?), None),
        Role::Lecturer => {
            let lecturer: LecturerData = persistence
                .find_lecturer_by_account(actor.account_id)?
                .ok_or_else(|| {
                    ApiError::not_found(
                        "Lecturer",
                        format!("No lecturer record for account {}", actor.account_id),
                    )
                })?;
            (None, Some(lecturer_info(lecturer)))
        }
        Role::Admin => (None, None),
    };

    Ok(ProfileResponse {
        account: account_info(account),
        student,
        lecturer,
    })
}

// ============================================================================
// Students
// ============================================================================

/// Returns the caller's own student record.
///
/// # Errors
///
/// Returns an error if the caller is not a student or has no record.
pub fn get_own_student(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<StudentInfo, ApiError> {
    AuthorizationService::authorize_course_registration(actor, "view_own_student")?;
    load_student_info(persistence, actor.account_id)
}

/// Returns a student record by account.
///
/// # Errors
///
/// Returns an error if the caller is neither an admin nor the owner, or
/// the record does not exist.
pub fn get_student(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    account_id: i64,
) -> Result<StudentInfo, ApiError> {
    AuthorizationService::authorize_student_record(actor, account_id, "view_student")?;
    load_student_info(persistence, account_id)
}

/// Updates a student's name and semester.
///
/// # Errors
///
/// Returns an error if the caller is neither an admin nor the owner, a
/// field is invalid, or the record does not exist.
pub fn update_student(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    account_id: i64,
    request: &UpdateStudentRequest,
) -> Result<StudentInfo, ApiError> {
    AuthorizationService::authorize_student_record(actor, account_id, "update_student")?;

    let name: &str = require_text(request.name.as_ref(), "name")?;
    validate_person_name(name).map_err(translate_domain_error)?;
    let semester: i64 = *require(request.semester.as_ref(), "semester")?;
    let semester: u8 = validate_semester(semester).map_err(translate_domain_error)?;

    let changed: usize = persistence.update_student(account_id, name, semester)?;
    if changed == 0 {
        return Err(ApiError::not_found(
            "Student",
            format!("No student record for account {account_id}"),
        ));
    }

    info!(account_id, updated_by = actor.account_id, "Student record updated");
    load_student_info(persistence, account_id)
}

// ============================================================================
// Course registration
// ============================================================================

/// Lists the course offerings of the caller's program.
///
/// # Errors
///
/// Returns an error if the caller is not a student or storage fails.
pub fn list_courses(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<CourseInfo>, ApiError> {
    AuthorizationService::authorize_course_registration(actor, "list_courses")?;
    let student: StudentRecord = resolve_student(persistence, actor)?;

    Ok(persistence
        .list_courses_for_program(student.program_id)?
        .into_iter()
        .map(course_info)
        .collect())
}

/// Lists the caller's enrollments, optionally filtered by academic year
/// and semester.
///
/// # Errors
///
/// Returns an error if the caller is not a student, a filter is malformed,
/// or storage fails.
pub fn list_enrolled_courses(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &EnrolledCoursesQuery,
) -> Result<Vec<EnrolledCourseInfo>, ApiError> {
    AuthorizationService::authorize_course_registration(actor, "list_enrolled_courses")?;

    let academic_year: Option<AcademicYear> = query
        .academic_year
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(parse_academic_year)
        .transpose()?;
    let semester: Option<u8> = query
        .semester
        .map(validate_semester)
        .transpose()
        .map_err(translate_domain_error)?;

    let student: StudentRecord = resolve_student(persistence, actor)?;
    let rows: Vec<EnrolledCourseData> = persistence.list_enrollments_for_student(
        student.student_id,
        academic_year.as_ref(),
        semester,
    )?;

    Ok(rows
        .into_iter()
        .map(|row| EnrolledCourseInfo {
            enrollment: enrollment_info(row.enrollment),
            course: course_info(row.course),
        })
        .collect())
}

/// Lists the caller's enrollment audit entries, newest first.
///
/// # Errors
///
/// Returns an error if the caller is not a student or storage fails.
pub fn get_enrollment_history(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<EnrollmentHistoryInfo>, ApiError> {
    AuthorizationService::authorize_course_registration(actor, "enrollment_history")?;
    let student: StudentRecord = resolve_student(persistence, actor)?;
    let rows: Vec<EnrollmentHistoryData> = persistence.list_audit_for_student(student.student_id)?;

    rows.into_iter()
        .map(|row| -> Result<EnrollmentHistoryInfo, ApiError> {
            let recorded_at: String =
                row.entry
                    .recorded_at
                    .format(&Iso8601::DEFAULT)
                    .map_err(|e| ApiError::Internal {
                        message: format!("Failed to format audit timestamp: {e}"),
                    })?;
            Ok(EnrollmentHistoryInfo {
                audit_id: row.entry.audit_id,
                course_id: row.entry.course_id,
                course_code: row.course_code,
                course_name: row.course_name,
                action: row.entry.action.as_str().to_string(),
                actor_id: row.entry.actor.id,
                actor_type: row.entry.actor.actor_type,
                recorded_at,
            })
        })
        .collect()
}

/// Adds a course for the calling student.
///
/// # Errors
///
/// Returns `InvalidInput` for missing fields, the first failed
/// registration rule (as a rule violation or conflict), `ResourceNotFound`
/// for an unknown student or course, or `Internal` if storage fails.
pub fn enroll(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &EnrollRequest,
    now: OffsetDateTime,
) -> Result<EnrollResponse, ApiError> {
    AuthorizationService::authorize_course_registration(actor, "enroll")?;

    let course_id: i64 = *require(request.course_id.as_ref(), "course_id")?;
    let academic_year: AcademicYear =
        parse_academic_year(require_text(request.academic_year.as_ref(), "academic_year")?)?;

    let outcome: EnrollmentOutcome = persistence
        .enroll(
            &EnrollmentRequest {
                account_id: actor.account_id,
                course_id,
                academic_year,
                actor: actor.to_audit_actor(),
            },
            now,
        )
        .map_err(translate_core_error)?;

    let message: String = format!(
        "Enrolled in {} for academic year {}",
        outcome.course.code, outcome.enrollment.academic_year
    );
    Ok(EnrollResponse {
        enrollment: enrollment_info(outcome.enrollment),
        course: course_info(outcome.course),
        message,
    })
}

/// Drops a course for the calling student.
///
/// The `student_id` in the request must be the caller's own.
///
/// # Errors
///
/// Returns `InvalidInput` for missing fields, `Unauthorized` when
/// `student_id` is someone else's, or `ResourceNotFound` if no enrollment
/// matched.
pub fn withdraw(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &WithdrawRequest,
) -> Result<WithdrawResponse, ApiError> {
    AuthorizationService::authorize_course_registration(actor, "withdraw")?;

    let student_id: i64 = *require(request.student_id.as_ref(), "student_id")?;
    let course_id: i64 = *require(request.course_id.as_ref(), "course_id")?;

    let student: StudentRecord = resolve_student(persistence, actor)?;
    if student.student_id != student_id {
        return Err(ApiError::Unauthorized {
            action: String::from("withdraw"),
            required_role: String::from("the owning student"),
        });
    }

    let removed: usize = persistence
        .withdraw(student_id, course_id)
        .map_err(translate_core_error)?;

    info!(student_id, course_id, removed, "Enrollment withdrawn");
    Ok(WithdrawResponse {
        removed,
        message: String::from("Course dropped"),
    })
}

// ============================================================================
// Letter requests
// ============================================================================

/// Students only see their own requests; staff see everything.
fn letter_scope(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Option<i64>, ApiError> {
    match actor.role {
        Role::Student => Ok(Some(resolve_student(persistence, actor)?.student_id)),
        Role::Lecturer | Role::Admin => Ok(None),
    }
}

fn letter_not_found(letter_id: i64) -> ApiError {
    ApiError::not_found("Letter request", format!("Letter request {letter_id} not found"))
}

fn load_letter(
    persistence: &mut Persistence,
    letter_id: i64,
    scope: Option<i64>,
) -> Result<LetterInfo, ApiError> {
    persistence
        .get_letter(letter_id, scope)?
        .map(letter_info)
        .ok_or_else(|| letter_not_found(letter_id))
}

/// Lists letter requests visible to the caller, newest first.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn list_letters(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<LetterInfo>, ApiError> {
    let scope: Option<i64> = letter_scope(persistence, actor)?;
    Ok(persistence
        .list_letters(scope)?
        .into_iter()
        .map(letter_info)
        .collect())
}

/// Retrieves one letter request visible to the caller.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the request does not exist or is not
/// visible to the caller.
pub fn get_letter(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    letter_id: i64,
) -> Result<LetterInfo, ApiError> {
    let scope: Option<i64> = letter_scope(persistence, actor)?;
    load_letter(persistence, letter_id, scope)
}

/// Files a letter request for the calling student.
///
/// # Errors
///
/// Returns an error if the caller is not a student, a field is missing,
/// or the letter type is unknown.
pub fn create_letter(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateLetterRequest,
) -> Result<LetterInfo, ApiError> {
    AuthorizationService::authorize_create_letter(actor)?;

    let letter_type: LetterType = require_text(request.letter_type.as_ref(), "letter_type")?
        .parse()
        .map_err(translate_domain_error)?;
    let purpose: &str = require_text(request.purpose.as_ref(), "purpose")?;

    let student: StudentRecord = resolve_student(persistence, actor)?;
    let letter_id: i64 = persistence.create_letter(student.student_id, letter_type, purpose)?;

    info!(letter_id, student_id = student.student_id, "Letter request filed");
    load_letter(persistence, letter_id, Some(student.student_id))
}

/// Updates a letter request.
///
/// A student may rewrite the purpose of their own pending request. Staff
/// set the status and an optional note.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no editable request matched, or
/// `InvalidInput` for a missing field or unknown status.
pub fn update_letter(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    letter_id: i64,
    request: &UpdateLetterRequest,
) -> Result<LetterInfo, ApiError> {
    let changed: usize = match actor.role {
        Role::Student => {
            let purpose: &str = require_text(request.purpose.as_ref(), "purpose")?;
            let student: StudentRecord = resolve_student(persistence, actor)?;
            persistence.update_letter_purpose(letter_id, student.student_id, purpose)?
        }
        Role::Lecturer | Role::Admin => {
            AuthorizationService::authorize_process_letters(actor, "update_letter_status")?;
            let status: LetterStatus = require_text(request.status.as_ref(), "status")?
                .parse()
                .map_err(translate_domain_error)?;
            let note: Option<&str> = request
                .note
                .as_deref()
                .map(str::trim)
                .filter(|note| !note.is_empty());
            persistence.update_letter_status(letter_id, status, note, actor.account_id)?
        }
    };

    if changed == 0 {
        return Err(letter_not_found(letter_id));
    }

    let scope: Option<i64> = letter_scope(persistence, actor)?;
    load_letter(persistence, letter_id, scope)
}

/// Deletes a letter request.
///
/// # Errors
///
/// Returns `Unauthorized` for lecturers, or `ResourceNotFound` if no
/// deletable request matched.
pub fn delete_letter(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    letter_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::authorize_delete_letter(actor)?;

    let scope: Option<i64> = letter_scope(persistence, actor)?;
    let removed: usize = persistence.delete_letter(letter_id, scope)?;
    if removed == 0 {
        return Err(letter_not_found(letter_id));
    }

    Ok(MessageResponse {
        message: String::from("Letter request deleted"),
    })
}

/// Counts letter requests per status.
///
/// # Errors
///
/// Returns an error if the caller is a student or storage fails.
pub fn letter_stats(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<LetterStatsResponse, ApiError> {
    AuthorizationService::authorize_process_letters(actor, "letter_stats")?;
    let stats: LetterStatsData = persistence.letter_stats()?;

    Ok(LetterStatsResponse {
        pending: stats.pending,
        processing: stats.processing,
        completed: stats.completed,
        rejected: stats.rejected,
        total: stats.total(),
    })
}

/// The static list of letter types.
#[must_use]
pub fn letter_types() -> Vec<LetterTypeInfo> {
    LetterType::ALL
        .iter()
        .map(|letter_type| LetterTypeInfo {
            id: letter_type.id().to_string(),
            label: letter_type.label().to_string(),
        })
        .collect()
}
