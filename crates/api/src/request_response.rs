// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Request fields the API requires are still `Option` so that a missing
//! field is reported as invalid input naming that field.

use serde::{Deserialize, Serialize};

/// Self-service student registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub registration_number: Option<String>,
    pub program_id: Option<i64>,
    pub enrollment_year: Option<i64>,
    /// Defaults to 1.
    pub semester: Option<i64>,
}

/// Email and password login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Account fields exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_id: i64,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// Returned by login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub account: AccountInfo,
    /// The bearer token for subsequent requests.
    pub token: String,
}

/// A study program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInfo {
    pub program_id: i64,
    pub code: String,
    pub name: String,
    pub faculty: String,
    pub degree_level: String,
}

/// A student record joined with its account email and program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub student_id: i64,
    pub account_id: i64,
    pub email: String,
    pub registration_number: String,
    pub name: String,
    pub semester: u8,
    pub enrollment_year: u16,
    pub status: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub program: ProgramInfo,
}

/// A lecturer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LecturerInfo {
    pub lecturer_id: i64,
    pub employee_number: String,
    pub name: String,
    pub program_id: Option<i64>,
    pub phone: Option<String>,
}

/// The caller's account plus the record for their role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub account: AccountInfo,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub student: Option<StudentInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lecturer: Option<LecturerInfo>,
}

/// Update of a student's name and semester.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub semester: Option<i64>,
}

/// A course offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    pub course_id: i64,
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub capacity: u32,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub min_semester: u8,
    pub lecturer_id: Option<i64>,
    pub lecturer_name: Option<String>,
}

/// An enrollment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentInfo {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub academic_year: String,
    pub semester: u8,
    pub grade: Option<String>,
    pub created_at: String,
}

/// Add-course request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub course_id: Option<i64>,
    pub academic_year: Option<String>,
}

/// Returned by a successful add-course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollResponse {
    pub enrollment: EnrollmentInfo,
    pub course: CourseInfo,
    pub message: String,
}

/// Drop-course request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
}

/// Returned by a successful drop-course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawResponse {
    /// Number of enrollment records removed.
    pub removed: usize,
    pub message: String,
}

/// Filters for the enrolled-course listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolledCoursesQuery {
    pub academic_year: Option<String>,
    pub semester: Option<i64>,
}

/// An enrollment with its course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolledCourseInfo {
    pub enrollment: EnrollmentInfo,
    pub course: CourseInfo,
}

/// One enrollment audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentHistoryInfo {
    pub audit_id: Option<i64>,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub action: String,
    pub actor_id: String,
    pub actor_type: String,
    pub recorded_at: String,
}

/// New letter request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLetterRequest {
    pub letter_type: Option<String>,
    pub purpose: Option<String>,
}

/// Letter request update.
///
/// Students send `purpose`; staff send `status` and optionally `note`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLetterRequest {
    pub purpose: Option<String>,
    pub status: Option<String>,
    pub note: Option<String>,
}

/// A letter request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterInfo {
    pub letter_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub registration_number: String,
    pub letter_type: String,
    pub letter_type_label: String,
    pub purpose: String,
    pub status: String,
    pub note: Option<String>,
    pub updated_by: Option<i64>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// One entry of the static letter type list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterTypeInfo {
    pub id: String,
    pub label: String,
}

/// Letter request counts per status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterStatsResponse {
    pub pending: i64,
    pub processing: i64,
    pub completed: i64,
    pub rejected: i64,
    pub total: i64,
}

/// A bare confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
