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

mod auth;
mod credential_policy;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use credential_policy::{CredentialPolicy, CredentialPolicyError};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    create_letter, delete_letter, enroll, get_enrollment_history, get_letter, get_own_student,
    get_profile, get_student, letter_stats, letter_types, list_courses, list_enrolled_courses,
    list_letters, login, logout, register_student, update_letter, update_student, withdraw,
};
pub use request_response::{
    AccountInfo, AuthResponse, CourseInfo, CreateLetterRequest, EnrollRequest, EnrollResponse,
    EnrolledCourseInfo, EnrolledCoursesQuery, EnrollmentHistoryInfo, EnrollmentInfo,
    LecturerInfo, LetterInfo, LetterStatsResponse, LetterTypeInfo, LoginRequest, MessageResponse,
    ProfileResponse, ProgramInfo, RegisterRequest, StudentInfo, UpdateLetterRequest,
    UpdateStudentRequest, WithdrawRequest, WithdrawResponse,
};
