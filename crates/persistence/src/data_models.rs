// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use registrar_audit::EnrollmentAuditEntry;
use registrar_domain::{
    CourseOffering, DegreeLevel, EnrollmentRecord, LetterStatus, StudentStatus,
};

/// An account row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountData {
    pub account_id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A bearer session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub account_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// Input for self-service student registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudentAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    pub registration_number: String,
    pub program_id: i64,
    pub enrollment_year: u16,
    pub semester: u8,
}

/// A student record joined with its account and program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfileData {
    pub student_id: i64,
    pub account_id: i64,
    pub email: String,
    pub registration_number: String,
    pub name: String,
    pub semester: u8,
    pub enrollment_year: u16,
    pub status: StudentStatus,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub program_id: i64,
    pub program_code: String,
    pub program_name: String,
    pub faculty: String,
    pub degree_level: DegreeLevel,
}

/// A lecturer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LecturerData {
    pub lecturer_id: i64,
    pub account_id: Option<i64>,
    pub employee_number: String,
    pub name: String,
    pub program_id: Option<i64>,
    pub phone: Option<String>,
}

/// Input for a new course offering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub program_id: i64,
    pub lecturer_id: Option<i64>,
    pub capacity: u32,
    pub window: registrar_domain::WeeklyWindow,
    pub min_semester: u8,
}

/// An enrollment together with the course it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledCourseData {
    pub enrollment: EnrollmentRecord,
    pub course: CourseOffering,
}

/// An audit entry together with the course it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentHistoryData {
    pub entry: EnrollmentAuditEntry,
    pub course_code: String,
    pub course_name: String,
}

/// A letter request joined with the requesting student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterRequestData {
    pub letter_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub registration_number: String,
    pub letter_type: String,
    pub purpose: String,
    pub status: LetterStatus,
    pub note: Option<String>,
    pub updated_by: Option<i64>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Letter request counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LetterStatsData {
    pub pending: i64,
    pub processing: i64,
    pub completed: i64,
    pub rejected: i64,
}

impl LetterStatsData {
    /// The number of requests across all statuses.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.pending + self.processing + self.completed + self.rejected
    }
}
