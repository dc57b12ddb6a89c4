// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence seam the enrollment rule-checker drives.
//!
//! Each method is a single read or write. Transaction boundaries belong to
//! the implementor: the rule-checker assumes that if it returns an error
//! after a write, the implementor discards that write.

use registrar_audit::EnrollmentAuditEntry;
use registrar_domain::{
    AcademicYear, CourseOffering, EnrollmentRecord, NewEnrollment, StudentRecord, WeeklyWindow,
};

/// Failures surfaced by a gateway implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// A uniqueness constraint rejected a write.
    UniqueViolation(String),
    /// Any other storage failure.
    Database(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UniqueViolation(msg) => write!(f, "Uniqueness violation: {msg}"),
            Self::Database(msg) => write!(f, "Database error: {msg}"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Reads and writes needed to enroll and withdraw students.
pub trait EnrollmentGateway {
    /// Resolves the student record owned by an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_student_by_account(
        &mut self,
        account_id: i64,
    ) -> Result<Option<StudentRecord>, GatewayError>;

    /// Resolves a course offering.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_course(&mut self, course_id: i64) -> Result<Option<CourseOffering>, GatewayError>;

    /// Finds the enrollment for a (student, course, academic year) triple.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_enrollment(
        &mut self,
        student_id: i64,
        course_id: i64,
        academic_year: &AcademicYear,
    ) -> Result<Option<EnrollmentRecord>, GatewayError>;

    /// Counts every enrollment record referencing the course.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn count_enrollments_for_course(&mut self, course_id: i64) -> Result<u32, GatewayError>;

    /// Sums the credit hours the student holds in the academic year.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn sum_credits_for_student(
        &mut self,
        student_id: i64,
        academic_year: &AcademicYear,
    ) -> Result<u32, GatewayError>;

    /// Lists courses the student holds in the academic year whose weekly
    /// window overlaps `window`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_overlapping(
        &mut self,
        student_id: i64,
        academic_year: &AcademicYear,
        window: &WeeklyWindow,
    ) -> Result<Vec<CourseOffering>, GatewayError>;

    /// Inserts an enrollment record.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::UniqueViolation` if the triple already exists.
    fn insert_enrollment(
        &mut self,
        enrollment: &NewEnrollment,
    ) -> Result<EnrollmentRecord, GatewayError>;

    /// Appends an audit entry and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_audit(&mut self, entry: &EnrollmentAuditEntry) -> Result<i64, GatewayError>;

    /// Deletes every enrollment of the student in the course.
    ///
    /// Returns the number of records removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_enrollment(&mut self, student_id: i64, course_id: i64)
    -> Result<usize, GatewayError>;
}
