// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel-backed implementation of the enrollment gateway.

use diesel::SqliteConnection;
use num_traits::ToPrimitive;
use registrar::{EnrollmentGateway, GatewayError};
use registrar_audit::EnrollmentAuditEntry;
use registrar_domain::{
    AcademicYear, CourseOffering, EnrollmentRecord, NewEnrollment, StudentRecord, WeeklyWindow,
};

use crate::error::PersistenceError;
use crate::{mutations, queries};

/// Adapts a borrowed `SQLite` connection to [`EnrollmentGateway`].
///
/// The gateway never opens its own transaction; callers wrap it in one.
pub struct SqliteGateway<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteGateway<'a> {
    /// Wraps a connection, usually the one handed to a transaction closure.
    pub const fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl From<PersistenceError> for GatewayError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::UniqueViolation(msg) => Self::UniqueViolation(msg),
            other => Self::Database(other.to_string()),
        }
    }
}

fn count_to_u32(value: i64, what: &str) -> Result<u32, GatewayError> {
    value
        .to_u32()
        .ok_or_else(|| GatewayError::Database(format!("{what} {value} is out of range")))
}

impl EnrollmentGateway for SqliteGateway<'_> {
    fn find_student_by_account(
        &mut self,
        account_id: i64,
    ) -> Result<Option<StudentRecord>, GatewayError> {
        Ok(queries::students::find_student_by_account(
            self.conn, account_id,
        )?)
    }

    fn find_course(&mut self, course_id: i64) -> Result<Option<CourseOffering>, GatewayError> {
        Ok(queries::courses::find_course(self.conn, course_id)?)
    }

    fn find_enrollment(
        &mut self,
        student_id: i64,
        course_id: i64,
        academic_year: &AcademicYear,
    ) -> Result<Option<EnrollmentRecord>, GatewayError> {
        Ok(queries::enrollments::find_enrollment(
            self.conn,
            student_id,
            course_id,
            academic_year,
        )?)
    }

    fn count_enrollments_for_course(&mut self, course_id: i64) -> Result<u32, GatewayError> {
        let count: i64 = queries::courses::count_enrollments_for_course(self.conn, course_id)?;
        count_to_u32(count, "enrollment count")
    }

    fn sum_credits_for_student(
        &mut self,
        student_id: i64,
        academic_year: &AcademicYear,
    ) -> Result<u32, GatewayError> {
        let total: i64 =
            queries::courses::sum_credits_for_student(self.conn, student_id, academic_year)?;
        count_to_u32(total, "credit total")
    }

    fn find_overlapping(
        &mut self,
        student_id: i64,
        academic_year: &AcademicYear,
        window: &WeeklyWindow,
    ) -> Result<Vec<CourseOffering>, GatewayError> {
        Ok(queries::courses::find_overlapping(
            self.conn,
            student_id,
            academic_year,
            window,
        )?)
    }

    fn insert_enrollment(
        &mut self,
        enrollment: &NewEnrollment,
    ) -> Result<EnrollmentRecord, GatewayError> {
        Ok(mutations::enrollments::insert_enrollment(
            self.conn, enrollment,
        )?)
    }

    fn insert_audit(&mut self, entry: &EnrollmentAuditEntry) -> Result<i64, GatewayError> {
        Ok(mutations::enrollments::insert_audit(self.conn, entry)?)
    }

    fn delete_enrollment(
        &mut self,
        student_id: i64,
        course_id: i64,
    ) -> Result<usize, GatewayError> {
        Ok(mutations::enrollments::delete_enrollment(
            self.conn, student_id, course_id,
        )?)
    }
}
