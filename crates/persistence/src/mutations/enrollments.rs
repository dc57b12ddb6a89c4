// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Enrollment and enrollment audit mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use registrar_audit::EnrollmentAuditEntry;
use registrar_domain::{EnrollmentRecord, NewEnrollment};
use time::format_description::well_known::Iso8601;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{enrollment_audit, enrollments};
use crate::error::PersistenceError;
use crate::queries::enrollments::get_enrollment;

/// Inserts an enrollment record with no grade.
///
/// # Errors
///
/// Returns `UniqueViolation` if the (student, course, academic year)
/// triple already exists, or another database error.
pub fn insert_enrollment(
    conn: &mut SqliteConnection,
    enrollment: &NewEnrollment,
) -> Result<EnrollmentRecord, PersistenceError> {
    diesel::insert_into(enrollments::table)
        .values((
            enrollments::student_id.eq(enrollment.student_id),
            enrollments::course_id.eq(enrollment.course_id),
            enrollments::academic_year.eq(enrollment.academic_year.label()),
            enrollments::semester.eq(i32::from(enrollment.semester)),
        ))
        .execute(conn)?;

    let enrollment_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        enrollment_id,
        student_id = enrollment.student_id,
        course_id = enrollment.course_id,
        academic_year = %enrollment.academic_year,
        "Enrollment inserted"
    );

    get_enrollment(conn, enrollment_id)
}

/// Appends an enrollment audit entry.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted or the insert
/// fails.
pub fn insert_audit(
    conn: &mut SqliteConnection,
    entry: &EnrollmentAuditEntry,
) -> Result<i64, PersistenceError> {
    let recorded_at: String = entry
        .recorded_at
        .format(&Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::Other(format!("Failed to format audit timestamp: {e}")))?;

    diesel::insert_into(enrollment_audit::table)
        .values((
            enrollment_audit::student_id.eq(entry.student_id),
            enrollment_audit::course_id.eq(entry.course_id),
            enrollment_audit::actor_id.eq(&entry.actor.id),
            enrollment_audit::actor_type.eq(&entry.actor.actor_type),
            enrollment_audit::action.eq(entry.action.as_str()),
            enrollment_audit::recorded_at.eq(&recorded_at),
        ))
        .execute(conn)?;

    let audit_id: i64 = conn.get_last_insert_rowid()?;
    debug!(audit_id, action = %entry.action, "Enrollment audit entry appended");
    Ok(audit_id)
}

/// Deletes every enrollment of the student in the course.
///
/// Returns the number of records removed.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_enrollment(
    conn: &mut SqliteConnection,
    student_id: i64,
    course_id: i64,
) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(enrollments::table)
        .filter(enrollments::student_id.eq(student_id))
        .filter(enrollments::course_id.eq(course_id))
        .execute(conn)?;

    info!(student_id, course_id, removed, "Enrollment deleted");
    Ok(removed)
}
