// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The enrollment rule-checker.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. the student record exists
//! 2. the course exists
//! 3. the student's semester reaches the course's minimum semester
//! 4. no enrollment exists for the (student, course, academic year) triple
//! 5. the course has an open seat
//! 6. the credit-hour ceiling holds
//! 7. no already-held course clashes with the course's weekly window
//!
//! The checks read without locking. Two concurrent attempts may both pass
//! the capacity check; only the uniqueness constraint on the triple is a
//! hard guarantee, enforced when the enrollment is inserted.

use crate::error::CoreError;
use crate::gateway::{EnrollmentGateway, GatewayError};
use registrar_audit::{Actor, EnrollmentAction, EnrollmentAuditEntry};
use registrar_domain::{
    AcademicYear, CourseOffering, DomainError, EnrollmentRecord, NewEnrollment, StudentRecord,
    validate_capacity, validate_credit_ceiling, validate_no_schedule_clash, validate_not_enrolled,
    validate_semester_eligibility,
};
use time::OffsetDateTime;

/// A student's request to add a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRequest {
    /// The authenticated account, resolved to a student record.
    pub account_id: i64,
    /// The course to add.
    pub course_id: i64,
    /// The academic year to enroll in.
    pub academic_year: AcademicYear,
    /// Who is acting, recorded in the audit entry.
    pub actor: Actor,
}

/// The result of a successful enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentOutcome {
    /// The enrolled student.
    pub student: StudentRecord,
    /// The created enrollment record.
    pub enrollment: EnrollmentRecord,
    /// The course offering, for response shaping.
    pub course: CourseOffering,
    /// The stored audit entry.
    pub audit_entry: EnrollmentAuditEntry,
}

/// Attempts to enroll the requesting student in a course.
///
/// On success, the enrollment record and an `add` audit entry have both
/// been written through the gateway. The caller must run this inside a
/// transaction so that a failure after the first write discards it.
///
/// # Arguments
///
/// * `gateway` - The persistence gateway
/// * `request` - The enrollment request
/// * `now` - The timestamp recorded in the audit entry
///
/// # Errors
///
/// Returns a `DomainViolation` naming the first failed check, or a
/// `Gateway` error if storage fails. A uniqueness violation on insert is
/// reported as `AlreadyEnrolled`.
pub fn attempt_enroll<G: EnrollmentGateway>(
    gateway: &mut G,
    request: &EnrollmentRequest,
    now: OffsetDateTime,
) -> Result<EnrollmentOutcome, CoreError> {
    let student: StudentRecord = gateway
        .find_student_by_account(request.account_id)?
        .ok_or(DomainError::StudentNotFound {
            account_id: request.account_id,
        })?;

    let course: CourseOffering = gateway
        .find_course(request.course_id)?
        .ok_or(DomainError::CourseNotFound {
            course_id: request.course_id,
        })?;

    validate_semester_eligibility(&student, &course)?;

    let existing: Option<EnrollmentRecord> =
        gateway.find_enrollment(student.student_id, course.course_id, &request.academic_year)?;
    validate_not_enrolled(existing.as_ref(), &course, &request.academic_year)?;

    let enrolled: u32 = gateway.count_enrollments_for_course(course.course_id)?;
    validate_capacity(enrolled, &course)?;

    let held_credits: u32 =
        gateway.sum_credits_for_student(student.student_id, &request.academic_year)?;
    validate_credit_ceiling(held_credits, &course)?;

    let overlapping: Vec<CourseOffering> =
        gateway.find_overlapping(student.student_id, &request.academic_year, &course.window)?;
    validate_no_schedule_clash(&course, &overlapping)?;

    let new_enrollment: NewEnrollment = NewEnrollment {
        student_id: student.student_id,
        course_id: course.course_id,
        academic_year: request.academic_year.clone(),
        semester: student.semester,
    };

    let enrollment: EnrollmentRecord = match gateway.insert_enrollment(&new_enrollment) {
        Ok(record) => record,
        Err(GatewayError::UniqueViolation(_)) => {
            return Err(CoreError::DomainViolation(DomainError::AlreadyEnrolled {
                course_code: course.code,
                academic_year: request.academic_year.clone(),
            }));
        }
        Err(err) => return Err(err.into()),
    };

    let entry: EnrollmentAuditEntry = EnrollmentAuditEntry::new(
        student.student_id,
        course.course_id,
        request.actor.clone(),
        EnrollmentAction::Add,
        now,
    );
    let audit_id: i64 = gateway.insert_audit(&entry)?;

    Ok(EnrollmentOutcome {
        student,
        enrollment,
        course,
        audit_entry: entry.with_audit_id(audit_id),
    })
}

/// Removes a student's enrollment in a course.
///
/// Every matching record is deleted regardless of academic year or posted
/// grade.
///
/// # Errors
///
/// Returns `EnrollmentNotFound` if nothing was deleted, or a `Gateway`
/// error if storage fails.
pub fn withdraw_enroll<G: EnrollmentGateway>(
    gateway: &mut G,
    student_id: i64,
    course_id: i64,
) -> Result<usize, CoreError> {
    let removed: usize = gateway.delete_enrollment(student_id, course_id)?;
    if removed == 0 {
        return Err(DomainError::EnrollmentNotFound {
            student_id,
            course_id,
        }
        .into());
    }
    Ok(removed)
}
