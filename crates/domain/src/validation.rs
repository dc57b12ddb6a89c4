// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::schedule::WeeklyWindow;
use crate::types::{AcademicYear, CourseOffering, EnrollmentRecord, StudentRecord};

/// Maximum credit hours a student may hold in one academic year.
pub const CREDIT_HOUR_CEILING: u32 = 24;

/// Minimum length of a registration number.
const MIN_REGISTRATION_NUMBER_LEN: usize = 5;

/// Validates that the student is far enough along to take the course.
///
/// # Errors
///
/// Returns `SemesterNotEligible` if the course's minimum semester is
/// greater than the student's current semester.
pub const fn validate_semester_eligibility(
    student: &StudentRecord,
    course: &CourseOffering,
) -> Result<(), DomainError> {
    if course.min_semester > student.semester {
        return Err(DomainError::SemesterNotEligible {
            course_semester: course.min_semester,
            student_semester: student.semester,
        });
    }
    Ok(())
}

/// Validates that no enrollment already exists for the triple.
///
/// # Errors
///
/// Returns `AlreadyEnrolled` if `existing` is present.
pub fn validate_not_enrolled(
    existing: Option<&EnrollmentRecord>,
    course: &CourseOffering,
    academic_year: &AcademicYear,
) -> Result<(), DomainError> {
    if existing.is_some() {
        return Err(DomainError::AlreadyEnrolled {
            course_code: course.code.clone(),
            academic_year: academic_year.clone(),
        });
    }
    Ok(())
}

/// Validates that the course still has an open seat.
///
/// # Arguments
///
/// * `enrolled` - Number of enrollment records referencing the course
/// * `course` - The target course
///
/// # Errors
///
/// Returns `CapacityFull` when `enrolled >= capacity`.
pub fn validate_capacity(enrolled: u32, course: &CourseOffering) -> Result<(), DomainError> {
    if enrolled >= course.capacity {
        return Err(DomainError::CapacityFull {
            course_code: course.code.clone(),
            capacity: course.capacity,
        });
    }
    Ok(())
}

/// Validates that adding the course keeps the student at or under
/// [`CREDIT_HOUR_CEILING`].
///
/// The boundary is inclusive: reaching exactly the ceiling is allowed.
///
/// # Errors
///
/// Returns `CreditLimitExceeded` if `current + course.credits` exceeds
/// the ceiling.
pub fn validate_credit_ceiling(current: u32, course: &CourseOffering) -> Result<(), DomainError> {
    if current.saturating_add(course.credits) > CREDIT_HOUR_CEILING {
        return Err(DomainError::CreditLimitExceeded {
            current,
            requested: course.credits,
            ceiling: CREDIT_HOUR_CEILING,
        });
    }
    Ok(())
}

/// Finds the first already-taken course whose window clashes with `target`.
#[must_use]
pub fn find_schedule_clash<'a>(
    target: &WeeklyWindow,
    taken: &'a [CourseOffering],
) -> Option<&'a CourseOffering> {
    taken.iter().find(|course| course.window.overlaps(target))
}

/// Validates that none of the already-taken courses clash with `course`.
///
/// # Errors
///
/// Returns `ScheduleClash` naming the first clashing course.
pub fn validate_no_schedule_clash(
    course: &CourseOffering,
    taken: &[CourseOffering],
) -> Result<(), DomainError> {
    match find_schedule_clash(&course.window, taken) {
        Some(clash) => Err(DomainError::ScheduleClash {
            clashing_code: clash.code.clone(),
            clashing_name: clash.name.clone(),
        }),
        None => Ok(()),
    }
}

/// Validates a semester index supplied from outside.
///
/// # Errors
///
/// Returns `InvalidSemester` if the value is not a positive integer that
/// fits a semester index.
pub fn validate_semester(value: i64) -> Result<u8, DomainError> {
    if value < 1 {
        return Err(DomainError::InvalidSemester(format!(
            "semester must be a positive number, got {value}"
        )));
    }
    u8::try_from(value)
        .map_err(|_| DomainError::InvalidSemester(format!("semester {value} is out of range")))
}

/// Validates a person's name: non-empty, letters plus `' .-` only.
///
/// # Errors
///
/// Returns `InvalidName` if the trimmed name is empty or contains anything
/// other than letters, spaces, apostrophes, periods or hyphens.
pub fn validate_person_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || matches!(c, ' ' | '\'' | '.' | '-'))
    {
        return Err(DomainError::InvalidName(String::from(
            "Name may only contain letters, spaces, apostrophes, periods or hyphens",
        )));
    }
    Ok(())
}

/// Validates a registration number.
///
/// # Errors
///
/// Returns `InvalidRegistrationNumber` if the trimmed value is shorter
/// than five characters or contains whitespace.
pub fn validate_registration_number(value: &str) -> Result<(), DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.len() < MIN_REGISTRATION_NUMBER_LEN {
        return Err(DomainError::InvalidRegistrationNumber(format!(
            "must be at least {MIN_REGISTRATION_NUMBER_LEN} characters"
        )));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidRegistrationNumber(String::from(
            "must not contain whitespace",
        )));
    }
    Ok(())
}
