// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::AcademicYear;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No student record is linked to the account.
    StudentNotFound {
        /// The account that was resolved.
        account_id: i64,
    },
    /// The course offering does not exist.
    CourseNotFound {
        /// The requested course.
        course_id: i64,
    },
    /// The course targets a later semester than the student is in.
    SemesterNotEligible {
        /// The minimum semester required by the course.
        course_semester: u8,
        /// The student's current semester.
        student_semester: u8,
    },
    /// The student already holds an enrollment for this course and year.
    AlreadyEnrolled {
        /// The course code.
        course_code: String,
        /// The academic year of the existing enrollment.
        academic_year: AcademicYear,
    },
    /// Every seat of the course is taken.
    CapacityFull {
        /// The course code.
        course_code: String,
        /// The course capacity.
        capacity: u32,
    },
    /// Adding the course would push the student past the credit-hour ceiling.
    CreditLimitExceeded {
        /// Credit hours already held in the academic year.
        current: u32,
        /// Credit hours of the requested course.
        requested: u32,
        /// The fixed ceiling.
        ceiling: u32,
    },
    /// The course meets at the same time as one already taken.
    ScheduleClash {
        /// Code of the already-enrolled course.
        clashing_code: String,
        /// Name of the already-enrolled course.
        clashing_name: String,
    },
    /// No enrollment matched a withdrawal.
    EnrollmentNotFound {
        /// The student record.
        student_id: i64,
        /// The course offering.
        course_id: i64,
    },
    /// Academic year label is malformed.
    InvalidAcademicYear(String),
    /// Weekly time window is malformed.
    InvalidTimeWindow(String),
    /// Weekday name is not recognized.
    InvalidWeekday(String),
    /// Semester index is out of range.
    InvalidSemester(String),
    /// Student lifecycle status is not recognized.
    InvalidStudentStatus(String),
    /// Degree level is not recognized.
    InvalidDegreeLevel(String),
    /// Letter status is not recognized.
    InvalidLetterStatus(String),
    /// Letter type is not recognized.
    InvalidLetterType(String),
    /// Person name is empty or contains invalid characters.
    InvalidName(String),
    /// Registration number is missing or too short.
    InvalidRegistrationNumber(String),
}

impl DomainError {
    /// Returns the stable rule tag for business-rule failures.
    ///
    /// Input-shape and lookup errors carry no tag.
    #[must_use]
    pub const fn rule(&self) -> Option<&'static str> {
        match self {
            Self::SemesterNotEligible { .. } => Some("semester-not-eligible"),
            Self::AlreadyEnrolled { .. } => Some("already-enrolled"),
            Self::CapacityFull { .. } => Some("capacity-full"),
            Self::CreditLimitExceeded { .. } => Some("credit-limit-exceeded"),
            Self::ScheduleClash { .. } => Some("schedule-clash"),
            _ => None,
        }
    }

    /// Returns whether the failure is a state collision rather than a
    /// plain rule failure.
    ///
    /// Duplicate enrollments and schedule clashes collide with records the
    /// student already holds.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyEnrolled { .. } | Self::ScheduleClash { .. }
        )
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotFound { account_id } => {
                write!(f, "No student record for account {account_id}")
            }
            Self::CourseNotFound { course_id } => write!(f, "Course {course_id} not found"),
            Self::SemesterNotEligible {
                course_semester,
                student_semester,
            } => write!(
                f,
                "Course is offered for semester {course_semester}, student is in semester {student_semester}"
            ),
            Self::AlreadyEnrolled {
                course_code,
                academic_year,
            } => write!(
                f,
                "Already enrolled in course '{course_code}' for academic year {academic_year}"
            ),
            Self::CapacityFull {
                course_code,
                capacity,
            } => write!(
                f,
                "Course '{course_code}' is full ({capacity} seats taken)"
            ),
            Self::CreditLimitExceeded {
                current,
                requested,
                ceiling,
            } => write!(
                f,
                "Total credit hours would exceed the maximum of {ceiling} ({current} held, {requested} requested)"
            ),
            Self::ScheduleClash {
                clashing_code,
                clashing_name,
            } => write!(
                f,
                "Schedule clashes with course '{clashing_code}' ({clashing_name})"
            ),
            Self::EnrollmentNotFound {
                student_id,
                course_id,
            } => write!(
                f,
                "No enrollment of student {student_id} in course {course_id}"
            ),
            Self::InvalidAcademicYear(msg) => write!(f, "Invalid academic year: {msg}"),
            Self::InvalidTimeWindow(msg) => write!(f, "Invalid time window: {msg}"),
            Self::InvalidWeekday(msg) => write!(f, "Invalid weekday: {msg}"),
            Self::InvalidSemester(msg) => write!(f, "Invalid semester: {msg}"),
            Self::InvalidStudentStatus(msg) => write!(f, "Invalid student status: {msg}"),
            Self::InvalidDegreeLevel(msg) => write!(f, "Invalid degree level: {msg}"),
            Self::InvalidLetterStatus(msg) => write!(f, "Invalid letter status: {msg}"),
            Self::InvalidLetterType(msg) => write!(f, "Invalid letter type: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidRegistrationNumber(msg) => {
                write!(f, "Invalid registration number: {msg}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
