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

mod error;
mod letter;
mod schedule;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use letter::{LetterStatus, LetterType};
pub use schedule::{
    WeeklyWindow, format_clock_time, parse_clock_time, parse_weekday, weekday_name,
};
pub use types::{
    AcademicYear, CourseOffering, DegreeLevel, EnrollmentRecord, NewEnrollment, Program,
    StudentRecord, StudentStatus,
};
pub use validation::{
    CREDIT_HOUR_CEILING, find_schedule_clash, validate_capacity, validate_credit_ceiling,
    validate_no_schedule_clash, validate_not_enrolled, validate_person_name,
    validate_registration_number, validate_semester, validate_semester_eligibility,
};
