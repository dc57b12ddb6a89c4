// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::schedule::WeeklyWindow;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An academic year label such as `2023/2024`.
///
/// The label scopes an enrollment period. Both halves are four-digit
/// years and the second must directly follow the first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AcademicYear {
    first: u16,
}

impl AcademicYear {
    /// Creates an academic year starting in `first`.
    #[must_use]
    pub const fn starting(first: u16) -> Self {
        Self { first }
    }

    /// The calendar year the academic year starts in.
    #[must_use]
    pub const fn first_year(&self) -> u16 {
        self.first
    }

    /// Returns the canonical `YYYY/YYYY` label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.first, u32::from(self.first) + 1)
    }
}

impl FromStr for AcademicYear {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        let (first, second) = trimmed.split_once('/').ok_or_else(|| {
            DomainError::InvalidAcademicYear(format!(
                "'{trimmed}' must have the form YYYY/YYYY"
            ))
        })?;

        let parse_half = |half: &str| -> Result<u16, DomainError> {
            if half.len() != 4 || !half.chars().all(|c| c.is_ascii_digit()) {
                return Err(DomainError::InvalidAcademicYear(format!(
                    "'{trimmed}' must have the form YYYY/YYYY"
                )));
            }
            half.parse::<u16>().map_err(|e| {
                DomainError::InvalidAcademicYear(format!("'{trimmed}': {e}"))
            })
        };

        let first: u16 = parse_half(first)?;
        let second: u16 = parse_half(second)?;

        if u32::from(second) != u32::from(first) + 1 {
            return Err(DomainError::InvalidAcademicYear(format!(
                "'{trimmed}' must span two consecutive years"
            )));
        }

        Ok(Self { first })
    }
}

impl TryFrom<String> for AcademicYear {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AcademicYear> for String {
    fn from(value: AcademicYear) -> Self {
        value.label()
    }
}

impl std::fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lifecycle status of a student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    /// Currently studying.
    #[default]
    Active,
    /// On leave.
    Inactive,
    /// Completed the program.
    Graduated,
    /// Left the program.
    Withdrawn,
}

impl StudentStatus {
    /// Converts this status to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Graduated => "graduated",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl FromStr for StudentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "graduated" => Ok(Self::Graduated),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(DomainError::InvalidStudentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Degree level of a study program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegreeLevel {
    /// Three-year diploma.
    D3,
    /// Bachelor.
    S1,
    /// Master.
    S2,
    /// Doctorate.
    S3,
}

impl DegreeLevel {
    /// Converts this level to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::D3 => "D3",
            Self::S1 => "S1",
            Self::S2 => "S2",
            Self::S3 => "S3",
        }
    }
}

impl FromStr for DegreeLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D3" => Ok(Self::D3),
            "S1" => Ok(Self::S1),
            "S2" => Ok(Self::S2),
            "S3" => Ok(Self::S3),
            _ => Err(DomainError::InvalidDegreeLevel(s.to_string())),
        }
    }
}

/// A study program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The program identifier.
    pub program_id: i64,
    /// The short program code.
    pub code: String,
    /// The program name.
    pub name: String,
    /// The faculty hosting the program.
    pub faculty: String,
    /// The degree level.
    pub degree_level: DegreeLevel,
}

/// A student record, owned 1:1 by a student account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    /// The student identifier.
    pub student_id: i64,
    /// The owning account.
    pub account_id: i64,
    /// The registration number issued by the university.
    pub registration_number: String,
    /// The student's name.
    pub name: String,
    /// The program the student is enrolled in.
    pub program_id: i64,
    /// The current semester index (1-based).
    pub semester: u8,
    /// The year the student entered the university.
    pub enrollment_year: u16,
    /// The lifecycle status.
    pub status: StudentStatus,
}

/// A course offering in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOffering {
    /// The course identifier.
    pub course_id: i64,
    /// The course code.
    pub code: String,
    /// The course name.
    pub name: String,
    /// Credit-hour weight.
    pub credits: u32,
    /// The program offering the course.
    pub program_id: i64,
    /// The lecturer teaching the course, if assigned.
    pub lecturer_id: Option<i64>,
    /// The lecturer's name, if assigned.
    pub lecturer_name: Option<String>,
    /// Maximum number of enrollments.
    pub capacity: u32,
    /// When the course meets each week.
    pub window: WeeklyWindow,
    /// The minimum semester a student must be in to take the course.
    pub min_semester: u8,
}

/// An enrollment of a student in a course for an academic year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRecord {
    /// The enrollment identifier.
    pub enrollment_id: i64,
    /// The enrolled student.
    pub student_id: i64,
    /// The course taken.
    pub course_id: i64,
    /// The academic year of the enrollment.
    pub academic_year: AcademicYear,
    /// The student's semester at the time of enrollment.
    pub semester: u8,
    /// The final grade, once posted.
    pub grade: Option<String>,
    /// When the enrollment was created.
    pub created_at: String,
}

/// An enrollment about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    /// The enrolling student.
    pub student_id: i64,
    /// The course taken.
    pub course_id: i64,
    /// The academic year of the enrollment.
    pub academic_year: AcademicYear,
    /// The student's current semester.
    pub semester: u8,
}
