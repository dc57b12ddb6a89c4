// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Enrollment record and enrollment audit queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use registrar_audit::{Actor, EnrollmentAction, EnrollmentAuditEntry};
use registrar_domain::{AcademicYear, EnrollmentRecord};
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use tracing::debug;

use crate::data_models::{EnrolledCourseData, EnrollmentHistoryData};
use crate::diesel_schema::{courses, enrollment_audit, enrollments, lecturers};
use crate::error::PersistenceError;
use crate::queries::courses::CourseRow;

#[derive(Queryable, Selectable)]
#[diesel(table_name = enrollments)]
pub(crate) struct EnrollmentRow {
    enrollment_id: i64,
    student_id: i64,
    course_id: i64,
    academic_year: String,
    semester: i32,
    grade: Option<String>,
    created_at: String,
}

impl EnrollmentRow {
    pub(crate) fn into_record(self) -> Result<EnrollmentRecord, PersistenceError> {
        let semester: u8 = self.semester.to_u8().ok_or_else(|| {
            PersistenceError::InvalidStoredValue(format!(
                "enrollment {} has semester {}",
                self.enrollment_id, self.semester
            ))
        })?;

        Ok(EnrollmentRecord {
            enrollment_id: self.enrollment_id,
            student_id: self.student_id,
            course_id: self.course_id,
            academic_year: self.academic_year.parse::<AcademicYear>()?,
            semester,
            grade: self.grade,
            created_at: self.created_at,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = enrollment_audit)]
struct AuditRow {
    audit_id: i64,
    student_id: i64,
    course_id: i64,
    actor_id: String,
    actor_type: String,
    action: String,
    recorded_at: String,
}

impl AuditRow {
    fn into_entry(self) -> Result<EnrollmentAuditEntry, PersistenceError> {
        let action: EnrollmentAction = self
            .action
            .parse()
            .map_err(PersistenceError::InvalidStoredValue)?;
        let recorded_at: OffsetDateTime =
            OffsetDateTime::parse(&self.recorded_at, &Iso8601::DEFAULT).map_err(|e| {
                PersistenceError::InvalidStoredValue(format!(
                    "audit entry {} has timestamp '{}': {e}",
                    self.audit_id, self.recorded_at
                ))
            })?;

        Ok(EnrollmentAuditEntry::new(
            self.student_id,
            self.course_id,
            Actor::new(self.actor_id, self.actor_type),
            action,
            recorded_at,
        )
        .with_audit_id(self.audit_id))
    }
}

/// Finds the enrollment for a (student, course, academic year) triple.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
/// Returns `Ok(None)` if there is no such enrollment.
pub fn find_enrollment(
    conn: &mut SqliteConnection,
    student_id: i64,
    course_id: i64,
    academic_year: &AcademicYear,
) -> Result<Option<EnrollmentRecord>, PersistenceError> {
    let result: Result<EnrollmentRow, diesel::result::Error> = enrollments::table
        .filter(enrollments::student_id.eq(student_id))
        .filter(enrollments::course_id.eq(course_id))
        .filter(enrollments::academic_year.eq(academic_year.label()))
        .select(EnrollmentRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_record()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves an enrollment by ID.
///
/// # Errors
///
/// Returns an error if the query fails, the row is missing, or the row is
/// malformed.
pub fn get_enrollment(
    conn: &mut SqliteConnection,
    enrollment_id: i64,
) -> Result<EnrollmentRecord, PersistenceError> {
    enrollments::table
        .filter(enrollments::enrollment_id.eq(enrollment_id))
        .select(EnrollmentRow::as_select())
        .first::<EnrollmentRow>(conn)?
        .into_record()
}

/// Lists a student's enrollments with their courses.
///
/// Optional filters narrow the list to one academic year and/or the
/// semester the student was in when enrolling. Ordered by academic year,
/// then course code.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_enrollments_for_student(
    conn: &mut SqliteConnection,
    student_id: i64,
    academic_year: Option<&AcademicYear>,
    semester: Option<u8>,
) -> Result<Vec<EnrolledCourseData>, PersistenceError> {
    debug!(student_id, ?academic_year, ?semester, "Listing enrollments");

    let mut query = enrollments::table
        .inner_join(courses::table.left_join(lecturers::table))
        .filter(enrollments::student_id.eq(student_id))
        .select((
            EnrollmentRow::as_select(),
            CourseRow::as_select(),
            lecturers::name.nullable(),
        ))
        .order((enrollments::academic_year.asc(), courses::code.asc()))
        .into_boxed();

    if let Some(year) = academic_year {
        query = query.filter(enrollments::academic_year.eq(year.label()));
    }
    if let Some(semester) = semester {
        query = query.filter(enrollments::semester.eq(i32::from(semester)));
    }

    let rows: Vec<(EnrollmentRow, CourseRow, Option<String>)> = query.load(conn)?;

    rows.into_iter()
        .map(|(enrollment, course, lecturer_name)| {
            Ok(EnrolledCourseData {
                enrollment: enrollment.into_record()?,
                course: course.into_offering(lecturer_name)?,
            })
        })
        .collect()
}

/// Lists a student's enrollment audit entries, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_audit_for_student(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> Result<Vec<EnrollmentHistoryData>, PersistenceError> {
    let rows: Vec<(AuditRow, String, String)> = enrollment_audit::table
        .inner_join(courses::table)
        .filter(enrollment_audit::student_id.eq(student_id))
        .order(enrollment_audit::audit_id.desc())
        .select((AuditRow::as_select(), courses::code, courses::name))
        .load(conn)?;

    rows.into_iter()
        .map(|(row, course_code, course_name)| {
            Ok(EnrollmentHistoryData {
                entry: row.into_entry()?,
                course_code,
                course_name,
            })
        })
        .collect()
}
