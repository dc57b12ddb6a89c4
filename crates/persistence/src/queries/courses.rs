// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Course catalog queries and the enrollment aggregates used by the
//! rule-checker.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use registrar_domain::{
    AcademicYear, CourseOffering, WeeklyWindow, format_clock_time, weekday_name,
};
use tracing::debug;

use crate::diesel_schema::{courses, enrollments, lecturers};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = courses)]
pub(crate) struct CourseRow {
    course_id: i64,
    code: String,
    name: String,
    credits: i32,
    program_id: i64,
    lecturer_id: Option<i64>,
    capacity: i32,
    day_of_week: String,
    start_time: String,
    end_time: String,
    min_semester: i32,
}

impl CourseRow {
    pub(crate) fn into_offering(
        self,
        lecturer_name: Option<String>,
    ) -> Result<CourseOffering, PersistenceError> {
        let invalid = |field: &str, value: i32| {
            PersistenceError::InvalidStoredValue(format!(
                "course {} has {field} {value}",
                self.course_id
            ))
        };

        let credits: u32 = self
            .credits
            .to_u32()
            .ok_or_else(|| invalid("credits", self.credits))?;
        let capacity: u32 = self
            .capacity
            .to_u32()
            .ok_or_else(|| invalid("capacity", self.capacity))?;
        let min_semester: u8 = self
            .min_semester
            .to_u8()
            .ok_or_else(|| invalid("min_semester", self.min_semester))?;
        let window: WeeklyWindow =
            WeeklyWindow::parse(&self.day_of_week, &self.start_time, &self.end_time)?;

        Ok(CourseOffering {
            course_id: self.course_id,
            code: self.code,
            name: self.name,
            credits,
            program_id: self.program_id,
            lecturer_id: self.lecturer_id,
            lecturer_name,
            capacity,
            window,
            min_semester,
        })
    }
}

/// Converts joined course rows into offerings.
pub(crate) fn into_offerings(
    rows: Vec<(CourseRow, Option<String>)>,
) -> Result<Vec<CourseOffering>, PersistenceError> {
    rows.into_iter()
        .map(|(row, lecturer_name)| row.into_offering(lecturer_name))
        .collect()
}

/// Resolves a course offering with its lecturer's name.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
/// Returns `Ok(None)` if the course does not exist.
pub fn find_course(
    conn: &mut SqliteConnection,
    course_id: i64,
) -> Result<Option<CourseOffering>, PersistenceError> {
    debug!(course_id, "Resolving course offering");

    let result: Result<(CourseRow, Option<String>), diesel::result::Error> = courses::table
        .left_join(lecturers::table)
        .filter(courses::course_id.eq(course_id))
        .select((CourseRow::as_select(), lecturers::name.nullable()))
        .first(conn);

    match result {
        Ok((row, lecturer_name)) => Ok(Some(row.into_offering(lecturer_name)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the course offerings of a study program, ordered by code.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_courses_for_program(
    conn: &mut SqliteConnection,
    program_id: i64,
) -> Result<Vec<CourseOffering>, PersistenceError> {
    let rows: Vec<(CourseRow, Option<String>)> = courses::table
        .left_join(lecturers::table)
        .filter(courses::program_id.eq(program_id))
        .order(courses::code.asc())
        .select((CourseRow::as_select(), lecturers::name.nullable()))
        .load(conn)?;

    into_offerings(rows)
}

/// Counts every enrollment record referencing the course, across all
/// academic years.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_enrollments_for_course(
    conn: &mut SqliteConnection,
    course_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(enrollments::table
        .filter(enrollments::course_id.eq(course_id))
        .count()
        .get_result(conn)?)
}

/// Sums the credit hours of the student's enrollments in the academic year.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn sum_credits_for_student(
    conn: &mut SqliteConnection,
    student_id: i64,
    academic_year: &AcademicYear,
) -> Result<i64, PersistenceError> {
    let total: Option<i64> = enrollments::table
        .inner_join(courses::table)
        .filter(enrollments::student_id.eq(student_id))
        .filter(enrollments::academic_year.eq(academic_year.label()))
        .select(diesel::dsl::sum(courses::credits))
        .first(conn)?;

    Ok(total.unwrap_or(0))
}

/// Lists courses the student holds in the academic year that meet on the
/// window's weekday and overlap its time range.
///
/// Clock times are stored zero-padded, so text comparison follows clock
/// order. The overlap test is half-open.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn find_overlapping(
    conn: &mut SqliteConnection,
    student_id: i64,
    academic_year: &AcademicYear,
    window: &WeeklyWindow,
) -> Result<Vec<CourseOffering>, PersistenceError> {
    let start: String = format_clock_time(window.start());
    let end: String = format_clock_time(window.end());

    let rows: Vec<(CourseRow, Option<String>)> = enrollments::table
        .inner_join(courses::table.left_join(lecturers::table))
        .filter(enrollments::student_id.eq(student_id))
        .filter(enrollments::academic_year.eq(academic_year.label()))
        .filter(courses::day_of_week.eq(weekday_name(window.day())))
        .filter(courses::start_time.lt(end))
        .filter(courses::end_time.gt(start))
        .order(courses::start_time.asc())
        .select((CourseRow::as_select(), lecturers::name.nullable()))
        .load(conn)?;

    into_offerings(rows)
}
