// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog mutations: programs, lecturers and course offerings.

use diesel::SqliteConnection;
use diesel::prelude::*;
use registrar_domain::{DegreeLevel, format_clock_time, weekday_name};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::NewCourse;
use crate::diesel_schema::{courses, lecturers, programs};
use crate::error::PersistenceError;

/// Creates a study program.
///
/// # Errors
///
/// Returns an error if the code is already in use or the insert fails.
pub fn create_program(
    conn: &mut SqliteConnection,
    code: &str,
    name: &str,
    faculty: &str,
    degree_level: DegreeLevel,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(programs::table)
        .values((
            programs::code.eq(code),
            programs::name.eq(name),
            programs::faculty.eq(faculty),
            programs::degree_level.eq(degree_level.as_str()),
        ))
        .execute(conn)?;

    let program_id: i64 = conn.get_last_insert_rowid()?;
    info!(program_id, code, "Program created");
    Ok(program_id)
}

/// Creates a lecturer, optionally linked to a login account.
///
/// # Errors
///
/// Returns an error if the employee number is already in use or the
/// insert fails.
pub fn create_lecturer(
    conn: &mut SqliteConnection,
    account_id: Option<i64>,
    employee_number: &str,
    name: &str,
    program_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(lecturers::table)
        .values((
            lecturers::account_id.eq(account_id),
            lecturers::employee_number.eq(employee_number),
            lecturers::name.eq(name),
            lecturers::program_id.eq(program_id),
        ))
        .execute(conn)?;

    let lecturer_id: i64 = conn.get_last_insert_rowid()?;
    info!(lecturer_id, employee_number, "Lecturer created");
    Ok(lecturer_id)
}

/// Creates a course offering.
///
/// # Errors
///
/// Returns an error if a numeric field does not fit the column, the code is
/// already in use, or the insert fails.
pub fn create_course(
    conn: &mut SqliteConnection,
    course: &NewCourse,
) -> Result<i64, PersistenceError> {
    let to_column = |field: &str, value: u32| {
        i32::try_from(value).map_err(|_| {
            PersistenceError::Other(format!("course {field} {value} is out of range"))
        })
    };

    diesel::insert_into(courses::table)
        .values((
            courses::code.eq(&course.code),
            courses::name.eq(&course.name),
            courses::credits.eq(to_column("credits", course.credits)?),
            courses::program_id.eq(course.program_id),
            courses::lecturer_id.eq(course.lecturer_id),
            courses::capacity.eq(to_column("capacity", course.capacity)?),
            courses::day_of_week.eq(weekday_name(course.window.day())),
            courses::start_time.eq(format_clock_time(course.window.start())),
            courses::end_time.eq(format_clock_time(course.window.end())),
            courses::min_semester.eq(i32::from(course.min_semester)),
        ))
        .execute(conn)?;

    let course_id: i64 = conn.get_last_insert_rowid()?;
    info!(course_id, code = %course.code, window = %course.window, "Course created");
    Ok(course_id)
}
