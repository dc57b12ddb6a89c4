// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student, program and lecturer queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use registrar_domain::{DegreeLevel, Program, StudentRecord, StudentStatus};
use tracing::debug;

use crate::data_models::{LecturerData, StudentProfileData};
use crate::diesel_schema::{accounts, lecturers, programs, students};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = students)]
pub(crate) struct StudentRow {
    student_id: i64,
    account_id: i64,
    registration_number: String,
    name: String,
    program_id: i64,
    semester: i32,
    enrollment_year: i32,
    status: String,
    phone: Option<String>,
    address: Option<String>,
}

impl StudentRow {
    fn semester(&self) -> Result<u8, PersistenceError> {
        self.semester.to_u8().ok_or_else(|| {
            PersistenceError::InvalidStoredValue(format!(
                "student {} has semester {}",
                self.student_id, self.semester
            ))
        })
    }

    fn enrollment_year(&self) -> Result<u16, PersistenceError> {
        self.enrollment_year.to_u16().ok_or_else(|| {
            PersistenceError::InvalidStoredValue(format!(
                "student {} has enrollment year {}",
                self.student_id, self.enrollment_year
            ))
        })
    }

    pub(crate) fn into_record(self) -> Result<StudentRecord, PersistenceError> {
        Ok(StudentRecord {
            student_id: self.student_id,
            account_id: self.account_id,
            semester: self.semester()?,
            enrollment_year: self.enrollment_year()?,
            status: self.status.parse::<StudentStatus>()?,
            registration_number: self.registration_number,
            name: self.name,
            program_id: self.program_id,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = programs)]
struct ProgramRow {
    program_id: i64,
    code: String,
    name: String,
    faculty: String,
    degree_level: String,
}

impl ProgramRow {
    fn into_program(self) -> Result<Program, PersistenceError> {
        Ok(Program {
            program_id: self.program_id,
            degree_level: self.degree_level.parse::<DegreeLevel>()?,
            code: self.code,
            name: self.name,
            faculty: self.faculty,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = lecturers)]
struct LecturerRow {
    lecturer_id: i64,
    account_id: Option<i64>,
    employee_number: String,
    name: String,
    program_id: Option<i64>,
    phone: Option<String>,
}

/// Resolves the student record owned by an account.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
/// Returns `Ok(None)` if the account owns no student record.
pub fn find_student_by_account(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Option<StudentRecord>, PersistenceError> {
    debug!(account_id, "Resolving student record for account");

    let result: Result<StudentRow, diesel::result::Error> = students::table
        .filter(students::account_id.eq(account_id))
        .select(StudentRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_record()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the full profile of the student owned by an account.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
/// Returns `Ok(None)` if the account owns no student record.
pub fn get_student_profile(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Option<StudentProfileData>, PersistenceError> {
    debug!(account_id, "Loading student profile");

    let result: Result<(StudentRow, String, ProgramRow), diesel::result::Error> = students::table
        .inner_join(accounts::table)
        .inner_join(programs::table)
        .filter(students::account_id.eq(account_id))
        .select((
            StudentRow::as_select(),
            accounts::email,
            ProgramRow::as_select(),
        ))
        .first(conn);

    let (student, email, program): (StudentRow, String, ProgramRow) = match result {
        Ok(row) => row,
        Err(diesel::result::Error::NotFound) => return Ok(None),
        Err(e) => return Err(PersistenceError::from(e)),
    };

    let phone: Option<String> = student.phone.clone();
    let address: Option<String> = student.address.clone();
    let record: StudentRecord = student.into_record()?;
    let program: Program = program.into_program()?;

    Ok(Some(StudentProfileData {
        student_id: record.student_id,
        account_id: record.account_id,
        email,
        registration_number: record.registration_number,
        name: record.name,
        semester: record.semester,
        enrollment_year: record.enrollment_year,
        status: record.status,
        phone,
        address,
        program_id: program.program_id,
        program_code: program.code,
        program_name: program.name,
        faculty: program.faculty,
        degree_level: program.degree_level,
    }))
}

/// Returns whether a student already uses the registration number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn registration_number_exists(
    conn: &mut SqliteConnection,
    registration_number: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = students::table
        .filter(students::registration_number.eq(registration_number.trim()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Retrieves a study program.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
/// Returns `Ok(None)` if the program does not exist.
pub fn get_program(
    conn: &mut SqliteConnection,
    program_id: i64,
) -> Result<Option<Program>, PersistenceError> {
    let result: Result<ProgramRow, diesel::result::Error> = programs::table
        .filter(programs::program_id.eq(program_id))
        .select(ProgramRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_program()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Counts study programs.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_programs(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(programs::table.count().get_result(conn)?)
}

/// Retrieves the lecturer record owned by an account.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account owns no lecturer record.
pub fn find_lecturer_by_account(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Option<LecturerData>, PersistenceError> {
    let result: Result<LecturerRow, diesel::result::Error> = lecturers::table
        .filter(lecturers::account_id.eq(account_id))
        .select(LecturerRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(LecturerData {
            lecturer_id: row.lecturer_id,
            account_id: row.account_id,
            employee_number: row.employee_number,
            name: row.name,
            program_id: row.program_id,
            phone: row.phone,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
