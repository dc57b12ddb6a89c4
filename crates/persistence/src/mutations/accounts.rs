// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account, registration and session mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::NewStudentAccount;
use crate::diesel_schema::{accounts, sessions, students};
use crate::error::PersistenceError;
use crate::queries::accounts::{email_exists, normalize_email};
use crate::queries::students::{get_program, registration_number_exists};

/// Creates an account with a bcrypt-hashed password.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The email address (normalized to lowercase)
/// * `password` - The plain-text password
/// * `role` - One of `student`, `lecturer` or `admin`
///
/// # Errors
///
/// Returns an error if hashing fails or the email is already in use.
pub fn create_account(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
    role: &str,
) -> Result<i64, PersistenceError> {
    let normalized: String = normalize_email(email);
    info!(email = %normalized, role, "Creating account");

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(accounts::table)
        .values((
            accounts::email.eq(&normalized),
            accounts::password_hash.eq(&password_hash),
            accounts::role.eq(role),
        ))
        .execute(conn)?;

    let account_id: i64 = conn.get_last_insert_rowid()?;
    info!(account_id, "Account created");
    Ok(account_id)
}

/// Registers a student: an account with role `student` plus its student
/// record with status `active`.
///
/// Must run inside a transaction so that a failure after the account
/// insert leaves nothing behind.
///
/// # Errors
///
/// Returns `DuplicateEmail`, `DuplicateRegistrationNumber` or
/// `ProgramNotFound` when the corresponding check fails, or a database
/// error.
pub fn register_student(
    conn: &mut SqliteConnection,
    student: &NewStudentAccount,
) -> Result<i64, PersistenceError> {
    if email_exists(conn, &student.email)? {
        return Err(PersistenceError::DuplicateEmail(normalize_email(
            &student.email,
        )));
    }
    let registration_number: &str = student.registration_number.trim();
    if registration_number_exists(conn, registration_number)? {
        return Err(PersistenceError::DuplicateRegistrationNumber(
            registration_number.to_string(),
        ));
    }
    if get_program(conn, student.program_id)?.is_none() {
        return Err(PersistenceError::ProgramNotFound(student.program_id));
    }

    let account_id: i64 = create_account(conn, &student.email, &student.password, "student")?;

    diesel::insert_into(students::table)
        .values((
            students::account_id.eq(account_id),
            students::registration_number.eq(registration_number),
            students::name.eq(student.name.trim()),
            students::program_id.eq(student.program_id),
            students::semester.eq(i32::from(student.semester)),
            students::enrollment_year.eq(i32::from(student.enrollment_year)),
        ))
        .execute(conn)?;

    info!(account_id, registration_number, "Student registered");
    Ok(account_id)
}

/// Updates a student's name and current semester.
///
/// Returns the number of rows changed.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_student(
    conn: &mut SqliteConnection,
    account_id: i64,
    name: &str,
    semester: u8,
) -> Result<usize, PersistenceError> {
    info!(account_id, semester, "Updating student record");

    Ok(diesel::update(students::table)
        .filter(students::account_id.eq(account_id))
        .set((
            students::name.eq(name.trim()),
            students::semester.eq(i32::from(semester)),
        ))
        .execute(conn)?)
}

/// Records a successful login.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<(), PersistenceError> {
    debug!(account_id, "Updating last_login_at");

    diesel::update(accounts::table)
        .filter(accounts::account_id.eq(account_id))
        .set(accounts::last_login_at.eq(diesel::dsl::sql::<
            diesel::sql_types::Nullable<diesel::sql_types::Text>,
        >("CURRENT_TIMESTAMP")))
        .execute(conn)?;

    Ok(())
}

/// Sets whether an account may log in.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn set_account_active(
    conn: &mut SqliteConnection,
    account_id: i64,
    active: bool,
) -> Result<usize, PersistenceError> {
    info!(account_id, active, "Changing account activation");

    Ok(diesel::update(accounts::table)
        .filter(accounts::account_id.eq(account_id))
        .set(accounts::is_active.eq(i32::from(active)))
        .execute(conn)?)
}

/// Creates a bearer session.
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    account_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::account_id.eq(account_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = conn.get_last_insert_rowid()?;
    debug!(session_id, account_id, expires_at, "Session created");
    Ok(session_id)
}

/// Touches a session's last activity timestamp.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
            "CURRENT_TIMESTAMP",
        )))
        .execute(conn)?;
    Ok(())
}

/// Deletes a session by token.
///
/// Returns the number of sessions removed.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;
    debug!(removed, "Session deleted");
    Ok(removed)
}

/// Deletes sessions whose expiry is before `now`.
///
/// Both values are ISO 8601 UTC strings of the same shape, so text
/// comparison follows time order.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(now))
        .execute(conn)?;
    if removed > 0 {
        info!(removed, "Expired sessions removed");
    }
    Ok(removed)
}
