// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Letter request mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use registrar_domain::{LetterStatus, LetterType};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::letter_requests;
use crate::error::PersistenceError;

/// Files a new letter request in `pending` status.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_letter(
    conn: &mut SqliteConnection,
    student_id: i64,
    letter_type: LetterType,
    purpose: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(letter_requests::table)
        .values((
            letter_requests::student_id.eq(student_id),
            letter_requests::letter_type.eq(letter_type.id()),
            letter_requests::purpose.eq(purpose.trim()),
            letter_requests::status.eq(LetterStatus::Pending.as_str()),
        ))
        .execute(conn)?;

    let letter_id: i64 = conn.get_last_insert_rowid()?;
    info!(letter_id, student_id, letter_type = letter_type.id(), "Letter request filed");
    Ok(letter_id)
}

/// Rewrites the purpose of a student's own pending request.
///
/// Returns the number of rows changed; zero means the request does not
/// exist, belongs to someone else, or is no longer pending.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_letter_purpose(
    conn: &mut SqliteConnection,
    letter_id: i64,
    student_id: i64,
    purpose: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(letter_requests::table)
        .filter(letter_requests::letter_id.eq(letter_id))
        .filter(letter_requests::student_id.eq(student_id))
        .filter(letter_requests::status.eq(LetterStatus::Pending.as_str()))
        .set((
            letter_requests::purpose.eq(purpose.trim()),
            letter_requests::updated_at.eq(diesel::dsl::sql::<
                diesel::sql_types::Nullable<diesel::sql_types::Text>,
            >("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?)
}

/// Moves a request to a new status, recording who changed it.
///
/// Returns the number of rows changed; zero means the request does not
/// exist.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_letter_status(
    conn: &mut SqliteConnection,
    letter_id: i64,
    status: LetterStatus,
    note: Option<&str>,
    updated_by: i64,
) -> Result<usize, PersistenceError> {
    info!(letter_id, status = %status, updated_by, "Updating letter status");

    Ok(diesel::update(letter_requests::table)
        .filter(letter_requests::letter_id.eq(letter_id))
        .set((
            letter_requests::status.eq(status.as_str()),
            letter_requests::note.eq(note),
            letter_requests::updated_by.eq(Some(updated_by)),
            letter_requests::updated_at.eq(diesel::dsl::sql::<
                diesel::sql_types::Nullable<diesel::sql_types::Text>,
            >("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?)
}

/// Deletes a letter request.
///
/// When `pending_for_student` is given, only that student's pending
/// request is eligible. Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_letter(
    conn: &mut SqliteConnection,
    letter_id: i64,
    pending_for_student: Option<i64>,
) -> Result<usize, PersistenceError> {
    let removed: usize = match pending_for_student {
        Some(student_id) => diesel::delete(letter_requests::table)
            .filter(letter_requests::letter_id.eq(letter_id))
            .filter(letter_requests::student_id.eq(student_id))
            .filter(letter_requests::status.eq(LetterStatus::Pending.as_str()))
            .execute(conn)?,
        None => diesel::delete(letter_requests::table)
            .filter(letter_requests::letter_id.eq(letter_id))
            .execute(conn)?,
    };

    info!(letter_id, removed, "Letter request deleted");
    Ok(removed)
}
