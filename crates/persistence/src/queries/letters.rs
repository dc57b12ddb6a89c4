// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Letter request queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use registrar_domain::LetterStatus;

use crate::data_models::{LetterRequestData, LetterStatsData};
use crate::diesel_schema::{letter_requests, students};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = letter_requests)]
struct LetterRow {
    letter_id: i64,
    student_id: i64,
    letter_type: String,
    purpose: String,
    status: String,
    note: Option<String>,
    updated_by: Option<i64>,
    created_at: String,
    updated_at: Option<String>,
}

impl LetterRow {
    fn into_data(
        self,
        student_name: String,
        registration_number: String,
    ) -> Result<LetterRequestData, PersistenceError> {
        Ok(LetterRequestData {
            letter_id: self.letter_id,
            student_id: self.student_id,
            student_name,
            registration_number,
            letter_type: self.letter_type,
            purpose: self.purpose,
            status: self.status.parse::<LetterStatus>()?,
            note: self.note,
            updated_by: self.updated_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Lists letter requests, newest first.
///
/// When `student_id` is given only that student's requests are returned.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_letters(
    conn: &mut SqliteConnection,
    student_id: Option<i64>,
) -> Result<Vec<LetterRequestData>, PersistenceError> {
    let mut query = letter_requests::table
        .inner_join(students::table)
        .select((
            LetterRow::as_select(),
            students::name,
            students::registration_number,
        ))
        .order((letter_requests::created_at.desc(), letter_requests::letter_id.desc()))
        .into_boxed();

    if let Some(student_id) = student_id {
        query = query.filter(letter_requests::student_id.eq(student_id));
    }

    let rows: Vec<(LetterRow, String, String)> = query.load(conn)?;

    rows.into_iter()
        .map(|(row, name, number)| row.into_data(name, number))
        .collect()
}

/// Retrieves a letter request.
///
/// When `student_id` is given the request must belong to that student.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
/// Returns `Ok(None)` if no visible request matches.
pub fn get_letter(
    conn: &mut SqliteConnection,
    letter_id: i64,
    student_id: Option<i64>,
) -> Result<Option<LetterRequestData>, PersistenceError> {
    let mut query = letter_requests::table
        .inner_join(students::table)
        .filter(letter_requests::letter_id.eq(letter_id))
        .select((
            LetterRow::as_select(),
            students::name,
            students::registration_number,
        ))
        .into_boxed();

    if let Some(student_id) = student_id {
        query = query.filter(letter_requests::student_id.eq(student_id));
    }

    let result: Result<(LetterRow, String, String), diesel::result::Error> = query.first(conn);

    match result {
        Ok((row, name, number)) => Ok(Some(row.into_data(name, number)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Counts letter requests per status.
///
/// # Errors
///
/// Returns an error if the query fails or a stored status is unknown.
pub fn letter_stats(conn: &mut SqliteConnection) -> Result<LetterStatsData, PersistenceError> {
    let rows: Vec<(String, i64)> = letter_requests::table
        .group_by(letter_requests::status)
        .select((
            letter_requests::status,
            diesel::dsl::count(letter_requests::letter_id),
        ))
        .load(conn)?;

    let mut stats: LetterStatsData = LetterStatsData::default();
    for (status, count) in rows {
        match status.parse::<LetterStatus>()? {
            LetterStatus::Pending => stats.pending = count,
            LetterStatus::Processing => stats.processing = count,
            LetterStatus::Completed => stats.completed = count,
            LetterStatus::Rejected => stats.rejected = count,
        }
    }
    Ok(stats)
}
