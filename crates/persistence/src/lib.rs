// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the registrar backend.
//!
//! Built on Diesel over `SQLite`. Migrations are embedded and applied on
//! open; foreign key enforcement is verified before the handle is handed
//! out. In-memory databases are unique per [`Persistence::new_in_memory`]
//! call, so tests never share state.
//!
//! Queries and mutations take a `&mut SqliteConnection` and live in
//! `queries/` and `mutations/`. [`Persistence`] owns the connection and
//! the transaction boundaries.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::{Connection, SqliteConnection};
use registrar::{
    CoreError, EnrollmentOutcome, EnrollmentRequest, GatewayError, attempt_enroll,
    withdraw_enroll,
};
use registrar_domain::{
    AcademicYear, CourseOffering, DegreeLevel, LetterStatus, LetterType, Program,
    StudentRecord,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::{info, warn};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod gateway;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    AccountData, EnrolledCourseData, EnrollmentHistoryData, LecturerData, LetterRequestData,
    LetterStatsData, NewCourse, NewStudentAccount, SessionData, StudentProfileData,
};
pub use error::PersistenceError;
pub use gateway::SqliteGateway;
pub use queries::accounts::{normalize_email, verify_password};

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Error carried out of a Diesel transaction closure that drives the
/// rule-checker.
enum TxError {
    Core(CoreError),
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err)
    }
}

impl From<TxError> for CoreError {
    fn from(err: TxError) -> Self {
        match err {
            TxError::Core(err) => err,
            TxError::Database(err) => {
                Self::Gateway(GatewayError::from(PersistenceError::from(err)))
            }
        }
    }
}

/// Error carried out of a Diesel transaction closure that returns
/// persistence errors.
enum PersistTxError {
    Persistence(PersistenceError),
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for PersistTxError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err)
    }
}

impl From<PersistTxError> for PersistenceError {
    fn from(err: PersistTxError) -> Self {
        match err {
            PersistTxError::Persistence(err) => err,
            PersistTxError::Database(err) => Self::from(err),
        }
    }
}

/// Owns the database connection and exposes the registrar's storage
/// operations.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// Each call receives its own shared-cache database name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:registrar_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter over a database file, creating it if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Round-trips a trivial query.
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer.
    pub fn ping(&mut self) -> Result<(), PersistenceError> {
        self.conn.ping()
    }

    // ========================================================================
    // Accounts & Sessions
    // ========================================================================

    /// Creates an account with the given role.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the email is taken.
    pub fn create_account(
        &mut self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::accounts::create_account(&mut self.conn, email, password, role)
    }

    /// Creates an administrator account.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the email is taken.
    pub fn create_admin_account(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::accounts::create_account(&mut self.conn, email, password, "admin")
    }

    /// Registers a student account and student record atomically.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail`, `DuplicateRegistrationNumber` or
    /// `ProgramNotFound` when a check fails, or a database error. Nothing
    /// is written on failure.
    pub fn register_student(
        &mut self,
        student: &NewStudentAccount,
    ) -> Result<i64, PersistenceError> {
        self.conn
            .transaction::<_, PersistTxError, _>(|conn| {
                mutations::accounts::register_student(conn, student)
                    .map_err(PersistTxError::Persistence)
            })
            .map_err(PersistenceError::from)
    }

    /// Retrieves an account by email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_account_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account_by_email(&mut self.conn, email)
    }

    /// Retrieves an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_account_by_id(
        &mut self,
        account_id: i64,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account_by_id(&mut self.conn, account_id)
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, account_id: i64) -> Result<(), PersistenceError> {
        mutations::accounts::update_last_login(&mut self.conn, account_id)
    }

    /// Activates or deactivates an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_account_active(
        &mut self,
        account_id: i64,
        active: bool,
    ) -> Result<usize, PersistenceError> {
        mutations::accounts::set_account_active(&mut self.conn, account_id, active)
    }

    /// Stores a bearer session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        account_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::accounts::create_session(&mut self.conn, session_token, account_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::accounts::get_session_by_token(&mut self.conn, session_token)
    }

    /// Refreshes a session's last-activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::accounts::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<usize, PersistenceError> {
        mutations::accounts::delete_session(&mut self.conn, session_token)
    }

    /// Deletes every session that expired before `now` (ISO 8601).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::accounts::delete_expired_sessions(&mut self.conn, now)
    }

    // ========================================================================
    // Students & Lecturers
    // ========================================================================

    /// Resolves the student record owned by an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_student_by_account(
        &mut self,
        account_id: i64,
    ) -> Result<Option<StudentRecord>, PersistenceError> {
        queries::students::find_student_by_account(&mut self.conn, account_id)
    }

    /// Retrieves a student's full profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_student_profile(
        &mut self,
        account_id: i64,
    ) -> Result<Option<StudentProfileData>, PersistenceError> {
        queries::students::get_student_profile(&mut self.conn, account_id)
    }

    /// Updates a student's name and semester.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_student(
        &mut self,
        account_id: i64,
        name: &str,
        semester: u8,
    ) -> Result<usize, PersistenceError> {
        mutations::accounts::update_student(&mut self.conn, account_id, name, semester)
    }

    /// Resolves the lecturer record owned by an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_lecturer_by_account(
        &mut self,
        account_id: i64,
    ) -> Result<Option<LecturerData>, PersistenceError> {
        queries::students::find_lecturer_by_account(&mut self.conn, account_id)
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Creates a study program.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_program(
        &mut self,
        code: &str,
        name: &str,
        faculty: &str,
        degree_level: DegreeLevel,
    ) -> Result<i64, PersistenceError> {
        mutations::catalog::create_program(&mut self.conn, code, name, faculty, degree_level)
    }

    /// Retrieves a study program.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_program(&mut self, program_id: i64) -> Result<Option<Program>, PersistenceError> {
        queries::students::get_program(&mut self.conn, program_id)
    }

    /// Counts study programs.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_programs(&mut self) -> Result<i64, PersistenceError> {
        queries::students::count_programs(&mut self.conn)
    }

    /// Creates a lecturer.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_lecturer(
        &mut self,
        account_id: Option<i64>,
        employee_number: &str,
        name: &str,
        program_id: Option<i64>,
    ) -> Result<i64, PersistenceError> {
        mutations::catalog::create_lecturer(
            &mut self.conn,
            account_id,
            employee_number,
            name,
            program_id,
        )
    }

    /// Creates a course offering.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_course(&mut self, course: &NewCourse) -> Result<i64, PersistenceError> {
        mutations::catalog::create_course(&mut self.conn, course)
    }

    /// Resolves a course offering.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_course(
        &mut self,
        course_id: i64,
    ) -> Result<Option<CourseOffering>, PersistenceError> {
        queries::courses::find_course(&mut self.conn, course_id)
    }

    /// Lists a program's course offerings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_courses_for_program(
        &mut self,
        program_id: i64,
    ) -> Result<Vec<CourseOffering>, PersistenceError> {
        queries::courses::list_courses_for_program(&mut self.conn, program_id)
    }

    /// Counts enrollment records referencing a course.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_enrollments_for_course(
        &mut self,
        course_id: i64,
    ) -> Result<i64, PersistenceError> {
        queries::courses::count_enrollments_for_course(&mut self.conn, course_id)
    }

    // ========================================================================
    // Enrollment
    // ========================================================================

    /// Runs the enrollment rule-checker inside one transaction.
    ///
    /// Either the enrollment and its audit entry are both committed, or
    /// nothing is.
    ///
    /// # Errors
    ///
    /// Returns the first failed rule as a `DomainViolation`, or a
    /// `Gateway` error if storage fails.
    pub fn enroll(
        &mut self,
        request: &EnrollmentRequest,
        now: OffsetDateTime,
    ) -> Result<EnrollmentOutcome, CoreError> {
        let result: Result<EnrollmentOutcome, TxError> =
            self.conn.transaction::<_, TxError, _>(|conn| {
                attempt_enroll(&mut SqliteGateway::new(conn), request, now).map_err(TxError::Core)
            });

        match result {
            Ok(outcome) => {
                info!(
                    enrollment_id = outcome.enrollment.enrollment_id,
                    course = %outcome.course.code,
                    "Enrollment committed"
                );
                Ok(outcome)
            }
            Err(err) => {
                let err: CoreError = err.into();
                warn!(
                    account_id = request.account_id,
                    course_id = request.course_id,
                    error = %err,
                    "Enrollment rejected"
                );
                Err(err)
            }
        }
    }

    /// Removes every enrollment of the student in the course, inside one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `EnrollmentNotFound` if nothing matched, or a `Gateway`
    /// error if storage fails.
    pub fn withdraw(&mut self, student_id: i64, course_id: i64) -> Result<usize, CoreError> {
        self.conn
            .transaction::<_, TxError, _>(|conn| {
                withdraw_enroll(&mut SqliteGateway::new(conn), student_id, course_id)
                    .map_err(TxError::Core)
            })
            .map_err(CoreError::from)
    }

    /// Lists a student's enrollments with optional filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_enrollments_for_student(
        &mut self,
        student_id: i64,
        academic_year: Option<&AcademicYear>,
        semester: Option<u8>,
    ) -> Result<Vec<EnrolledCourseData>, PersistenceError> {
        queries::enrollments::list_enrollments_for_student(
            &mut self.conn,
            student_id,
            academic_year,
            semester,
        )
    }

    /// Lists a student's enrollment audit entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_for_student(
        &mut self,
        student_id: i64,
    ) -> Result<Vec<EnrollmentHistoryData>, PersistenceError> {
        queries::enrollments::list_audit_for_student(&mut self.conn, student_id)
    }

    // ========================================================================
    // Letters
    // ========================================================================

    /// Files a letter request.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_letter(
        &mut self,
        student_id: i64,
        letter_type: LetterType,
        purpose: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::letters::create_letter(&mut self.conn, student_id, letter_type, purpose)
    }

    /// Lists letter requests, optionally for one student.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_letters(
        &mut self,
        student_id: Option<i64>,
    ) -> Result<Vec<LetterRequestData>, PersistenceError> {
        queries::letters::list_letters(&mut self.conn, student_id)
    }

    /// Retrieves a letter request, optionally scoped to one student.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_letter(
        &mut self,
        letter_id: i64,
        student_id: Option<i64>,
    ) -> Result<Option<LetterRequestData>, PersistenceError> {
        queries::letters::get_letter(&mut self.conn, letter_id, student_id)
    }

    /// Rewrites the purpose of a student's own pending request.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_letter_purpose(
        &mut self,
        letter_id: i64,
        student_id: i64,
        purpose: &str,
    ) -> Result<usize, PersistenceError> {
        mutations::letters::update_letter_purpose(&mut self.conn, letter_id, student_id, purpose)
    }

    /// Moves a request to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_letter_status(
        &mut self,
        letter_id: i64,
        status: LetterStatus,
        note: Option<&str>,
        updated_by: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::letters::update_letter_status(
            &mut self.conn,
            letter_id,
            status,
            note,
            updated_by,
        )
    }

    /// Deletes a letter request.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_letter(
        &mut self,
        letter_id: i64,
        pending_for_student: Option<i64>,
    ) -> Result<usize, PersistenceError> {
        mutations::letters::delete_letter(&mut self.conn, letter_id, pending_for_student)
    }

    /// Counts letter requests per status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn letter_stats(&mut self) -> Result<LetterStatsData, PersistenceError> {
        queries::letters::letter_stats(&mut self.conn)
    }
}
