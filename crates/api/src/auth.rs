// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use registrar_audit::Actor;
use registrar_persistence::{AccountData, Persistence, SessionData, verify_password};
use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// Account roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A student: registers for courses and requests letters for themselves.
    Student,
    /// A lecturer: reads and processes letter requests.
    Lecturer,
    /// An administrator: full access, including other students' records.
    Admin,
}

impl Role {
    /// Parses the stored role tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is unknown.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value {
            "student" => Ok(Self::Student),
            "lecturer" => Ok(Self::Lecturer),
            "admin" => Ok(Self::Admin),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {value}"),
            }),
        }
    }

    /// The stored role tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Lecturer => "lecturer",
            Self::Admin => "admin",
        }
    }
}

/// An authenticated account with its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The account identifier.
    pub account_id: i64,
    /// The account's normalized email.
    pub email: String,
    /// The role assigned to the account.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(account_id: i64, email: String, role: Role) -> Self {
        Self {
            account_id,
            email,
            role,
        }
    }

    /// Converts this actor into the audit representation.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.account_id.to_string(), self.role.as_str().to_string())
    }

    fn from_account(account: &AccountData) -> Result<Self, AuthError> {
        Ok(Self::new(
            account.account_id,
            account.email.clone(),
            Role::parse(&account.role)?,
        ))
    }
}

fn unauthorized(action: &str, required_role: &str) -> AuthError {
    AuthError::Unauthorized {
        action: action.to_string(),
        required_role: required_role.to_string(),
    }
}

/// Role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Course registration actions (listing the catalog, enrolling,
    /// withdrawing, viewing history) are for students only.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a student.
    pub fn authorize_course_registration(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Student => Ok(()),
            Role::Lecturer | Role::Admin => Err(unauthorized(action, "Student role")),
        }
    }

    /// A student record may be read or changed by an admin or its owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither.
    pub fn authorize_student_record(
        actor: &AuthenticatedActor,
        account_id: i64,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Student if actor.account_id == account_id => Ok(()),
            Role::Student | Role::Lecturer => Err(unauthorized(action, "Admin role or ownership")),
        }
    }

    /// Only students file letter requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a student.
    pub fn authorize_create_letter(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Student => Ok(()),
            Role::Lecturer | Role::Admin => Err(unauthorized("create_letter", "Student role")),
        }
    }

    /// Staff (lecturers and admins) process letter requests and read
    /// their statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a student.
    pub fn authorize_process_letters(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Lecturer | Role::Admin => Ok(()),
            Role::Student => Err(unauthorized(action, "Lecturer or Admin role")),
        }
    }

    /// Students delete their own pending requests; admins delete any.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a lecturer.
    pub fn authorize_delete_letter(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Student | Role::Admin => Ok(()),
            Role::Lecturer => Err(unauthorized("delete_letter", "Student or Admin role")),
        }
    }
}

/// Session-based bearer authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Checks credentials and issues a session.
    ///
    /// Unknown email and wrong password produce the same error.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `account`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong, the account is
    /// deactivated, or storage fails.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
        session_ttl: Duration,
    ) -> Result<(String, AuthenticatedActor, AccountData), AuthError> {
        let bad_credentials = || AuthError::AuthenticationFailed {
            reason: String::from("Invalid email or password"),
        };

        let account: AccountData = persistence
            .get_account_by_email(email)
            .map_err(Self::database_error)?
            .ok_or_else(bad_credentials)?;

        let matches: bool =
            verify_password(password, &account.password_hash).map_err(Self::database_error)?;
        if !matches {
            warn!(account_id = account.account_id, "Rejected login with wrong password");
            return Err(bad_credentials());
        }

        if !account.is_active {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is deactivated"),
            });
        }

        let actor: AuthenticatedActor = AuthenticatedActor::from_account(&account)?;
        let session_token: String =
            Self::issue_session(persistence, account.account_id, session_ttl)?;

        persistence
            .update_last_login(account.account_id)
            .map_err(Self::database_error)?;

        info!(account_id = account.account_id, role = actor.role.as_str(), "Login succeeded");
        Ok((session_token, actor, account))
    }

    /// Creates a session for an account and returns its token.
    ///
    /// Expired sessions are swept first.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn issue_session(
        persistence: &mut Persistence,
        account_id: i64,
        session_ttl: Duration,
    ) -> Result<String, AuthError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let now_str: String = Self::format_timestamp(now)?;
        persistence
            .delete_expired_sessions(&now_str)
            .map_err(Self::database_error)?;

        let session_token: String = Self::generate_session_token();
        let expires_at: String = Self::format_timestamp(now + session_ttl)?;

        persistence
            .create_session(&session_token, account_id, &expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        Ok(session_token)
    }

    /// Validates a bearer token.
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_actor`, `account`)
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown or expired, or the account
    /// is missing or deactivated.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, AccountData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::database_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT).map_err(|e| {
                AuthError::AuthenticationFailed {
                    reason: format!("Failed to parse session expiration: {e}"),
                }
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            debug!(session_id = session.session_id, "Session expired");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let account: AccountData = persistence
            .get_account_by_id(session.account_id)
            .map_err(Self::database_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Account not found"),
            })?;

        if !account.is_active {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is deactivated"),
            });
        }

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::database_error)?;

        Ok((AuthenticatedActor::from_account(&account)?, account))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;
        Ok(())
    }

    /// Generates an opaque 256-bit token, hex-encoded.
    fn generate_session_token() -> String {
        format!(
            "{:032x}{:032x}",
            rand::random::<u128>(),
            rand::random::<u128>()
        )
    }

    fn format_timestamp(value: OffsetDateTime) -> Result<String, AuthError> {
        value
            .format(&Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format timestamp: {e}"),
            })
    }

    fn database_error(err: registrar_persistence::PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
