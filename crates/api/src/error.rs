// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::credential_policy::CredentialPolicyError;
use registrar::CoreError;
use registrar_domain::DomainError;
use registrar_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Who may perform the action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller is authenticated but may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Who may perform the action.
        required_role: String,
    },
    /// A registration rule rejected the request.
    DomainRuleViolation {
        /// The stable rule tag.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The request collides with existing state.
    Conflict {
        /// The stable rule tag.
        rule: String,
        /// A human-readable description of the collision.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Credential policy violation.
    CredentialPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the rule tag for rule violations and conflicts.
    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::DomainRuleViolation { rule, .. } | Self::Conflict { rule, .. } => Some(rule),
            _ => None,
        }
    }

    /// Shorthand for a missing or malformed request field.
    #[must_use]
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for a missing resource.
    #[must_use]
    pub fn not_found(resource_type: &str, message: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::DomainRuleViolation { message, .. } | Self::Conflict { message, .. } => {
                write!(f, "{message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::CredentialPolicyViolation { message } => {
                write!(f, "Credential policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<CredentialPolicyError> for ApiError {
    fn from(err: CredentialPolicyError) -> Self {
        Self::CredentialPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::DuplicateEmail(_) => Self::Conflict {
                rule: String::from("duplicate-email"),
                message: err.to_string(),
            },
            PersistenceError::DuplicateRegistrationNumber(_) => Self::Conflict {
                rule: String::from("duplicate-registration-number"),
                message: err.to_string(),
            },
            PersistenceError::ProgramNotFound(program_id) => Self::ResourceNotFound {
                resource_type: String::from("Program"),
                message: format!("Program {program_id} does not exist"),
            },
            _ => Self::Internal {
                message: format!("Database error: {err}"),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// Rule failures keep their tag; duplicates and clashes become conflicts.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    if let Some(rule) = err.rule() {
        let rule: String = rule.to_string();
        let message: String = err.to_string();
        return if err.is_conflict() {
            ApiError::Conflict { rule, message }
        } else {
            ApiError::DomainRuleViolation { rule, message }
        };
    }

    let message: String = err.to_string();
    match err {
        DomainError::StudentNotFound { .. } => ApiError::not_found("Student", message),
        DomainError::CourseNotFound { .. } => ApiError::not_found("Course", message),
        DomainError::EnrollmentNotFound { .. } => ApiError::not_found("Enrollment", message),
        DomainError::InvalidAcademicYear(msg) => ApiError::invalid_input("academic_year", msg),
        DomainError::InvalidTimeWindow(msg) => ApiError::invalid_input("schedule", msg),
        DomainError::InvalidWeekday(msg) => ApiError::invalid_input("day", msg),
        DomainError::InvalidSemester(msg) => ApiError::invalid_input("semester", msg),
        DomainError::InvalidStudentStatus(msg) | DomainError::InvalidLetterStatus(msg) => {
            ApiError::invalid_input("status", msg)
        }
        DomainError::InvalidDegreeLevel(msg) => ApiError::invalid_input("degree_level", msg),
        DomainError::InvalidLetterType(msg) => ApiError::invalid_input("letter_type", msg),
        DomainError::InvalidName(msg) => ApiError::invalid_input("name", msg),
        DomainError::InvalidRegistrationNumber(msg) => {
            ApiError::invalid_input("registration_number", msg)
        }
        // Tagged variants returned above
        DomainError::SemesterNotEligible { .. }
        | DomainError::AlreadyEnrolled { .. }
        | DomainError::CapacityFull { .. }
        | DomainError::CreditLimitExceeded { .. }
        | DomainError::ScheduleClash { .. } => ApiError::Internal { message },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Gateway(gateway_err) => ApiError::Internal {
            message: format!("Enrollment storage failed: {gateway_err}"),
        },
    }
}
