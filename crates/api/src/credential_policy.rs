// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential validation for self-service registration.

use thiserror::Error;

/// Credential policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialPolicyError {
    /// The email address is not of the form `local@domain.tld`.
    #[error("'{email}' is not a valid email address")]
    InvalidEmail { email: String },

    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    PasswordTooShort { min_length: usize },
}

/// Credential policy configuration.
pub struct CredentialPolicy {
    /// Minimum password length, in characters.
    pub min_password_length: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_password_length: 6,
        }
    }
}

impl CredentialPolicy {
    /// Validates an email address and password pair.
    ///
    /// # Errors
    ///
    /// Returns the first failed check.
    pub fn validate(&self, email: &str, password: &str) -> Result<(), CredentialPolicyError> {
        Self::validate_email(email)?;
        self.validate_password(password)
    }

    /// Validates the shape of an email address.
    ///
    /// Exactly one `@`, a non-empty local part, and a domain with a dot
    /// that is neither leading nor trailing. No whitespace anywhere.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEmail` if the shape does not match.
    pub fn validate_email(email: &str) -> Result<(), CredentialPolicyError> {
        let invalid = || CredentialPolicyError::InvalidEmail {
            email: email.to_string(),
        };

        let trimmed: &str = email.trim();
        if trimmed.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') {
            return Err(invalid());
        }

        let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
        if host.is_empty() || tld.is_empty() {
            return Err(invalid());
        }

        Ok(())
    }

    /// Validates a password's length.
    ///
    /// # Errors
    ///
    /// Returns `PasswordTooShort` if the password has fewer characters than
    /// the policy requires.
    pub fn validate_password(&self, password: &str) -> Result<(), CredentialPolicyError> {
        if password.chars().count() < self.min_password_length {
            return Err(CredentialPolicyError::PasswordTooShort {
                min_length: self.min_password_length,
            });
        }
        Ok(())
    }
}
