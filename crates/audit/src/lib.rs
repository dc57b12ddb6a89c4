// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::str::FromStr;
use time::OffsetDateTime;

/// The account that triggered an audited change.
///
/// Enrollment entries record who acted so that an administrator adding a
/// course on a student's behalf is distinguishable from self-service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The acting account's identifier, as text.
    pub id: String,
    /// The acting account's role (e.g., "student", "admin").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The acting account's identifier
    /// * `actor_type` - The acting account's role
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// The enrollment action recorded by an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentAction {
    /// A course was added to the student's registration.
    Add,
}

impl EnrollmentAction {
    /// Converts this action to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
        }
    }
}

impl FromStr for EnrollmentAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            _ => Err(format!("Unknown enrollment action: {s}")),
        }
    }
}

impl std::fmt::Display for EnrollmentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An append-only record of an enrollment change.
///
/// Entries are written in the same transaction as the enrollment they
/// describe and are never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentAuditEntry {
    /// The persisted identifier, `None` until stored.
    pub audit_id: Option<i64>,
    /// The student whose registration changed.
    pub student_id: i64,
    /// The course involved.
    pub course_id: i64,
    /// Who performed the change.
    pub actor: Actor,
    /// What happened.
    pub action: EnrollmentAction,
    /// When it happened.
    pub recorded_at: OffsetDateTime,
}

impl EnrollmentAuditEntry {
    /// Creates an unsaved audit entry.
    #[must_use]
    pub const fn new(
        student_id: i64,
        course_id: i64,
        actor: Actor,
        action: EnrollmentAction,
        recorded_at: OffsetDateTime,
    ) -> Self {
        Self {
            audit_id: None,
            student_id,
            course_id,
            actor,
            action,
            recorded_at,
        }
    }

    /// Returns a copy carrying the persisted identifier.
    #[must_use]
    pub fn with_audit_id(self, audit_id: i64) -> Self {
        Self {
            audit_id: Some(audit_id),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("42"), String::from("student"));

        assert_eq!(actor.id, "42");
        assert_eq!(actor.actor_type, "student");
    }

    #[test]
    fn test_enrollment_action_round_trips_storage_form() {
        assert_eq!(EnrollmentAction::Add.as_str(), "add");
        assert_eq!("add".parse::<EnrollmentAction>(), Ok(EnrollmentAction::Add));
        assert!("remove".parse::<EnrollmentAction>().is_err());
    }

    #[test]
    fn test_new_entry_is_unsaved() {
        let entry: EnrollmentAuditEntry = EnrollmentAuditEntry::new(
            3,
            7,
            Actor::new(String::from("42"), String::from("student")),
            EnrollmentAction::Add,
            datetime!(2024-02-01 08:30 UTC),
        );

        assert_eq!(entry.audit_id, None);
        assert_eq!(entry.student_id, 3);
        assert_eq!(entry.course_id, 7);
    }

    #[test]
    fn test_with_audit_id_keeps_other_fields() {
        let entry: EnrollmentAuditEntry = EnrollmentAuditEntry::new(
            3,
            7,
            Actor::new(String::from("1"), String::from("admin")),
            EnrollmentAction::Add,
            datetime!(2024-02-01 08:30 UTC),
        );
        let saved: EnrollmentAuditEntry = entry.clone().with_audit_id(11);

        assert_eq!(saved.audit_id, Some(11));
        assert_eq!(saved.actor, entry.actor);
        assert_eq!(saved.recorded_at, entry.recorded_at);
    }
}
