// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrative letter requests.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// Processing status of a letter request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    /// Submitted, not yet picked up.
    #[default]
    Pending,
    /// Being prepared by staff.
    Processing,
    /// Issued.
    Completed,
    /// Declined by staff.
    Rejected,
}

impl LetterStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Rejected,
    ];

    /// Converts this status to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for LetterStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidLetterStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LetterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kinds of letter a student may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterType {
    ActiveStatus,
    StudyCertificate,
    Recommendation,
    ResearchPermit,
    PracticumPermit,
    Other,
}

impl LetterType {
    /// Every letter type, in the order presented to students.
    pub const ALL: [Self; 6] = [
        Self::ActiveStatus,
        Self::StudyCertificate,
        Self::Recommendation,
        Self::ResearchPermit,
        Self::PracticumPermit,
        Self::Other,
    ];

    /// The stored identifier.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::ActiveStatus => "active_status",
            Self::StudyCertificate => "study_certificate",
            Self::Recommendation => "recommendation",
            Self::ResearchPermit => "research_permit",
            Self::PracticumPermit => "practicum_permit",
            Self::Other => "other",
        }
    }

    /// The human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ActiveStatus => "Certificate of Active Enrollment",
            Self::StudyCertificate => "Certificate of Study",
            Self::Recommendation => "Letter of Recommendation",
            Self::ResearchPermit => "Research Permit",
            Self::PracticumPermit => "Practicum Permit",
            Self::Other => "Other",
        }
    }
}

impl FromStr for LetterType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|letter_type| letter_type.id() == s)
            .ok_or_else(|| DomainError::InvalidLetterType(s.to_string()))
    }
}
