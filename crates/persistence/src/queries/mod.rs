// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `accounts` — accounts, sessions and password checks
//! - `students` — student records, profiles, programs and lecturers
//! - `courses` — course offerings and the enrollment aggregates the
//!   rule-checker needs
//! - `enrollments` — enrollment records and the audit history
//! - `letters` — letter requests and their status counts

pub mod accounts;
pub mod courses;
pub mod enrollments;
pub mod letters;
pub mod students;
