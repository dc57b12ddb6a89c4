// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! - `accounts` — accounts, registration and sessions
//! - `catalog` — programs, lecturers and course offerings
//! - `enrollments` — enrollment records and audit entries
//! - `letters` — letter request lifecycle

pub mod accounts;
pub mod catalog;
pub mod enrollments;
pub mod letters;
