// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use registrar_domain::{DegreeLevel, WeeklyWindow};
use registrar_persistence::{NewCourse, NewStudentAccount, Persistence};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{AuthenticatedActor, RegisterRequest, Role};

pub const TEST_PASSWORD: &str = "hunter22";

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory database")
}

pub fn create_test_ttl() -> Duration {
    Duration::hours(24)
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2023-08-14 09:30:00 UTC)
}

pub fn seed_program(persistence: &mut Persistence) -> i64 {
    persistence
        .create_program("IF", "Informatics", "Engineering", DegreeLevel::S1)
        .expect("Failed to create program")
}

pub fn create_test_register_request(program_id: i64) -> RegisterRequest {
    RegisterRequest {
        email: Some(String::from("Dewi@Campus.test")),
        password: Some(String::from(TEST_PASSWORD)),
        name: Some(String::from("Dewi Lestari")),
        registration_number: Some(String::from("2022001")),
        program_id: Some(program_id),
        enrollment_year: Some(2022),
        semester: Some(3),
    }
}

/// Registers a student directly through persistence.
pub fn create_test_student(
    persistence: &mut Persistence,
    program_id: i64,
    email: &str,
    registration_number: &str,
    semester: u8,
) -> AuthenticatedActor {
    let account_id: i64 = persistence
        .register_student(&NewStudentAccount {
            email: email.to_string(),
            password: String::from(TEST_PASSWORD),
            name: String::from("Dewi Lestari"),
            registration_number: registration_number.to_string(),
            program_id,
            enrollment_year: 2022,
            semester,
        })
        .expect("Failed to register student");
    AuthenticatedActor::new(account_id, email.to_lowercase(), Role::Student)
}

pub fn create_test_lecturer(persistence: &mut Persistence, program_id: i64) -> AuthenticatedActor {
    let account_id: i64 = persistence
        .create_account("budi@campus.test", TEST_PASSWORD, "lecturer")
        .expect("Failed to create lecturer account");
    persistence
        .create_lecturer(Some(account_id), "L-001", "Budi Santoso", Some(program_id))
        .expect("Failed to create lecturer");
    AuthenticatedActor::new(account_id, String::from("budi@campus.test"), Role::Lecturer)
}

pub fn create_test_admin(persistence: &mut Persistence) -> AuthenticatedActor {
    let account_id: i64 = persistence
        .create_admin_account("admin@campus.test", TEST_PASSWORD)
        .expect("Failed to create admin");
    AuthenticatedActor::new(account_id, String::from("admin@campus.test"), Role::Admin)
}

pub fn seed_course(
    persistence: &mut Persistence,
    program_id: i64,
    code: &str,
    credits: u32,
    window: (&str, &str, &str),
) -> i64 {
    persistence
        .create_course(&NewCourse {
            code: code.to_string(),
            name: format!("Course {code}"),
            credits,
            program_id,
            lecturer_id: None,
            capacity: 30,
            window: WeeklyWindow::parse(window.0, window.1, window.2)
                .expect("Invalid test window"),
            min_semester: 1,
        })
        .expect("Failed to create course")
}
