// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use registrar::EnrollmentRequest;
use registrar_audit::Actor;
use registrar_domain::{AcademicYear, DegreeLevel, WeeklyWindow};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{NewCourse, NewStudentAccount, Persistence};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_year() -> AcademicYear {
    "2023/2024".parse().unwrap()
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2023-08-14 09:30:00 UTC)
}

pub fn seed_program(persistence: &mut Persistence) -> i64 {
    persistence
        .create_program("IF", "Informatics", "Engineering", DegreeLevel::S1)
        .unwrap()
}

pub fn create_test_student_account(
    program_id: i64,
    email: &str,
    registration_number: &str,
    semester: u8,
) -> NewStudentAccount {
    NewStudentAccount {
        email: email.to_string(),
        password: String::from("hunter22"),
        name: String::from("Dewi Lestari"),
        registration_number: registration_number.to_string(),
        program_id,
        enrollment_year: 2022,
        semester,
    }
}

/// Registers a student and returns `(account_id, student_id)`.
pub fn seed_student(persistence: &mut Persistence, program_id: i64, semester: u8) -> (i64, i64) {
    let account_id: i64 = persistence
        .register_student(&create_test_student_account(
            program_id,
            "dewi@campus.test",
            "2022001",
            semester,
        ))
        .unwrap();
    let student_id: i64 = persistence
        .find_student_by_account(account_id)
        .unwrap()
        .unwrap()
        .student_id;
    (account_id, student_id)
}

pub fn seed_course(
    persistence: &mut Persistence,
    program_id: i64,
    code: &str,
    credits: u32,
    capacity: u32,
    window: (&str, &str, &str),
    min_semester: u8,
) -> i64 {
    persistence
        .create_course(&NewCourse {
            code: code.to_string(),
            name: format!("Course {code}"),
            credits,
            program_id,
            lecturer_id: None,
            capacity,
            window: WeeklyWindow::parse(window.0, window.1, window.2).unwrap(),
            min_semester,
        })
        .unwrap()
}

pub fn create_test_request(account_id: i64, course_id: i64) -> EnrollmentRequest {
    EnrollmentRequest {
        account_id,
        course_id,
        academic_year: create_test_year(),
        actor: Actor::new(account_id.to_string(), String::from("student")),
    }
}
