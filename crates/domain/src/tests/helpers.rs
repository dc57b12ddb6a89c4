// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CourseOffering, StudentRecord, StudentStatus, WeeklyWindow};

pub fn create_test_student(semester: u8) -> StudentRecord {
    StudentRecord {
        student_id: 1,
        account_id: 10,
        registration_number: String::from("2021001"),
        name: String::from("Siti Rahma"),
        program_id: 1,
        semester,
        enrollment_year: 2021,
        status: StudentStatus::Active,
    }
}

pub fn create_test_course(course_id: i64, code: &str, window: WeeklyWindow) -> CourseOffering {
    CourseOffering {
        course_id,
        code: String::from(code),
        name: format!("Course {code}"),
        credits: 3,
        program_id: 1,
        lecturer_id: Some(1),
        lecturer_name: Some(String::from("Dr. Budi")),
        capacity: 40,
        window,
        min_semester: 1,
    }
}

pub fn window(day: &str, start: &str, end: &str) -> WeeklyWindow {
    WeeklyWindow::parse(day, start, end).unwrap()
}
