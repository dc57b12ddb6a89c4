// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EnrollmentGateway, EnrollmentRequest, GatewayError};
use registrar_audit::{Actor, EnrollmentAuditEntry};
use registrar_domain::{
    AcademicYear, CourseOffering, EnrollmentRecord, NewEnrollment, StudentRecord, StudentStatus,
    WeeklyWindow,
};
use time::OffsetDateTime;
use time::macros::datetime;

/// An in-memory gateway that mirrors the storage rules the rule-checker
/// relies on, including the uniqueness constraint on enrollments.
#[derive(Debug, Default)]
pub struct FakeGateway {
    pub students: Vec<StudentRecord>,
    pub courses: Vec<CourseOffering>,
    pub enrollments: Vec<EnrollmentRecord>,
    pub audit: Vec<EnrollmentAuditEntry>,
    pub fail_audit_insert: bool,
    /// An enrollment another writer commits between our checks and our insert.
    pub racing_insert: Option<NewEnrollment>,
    next_id: i64,
}

impl FakeGateway {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn course(&self, course_id: i64) -> Option<&CourseOffering> {
        self.courses.iter().find(|c| c.course_id == course_id)
    }

    /// Seeds an enrollment without going through the rule-checker.
    pub fn seed_enrollment(&mut self, student_id: i64, course_id: i64, year: &AcademicYear) {
        let enrollment_id: i64 = self.next_id();
        self.enrollments.push(EnrollmentRecord {
            enrollment_id,
            student_id,
            course_id,
            academic_year: year.clone(),
            semester: 1,
            grade: None,
            created_at: String::from("2023-08-01T00:00:00Z"),
        });
    }
}

impl EnrollmentGateway for FakeGateway {
    fn find_student_by_account(
        &mut self,
        account_id: i64,
    ) -> Result<Option<StudentRecord>, GatewayError> {
        Ok(self
            .students
            .iter()
            .find(|s| s.account_id == account_id)
            .cloned())
    }

    fn find_course(&mut self, course_id: i64) -> Result<Option<CourseOffering>, GatewayError> {
        Ok(self.course(course_id).cloned())
    }

    fn find_enrollment(
        &mut self,
        student_id: i64,
        course_id: i64,
        academic_year: &AcademicYear,
    ) -> Result<Option<EnrollmentRecord>, GatewayError> {
        Ok(self
            .enrollments
            .iter()
            .find(|e| {
                e.student_id == student_id
                    && e.course_id == course_id
                    && &e.academic_year == academic_year
            })
            .cloned())
    }

    fn count_enrollments_for_course(&mut self, course_id: i64) -> Result<u32, GatewayError> {
        let count: usize = self
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .count();
        Ok(u32::try_from(count).unwrap())
    }

    fn sum_credits_for_student(
        &mut self,
        student_id: i64,
        academic_year: &AcademicYear,
    ) -> Result<u32, GatewayError> {
        Ok(self
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id && &e.academic_year == academic_year)
            .filter_map(|e| self.course(e.course_id))
            .map(|c| c.credits)
            .sum())
    }

    fn find_overlapping(
        &mut self,
        student_id: i64,
        academic_year: &AcademicYear,
        window: &WeeklyWindow,
    ) -> Result<Vec<CourseOffering>, GatewayError> {
        Ok(self
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id && &e.academic_year == academic_year)
            .filter_map(|e| self.course(e.course_id))
            .filter(|c| c.window.overlaps(window))
            .cloned()
            .collect())
    }

    fn insert_enrollment(
        &mut self,
        enrollment: &NewEnrollment,
    ) -> Result<EnrollmentRecord, GatewayError> {
        if let Some(racing) = self.racing_insert.take() {
            self.seed_enrollment(racing.student_id, racing.course_id, &racing.academic_year);
        }

        let duplicate: bool = self.enrollments.iter().any(|e| {
            e.student_id == enrollment.student_id
                && e.course_id == enrollment.course_id
                && e.academic_year == enrollment.academic_year
        });
        if duplicate {
            return Err(GatewayError::UniqueViolation(String::from(
                "enrollments.student_id, enrollments.course_id, enrollments.academic_year",
            )));
        }

        let record: EnrollmentRecord = EnrollmentRecord {
            enrollment_id: self.next_id(),
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            academic_year: enrollment.academic_year.clone(),
            semester: enrollment.semester,
            grade: None,
            created_at: String::from("2024-02-01T08:30:00Z"),
        };
        self.enrollments.push(record.clone());
        Ok(record)
    }

    fn insert_audit(&mut self, entry: &EnrollmentAuditEntry) -> Result<i64, GatewayError> {
        if self.fail_audit_insert {
            return Err(GatewayError::Database(String::from("disk I/O error")));
        }
        let audit_id: i64 = self.next_id();
        self.audit.push(entry.clone().with_audit_id(audit_id));
        Ok(audit_id)
    }

    fn delete_enrollment(
        &mut self,
        student_id: i64,
        course_id: i64,
    ) -> Result<usize, GatewayError> {
        let before: usize = self.enrollments.len();
        self.enrollments
            .retain(|e| !(e.student_id == student_id && e.course_id == course_id));
        Ok(before - self.enrollments.len())
    }
}

pub const STUDENT_ACCOUNT_ID: i64 = 100;
pub const STUDENT_ID: i64 = 1;

pub fn create_test_year() -> AcademicYear {
    "2023/2024".parse().unwrap()
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-02-01 08:30 UTC)
}

pub fn create_test_student(semester: u8) -> StudentRecord {
    StudentRecord {
        student_id: STUDENT_ID,
        account_id: STUDENT_ACCOUNT_ID,
        registration_number: String::from("2021001"),
        name: String::from("Siti Rahma"),
        program_id: 1,
        semester,
        enrollment_year: 2021,
        status: StudentStatus::Active,
    }
}

pub fn create_test_course(
    course_id: i64,
    credits: u32,
    day: &str,
    start: &str,
    end: &str,
) -> CourseOffering {
    CourseOffering {
        course_id,
        code: format!("IF{course_id:03}"),
        name: format!("Course {course_id}"),
        credits,
        program_id: 1,
        lecturer_id: Some(1),
        lecturer_name: Some(String::from("Dr. Budi")),
        capacity: 40,
        window: WeeklyWindow::parse(day, start, end).unwrap(),
        min_semester: 1,
    }
}

pub fn create_test_request(course_id: i64) -> EnrollmentRequest {
    EnrollmentRequest {
        account_id: STUDENT_ACCOUNT_ID,
        course_id,
        academic_year: create_test_year(),
        actor: Actor::new(STUDENT_ACCOUNT_ID.to_string(), String::from("student")),
    }
}

/// A gateway holding one semester-3 student and no courses.
pub fn create_test_gateway() -> FakeGateway {
    FakeGateway {
        students: vec![create_test_student(3)],
        ..FakeGateway::default()
    }
}
