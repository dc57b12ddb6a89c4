// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    FakeGateway, STUDENT_ACCOUNT_ID, STUDENT_ID, create_test_course, create_test_gateway,
    create_test_now, create_test_request, create_test_year,
};
use crate::{CoreError, EnrollmentOutcome, EnrollmentRequest, GatewayError, attempt_enroll};
use registrar_audit::EnrollmentAction;
use registrar_domain::{AcademicYear, DomainError, NewEnrollment};

fn enroll(gateway: &mut FakeGateway, course_id: i64) -> Result<EnrollmentOutcome, CoreError> {
    attempt_enroll(gateway, &create_test_request(course_id), create_test_now())
}

#[test]
fn test_successful_enroll_writes_record_and_audit_entry() {
    let mut gateway: FakeGateway = create_test_gateway();
    gateway
        .courses
        .push(create_test_course(1, 3, "monday", "08:00", "10:00"));

    let outcome: EnrollmentOutcome = enroll(&mut gateway, 1).unwrap();

    assert_eq!(outcome.enrollment.student_id, STUDENT_ID);
    assert_eq!(outcome.enrollment.course_id, 1);
    assert_eq!(outcome.enrollment.academic_year, create_test_year());
    assert_eq!(outcome.enrollment.semester, 3);
    assert_eq!(outcome.enrollment.grade, None);
    assert_eq!(outcome.course.code, "IF001");

    assert_eq!(gateway.enrollments.len(), 1);
    assert_eq!(gateway.audit.len(), 1);
    let entry = &gateway.audit[0];
    assert_eq!(entry.action, EnrollmentAction::Add);
    assert_eq!(entry.student_id, STUDENT_ID);
    assert_eq!(entry.course_id, 1);
    assert_eq!(entry.recorded_at, create_test_now());
    assert_eq!(outcome.audit_entry.audit_id, entry.audit_id);
}

#[test]
fn test_unknown_student_is_not_found() {
    let mut gateway: FakeGateway = FakeGateway::default();
    gateway
        .courses
        .push(create_test_course(1, 3, "monday", "08:00", "10:00"));

    let result: Result<EnrollmentOutcome, CoreError> = enroll(&mut gateway, 1);

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::StudentNotFound {
            account_id: STUDENT_ACCOUNT_ID
        })
    );
}

#[test]
fn test_unknown_course_is_not_found() {
    let mut gateway: FakeGateway = create_test_gateway();

    let result: Result<EnrollmentOutcome, CoreError> = enroll(&mut gateway, 99);

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::CourseNotFound { course_id: 99 })
    );
}

#[test]
fn test_second_enroll_for_same_triple_conflicts() {
    let mut gateway: FakeGateway = create_test_gateway();
    gateway
        .courses
        .push(create_test_course(1, 3, "monday", "08:00", "10:00"));

    enroll(&mut gateway, 1).unwrap();
    let result: Result<EnrollmentOutcome, CoreError> = enroll(&mut gateway, 1);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::AlreadyEnrolled { .. }))
    ));
    assert_eq!(gateway.enrollments.len(), 1);
}

#[test]
fn test_same_course_in_another_year_is_allowed() {
    let mut gateway: FakeGateway = create_test_gateway();
    gateway
        .courses
        .push(create_test_course(1, 3, "monday", "08:00", "10:00"));
    let previous: AcademicYear = AcademicYear::starting(2022);
    gateway.seed_enrollment(STUDENT_ID, 1, &previous);

    assert!(enroll(&mut gateway, 1).is_ok());
    assert_eq!(gateway.enrollments.len(), 2);
}

#[test]
fn test_last_open_seat_is_taken_then_course_is_full() {
    let mut gateway: FakeGateway = create_test_gateway();
    let mut course = create_test_course(1, 3, "monday", "08:00", "10:00");
    course.capacity = 2;
    gateway.courses.push(course);
    gateway.seed_enrollment(50, 1, &create_test_year());

    assert!(enroll(&mut gateway, 1).is_ok());

    // A second student tries the now-full course.
    gateway.students.push(super::helpers::create_test_student(3));
    gateway.students[1].student_id = 2;
    gateway.students[1].account_id = 200;
    let request: EnrollmentRequest = EnrollmentRequest {
        account_id: 200,
        ..create_test_request(1)
    };
    let result: Result<EnrollmentOutcome, CoreError> =
        attempt_enroll(&mut gateway, &request, create_test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::CapacityFull { capacity: 2, .. }))
    ));
}

#[test]
fn test_capacity_counts_enrollments_from_every_year() {
    let mut gateway: FakeGateway = create_test_gateway();
    let mut course = create_test_course(1, 3, "monday", "08:00", "10:00");
    course.capacity = 1;
    gateway.courses.push(course);
    gateway.seed_enrollment(50, 1, &AcademicYear::starting(2020));

    let result: Result<EnrollmentOutcome, CoreError> = enroll(&mut gateway, 1);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::CapacityFull { .. }))
    ));
}

/// Seeds 21 credit hours on non-overlapping Tuesday-Sunday slots.
fn seed_21_credits(gateway: &mut FakeGateway) {
    let days: [&str; 7] = [
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
        "tuesday",
    ];
    let year: AcademicYear = create_test_year();
    for (offset, day) in days.iter().enumerate() {
        let course_id: i64 = 10 + i64::try_from(offset).unwrap();
        let (start, end) = if offset == 6 {
            ("13:00", "15:00")
        } else {
            ("08:00", "10:00")
        };
        gateway
            .courses
            .push(create_test_course(course_id, 3, day, start, end));
        gateway.seed_enrollment(STUDENT_ID, course_id, &year);
    }
}

#[test]
fn test_credit_ceiling_rejects_25_hours() {
    let mut gateway: FakeGateway = create_test_gateway();
    seed_21_credits(&mut gateway);
    gateway
        .courses
        .push(create_test_course(1, 4, "monday", "08:00", "10:00"));

    let result: Result<EnrollmentOutcome, CoreError> = enroll(&mut gateway, 1);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::CreditLimitExceeded {
            current: 21,
            requested: 4,
            ceiling: 24
        }))
    ));
}

#[test]
fn test_credit_ceiling_accepts_exactly_24_hours() {
    let mut gateway: FakeGateway = create_test_gateway();
    seed_21_credits(&mut gateway);
    gateway
        .courses
        .push(create_test_course(1, 3, "monday", "08:00", "10:00"));

    assert!(enroll(&mut gateway, 1).is_ok());
}

#[test]
fn test_credits_from_other_years_do_not_count() {
    let mut gateway: FakeGateway = create_test_gateway();
    let previous: AcademicYear = AcademicYear::starting(2022);
    for course_id in 10..18 {
        gateway
            .courses
            .push(create_test_course(course_id, 3, "friday", "08:00", "10:00"));
        gateway.seed_enrollment(STUDENT_ID, course_id, &previous);
    }
    gateway
        .courses
        .push(create_test_course(1, 3, "monday", "08:00", "10:00"));

    assert!(enroll(&mut gateway, 1).is_ok());
}

#[test]
fn test_overlapping_monday_course_clashes() {
    let mut gateway: FakeGateway = create_test_gateway();
    gateway
        .courses
        .push(create_test_course(1, 3, "monday", "08:00", "10:00"));
    gateway
        .courses
        .push(create_test_course(2, 3, "monday", "09:00", "11:00"));

    enroll(&mut gateway, 1).unwrap();
    let result: Result<EnrollmentOutcome, CoreError> = enroll(&mut gateway, 2);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::ScheduleClash { ref clashing_code, .. }))
            if clashing_code == "IF001"
    ));
}

#[test]
fn test_touching_monday_course_does_not_clash() {
    let mut gateway: FakeGateway = create_test_gateway();
    gateway
        .courses
        .push(create_test_course(1, 3, "monday", "08:00", "10:00"));
    gateway
        .courses
        .push(create_test_course(2, 3, "monday", "10:00", "12:00"));

    enroll(&mut gateway, 1).unwrap();

    assert!(enroll(&mut gateway, 2).is_ok());
}

#[test]
fn test_semester_too_low_is_rejected() {
    let mut gateway: FakeGateway = create_test_gateway();
    gateway.students[0].semester = 2;
    let mut advanced = create_test_course(1, 3, "monday", "08:00", "10:00");
    advanced.min_semester = 5;
    gateway.courses.push(advanced);

    let result: Result<EnrollmentOutcome, CoreError> = enroll(&mut gateway, 1);

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::SemesterNotEligible {
            course_semester: 5,
            student_semester: 2
        })
    );
}

#[test]
fn test_semester_equal_to_minimum_is_accepted() {
    let mut gateway: FakeGateway = create_test_gateway();
    gateway.students[0].semester = 2;
    let mut course = create_test_course(1, 3, "monday", "08:00", "10:00");
    course.min_semester = 2;
    gateway.courses.push(course);

    assert!(enroll(&mut gateway, 1).is_ok());
}

#[test]
fn test_semester_check_runs_before_duplicate_check() {
    let mut gateway: FakeGateway = create_test_gateway();
    gateway.students[0].semester = 1;
    let mut course = create_test_course(1, 3, "monday", "08:00", "10:00");
    course.min_semester = 4;
    gateway.courses.push(course);
    gateway.seed_enrollment(STUDENT_ID, 1, &create_test_year());

    let result: Result<EnrollmentOutcome, CoreError> = enroll(&mut gateway, 1);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SemesterNotEligible { .. }))
    ));
}

#[test]
fn test_unique_violation_on_insert_maps_to_already_enrolled() {
    let mut gateway: FakeGateway = create_test_gateway();
    gateway
        .courses
        .push(create_test_course(1, 3, "monday", "08:00", "10:00"));
    gateway.racing_insert = Some(NewEnrollment {
        student_id: STUDENT_ID,
        course_id: 1,
        academic_year: create_test_year(),
        semester: 3,
    });

    let result: Result<EnrollmentOutcome, CoreError> = enroll(&mut gateway, 1);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::AlreadyEnrolled { .. }))
    ));
    assert_eq!(gateway.enrollments.len(), 1);
    assert!(gateway.audit.is_empty());
}

#[test]
fn test_audit_failure_surfaces_as_gateway_error() {
    let mut gateway: FakeGateway = create_test_gateway();
    gateway
        .courses
        .push(create_test_course(1, 3, "monday", "08:00", "10:00"));
    gateway.fail_audit_insert = true;

    let result: Result<EnrollmentOutcome, CoreError> = enroll(&mut gateway, 1);

    assert!(matches!(
        result,
        Err(CoreError::Gateway(GatewayError::Database(_)))
    ));
    assert!(gateway.audit.is_empty());
}
