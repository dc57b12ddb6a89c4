// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AcademicYear, DomainError};

#[test]
fn test_rule_violations_carry_stable_tags() {
    let cases: Vec<(DomainError, &str)> = vec![
        (
            DomainError::SemesterNotEligible {
                course_semester: 5,
                student_semester: 2,
            },
            "semester-not-eligible",
        ),
        (
            DomainError::AlreadyEnrolled {
                course_code: String::from("IF101"),
                academic_year: AcademicYear::starting(2023),
            },
            "already-enrolled",
        ),
        (
            DomainError::CapacityFull {
                course_code: String::from("IF101"),
                capacity: 40,
            },
            "capacity-full",
        ),
        (
            DomainError::CreditLimitExceeded {
                current: 21,
                requested: 4,
                ceiling: 24,
            },
            "credit-limit-exceeded",
        ),
        (
            DomainError::ScheduleClash {
                clashing_code: String::from("IF102"),
                clashing_name: String::from("Algorithms"),
            },
            "schedule-clash",
        ),
    ];

    for (error, tag) in cases {
        assert_eq!(error.rule(), Some(tag));
    }
}

#[test]
fn test_lookup_and_input_errors_have_no_tag() {
    assert_eq!(DomainError::CourseNotFound { course_id: 7 }.rule(), None);
    assert_eq!(
        DomainError::InvalidAcademicYear(String::from("bad")).rule(),
        None
    );
}

#[test]
fn test_only_duplicate_and_clash_are_conflicts() {
    let duplicate: DomainError = DomainError::AlreadyEnrolled {
        course_code: String::from("IF101"),
        academic_year: AcademicYear::starting(2023),
    };
    let clash: DomainError = DomainError::ScheduleClash {
        clashing_code: String::from("IF102"),
        clashing_name: String::from("Algorithms"),
    };
    let full: DomainError = DomainError::CapacityFull {
        course_code: String::from("IF101"),
        capacity: 1,
    };

    assert!(duplicate.is_conflict());
    assert!(clash.is_conflict());
    assert!(!full.is_conflict());
}

#[test]
fn test_semester_message_names_both_semesters() {
    let error: DomainError = DomainError::SemesterNotEligible {
        course_semester: 5,
        student_semester: 2,
    };
    let message: String = error.to_string();

    assert!(message.contains('5'));
    assert!(message.contains('2'));
}

#[test]
fn test_credit_message_names_ceiling() {
    let error: DomainError = DomainError::CreditLimitExceeded {
        current: 21,
        requested: 4,
        ceiling: 24,
    };

    assert!(error.to_string().contains("24"));
}

#[test]
fn test_clash_message_names_course() {
    let error: DomainError = DomainError::ScheduleClash {
        clashing_code: String::from("IF102"),
        clashing_name: String::from("Algorithms"),
    };

    assert!(error.to_string().contains("IF102"));
}
