// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    cause, date, default_context, generation_request, seeded_persistence, supervisor, test_now,
};
use crate::{
    FillGapRequest, GenerateRotationRequest, ListAssignmentsRequest, ServiceError, fill_gap,
    generate_rotation, list_assignments,
};
use crew_rota_persistence::Persistence;

#[test]
fn test_generation_is_deterministic_across_fresh_databases() {
    let context = default_context();

    let mut first_db = seeded_persistence(&context);
    let mut second_db = seeded_persistence(&context);

    let list = ListAssignmentsRequest {
        start_date: date(2026, 1, 5),
        end_date: date(2026, 1, 12),
    };
    let first = list_assignments(&mut first_db, list).unwrap();
    let second = list_assignments(&mut second_db, list).unwrap();

    assert_eq!(first.assignments.len(), 32);
    assert_eq!(first, second);
}

#[test]
fn test_generation_reports_counts() {
    let context = default_context();
    let mut persistence = Persistence::new_in_memory().unwrap();

    let response = generate_rotation(
        &mut persistence,
        &context,
        generation_request(false),
        supervisor(),
        cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(response.inserted, 32);
    assert_eq!(response.replaced, 0);
    assert!(response.message.contains("2-2"));
}

#[test]
fn test_reversed_range_is_invalid_input() {
    let context = default_context();
    let mut persistence = Persistence::new_in_memory().unwrap();
    let request = GenerateRotationRequest {
        start_date: date(2026, 1, 12),
        end_date: date(2026, 1, 5),
        ..generation_request(false)
    };

    let result = generate_rotation(
        &mut persistence,
        &context,
        request,
        supervisor(),
        cause(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(ServiceError::InvalidInput { ref field, .. }) if field == "date_range"
    ));
}

#[test]
fn test_unknown_pattern_is_not_found() {
    let context = default_context();
    let mut persistence = Persistence::new_in_memory().unwrap();
    let request = GenerateRotationRequest {
        pattern_id: String::from("9-9"),
        ..generation_request(false)
    };

    let result = generate_rotation(
        &mut persistence,
        &context,
        request,
        supervisor(),
        cause(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(ServiceError::ResourceNotFound { ref resource_type, .. })
            if resource_type == "Rotation pattern"
    ));
}

#[test]
fn test_regeneration_over_manual_fill_is_conflict_and_leaves_rows() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);

    // Crew A is off on Jan 7; employee 101 covers a crew B gap by hand.
    fill_gap(
        &mut persistence,
        &context,
        FillGapRequest {
            employee_id: 101,
            date: date(2026, 1, 7),
            shift_type: String::from("Night"),
            crew: String::from("B"),
        },
        supervisor(),
        cause(),
        test_now(),
    )
    .unwrap();

    let list = ListAssignmentsRequest {
        start_date: date(2026, 1, 5),
        end_date: date(2026, 1, 12),
    };
    let before = list_assignments(&mut persistence, list).unwrap();

    let result = generate_rotation(
        &mut persistence,
        &context,
        generation_request(false),
        supervisor(),
        cause(),
        test_now(),
    );

    assert!(matches!(result, Err(ServiceError::Conflict { .. })));
    let after = list_assignments(&mut persistence, list).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_regeneration_with_replace_flag_succeeds() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);

    let response = generate_rotation(
        &mut persistence,
        &context,
        generation_request(true),
        supervisor(),
        cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(response.replaced, 32);
    assert_eq!(response.inserted, 32);
}

#[test]
fn test_fill_gap_rejects_double_booking_as_conflict() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);

    // Employee 101 already works the crew A Day shift on Jan 5.
    let result = fill_gap(
        &mut persistence,
        &context,
        FillGapRequest {
            employee_id: 101,
            date: date(2026, 1, 5),
            shift_type: String::from("Night"),
            crew: String::from("C"),
        },
        supervisor(),
        cause(),
        test_now(),
    );

    assert!(matches!(result, Err(ServiceError::Conflict { .. })));
}

#[test]
fn test_fill_gap_unknown_employee_is_not_found() {
    let context = default_context();
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = fill_gap(
        &mut persistence,
        &context,
        FillGapRequest {
            employee_id: 999,
            date: date(2026, 1, 5),
            shift_type: String::from("Day"),
            crew: String::from("A"),
        },
        supervisor(),
        cause(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(ServiceError::ResourceNotFound { ref resource_type, .. })
            if resource_type == "Employee"
    ));
}
