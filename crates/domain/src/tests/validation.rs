// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{AssignmentSource, Crew, Employee, ScheduleAssignment, ShiftType};
use crate::validation::{
    find_duplicate_assignment, require_active_employee, validate_date_range,
    validate_swap_reason,
};
use chrono::NaiveDate;
use std::collections::BTreeSet;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
}

fn assignment(employee_id: i64, d: u32) -> ScheduleAssignment {
    ScheduleAssignment::new(
        employee_id,
        date(d),
        ShiftType::Day,
        Crew::A,
        AssignmentSource::Rotation,
    )
}

#[test]
fn test_ordered_range_accepted() {
    validate_date_range(date(5), date(5)).unwrap();
    validate_date_range(date(5), date(20)).unwrap();
}

#[test]
fn test_reversed_range_rejected() {
    let result = validate_date_range(date(20), date(5));
    assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
}

#[test]
fn test_blank_reason_rejected() {
    assert!(validate_swap_reason("Family commitment").is_ok());
    assert!(matches!(
        validate_swap_reason("   "),
        Err(DomainError::EmptyReason)
    ));
}

#[test]
fn test_require_active_employee() {
    let roster = vec![
        Employee::new(
            1,
            String::from("Active"),
            Some(Crew::A),
            String::from("Operator"),
            BTreeSet::new(),
            true,
        ),
        Employee::new(
            2,
            String::from("Inactive"),
            Some(Crew::A),
            String::from("Operator"),
            BTreeSet::new(),
            false,
        ),
    ];

    assert_eq!(require_active_employee(&roster, 1).unwrap().employee_id, 1);
    assert!(matches!(
        require_active_employee(&roster, 2),
        Err(DomainError::EmployeeInactive { employee_id: 2 })
    ));
    assert!(matches!(
        require_active_employee(&roster, 99),
        Err(DomainError::EmployeeNotFound { employee_id: 99 })
    ));
}

#[test]
fn test_duplicate_detection() {
    let clean = vec![assignment(1, 5), assignment(1, 6), assignment(2, 5)];
    assert_eq!(find_duplicate_assignment(&clean), None);

    let tainted = vec![assignment(1, 5), assignment(2, 5), assignment(1, 5)];
    assert_eq!(find_duplicate_assignment(&tainted), Some((1, date(5))));
}
