// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Employee, ScheduleAssignment};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Validates that a date range is well-formed (`end >= start`).
///
/// # Errors
///
/// Returns an error if the end date is before the start date.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), DomainError> {
    if end < start {
        return Err(DomainError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Validates that a swap reason carries content.
///
/// # Errors
///
/// Returns an error if the reason is empty or whitespace.
pub fn validate_swap_reason(reason: &str) -> Result<(), DomainError> {
    if reason.trim().is_empty() {
        return Err(DomainError::EmptyReason);
    }
    Ok(())
}

/// Looks up an employee in the roster and checks they are active.
///
/// # Errors
///
/// Returns an error if the employee is not in the roster or is inactive.
pub fn require_active_employee(
    roster: &[Employee],
    employee_id: i64,
) -> Result<&Employee, DomainError> {
    let employee: &Employee = roster
        .iter()
        .find(|employee| employee.employee_id == employee_id)
        .ok_or(DomainError::EmployeeNotFound { employee_id })?;
    if !employee.active {
        return Err(DomainError::EmployeeInactive { employee_id });
    }
    Ok(employee)
}

/// Scans an assignment set for a duplicate `(employee_id, date)` pair.
///
/// Returns the first duplicate found, or `None` if the set is consistent.
/// A duplicate indicates an invariant breach upstream: callers surface it
/// loudly rather than patching the set.
#[must_use]
pub fn find_duplicate_assignment(
    assignments: &[ScheduleAssignment],
) -> Option<(i64, NaiveDate)> {
    let mut seen: HashSet<(i64, NaiveDate)> = HashSet::with_capacity(assignments.len());
    for assignment in assignments {
        let key: (i64, NaiveDate) = (assignment.employee_id, assignment.date);
        if !seen.insert(key) {
            return Some(key);
        }
    }
    None
}
