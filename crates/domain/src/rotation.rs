// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rotation expansion.
//!
//! Expands a rotation pattern, a crew phase map, and a roster over a date
//! range into concrete schedule assignments. Expansion is a pure function
//! of its inputs: the same pattern, phase map, roster, absence calendar,
//! and range always produce the same assignment list in the same order
//! (date, then crew, then employee id).
//!
//! A crew with no qualifying employees on a given date produces zero
//! assignments; the resulting shortfall is the coverage engine's concern,
//! not an expansion error.

use crate::error::DomainError;
use crate::pattern::{CrewPhaseMap, CycleDay, RotationPattern};
use crate::types::{AssignmentSource, Crew, Employee, ScheduleAssignment};
use crate::validation::validate_date_range;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Approved absences, supplied by the external HR collaborator.
///
/// An absent employee is skipped during expansion for the absent dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceCalendar {
    absences: BTreeSet<(i64, NaiveDate)>,
}

impl AbsenceCalendar {
    /// Creates an empty absence calendar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            absences: BTreeSet::new(),
        }
    }

    /// Records an approved absence for an employee on a date.
    pub fn record(&mut self, employee_id: i64, date: NaiveDate) {
        self.absences.insert((employee_id, date));
    }

    /// Returns whether an employee has an approved absence on a date.
    #[must_use]
    pub fn is_absent(&self, employee_id: i64, date: NaiveDate) -> bool {
        self.absences.contains(&(employee_id, date))
    }
}

/// Expands a rotation pattern over a date range into schedule assignments.
///
/// For each date in `[start, end]` and each crew in the phase map, the
/// crew's cycle entry is looked up at
/// `(days_since_epoch + phase_offset) mod cycle_length`; an on-duty entry
/// emits one rotation-sourced assignment per qualifying employee of that
/// crew. Qualifying employees are active and have no approved absence on
/// the date.
///
/// # Errors
///
/// Returns an error if:
/// - `end` is before `start`
/// - Any phase offset does not fit the pattern cycle
/// - The phase map violates the pattern's crew-coverage invariant
pub fn generate_rotation(
    pattern: &RotationPattern,
    phase_map: &CrewPhaseMap,
    roster: &[Employee],
    absences: &AbsenceCalendar,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ScheduleAssignment>, DomainError> {
    validate_date_range(start, end)?;
    pattern.validate_phase_map(phase_map)?;

    // Group crew members once, ordered by employee id for determinism.
    let crew_members: Vec<(Crew, u32, Vec<&Employee>)> = phase_map
        .iter()
        .map(|(crew, offset)| {
            let mut members: Vec<&Employee> = roster
                .iter()
                .filter(|employee| employee.active && employee.crew == Some(crew))
                .collect();
            members.sort_by_key(|employee| employee.employee_id);
            (crew, offset, members)
        })
        .collect();

    let mut assignments: Vec<ScheduleAssignment> = Vec::new();
    let mut date: NaiveDate = start;
    while date <= end {
        for (crew, offset, members) in &crew_members {
            let CycleDay::On(shift_type) = pattern.entry_for(date, *offset) else {
                continue;
            };
            for employee in members {
                if absences.is_absent(employee.employee_id, date) {
                    continue;
                }
                assignments.push(ScheduleAssignment::new(
                    employee.employee_id,
                    date,
                    shift_type,
                    *crew,
                    AssignmentSource::Rotation,
                ));
            }
        }
        date = date.succ_opt().ok_or(DomainError::InvalidDateRange {
            start,
            end,
        })?;
    }

    Ok(assignments)
}
