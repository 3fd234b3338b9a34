// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use crew_rota_audit::{AuditEvent, StateSnapshot};
use crew_rota_domain::{
    AbsenceCalendar, CoverageRequirement, Employee, HolidayCalendar, OvertimePolicy,
    RotationPattern, ScheduleAssignment, ShiftDurations, SwapRequest,
};

/// Read-only collaborator data an operation runs against.
///
/// The roster, absence and holiday calendars, coverage requirements,
/// pattern definitions, and duration/overtime configuration are all owned
/// by external collaborators; the core receives them as explicit inputs
/// rather than reading ambient state, so every transition is a pure
/// function of its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingContext {
    /// The employee roster.
    pub employees: Vec<Employee>,
    /// Approved absences.
    pub absences: AbsenceCalendar,
    /// Holiday dates for day classification.
    pub holidays: HolidayCalendar,
    /// Coverage requirements.
    pub requirements: Vec<CoverageRequirement>,
    /// Configured rotation patterns, looked up by identifier.
    pub patterns: Vec<RotationPattern>,
    /// Shift-type durations.
    pub durations: ShiftDurations,
    /// Overtime window and threshold.
    pub overtime: OvertimePolicy,
}

impl SchedulingContext {
    /// Creates a new `SchedulingContext`.
    #[must_use]
    pub const fn new(
        employees: Vec<Employee>,
        absences: AbsenceCalendar,
        holidays: HolidayCalendar,
        requirements: Vec<CoverageRequirement>,
        patterns: Vec<RotationPattern>,
        durations: ShiftDurations,
        overtime: OvertimePolicy,
    ) -> Self {
        Self {
            employees,
            absences,
            holidays,
            requirements,
            patterns,
            durations,
            overtime,
        }
    }

    /// Looks up an employee by id.
    #[must_use]
    pub fn employee(&self, employee_id: i64) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|employee| employee.employee_id == employee_id)
    }

    /// Looks up a rotation pattern by identifier.
    #[must_use]
    pub fn pattern(&self, pattern_id: &str) -> Option<&RotationPattern> {
        self.patterns
            .iter()
            .find(|pattern| pattern.pattern_id() == pattern_id)
    }
}

/// The schedule state an operation reads and transitions.
///
/// Callers load the slice of assignments and swap requests relevant to
/// the command (a date range, the parties to a swap) and apply commands
/// against it; the persistence layer re-validates inside the committing
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// The loaded schedule assignments.
    pub assignments: Vec<ScheduleAssignment>,
    /// The loaded swap requests.
    pub swap_requests: Vec<SwapRequest>,
}

impl State {
    /// Creates a new empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            assignments: Vec::new(),
            swap_requests: Vec::new(),
        }
    }

    /// Creates a state from loaded rows.
    #[must_use]
    pub const fn with_rows(
        assignments: Vec<ScheduleAssignment>,
        swap_requests: Vec<SwapRequest>,
    ) -> Self {
        Self {
            assignments,
            swap_requests,
        }
    }

    /// Finds the assignment held by an employee on a date, if any.
    ///
    /// At most one can exist; a second row for the same pair is an
    /// upstream invariant breach caught elsewhere.
    #[must_use]
    pub fn assignment_for(&self, employee_id: i64, date: NaiveDate) -> Option<&ScheduleAssignment> {
        self.assignments
            .iter()
            .find(|assignment| assignment.employee_id == employee_id && assignment.date == date)
    }

    /// Finds a swap request by id.
    #[must_use]
    pub fn swap_request(&self, swap_id: i64) -> Option<&SwapRequest> {
        self.swap_requests
            .iter()
            .find(|request| request.swap_id == Some(swap_id))
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "assignments_count={},swap_requests_count={}",
            self.assignments.len(),
            self.swap_requests.len()
        ))
    }
}

/// A single row-level change to the persisted assignment set.
///
/// The transition function describes its side effects as data; the
/// persistence layer executes them inside the committing transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentMutation {
    /// Insert a new assignment row.
    Insert(ScheduleAssignment),
    /// Delete the row held by an employee on a date.
    Delete {
        /// The employee holding the row.
        employee_id: i64,
        /// The date of the row.
        date: NaiveDate,
    },
    /// Delete every rotation-sourced row in a date range (regeneration).
    DeleteRotationRange {
        /// First date of the range (inclusive).
        start: NaiveDate,
        /// Last date of the range (inclusive).
        end: NaiveDate,
    },
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail
/// without side effects. `mutations` lists the row-level changes the
/// persistence layer must commit together with the audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The row-level assignment changes implied by the transition.
    pub mutations: Vec<AssignmentMutation>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
