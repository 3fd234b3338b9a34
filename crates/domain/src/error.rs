// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;

use crate::types::{Crew, ShiftType};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Crew identifier is not a valid crew.
    InvalidCrew(String),
    /// Shift type is invalid.
    InvalidShiftType(String),
    /// Day class is invalid.
    InvalidDayClass(String),
    /// Assignment source is invalid.
    InvalidAssignmentSource(String),
    /// Swap status is invalid.
    InvalidSwapStatus(String),
    /// Swap kind is invalid.
    InvalidSwapKind(String),
    /// Approval side is invalid.
    InvalidApprovalSide(String),
    /// Skill identifier is empty or invalid.
    InvalidSkill(String),
    /// A date range has its end before its start.
    InvalidDateRange {
        /// The range start.
        start: NaiveDate,
        /// The range end.
        end: NaiveDate,
    },
    /// A rotation pattern has an empty cycle.
    EmptyCycle {
        /// The pattern identifier.
        pattern_id: String,
    },
    /// A rotation pattern identifier is empty or invalid.
    InvalidPatternId(String),
    /// A crew's phase offset does not fit inside the pattern cycle.
    InvalidPhaseOffset {
        /// The crew with the offending offset.
        crew: Crew,
        /// The offset value.
        offset: u32,
        /// The pattern cycle length.
        cycle_length: u32,
    },
    /// The phase map leaves at least one cycle day with fewer crews on
    /// duty than the pattern requires.
    InsufficientCrewCoverage {
        /// The cycle day index with the shortfall.
        day_index: u32,
        /// Crews on duty at that index.
        on_duty: u32,
        /// Crews the pattern requires simultaneously on duty.
        required: u32,
    },
    /// The pattern requires more simultaneous crews than the phase map
    /// contains.
    InvalidRequiredOnDuty {
        /// The required simultaneous crew count.
        required: u32,
        /// Crews present in the phase map.
        crews: u32,
    },
    /// The phase map contains no crews.
    EmptyPhaseMap,
    /// A shift duration is outside the valid range.
    InvalidShiftDuration {
        /// The shift type with the invalid duration.
        shift_type: ShiftType,
        /// The configured duration in hours.
        hours: u32,
    },
    /// An overtime policy window or threshold is zero.
    InvalidOvertimePolicy(String),
    /// A coverage requirement references a minimum the engine cannot use.
    InvalidRequirement(String),
    /// A swap reason is empty.
    EmptyReason,
    /// A swap request targets the requester themselves.
    SwapWithSelf {
        /// The employee attempting to swap with themselves.
        employee_id: i64,
    },
    /// An employee referenced by an operation is not in the roster.
    EmployeeNotFound {
        /// The unknown employee identifier.
        employee_id: i64,
    },
    /// An employee referenced by an operation is inactive.
    EmployeeInactive {
        /// The inactive employee identifier.
        employee_id: i64,
    },
    /// An employee has no crew assignment where one is required.
    EmployeeWithoutCrew {
        /// The crewless employee identifier.
        employee_id: i64,
    },
    /// A rotation pattern identifier does not resolve to a configured
    /// pattern.
    PatternNotFound {
        /// The unknown pattern identifier.
        pattern_id: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCrew(msg) => write!(f, "Invalid crew: {msg}"),
            Self::InvalidShiftType(msg) => write!(f, "Invalid shift type: {msg}"),
            Self::InvalidDayClass(msg) => write!(f, "Invalid day class: {msg}"),
            Self::InvalidAssignmentSource(msg) => {
                write!(f, "Invalid assignment source: {msg}")
            }
            Self::InvalidSwapStatus(msg) => write!(f, "Invalid swap status: {msg}"),
            Self::InvalidSwapKind(msg) => write!(f, "Invalid swap kind: {msg}"),
            Self::InvalidApprovalSide(msg) => write!(f, "Invalid approval side: {msg}"),
            Self::InvalidSkill(msg) => write!(f, "Invalid skill: {msg}"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: end {end} is before start {start}")
            }
            Self::EmptyCycle { pattern_id } => {
                write!(f, "Rotation pattern '{pattern_id}' has an empty cycle")
            }
            Self::InvalidPatternId(msg) => write!(f, "Invalid pattern identifier: {msg}"),
            Self::InvalidPhaseOffset {
                crew,
                offset,
                cycle_length,
            } => {
                write!(
                    f,
                    "Phase offset {offset} for crew {crew} exceeds cycle length {cycle_length}"
                )
            }
            Self::InsufficientCrewCoverage {
                day_index,
                on_duty,
                required,
            } => {
                write!(
                    f,
                    "Cycle day {day_index} has {on_duty} crews on duty but the pattern requires {required}"
                )
            }
            Self::InvalidRequiredOnDuty { required, crews } => {
                write!(
                    f,
                    "Pattern requires {required} simultaneous crews but the phase map holds {crews}"
                )
            }
            Self::EmptyPhaseMap => write!(f, "Phase map contains no crews"),
            Self::InvalidShiftDuration { shift_type, hours } => {
                write!(
                    f,
                    "Invalid duration for {shift_type} shifts: {hours}. Must be between 1 and 24 hours"
                )
            }
            Self::InvalidOvertimePolicy(msg) => write!(f, "Invalid overtime policy: {msg}"),
            Self::InvalidRequirement(msg) => write!(f, "Invalid coverage requirement: {msg}"),
            Self::EmptyReason => write!(f, "Swap reason cannot be empty"),
            Self::SwapWithSelf { employee_id } => {
                write!(f, "Employee {employee_id} cannot swap a shift with themselves")
            }
            Self::EmployeeNotFound { employee_id } => {
                write!(f, "Employee {employee_id} not found in roster")
            }
            Self::EmployeeInactive { employee_id } => {
                write!(f, "Employee {employee_id} is inactive")
            }
            Self::EmployeeWithoutCrew { employee_id } => {
                write!(f, "Employee {employee_id} has no crew assignment")
            }
            Self::PatternNotFound { pattern_id } => {
                write!(f, "Rotation pattern '{pattern_id}' not found")
            }
        }
    }
}

impl std::error::Error for DomainError {}
