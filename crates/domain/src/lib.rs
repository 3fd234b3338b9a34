// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod coverage;
mod error;
mod hours;
mod pattern;
mod rotation;
mod swap;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use coverage::{
    CoverageGap, CoverageRequirement, GapSeverity, HolidayCalendar, compute_coverage_gaps,
};
pub use error::DomainError;
pub use hours::{HoursReport, OvertimePolicy, ShiftDurations, calculate_hours_in_window};
pub use pattern::{CrewPhaseMap, CycleDay, RotationPattern};
pub use rotation::{AbsenceCalendar, generate_rotation};
pub use swap::{ApprovalSide, SwapKind, SwapRequest, SwapShift, SwapStatus};
pub use types::{
    AssignmentSource, Crew, DayClass, Employee, ScheduleAssignment, ShiftType, SkillId,
};
pub use validation::{
    find_duplicate_assignment, require_active_employee, validate_date_range, validate_swap_reason,
};
