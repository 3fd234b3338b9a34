// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduled-hours aggregation.
//!
//! Read-only roll-up of an employee's scheduled shift durations over a
//! trailing window. Gap-fill eligibility checks use the result to rank and
//! filter candidates; whether overtime is actually allowed is the
//! caller's policy decision, not enforced here.

use crate::error::DomainError;
use crate::types::{ScheduleAssignment, ShiftType};
use serde::{Deserialize, Serialize};

/// Configured shift durations, supplied by the external configuration
/// collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDurations {
    day_hours: u32,
    evening_hours: u32,
    night_hours: u32,
}

impl ShiftDurations {
    /// Creates a new `ShiftDurations`.
    ///
    /// # Errors
    ///
    /// Returns an error if any duration is zero or exceeds 24 hours.
    pub fn new(
        day_hours: u32,
        evening_hours: u32,
        night_hours: u32,
    ) -> Result<Self, DomainError> {
        for (shift_type, hours) in [
            (ShiftType::Day, day_hours),
            (ShiftType::Evening, evening_hours),
            (ShiftType::Night, night_hours),
        ] {
            if hours == 0 || hours > 24 {
                return Err(DomainError::InvalidShiftDuration { shift_type, hours });
            }
        }
        Ok(Self {
            day_hours,
            evening_hours,
            night_hours,
        })
    }

    /// Returns the configured duration for a shift type, in hours.
    #[must_use]
    pub const fn duration_for(&self, shift_type: ShiftType) -> u32 {
        match shift_type {
            ShiftType::Day => self.day_hours,
            ShiftType::Evening => self.evening_hours,
            ShiftType::Night => self.night_hours,
        }
    }
}

/// Overtime policy: the trailing window and the hours threshold above
/// which scheduled time counts as overtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePolicy {
    window_days: u32,
    threshold_hours: u32,
}

impl OvertimePolicy {
    /// Creates a new `OvertimePolicy`.
    ///
    /// # Errors
    ///
    /// Returns an error if the window or threshold is zero.
    pub fn new(window_days: u32, threshold_hours: u32) -> Result<Self, DomainError> {
        if window_days == 0 {
            return Err(DomainError::InvalidOvertimePolicy(String::from(
                "Window must be at least one day",
            )));
        }
        if threshold_hours == 0 {
            return Err(DomainError::InvalidOvertimePolicy(String::from(
                "Threshold must be at least one hour",
            )));
        }
        Ok(Self {
            window_days,
            threshold_hours,
        })
    }

    /// Returns the default trailing window length in days.
    #[must_use]
    pub const fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Returns the overtime threshold in hours.
    #[must_use]
    pub const fn threshold_hours(&self) -> u32 {
        self.threshold_hours
    }
}

/// The result of an hours roll-up over a trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursReport {
    /// Total scheduled hours in the window.
    pub total_hours: u32,
    /// Hours at or below the overtime threshold.
    pub regular_hours: u32,
    /// Hours above the overtime threshold:
    /// `max(0, total_hours - threshold)`.
    pub overtime_hours: u32,
}

/// Rolls up scheduled hours for pre-filtered assignments.
///
/// Callers supply the assignments already restricted to one employee and
/// the trailing window; this function only sums durations and splits the
/// total at the policy threshold. Sums saturate rather than wrap.
#[must_use]
pub fn calculate_hours_in_window<'a, I>(
    assignments: I,
    durations: &ShiftDurations,
    policy: &OvertimePolicy,
) -> HoursReport
where
    I: IntoIterator<Item = &'a ScheduleAssignment>,
{
    let total_hours: u32 = assignments.into_iter().fold(0_u32, |acc, assignment| {
        acc.saturating_add(durations.duration_for(assignment.shift_type))
    });

    let overtime_hours: u32 = total_hours.saturating_sub(policy.threshold_hours());
    let regular_hours: u32 = total_hours - overtime_hours;

    HoursReport {
        total_hours,
        regular_hours,
        overtime_hours,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{AssignmentSource, Crew};
    use chrono::NaiveDate;

    fn durations() -> ShiftDurations {
        ShiftDurations::new(12, 12, 12).unwrap()
    }

    fn weekly_policy() -> OvertimePolicy {
        OvertimePolicy::new(7, 40).unwrap()
    }

    fn shift_on(day: u32, shift_type: ShiftType) -> ScheduleAssignment {
        ScheduleAssignment::new(
            1,
            NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            shift_type,
            Crew::A,
            AssignmentSource::Rotation,
        )
    }

    #[test]
    fn test_empty_window_reports_zero() {
        let report = calculate_hours_in_window([], &durations(), &weekly_policy());

        assert_eq!(report.total_hours, 0);
        assert_eq!(report.regular_hours, 0);
        assert_eq!(report.overtime_hours, 0);
    }

    #[test]
    fn test_under_threshold_is_all_regular() {
        let assignments = vec![
            shift_on(5, ShiftType::Day),
            shift_on(6, ShiftType::Night),
            shift_on(7, ShiftType::Day),
        ];

        let report =
            calculate_hours_in_window(assignments.iter(), &durations(), &weekly_policy());

        assert_eq!(report.total_hours, 36);
        assert_eq!(report.regular_hours, 36);
        assert_eq!(report.overtime_hours, 0);
    }

    #[test]
    fn test_exactly_at_threshold_has_no_overtime() {
        let durations = ShiftDurations::new(10, 10, 10).unwrap();
        let assignments: Vec<ScheduleAssignment> =
            (5..9).map(|day| shift_on(day, ShiftType::Day)).collect();

        let report = calculate_hours_in_window(assignments.iter(), &durations, &weekly_policy());

        assert_eq!(report.total_hours, 40);
        assert_eq!(report.regular_hours, 40);
        assert_eq!(report.overtime_hours, 0);
    }

    #[test]
    fn test_over_threshold_splits_at_threshold() {
        let assignments: Vec<ScheduleAssignment> =
            (5..9).map(|day| shift_on(day, ShiftType::Day)).collect();

        let report =
            calculate_hours_in_window(assignments.iter(), &durations(), &weekly_policy());

        assert_eq!(report.total_hours, 48);
        assert_eq!(report.regular_hours, 40);
        assert_eq!(report.overtime_hours, 8);
    }

    #[test]
    fn test_durations_vary_by_shift_type() {
        let durations = ShiftDurations::new(8, 10, 12).unwrap();
        let assignments = vec![
            shift_on(5, ShiftType::Day),
            shift_on(6, ShiftType::Evening),
            shift_on(7, ShiftType::Night),
        ];

        let report = calculate_hours_in_window(assignments.iter(), &durations, &weekly_policy());

        assert_eq!(report.total_hours, 30);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let result = ShiftDurations::new(12, 0, 12);
        assert!(matches!(
            result,
            Err(DomainError::InvalidShiftDuration {
                shift_type: ShiftType::Evening,
                hours: 0
            })
        ));
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(OvertimePolicy::new(0, 40).is_err());
        assert!(OvertimePolicy::new(7, 0).is_err());
    }
}
