// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Coverage gap computation.
//!
//! Read-only aggregation of schedule assignments against per-skill,
//! per-shift coverage requirements. Gaps are derived values: they are
//! recomputed on demand and never persisted or mutated independently.

use crate::error::DomainError;
use crate::types::{DayClass, Employee, ScheduleAssignment, ShiftType, SkillId};
use crate::validation::validate_date_range;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Holiday dates, supplied by the external configuration collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Creates an empty holiday calendar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dates: BTreeSet::new(),
        }
    }

    /// Records a holiday date.
    pub fn record(&mut self, date: NaiveDate) {
        self.dates.insert(date);
    }

    /// Returns whether a date is a holiday.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// A minimum qualified headcount for a skill on a shift type and day
/// class. Supplied and edited externally; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRequirement {
    /// The skill the headcount applies to.
    pub skill: SkillId,
    /// The shift type the headcount applies to.
    pub shift_type: ShiftType,
    /// The day classification the headcount applies to.
    pub day_class: DayClass,
    /// The minimum number of qualified employees required.
    pub minimum_count: u32,
}

impl CoverageRequirement {
    /// Creates a new `CoverageRequirement`.
    #[must_use]
    pub const fn new(
        skill: SkillId,
        shift_type: ShiftType,
        day_class: DayClass,
        minimum_count: u32,
    ) -> Self {
        Self {
            skill,
            shift_type,
            day_class,
            minimum_count,
        }
    }
}

/// Severity classification of a coverage figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapSeverity {
    /// Scheduled headcount exceeds the requirement, or nothing is
    /// required.
    Good,
    /// Scheduled headcount exactly meets the requirement: zero slack, any
    /// absence causes a shortfall.
    Tight,
    /// Scheduled headcount falls short of the requirement.
    Bad,
}

impl GapSeverity {
    /// Classifies a scheduled count against a required count.
    ///
    /// A requirement of zero is always `Good`.
    #[must_use]
    pub const fn classify(scheduled: u32, required: u32) -> Self {
        if required == 0 {
            Self::Good
        } else if scheduled < required {
            Self::Bad
        } else if scheduled == required {
            Self::Tight
        } else {
            Self::Good
        }
    }

    /// Returns the string representation of this severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Tight => "Tight",
            Self::Bad => "Bad",
        }
    }
}

impl std::fmt::Display for GapSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A derived coverage figure for one (date, shift type, skill) tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageGap {
    /// The calendar date.
    pub date: NaiveDate,
    /// The shift type.
    pub shift_type: ShiftType,
    /// The skill.
    pub skill: SkillId,
    /// The required qualified headcount.
    pub required: u32,
    /// The scheduled qualified headcount.
    pub scheduled: u32,
    /// The shortfall: `max(0, required - scheduled)`.
    pub gap: u32,
    /// The severity classification.
    pub severity: GapSeverity,
}

/// Computes coverage gaps for a date range.
///
/// For each date in `[start, end]` and each requirement whose day class
/// matches the date, counts the distinct scheduled employees on that date
/// and shift type whose skill set includes the required skill. Skills are
/// looked up from the roster once, up front.
///
/// The engine is read-only: it never creates or mutates assignments, and
/// there is no cached gap state to invalidate. Callers recompute after
/// any mutation of the assignment set.
///
/// # Errors
///
/// Returns an error if `end` is before `start`.
pub fn compute_coverage_gaps(
    assignments: &[ScheduleAssignment],
    requirements: &[CoverageRequirement],
    roster: &[Employee],
    holidays: &HolidayCalendar,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CoverageGap>, DomainError> {
    validate_date_range(start, end)?;

    let employees_by_id: HashMap<i64, &Employee> = roster
        .iter()
        .map(|employee| (employee.employee_id, employee))
        .collect();

    let mut gaps: Vec<CoverageGap> = Vec::new();
    let mut date: NaiveDate = start;
    while date <= end {
        let day_class: DayClass = DayClass::classify(date, holidays);
        for requirement in requirements {
            if requirement.day_class != day_class {
                continue;
            }

            let mut scheduled_ids: BTreeSet<i64> = BTreeSet::new();
            for assignment in assignments {
                if assignment.date != date || assignment.shift_type != requirement.shift_type {
                    continue;
                }
                let qualified: bool = employees_by_id
                    .get(&assignment.employee_id)
                    .is_some_and(|employee| employee.is_qualified(&requirement.skill));
                if qualified {
                    scheduled_ids.insert(assignment.employee_id);
                }
            }

            #[allow(clippy::cast_possible_truncation)]
            let scheduled: u32 = scheduled_ids.len() as u32;
            let required: u32 = requirement.minimum_count;
            gaps.push(CoverageGap {
                date,
                shift_type: requirement.shift_type,
                skill: requirement.skill.clone(),
                required,
                scheduled,
                gap: required.saturating_sub(scheduled),
                severity: GapSeverity::classify(scheduled, required),
            });
        }
        date = date.succ_opt().ok_or(DomainError::InvalidDateRange {
            start,
            end,
        })?;
    }

    Ok(gaps)
}
