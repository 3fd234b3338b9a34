// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Represents a crew identifier.
///
/// Crews are a fixed domain constant: four rotating crews named A through D.
/// Employees hold zero or one crew assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Crew {
    A,
    B,
    C,
    D,
}

impl Crew {
    /// All crews, in display order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Parses a crew from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid crew.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            _ => Err(DomainError::InvalidCrew(format!("Unknown crew: {s}"))),
        }
    }

    /// Returns the string representation of this crew.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl FromStr for Crew {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Crew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a shift type.
///
/// Shift types are fixed domain constants. Each maps to a configured
/// duration via [`crate::hours::ShiftDurations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    Day,
    Evening,
    Night,
}

impl ShiftType {
    /// Parses a shift type from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid shift type.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Day" => Ok(Self::Day),
            "Evening" => Ok(Self::Evening),
            "Night" => Ok(Self::Night),
            _ => Err(DomainError::InvalidShiftType(format!(
                "Unknown shift type: {s}"
            ))),
        }
    }

    /// Returns the string representation of this shift type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }
}

impl FromStr for ShiftType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of a calendar date for coverage purposes.
///
/// Holidays take precedence over the weekday/weekend split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayClass {
    Weekday,
    Weekend,
    Holiday,
}

impl DayClass {
    /// Classifies a date against a holiday calendar.
    ///
    /// A date listed in the holiday calendar is a `Holiday` regardless of
    /// its weekday.
    #[must_use]
    pub fn classify(date: NaiveDate, holidays: &crate::coverage::HolidayCalendar) -> Self {
        if holidays.contains(date) {
            return Self::Holiday;
        }
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => Self::Weekend,
            _ => Self::Weekday,
        }
    }

    /// Parses a day class from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid day class.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Weekday" => Ok(Self::Weekday),
            "Weekend" => Ok(Self::Weekend),
            "Holiday" => Ok(Self::Holiday),
            _ => Err(DomainError::InvalidDayClass(format!(
                "Unknown day class: {s}"
            ))),
        }
    }

    /// Returns the string representation of this day class.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekday => "Weekday",
            Self::Weekend => "Weekend",
            Self::Holiday => "Holiday",
        }
    }
}

impl FromStr for DayClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DayClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Records how a schedule assignment came to exist.
///
/// Rotation-sourced rows may be replaced wholesale during regeneration;
/// manual-fill and swap rows may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentSource {
    /// Produced by rotation generation.
    Rotation,
    /// Inserted by a gap-fill action.
    ManualFill,
    /// Produced by an approved swap.
    Swap,
}

impl AssignmentSource {
    /// Parses an assignment source from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid source.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Rotation" => Ok(Self::Rotation),
            "ManualFill" => Ok(Self::ManualFill),
            "Swap" => Ok(Self::Swap),
            _ => Err(DomainError::InvalidAssignmentSource(format!(
                "Unknown assignment source: {s}"
            ))),
        }
    }

    /// Returns the string representation of this source.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rotation => "Rotation",
            Self::ManualFill => "ManualFill",
            Self::Swap => "Swap",
        }
    }
}

impl FromStr for AssignmentSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for AssignmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a skill identifier.
///
/// Skill identifiers are owned by the external HR collaborator and are
/// normalized to uppercase so roster skill sets and coverage requirements
/// match case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkillId {
    value: String,
}

impl SkillId {
    /// Creates a new `SkillId`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidSkill(String::from(
                "Skill identifier cannot be empty",
            )));
        }
        Ok(Self {
            value: value.trim().to_uppercase(),
        })
    }

    /// Returns the skill identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A roster record for an employee.
///
/// Employees are owned by the external HR collaborator and consumed
/// read-only here; `employee_id` is the canonical identifier used to
/// reference them throughout the scheduling core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Canonical identifier assigned by the HR collaborator.
    pub employee_id: i64,
    /// The employee's name (informational, not unique).
    pub name: String,
    /// The crew this employee belongs to, if any.
    pub crew: Option<Crew>,
    /// The employee's position title.
    pub position: String,
    /// The set of skills this employee is qualified for.
    pub skills: BTreeSet<SkillId>,
    /// Whether the employee is active. Inactive employees never receive
    /// generated assignments.
    pub active: bool,
}

impl Employee {
    /// Creates a new `Employee` roster record.
    #[must_use]
    pub const fn new(
        employee_id: i64,
        name: String,
        crew: Option<Crew>,
        position: String,
        skills: BTreeSet<SkillId>,
        active: bool,
    ) -> Self {
        Self {
            employee_id,
            name,
            crew,
            position,
            skills,
            active,
        }
    }

    /// Returns whether this employee is qualified for a skill.
    #[must_use]
    pub fn is_qualified(&self, skill: &SkillId) -> bool {
        self.skills.contains(skill)
    }
}

/// A concrete shift assignment: one employee working one shift type on
/// one date, as part of one crew's schedule.
///
/// At most one assignment may exist per `(employee_id, date)` pair; the
/// persistence layer enforces this with a unique index and the core
/// transition function checks it before every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the assignment has not been persisted yet.
    pub assignment_id: Option<i64>,
    /// The employee working the shift.
    pub employee_id: i64,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// The shift type worked.
    pub shift_type: ShiftType,
    /// The crew whose schedule this slot belongs to. A swapped-in employee
    /// covers the slot without changing its crew.
    pub crew: Crew,
    /// How the assignment came to exist.
    pub source: AssignmentSource,
}

impl ScheduleAssignment {
    /// Creates a new `ScheduleAssignment` without a persisted ID.
    #[must_use]
    pub const fn new(
        employee_id: i64,
        date: NaiveDate,
        shift_type: ShiftType,
        crew: Crew,
        source: AssignmentSource,
    ) -> Self {
        Self {
            assignment_id: None,
            employee_id,
            date,
            shift_type,
            crew,
            source,
        }
    }

    /// Creates a `ScheduleAssignment` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        assignment_id: i64,
        employee_id: i64,
        date: NaiveDate,
        shift_type: ShiftType,
        crew: Crew,
        source: AssignmentSource,
    ) -> Self {
        Self {
            assignment_id: Some(assignment_id),
            employee_id,
            date,
            shift_type,
            crew,
            source,
        }
    }
}
