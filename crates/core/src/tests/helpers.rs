// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{SchedulingContext, State};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use crew_rota_audit::{Actor, ActorKind, Cause};
use crew_rota_domain::{
    AbsenceCalendar, AssignmentSource, Crew, Employee, HolidayCalendar, OvertimePolicy,
    RotationPattern, ScheduleAssignment, ShiftDurations, ShiftType,
};
use std::collections::BTreeSet;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("sup-14"), ActorKind::Supervisor)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Supervisor request"))
}

pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn employee(id: i64, crew: Crew) -> Employee {
    Employee::new(
        id,
        format!("Employee {id}"),
        Some(crew),
        String::from("Operator"),
        BTreeSet::new(),
        true,
    )
}

/// A context with two employees per crew (101/102 in A, 201/202 in B,
/// 301/302 in C, 401/402 in D) and the built-in 2-2 pattern anchored at
/// 2026-01-05.
pub fn create_test_context() -> SchedulingContext {
    let epoch: NaiveDate = date(2026, 1, 5);
    SchedulingContext::new(
        vec![
            employee(101, Crew::A),
            employee(102, Crew::A),
            employee(201, Crew::B),
            employee(202, Crew::B),
            employee(301, Crew::C),
            employee(302, Crew::C),
            employee(401, Crew::D),
            employee(402, Crew::D),
        ],
        AbsenceCalendar::new(),
        HolidayCalendar::new(),
        Vec::new(),
        vec![RotationPattern::two_two(epoch).unwrap()],
        ShiftDurations::new(12, 12, 12).unwrap(),
        OvertimePolicy::new(7, 40).unwrap(),
    )
}

pub fn rotation_assignment(
    assignment_id: i64,
    employee_id: i64,
    on: NaiveDate,
    shift_type: ShiftType,
    crew: Crew,
) -> ScheduleAssignment {
    ScheduleAssignment::with_id(
        assignment_id,
        employee_id,
        on,
        shift_type,
        crew,
        AssignmentSource::Rotation,
    )
}

/// A state where employee 101 (crew A) works Day on March 9 and employee
/// 201 (crew B) works Night on March 12.
pub fn two_shift_state() -> State {
    State::with_rows(
        vec![
            rotation_assignment(1, 101, date(2026, 3, 9), ShiftType::Day, Crew::A),
            rotation_assignment(2, 201, date(2026, 3, 12), ShiftType::Night, Crew::B),
        ],
        Vec::new(),
    )
}
