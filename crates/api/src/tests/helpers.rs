// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{GenerateRotationRequest, generate_rotation};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use crew_rota::SchedulingContext;
use crew_rota_audit::{Actor, ActorKind, Cause};
use crew_rota_domain::{
    AbsenceCalendar, CoverageRequirement, Crew, Employee, HolidayCalendar, OvertimePolicy,
    RotationPattern, ShiftDurations, SkillId,
};
use crew_rota_persistence::Persistence;
use std::collections::BTreeSet;

pub fn supervisor() -> Actor {
    Actor::new(String::from("sup-14"), ActorKind::Supervisor)
}

pub fn requesting_employee() -> Actor {
    Actor::new(String::from("emp-101"), ActorKind::Employee)
}

pub fn cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Test request"))
}

pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn skilled_employee(id: i64, crew: Crew, skills: &[&str]) -> Employee {
    Employee::new(
        id,
        format!("Employee {id}"),
        Some(crew),
        String::from("Operator"),
        skills
            .iter()
            .map(|s| SkillId::new(s).unwrap())
            .collect::<BTreeSet<SkillId>>(),
        true,
    )
}

pub fn context_with(
    employees: Vec<Employee>,
    requirements: Vec<CoverageRequirement>,
) -> SchedulingContext {
    SchedulingContext::new(
        employees,
        AbsenceCalendar::new(),
        HolidayCalendar::new(),
        requirements,
        vec![RotationPattern::two_two(date(2026, 1, 5)).unwrap()],
        ShiftDurations::new(12, 12, 12).unwrap(),
        OvertimePolicy::new(7, 40).unwrap(),
    )
}

/// Two employees per crew, no skills, no requirements.
pub fn default_context() -> SchedulingContext {
    context_with(
        vec![
            skilled_employee(101, Crew::A, &[]),
            skilled_employee(102, Crew::A, &[]),
            skilled_employee(201, Crew::B, &[]),
            skilled_employee(202, Crew::B, &[]),
            skilled_employee(301, Crew::C, &[]),
            skilled_employee(302, Crew::C, &[]),
            skilled_employee(401, Crew::D, &[]),
            skilled_employee(402, Crew::D, &[]),
        ],
        Vec::new(),
    )
}

pub fn generation_request(replace_rotation: bool) -> GenerateRotationRequest {
    GenerateRotationRequest {
        pattern_id: String::from("2-2"),
        phase_offsets: vec![
            (String::from("A"), 0),
            (String::from("B"), 2),
            (String::from("C"), 4),
            (String::from("D"), 6),
        ],
        start_date: date(2026, 1, 5),
        end_date: date(2026, 1, 12),
        replace_rotation,
    }
}

/// A fresh in-memory database with the 2-2 rotation generated for
/// Jan 5-12.
pub fn seeded_persistence(context: &SchedulingContext) -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    generate_rotation(
        &mut persistence,
        context,
        generation_request(false),
        supervisor(),
        cause(),
        test_now(),
    )
    .unwrap();
    persistence
}
