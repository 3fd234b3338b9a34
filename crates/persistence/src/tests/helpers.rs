// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use crew_rota::{Command, SchedulingContext, State, TransitionResult, apply};
use crew_rota_audit::{Actor, ActorKind, Cause};
use crew_rota_domain::{
    AbsenceCalendar, Crew, CrewPhaseMap, Employee, HolidayCalendar, OvertimePolicy,
    RotationPattern, ShiftDurations, ShiftType, SwapRequest,
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

pub fn create_test_context() -> SchedulingContext {
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
        vec![RotationPattern::two_two(date(2026, 1, 5)).unwrap()],
        ShiftDurations::new(12, 12, 12).unwrap(),
        OvertimePolicy::new(7, 40).unwrap(),
    )
}

pub fn four_crew_phase_map() -> CrewPhaseMap {
    CrewPhaseMap::new([(Crew::A, 0), (Crew::B, 2), (Crew::C, 4), (Crew::D, 6)]).unwrap()
}

/// Applies a command against state loaded through the adapter, the way
/// the service layer does.
pub fn apply_command(
    persistence: &mut Persistence,
    state: &State,
    command: Command,
) -> TransitionResult {
    apply(
        &create_test_context(),
        state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
}

/// Generates and persists the 2-2 rotation for Jan 5-12 on a fresh
/// database.
pub fn seed_generation(persistence: &mut Persistence) {
    let command: Command = Command::GenerateRotation {
        pattern_id: String::from("2-2"),
        phase_map: four_crew_phase_map(),
        start_date: date(2026, 1, 5),
        end_date: date(2026, 1, 12),
        replace_rotation: false,
    };
    let transition: TransitionResult = apply_command(persistence, &State::new(), command);
    persistence
        .persist_generation(&transition, date(2026, 1, 5), date(2026, 1, 12), false)
        .unwrap();
}

/// Creates and persists a cross-crew paired swap request between
/// employee 101 (Day, Jan 5) and employee 201 (Night, Jan 7), returning
/// it with its assigned id.
pub fn seed_cross_crew_request(persistence: &mut Persistence) -> SwapRequest {
    seed_generation(persistence);
    let assignments = persistence
        .assignments_on_dates(&[date(2026, 1, 5), date(2026, 1, 7)])
        .unwrap();
    let state = State::with_rows(assignments, Vec::new());
    let command: Command = Command::CreateSwapRequest {
        requester_id: 101,
        requester_date: date(2026, 1, 5),
        requester_shift_type: ShiftType::Day,
        target: Some(crew_rota::SwapCounterpart {
            employee_id: 201,
            date: date(2026, 1, 7),
            shift_type: ShiftType::Night,
        }),
        reason: String::from("Family commitment"),
    };
    let transition: TransitionResult = apply_command(persistence, &state, command);
    persistence.persist_swap_request(&transition).unwrap()
}

/// Loads the request plus the assignments on its dates and applies a
/// swap command, returning the transition and the version it was
/// applied against.
pub fn swap_transition(
    persistence: &mut Persistence,
    swap_id: i64,
    command: Command,
) -> (TransitionResult, i64) {
    let loaded: SwapRequest = persistence.get_swap_request(swap_id).unwrap().unwrap();
    let mut dates = vec![loaded.requester.date];
    if let Some(target) = loaded.target {
        if target.date != loaded.requester.date {
            dates.push(target.date);
        }
    }
    let assignments = persistence.assignments_on_dates(&dates).unwrap();
    let expected_version: i64 = loaded.version;
    let state = State::with_rows(assignments, vec![loaded]);
    (
        apply_command(persistence, &state, command),
        expected_version,
    )
}
