// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{date, seed_cross_crew_request, swap_transition, test_now};
use crate::{Persistence, PersistenceError};
use crew_rota::Command;
use crew_rota_domain::{
    ApprovalSide, AssignmentSource, Crew, ShiftType, SwapKind, SwapStatus,
};

#[test]
fn test_swap_request_round_trips_through_the_database() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let persisted = seed_cross_crew_request(&mut persistence);
    let swap_id: i64 = persisted.swap_id.unwrap();

    let loaded = persistence.get_swap_request(swap_id).unwrap().unwrap();

    assert_eq!(loaded.kind, SwapKind::Paired);
    assert_eq!(loaded.status, SwapStatus::Pending);
    assert_eq!(loaded.requester.employee_id, 101);
    assert_eq!(loaded.requester.crew, Crew::A);
    assert_eq!(loaded.requester.shift_type, ShiftType::Day);
    let target = loaded.target.unwrap();
    assert_eq!(target.employee_id, 201);
    assert_eq!(target.crew, Crew::B);
    assert_eq!(loaded.reason, "Family commitment");
    assert_eq!(loaded.created_at, test_now());
    assert_eq!(loaded.version, 0);
    assert!(loaded.requester_decided_at.is_none());
}

#[test]
fn test_missing_swap_request_is_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.get_swap_request(99).unwrap().is_none());
}

#[test]
fn test_single_approval_is_persisted_with_version_bump() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let swap_id: i64 = seed_cross_crew_request(&mut persistence).swap_id.unwrap();

    let (transition, expected_version) = swap_transition(
        &mut persistence,
        swap_id,
        Command::ApproveSwap {
            swap_id,
            side: ApprovalSide::Requester,
        },
    );
    let persisted = persistence
        .persist_swap_update(&transition, swap_id, expected_version)
        .unwrap();

    assert_eq!(persisted.status, SwapStatus::Pending);
    assert_eq!(persisted.version, 1);

    let loaded = persistence.get_swap_request(swap_id).unwrap().unwrap();
    assert!(loaded.requester_approved);
    assert!(!loaded.target_approved);
    assert_eq!(loaded.requester_decided_at, Some(test_now()));
    assert_eq!(loaded.version, 1);
}

#[test]
fn test_stale_version_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let swap_id: i64 = seed_cross_crew_request(&mut persistence).swap_id.unwrap();

    let (first, version_before) = swap_transition(
        &mut persistence,
        swap_id,
        Command::ApproveSwap {
            swap_id,
            side: ApprovalSide::Requester,
        },
    );
    persistence
        .persist_swap_update(&first, swap_id, version_before)
        .unwrap();

    // A second writer that read the request before the first commit now
    // tries to commit against the old version.
    let result = persistence.persist_swap_update(&first, swap_id, version_before);

    assert!(matches!(
        result,
        Err(PersistenceError::StaleVersion {
            expected_version: 0,
            ..
        })
    ));
}

#[test]
fn test_full_approval_exchanges_assignments_in_storage() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let swap_id: i64 = seed_cross_crew_request(&mut persistence).swap_id.unwrap();

    for side in [ApprovalSide::Requester, ApprovalSide::Target] {
        let (transition, version) = swap_transition(
            &mut persistence,
            swap_id,
            Command::ApproveSwap { swap_id, side },
        );
        persistence
            .persist_swap_update(&transition, swap_id, version)
            .unwrap();
    }

    let loaded = persistence.get_swap_request(swap_id).unwrap().unwrap();
    assert_eq!(loaded.status, SwapStatus::Approved);
    assert_eq!(loaded.version, 2);

    // Employee 201 now covers the crew A Day slot on Jan 5; employee 101
    // covers the crew B Night slot on Jan 7.
    let jan_5 = persistence.assignments_on_dates(&[date(2026, 1, 5)]).unwrap();
    let swapped_in = jan_5.iter().find(|a| a.employee_id == 201).unwrap();
    assert_eq!(swapped_in.shift_type, ShiftType::Day);
    assert_eq!(swapped_in.crew, Crew::A);
    assert_eq!(swapped_in.source, AssignmentSource::Swap);
    assert!(!jan_5.iter().any(|a| a.employee_id == 101));

    let jan_7 = persistence.assignments_on_dates(&[date(2026, 1, 7)]).unwrap();
    let swapped_out = jan_7.iter().find(|a| a.employee_id == 101).unwrap();
    assert_eq!(swapped_out.shift_type, ShiftType::Night);
    assert_eq!(swapped_out.crew, Crew::B);

    // Generation, creation, and one event per approval.
    let timeline = persistence.get_audit_timeline().unwrap();
    assert_eq!(timeline.len(), 4);
    assert_eq!(timeline[3].action.name, "ApproveSwap");
}

#[test]
fn test_denial_is_persisted_without_touching_assignments() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let swap_id: i64 = seed_cross_crew_request(&mut persistence).swap_id.unwrap();
    let before = persistence
        .assignments_in_range(date(2026, 1, 5), date(2026, 1, 12))
        .unwrap();

    let (transition, version) = swap_transition(
        &mut persistence,
        swap_id,
        Command::DenySwap {
            swap_id,
            side: ApprovalSide::Target,
            reason: String::from("Coverage too thin"),
        },
    );
    persistence
        .persist_swap_update(&transition, swap_id, version)
        .unwrap();

    let loaded = persistence.get_swap_request(swap_id).unwrap().unwrap();
    assert_eq!(loaded.status, SwapStatus::Denied);
    assert_eq!(loaded.denial_reason.as_deref(), Some("Coverage too thin"));
    let after = persistence
        .assignments_in_range(date(2026, 1, 5), date(2026, 1, 12))
        .unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_queue_listing_filters_by_status_and_crew() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let swap_id: i64 = seed_cross_crew_request(&mut persistence).swap_id.unwrap();

    let pending = persistence
        .list_swap_requests(Some(SwapStatus::Pending), None)
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].swap_id, Some(swap_id));

    // The crew filter matches either side of a cross-crew request.
    for crew in [Crew::A, Crew::B] {
        let queue = persistence
            .list_swap_requests(Some(SwapStatus::Pending), Some(crew))
            .unwrap();
        assert_eq!(queue.len(), 1, "crew {crew} should see the request");
    }
    let other = persistence
        .list_swap_requests(Some(SwapStatus::Pending), Some(Crew::C))
        .unwrap();
    assert!(other.is_empty());

    let approved = persistence
        .list_swap_requests(Some(SwapStatus::Approved), None)
        .unwrap();
    assert!(approved.is_empty());
}
