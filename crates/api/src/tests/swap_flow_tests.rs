// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    cause, date, default_context, requesting_employee, seeded_persistence, supervisor, test_now,
};
use crate::{
    ApproveSwapRequest, ClaimOpenSwapRequest, CreateSwapRequestRequest, DenySwapRequest,
    FillGapRequest, ListAssignmentsRequest, ListSwapRequestsRequest, ServiceError, approve_swap,
    claim_open_swap, create_swap_request, deny_swap, fill_gap, list_assignments,
    list_swap_requests,
};
use crew_rota::SchedulingContext;
use crew_rota_persistence::Persistence;

fn cross_crew_create_request() -> CreateSwapRequestRequest {
    CreateSwapRequestRequest {
        requester_id: 101,
        requester_date: date(2026, 1, 5),
        requester_shift_type: String::from("Day"),
        target_employee_id: Some(201),
        target_date: Some(date(2026, 1, 7)),
        target_shift_type: Some(String::from("Night")),
        reason: String::from("Family commitment"),
    }
}

fn same_crew_create_request() -> CreateSwapRequestRequest {
    // 101 and 102 are both crew A; 102's Night shift is on Jan 9.
    CreateSwapRequestRequest {
        requester_id: 101,
        requester_date: date(2026, 1, 5),
        requester_shift_type: String::from("Day"),
        target_employee_id: Some(102),
        target_date: Some(date(2026, 1, 9)),
        target_shift_type: Some(String::from("Night")),
        reason: String::from("Appointment"),
    }
}

fn create(
    persistence: &mut Persistence,
    context: &SchedulingContext,
    request: CreateSwapRequestRequest,
) -> i64 {
    create_swap_request(
        persistence,
        context,
        request,
        requesting_employee(),
        cause(),
        test_now(),
    )
    .unwrap()
    .request
    .swap_id
}

fn approve(
    persistence: &mut Persistence,
    context: &SchedulingContext,
    swap_id: i64,
    side: &str,
) -> Result<crate::ApproveSwapResponse, ServiceError> {
    approve_swap(
        persistence,
        context,
        ApproveSwapRequest {
            swap_id,
            approving_side: side.to_string(),
        },
        supervisor(),
        cause(),
        test_now(),
    )
}

#[test]
fn test_same_crew_swap_approves_after_exactly_one_approval() {
    // Crew mates share the rotation schedule, so a valid trade needs
    // each side free on the other's date: 102 was absent on Jan 5 and
    // 101 on Jan 9 when the roster was generated.
    let mut context = default_context();
    context.absences.record(102, date(2026, 1, 5));
    context.absences.record(101, date(2026, 1, 9));
    let mut persistence = seeded_persistence(&context);
    let swap_id: i64 = create(&mut persistence, &context, same_crew_create_request());

    let response = approve(&mut persistence, &context, swap_id, "Requester").unwrap();

    assert_eq!(response.request.status, "Approved");

    // The two employees' assignments for the two dates are exchanged.
    let assignments = list_assignments(
        &mut persistence,
        ListAssignmentsRequest {
            start_date: date(2026, 1, 5),
            end_date: date(2026, 1, 9),
        },
    )
    .unwrap();
    let jan_5 = assignments
        .assignments
        .iter()
        .find(|a| a.date == date(2026, 1, 5) && a.employee_id == 102)
        .unwrap();
    assert_eq!(jan_5.shift_type, "Day");
    assert_eq!(jan_5.source, "Swap");
    let jan_9 = assignments
        .assignments
        .iter()
        .find(|a| a.date == date(2026, 1, 9) && a.employee_id == 101)
        .unwrap();
    assert_eq!(jan_9.shift_type, "Night");
}

#[test]
fn test_cross_crew_swap_requires_both_approvals() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);
    let swap_id: i64 = create(&mut persistence, &context, cross_crew_create_request());

    let first = approve(&mut persistence, &context, swap_id, "Requester").unwrap();
    assert_eq!(first.request.status, "Pending");
    assert!(first.request.requester_approved);
    assert!(first.message.contains("waiting for other approval"));

    let second = approve(&mut persistence, &context, swap_id, "Target").unwrap();
    assert_eq!(second.request.status, "Approved");

    // Exactly one exchange: 201 covers Jan 5, 101 covers Jan 7.
    let assignments = list_assignments(
        &mut persistence,
        ListAssignmentsRequest {
            start_date: date(2026, 1, 5),
            end_date: date(2026, 1, 7),
        },
    )
    .unwrap();
    assert!(
        assignments
            .assignments
            .iter()
            .any(|a| a.date == date(2026, 1, 5) && a.employee_id == 201)
    );
    assert!(
        assignments
            .assignments
            .iter()
            .any(|a| a.date == date(2026, 1, 7) && a.employee_id == 101)
    );
}

#[test]
fn test_reapproving_a_recorded_side_does_not_retrigger_the_swap() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);
    let swap_id: i64 = create(&mut persistence, &context, cross_crew_create_request());

    approve(&mut persistence, &context, swap_id, "Requester").unwrap();
    approve(&mut persistence, &context, swap_id, "Target").unwrap();

    // The request is terminal now; a repeated approval is rejected and
    // the assignments stay as the single exchange left them.
    let result = approve(&mut persistence, &context, swap_id, "Target");
    assert!(matches!(
        result,
        Err(ServiceError::InvalidStateTransition { .. })
    ));
}

#[test]
fn test_repeated_approval_while_pending_is_a_noop() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);
    let swap_id: i64 = create(&mut persistence, &context, cross_crew_create_request());

    let first = approve(&mut persistence, &context, swap_id, "Requester").unwrap();
    let again = approve(&mut persistence, &context, swap_id, "Requester").unwrap();

    assert_eq!(again.request.status, "Pending");
    assert_eq!(
        again.request.requester_approved,
        first.request.requester_approved
    );
    // No assignment moved.
    let assignments = list_assignments(
        &mut persistence,
        ListAssignmentsRequest {
            start_date: date(2026, 1, 5),
            end_date: date(2026, 1, 7),
        },
    )
    .unwrap();
    assert!(
        assignments
            .assignments
            .iter()
            .all(|a| a.source == "Rotation")
    );
}

#[test]
fn test_denial_after_partial_approval_is_final_with_no_mutation() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);
    let swap_id: i64 = create(&mut persistence, &context, cross_crew_create_request());

    approve(&mut persistence, &context, swap_id, "Requester").unwrap();

    let denied = deny_swap(
        &mut persistence,
        &context,
        DenySwapRequest {
            swap_id,
            approving_side: String::from("Target"),
            reason: String::from("Coverage too thin"),
        },
        supervisor(),
        cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(denied.request.status, "Denied");
    assert_eq!(
        denied.request.denial_reason.as_deref(),
        Some("Coverage too thin")
    );

    let assignments = list_assignments(
        &mut persistence,
        ListAssignmentsRequest {
            start_date: date(2026, 1, 5),
            end_date: date(2026, 1, 7),
        },
    )
    .unwrap();
    assert!(
        assignments
            .assignments
            .iter()
            .all(|a| a.source == "Rotation")
    );
}

#[test]
fn test_stale_second_approval_is_conflict_and_request_stays_pending() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);
    let swap_id: i64 = create(&mut persistence, &context, cross_crew_create_request());

    approve(&mut persistence, &context, swap_id, "Requester").unwrap();

    // Crew B's 201 is independently assigned another shift on the date
    // they would swap into.
    fill_gap(
        &mut persistence,
        &context,
        FillGapRequest {
            employee_id: 201,
            date: date(2026, 1, 5),
            shift_type: String::from("Evening"),
            crew: String::from("B"),
        },
        supervisor(),
        cause(),
        test_now(),
    )
    .unwrap();

    let result = approve(&mut persistence, &context, swap_id, "Target");

    assert!(matches!(result, Err(ServiceError::Conflict { .. })));
    let queue = list_swap_requests(
        &mut persistence,
        ListSwapRequestsRequest {
            status: Some(String::from("Pending")),
            crew: None,
        },
    )
    .unwrap();
    assert_eq!(queue.requests.len(), 1);
    assert_eq!(queue.requests[0].swap_id, swap_id);
}

#[test]
fn test_open_swap_claim_then_approval_transfers_the_shift() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);
    let swap_id: i64 = create(
        &mut persistence,
        &context,
        CreateSwapRequestRequest {
            target_employee_id: None,
            target_date: None,
            target_shift_type: None,
            ..cross_crew_create_request()
        },
    );

    // Approving before any volunteer claims is a conflict.
    let early = approve(&mut persistence, &context, swap_id, "Requester");
    assert!(matches!(early, Err(ServiceError::Conflict { .. })));

    // 202 (crew B) is off on Jan 5 and volunteers through the gap-fill
    // path.
    let claimed = claim_open_swap(
        &mut persistence,
        &context,
        ClaimOpenSwapRequest {
            swap_id,
            volunteer_id: 202,
        },
        requesting_employee(),
        cause(),
        test_now(),
    )
    .unwrap();
    assert_eq!(claimed.request.target_employee_id, Some(202));
    assert_eq!(claimed.request.target_crew.as_deref(), Some("B"));

    // Volunteer crew B differs from requester crew A: dual approval.
    let first = approve(&mut persistence, &context, swap_id, "Requester").unwrap();
    assert_eq!(first.request.status, "Pending");
    let second = approve(&mut persistence, &context, swap_id, "Target").unwrap();
    assert_eq!(second.request.status, "Approved");

    let assignments = list_assignments(
        &mut persistence,
        ListAssignmentsRequest {
            start_date: date(2026, 1, 5),
            end_date: date(2026, 1, 5),
        },
    )
    .unwrap();
    let transferred = assignments
        .assignments
        .iter()
        .find(|a| a.employee_id == 202)
        .unwrap();
    assert_eq!(transferred.shift_type, "Day");
    assert_eq!(transferred.crew, "A");
    assert_eq!(transferred.source, "Swap");
    assert!(
        !assignments
            .assignments
            .iter()
            .any(|a| a.employee_id == 101)
    );
}

#[test]
fn test_partial_target_fields_are_invalid_input() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);

    let result = create_swap_request(
        &mut persistence,
        &context,
        CreateSwapRequestRequest {
            target_date: None,
            ..cross_crew_create_request()
        },
        requesting_employee(),
        cause(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(ServiceError::InvalidInput { ref field, .. }) if field == "target"
    ));
}

#[test]
fn test_unknown_swap_request_is_not_found() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);

    let result = approve(&mut persistence, &context, 99, "Requester");

    assert!(matches!(
        result,
        Err(ServiceError::ResourceNotFound { ref resource_type, .. })
            if resource_type == "Swap request"
    ));
}

#[test]
fn test_invalid_side_is_invalid_input() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);
    let swap_id: i64 = create(&mut persistence, &context, cross_crew_create_request());

    let result = approve(&mut persistence, &context, swap_id, "Manager");

    assert!(matches!(
        result,
        Err(ServiceError::InvalidInput { ref field, .. }) if field == "approving_side"
    ));
}

#[test]
fn test_supervisor_queue_sees_cross_crew_request_from_both_sides() {
    let context = default_context();
    let mut persistence = seeded_persistence(&context);
    create(&mut persistence, &context, cross_crew_create_request());

    for crew in ["A", "B"] {
        let queue = list_swap_requests(
            &mut persistence,
            ListSwapRequestsRequest {
                status: Some(String::from("Pending")),
                crew: Some(crew.to_string()),
            },
        )
        .unwrap();
        assert_eq!(queue.requests.len(), 1, "crew {crew} queue");
    }

    let uninvolved = list_swap_requests(
        &mut persistence,
        ListSwapRequestsRequest {
            status: Some(String::from("Pending")),
            crew: Some(String::from("D")),
        },
    )
    .unwrap();
    assert!(uninvolved.requests.is_empty());
}
