// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, SwapCounterpart};
use crate::error::CoreError;
use crate::state::{AssignmentMutation, SchedulingContext, State, TransitionResult};
use chrono::{DateTime, NaiveDate, Utc};
use crew_rota_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use crew_rota_domain::{
    ApprovalSide, AssignmentSource, DomainError, RotationPattern, ScheduleAssignment,
    ShiftType, SwapKind, SwapRequest, SwapShift, SwapStatus, find_duplicate_assignment,
    generate_rotation, require_active_employee, validate_swap_reason,
};

/// Applies a command to the current state, producing a new state, the
/// row-level mutations it implies, and an audit event.
///
/// The function is pure: it never touches storage, and the same
/// `(context, state, command, now)` always produces the same result. The
/// persistence layer commits the mutations and the audit event in one
/// transaction, re-validating the concurrency-sensitive invariants under
/// the database's locks.
///
/// # Arguments
///
/// * `context` - Read-only collaborator data (roster, calendars, config)
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The injected current time, stamped onto decisions
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, mutations, and
///   audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - The mutation would double-book an employee
/// - Regeneration would overwrite manually placed assignments
/// - A swap transition is invalid for the request's status
#[allow(clippy::too_many_lines)]
pub fn apply(
    context: &SchedulingContext,
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::GenerateRotation {
            pattern_id,
            phase_map,
            start_date,
            end_date,
            replace_rotation,
        } => {
            let pattern: &RotationPattern =
                context
                    .pattern(&pattern_id)
                    .ok_or(CoreError::DomainViolation(DomainError::PatternNotFound {
                        pattern_id: pattern_id.clone(),
                    }))?;

            let generated: Vec<ScheduleAssignment> = generate_rotation(
                pattern,
                &phase_map,
                &context.employees,
                &context.absences,
                start_date,
                end_date,
            )?;

            // Without the replace flag, any existing row in the range
            // blocks regeneration. With it, rotation-sourced rows are
            // replaced and manually placed rows are preserved untouched.
            let in_range = |assignment: &ScheduleAssignment| {
                assignment.date >= start_date && assignment.date <= end_date
            };
            if !replace_rotation {
                let existing: Vec<&ScheduleAssignment> =
                    state.assignments.iter().filter(|a| in_range(a)).collect();
                let conflicting: Option<&&ScheduleAssignment> = existing
                    .iter()
                    .find(|assignment| assignment.source != AssignmentSource::Rotation)
                    .or_else(|| existing.first());
                if let Some(conflicting) = conflicting {
                    return Err(CoreError::RegenerationConflict {
                        employee_id: conflicting.employee_id,
                        date: conflicting.date,
                        source: conflicting.source,
                    });
                }
            }

            // Preserved rows keep their slot: a generated row that lands on
            // an occupied (employee, date) is dropped, not inserted over it.
            let preserved: Vec<ScheduleAssignment> = state
                .assignments
                .iter()
                .filter(|assignment| {
                    !in_range(assignment) || assignment.source != AssignmentSource::Rotation
                })
                .cloned()
                .collect();
            let kept: Vec<ScheduleAssignment> = generated
                .into_iter()
                .filter(|generated_row| {
                    !preserved.iter().any(|existing| {
                        existing.employee_id == generated_row.employee_id
                            && existing.date == generated_row.date
                    })
                })
                .collect();

            let mut new_assignments: Vec<ScheduleAssignment> = preserved;
            new_assignments.extend(kept.iter().cloned());
            if let Some((employee_id, date)) = find_duplicate_assignment(&new_assignments) {
                return Err(CoreError::DoubleBooked { employee_id, date });
            }

            let before: StateSnapshot = state.to_snapshot();
            let new_state: State = State {
                assignments: new_assignments,
                swap_requests: state.swap_requests.clone(),
            };
            let after: StateSnapshot = new_state.to_snapshot();

            let mut mutations: Vec<AssignmentMutation> = Vec::with_capacity(kept.len() + 1);
            if replace_rotation {
                mutations.push(AssignmentMutation::DeleteRotationRange {
                    start: start_date,
                    end: end_date,
                });
            }
            mutations.extend(kept.iter().cloned().map(AssignmentMutation::Insert));

            let action: Action = Action::new(
                String::from("GenerateRotation"),
                Some(format!(
                    "Generated {} assignments from pattern '{}' for {start_date} through {end_date}",
                    kept.len(),
                    pattern.pattern_id(),
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

            Ok(TransitionResult {
                new_state,
                mutations,
                audit_event,
            })
        }
        Command::FillGap {
            employee_id,
            date,
            shift_type,
            crew,
        } => {
            require_active_employee(&context.employees, employee_id)?;

            if state.assignment_for(employee_id, date).is_some() {
                return Err(CoreError::DoubleBooked { employee_id, date });
            }

            let assignment: ScheduleAssignment = ScheduleAssignment::new(
                employee_id,
                date,
                shift_type,
                crew,
                AssignmentSource::ManualFill,
            );

            let before: StateSnapshot = state.to_snapshot();
            let mut new_state: State = state.clone();
            new_state.assignments.push(assignment.clone());
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("FillGap"),
                Some(format!(
                    "Assigned employee {employee_id} to {shift_type} shift on {date} for crew {crew}"
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

            Ok(TransitionResult {
                new_state,
                mutations: vec![AssignmentMutation::Insert(assignment)],
                audit_event,
            })
        }
        Command::CreateSwapRequest {
            requester_id,
            requester_date,
            requester_shift_type,
            target,
            reason,
        } => {
            validate_swap_reason(&reason)?;
            require_active_employee(&context.employees, requester_id)?;

            let requester_assignment: &ScheduleAssignment = held_assignment(
                state,
                requester_id,
                requester_date,
                requester_shift_type,
            )?;
            let requester_shift: SwapShift = SwapShift::new(
                requester_id,
                requester_date,
                requester_shift_type,
                requester_assignment.crew,
            );

            let (kind, target_shift): (SwapKind, Option<SwapShift>) = match target {
                Some(SwapCounterpart {
                    employee_id,
                    date,
                    shift_type,
                }) => {
                    if employee_id == requester_id {
                        return Err(CoreError::DomainViolation(DomainError::SwapWithSelf {
                            employee_id,
                        }));
                    }
                    require_active_employee(&context.employees, employee_id)?;
                    let target_assignment: &ScheduleAssignment =
                        held_assignment(state, employee_id, date, shift_type)?;
                    (
                        SwapKind::Paired,
                        Some(SwapShift::new(
                            employee_id,
                            date,
                            shift_type,
                            target_assignment.crew,
                        )),
                    )
                }
                None => (SwapKind::Open, None),
            };

            let request: SwapRequest =
                SwapRequest::new(kind, requester_shift, target_shift, reason, now);

            let before: StateSnapshot = state.to_snapshot();
            let mut new_state: State = state.clone();
            new_state.swap_requests.push(request);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("CreateSwapRequest"),
                Some(format!(
                    "Employee {requester_id} requested a {kind} swap of their {requester_shift_type} shift on {requester_date}"
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

            Ok(TransitionResult {
                new_state,
                mutations: Vec::new(),
                audit_event,
            })
        }
        Command::ClaimOpenSwap {
            swap_id,
            volunteer_id,
        } => {
            let request: &SwapRequest = find_request(state, swap_id)?;
            require_not_terminal(request, swap_id, "claim")?;
            if request.kind != SwapKind::Open {
                return Err(CoreError::DomainViolation(DomainError::InvalidSwapKind(
                    String::from("Only open requests can be claimed"),
                )));
            }
            if request.target.is_some() {
                return Err(CoreError::SwapAlreadyClaimed { swap_id });
            }
            if volunteer_id == request.requester.employee_id {
                return Err(CoreError::DomainViolation(DomainError::SwapWithSelf {
                    employee_id: volunteer_id,
                }));
            }
            let volunteer = require_active_employee(&context.employees, volunteer_id)?;
            let claim_date: NaiveDate = request.requester.date;
            if state.assignment_for(volunteer_id, claim_date).is_some() {
                return Err(CoreError::DoubleBooked {
                    employee_id: volunteer_id,
                    date: claim_date,
                });
            }

            // A crewless volunteer (casual worker) has no supervisor of
            // their own; the requester's side carries the approval.
            let volunteer_crew = volunteer.crew.unwrap_or(request.requester.crew);
            let mut updated: SwapRequest = request.clone();
            updated.target = Some(SwapShift::new(
                volunteer_id,
                claim_date,
                request.requester.shift_type,
                volunteer_crew,
            ));

            let before: StateSnapshot = state.to_snapshot();
            let new_state: State = replace_request(state, swap_id, updated);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("ClaimOpenSwap"),
                Some(format!(
                    "Employee {volunteer_id} volunteered to cover swap request {swap_id}"
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

            Ok(TransitionResult {
                new_state,
                mutations: Vec::new(),
                audit_event,
            })
        }
        Command::ApproveSwap { swap_id, side } => {
            let request: &SwapRequest = find_request(state, swap_id)?;
            require_not_terminal(request, swap_id, "approve")?;
            require_side_exists(request, side)?;

            // Re-approving an already-recorded side is a no-op: the flag
            // keeps its original timestamp and no mutation re-fires.
            if request.side_approved(side) {
                let snapshot: StateSnapshot = state.to_snapshot();
                let action: Action = Action::new(
                    String::from("ApproveSwap"),
                    Some(format!(
                        "{side} side of swap request {swap_id} was already approved; no change"
                    )),
                );
                let audit_event: AuditEvent =
                    AuditEvent::new(actor, cause, action, snapshot.clone(), snapshot);
                return Ok(TransitionResult {
                    new_state: state.clone(),
                    mutations: Vec::new(),
                    audit_event,
                });
            }

            let mut updated: SwapRequest = request.clone();
            match side {
                ApprovalSide::Requester => {
                    updated.requester_approved = true;
                    updated.requester_decided_at = Some(now);
                }
                ApprovalSide::Target => {
                    updated.target_approved = true;
                    updated.target_decided_at = Some(now);
                }
            }

            let before: StateSnapshot = state.to_snapshot();

            if !updated.is_fully_approved() {
                let new_state: State = replace_request(state, swap_id, updated);
                let after: StateSnapshot = new_state.to_snapshot();
                let action: Action = Action::new(
                    String::from("ApproveSwap"),
                    Some(format!(
                        "{side} side approved swap request {swap_id}; waiting for other approval"
                    )),
                );
                let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);
                return Ok(TransitionResult {
                    new_state,
                    mutations: Vec::new(),
                    audit_event,
                });
            }

            // Final approval: the status transition and exactly one
            // assignment mutation commit together, after re-validating
            // against the current schedule rather than the one seen at
            // request time.
            let mutations: Vec<AssignmentMutation> = swap_mutations(state, &updated, swap_id)?;
            updated.status = SwapStatus::Approved;

            let new_state: State = apply_swap_to_state(state, swap_id, updated, &mutations);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("ApproveSwap"),
                Some(format!(
                    "{side} side approved swap request {swap_id}; request approved and assignments exchanged"
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

            Ok(TransitionResult {
                new_state,
                mutations,
                audit_event,
            })
        }
        Command::DenySwap {
            swap_id,
            side,
            reason,
        } => {
            validate_swap_reason(&reason)?;
            let request: &SwapRequest = find_request(state, swap_id)?;
            require_not_terminal(request, swap_id, "deny")?;
            require_side_exists(request, side)?;

            // Denial is unilateral and final regardless of the other
            // side's flag.
            let mut updated: SwapRequest = request.clone();
            updated.status = SwapStatus::Denied;
            updated.denial_reason = Some(reason);
            match side {
                ApprovalSide::Requester => updated.requester_decided_at = Some(now),
                ApprovalSide::Target => updated.target_decided_at = Some(now),
            }

            let before: StateSnapshot = state.to_snapshot();
            let new_state: State = replace_request(state, swap_id, updated);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                String::from("DenySwap"),
                Some(format!("{side} side denied swap request {swap_id}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

            Ok(TransitionResult {
                new_state,
                mutations: Vec::new(),
                audit_event,
            })
        }
    }
}

/// Finds the assignment an employee holds for a given date and shift
/// type.
fn held_assignment(
    state: &State,
    employee_id: i64,
    date: NaiveDate,
    shift_type: ShiftType,
) -> Result<&ScheduleAssignment, CoreError> {
    state
        .assignment_for(employee_id, date)
        .filter(|assignment| assignment.shift_type == shift_type)
        .ok_or(CoreError::AssignmentNotFound { employee_id, date })
}

fn find_request(state: &State, swap_id: i64) -> Result<&SwapRequest, CoreError> {
    state
        .swap_request(swap_id)
        .ok_or(CoreError::SwapRequestNotFound { swap_id })
}

fn require_not_terminal(
    request: &SwapRequest,
    swap_id: i64,
    action: &'static str,
) -> Result<(), CoreError> {
    if request.status.is_terminal() {
        return Err(CoreError::InvalidStateTransition {
            swap_id,
            status: request.status,
            action,
        });
    }
    Ok(())
}

/// Rejects target-side actions on requests that have no target side.
fn require_side_exists(request: &SwapRequest, side: ApprovalSide) -> Result<(), CoreError> {
    if side == ApprovalSide::Target && request.target.is_none() {
        return Err(CoreError::DomainViolation(DomainError::InvalidApprovalSide(
            String::from("Open request has no target side until a volunteer claims it"),
        )));
    }
    Ok(())
}

/// Re-validates a fully approved request against the current schedule and
/// derives the assignment mutations executing it.
///
/// Rows are deleted and re-inserted rather than updated in place so a
/// same-date exchange never passes through a transient double-booking.
fn swap_mutations(
    state: &State,
    request: &SwapRequest,
    swap_id: i64,
) -> Result<Vec<AssignmentMutation>, CoreError> {
    let requester: SwapShift = request.requester;
    let Some(target) = request.target else {
        return Err(CoreError::OpenSwapUnclaimed { swap_id });
    };

    let requester_row: &ScheduleAssignment = state
        .assignment_for(requester.employee_id, requester.date)
        .filter(|assignment| assignment.shift_type == requester.shift_type)
        .ok_or_else(|| CoreError::SwapRevalidationFailed {
            swap_id,
            detail: format!(
                "employee {} no longer holds the {} shift on {}",
                requester.employee_id, requester.shift_type, requester.date
            ),
        })?;

    match request.kind {
        SwapKind::Paired => {
            let target_row: &ScheduleAssignment = state
                .assignment_for(target.employee_id, target.date)
                .filter(|assignment| assignment.shift_type == target.shift_type)
                .ok_or_else(|| CoreError::SwapRevalidationFailed {
                    swap_id,
                    detail: format!(
                        "employee {} no longer holds the {} shift on {}",
                        target.employee_id, target.shift_type, target.date
                    ),
                })?;

            // Schedules may have changed since the request was created: an
            // employee already scheduled on the date they are swapping into
            // cannot accept the swap.
            if requester.date != target.date {
                if state
                    .assignment_for(requester.employee_id, target.date)
                    .is_some()
                {
                    return Err(CoreError::SwapRevalidationFailed {
                        swap_id,
                        detail: format!(
                            "employee {} is already scheduled on {}",
                            requester.employee_id, target.date
                        ),
                    });
                }
                if state
                    .assignment_for(target.employee_id, requester.date)
                    .is_some()
                {
                    return Err(CoreError::SwapRevalidationFailed {
                        swap_id,
                        detail: format!(
                            "employee {} is already scheduled on {}",
                            target.employee_id, requester.date
                        ),
                    });
                }
            }

            Ok(vec![
                AssignmentMutation::Delete {
                    employee_id: requester.employee_id,
                    date: requester.date,
                },
                AssignmentMutation::Delete {
                    employee_id: target.employee_id,
                    date: target.date,
                },
                AssignmentMutation::Insert(ScheduleAssignment::new(
                    target.employee_id,
                    requester.date,
                    requester_row.shift_type,
                    requester_row.crew,
                    AssignmentSource::Swap,
                )),
                AssignmentMutation::Insert(ScheduleAssignment::new(
                    requester.employee_id,
                    target.date,
                    target_row.shift_type,
                    target_row.crew,
                    AssignmentSource::Swap,
                )),
            ])
        }
        SwapKind::Open => {
            if state
                .assignment_for(target.employee_id, requester.date)
                .is_some()
            {
                return Err(CoreError::SwapRevalidationFailed {
                    swap_id,
                    detail: format!(
                        "volunteer {} is already scheduled on {}",
                        target.employee_id, requester.date
                    ),
                });
            }

            Ok(vec![
                AssignmentMutation::Delete {
                    employee_id: requester.employee_id,
                    date: requester.date,
                },
                AssignmentMutation::Insert(ScheduleAssignment::new(
                    target.employee_id,
                    requester.date,
                    requester_row.shift_type,
                    requester_row.crew,
                    AssignmentSource::Swap,
                )),
            ])
        }
    }
}

/// Builds the post-approval state by replaying the mutations onto the
/// assignment list and swapping in the updated request.
fn apply_swap_to_state(
    state: &State,
    swap_id: i64,
    updated: SwapRequest,
    mutations: &[AssignmentMutation],
) -> State {
    let mut assignments: Vec<ScheduleAssignment> = state.assignments.clone();
    for mutation in mutations {
        match mutation {
            AssignmentMutation::Delete { employee_id, date } => {
                assignments.retain(|assignment| {
                    !(assignment.employee_id == *employee_id && assignment.date == *date)
                });
            }
            AssignmentMutation::Insert(assignment) => assignments.push(assignment.clone()),
            AssignmentMutation::DeleteRotationRange { start, end } => {
                assignments.retain(|assignment| {
                    assignment.source != AssignmentSource::Rotation
                        || assignment.date < *start
                        || assignment.date > *end
                });
            }
        }
    }

    let mut new_state: State = State {
        assignments,
        swap_requests: state.swap_requests.clone(),
    };
    new_state = replace_request(&new_state, swap_id, updated);
    new_state
}

fn replace_request(state: &State, swap_id: i64, updated: SwapRequest) -> State {
    let swap_requests: Vec<SwapRequest> = state
        .swap_requests
        .iter()
        .map(|request| {
            if request.swap_id == Some(swap_id) {
                updated.clone()
            } else {
                request.clone()
            }
        })
        .collect();
    State {
        assignments: state.assignments.clone(),
        swap_requests,
    }
}
