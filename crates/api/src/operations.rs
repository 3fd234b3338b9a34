// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service boundary operations.
//!
//! Each operation translates its request DTO into domain types, loads
//! the relevant slice of state, applies a core command, and persists the
//! transition in one transaction. Authorization (which supervisor may
//! act for which crew) is the surrounding application's responsibility;
//! the operations record the acting side as supplied.

use crate::error::{
    ServiceError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    ApproveSwapRequest, ApproveSwapResponse, AssignmentView, ClaimOpenSwapRequest,
    ClaimOpenSwapResponse, ComputeCoverageGapsRequest, ComputeCoverageGapsResponse,
    CoverageGapView, CreateSwapRequestRequest, CreateSwapRequestResponse, DenySwapRequest,
    DenySwapResponse, FillGapRequest, FillGapResponse, GenerateRotationRequest,
    GenerateRotationResponse, HoursInWindowRequest, HoursInWindowResponse,
    ListAssignmentsRequest, ListAssignmentsResponse, ListSwapRequestsRequest,
    ListSwapRequestsResponse, SwapRequestView,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use crew_rota::{Command, SchedulingContext, State, SwapCounterpart, TransitionResult, apply};
use crew_rota_audit::{Actor, Cause};
use crew_rota_domain::{
    ApprovalSide, Crew, CrewPhaseMap, HoursReport, ScheduleAssignment, ShiftType, SwapRequest,
    SwapStatus, calculate_hours_in_window, compute_coverage_gaps, validate_date_range,
};
use crew_rota_persistence::{GenerationOutcome, Persistence, PersistenceError};
use tracing::{debug, warn};

/// How many times a swap transition is attempted when the optimistic
/// version check fails: the loser reloads current state and retries
/// once against it.
const CAS_ATTEMPTS: u32 = 2;

/// Expands a rotation pattern over a date range and persists the
/// resulting assignments.
///
/// # Errors
///
/// Returns an error if the request is invalid, the pattern or phase map
/// violates domain rules, or the range holds assignments that may not
/// be overwritten.
pub fn generate_rotation(
    persistence: &mut Persistence,
    context: &SchedulingContext,
    request: GenerateRotationRequest,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<GenerateRotationResponse, ServiceError> {
    validate_date_range(request.start_date, request.end_date).map_err(translate_domain_error)?;

    let mut pairs: Vec<(Crew, u32)> = Vec::with_capacity(request.phase_offsets.len());
    for (crew, offset) in &request.phase_offsets {
        pairs.push((Crew::parse(crew).map_err(translate_domain_error)?, *offset));
    }
    let phase_map: CrewPhaseMap = CrewPhaseMap::new(pairs).map_err(translate_domain_error)?;

    let assignments: Vec<ScheduleAssignment> = persistence
        .assignments_in_range(request.start_date, request.end_date)
        .map_err(translate_persistence_error)?;
    let state: State = State::with_rows(assignments, Vec::new());

    let command: Command = Command::GenerateRotation {
        pattern_id: request.pattern_id.clone(),
        phase_map,
        start_date: request.start_date,
        end_date: request.end_date,
        replace_rotation: request.replace_rotation,
    };
    let transition: TransitionResult =
        apply(context, &state, command, actor, cause, now).map_err(translate_core_error)?;

    let outcome: GenerationOutcome = persistence
        .persist_generation(
            &transition,
            request.start_date,
            request.end_date,
            request.replace_rotation,
        )
        .map_err(translate_persistence_error)?;

    debug!(
        pattern_id = %request.pattern_id,
        inserted = outcome.inserted,
        replaced = outcome.replaced,
        "Persisted rotation generation"
    );

    Ok(GenerateRotationResponse {
        inserted: outcome.inserted,
        replaced: outcome.replaced,
        start_date: request.start_date,
        end_date: request.end_date,
        message: format!(
            "Generated {} assignments from pattern '{}' for {} through {}",
            outcome.inserted, request.pattern_id, request.start_date, request.end_date
        ),
    })
}

/// Computes coverage gaps for a date range.
///
/// Read-only: gaps are recomputed from the current assignment set and
/// the externally supplied requirements on every call.
///
/// # Errors
///
/// Returns an error if the range is invalid or assignments cannot be
/// loaded.
pub fn compute_coverage_gaps_in_range(
    persistence: &mut Persistence,
    context: &SchedulingContext,
    request: ComputeCoverageGapsRequest,
) -> Result<ComputeCoverageGapsResponse, ServiceError> {
    let assignments: Vec<ScheduleAssignment> = persistence
        .assignments_in_range(request.start_date, request.end_date)
        .map_err(translate_persistence_error)?;

    let gaps = compute_coverage_gaps(
        &assignments,
        &context.requirements,
        &context.employees,
        &context.holidays,
        request.start_date,
        request.end_date,
    )
    .map_err(translate_domain_error)?;

    Ok(ComputeCoverageGapsResponse {
        gaps: gaps.iter().map(CoverageGapView::from).collect(),
    })
}

/// Assigns an available employee to cover an identified coverage gap.
///
/// Eligibility ranking (hours, overtime) is the caller's policy; the
/// only hard rule enforced here is no double-booking.
///
/// # Errors
///
/// Returns an error if the employee is unknown or inactive, or already
/// scheduled on the date.
pub fn fill_gap(
    persistence: &mut Persistence,
    context: &SchedulingContext,
    request: FillGapRequest,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<FillGapResponse, ServiceError> {
    let shift_type: ShiftType =
        ShiftType::parse(&request.shift_type).map_err(translate_domain_error)?;
    let crew: Crew = Crew::parse(&request.crew).map_err(translate_domain_error)?;

    let assignments: Vec<ScheduleAssignment> = persistence
        .assignments_on_dates(&[request.date])
        .map_err(translate_persistence_error)?;
    let state: State = State::with_rows(assignments, Vec::new());

    let command: Command = Command::FillGap {
        employee_id: request.employee_id,
        date: request.date,
        shift_type,
        crew,
    };
    let transition: TransitionResult =
        apply(context, &state, command, actor, cause, now).map_err(translate_core_error)?;

    let assignment_id: i64 = persistence
        .persist_fill_gap(&transition)
        .map_err(translate_persistence_error)?;

    Ok(FillGapResponse {
        assignment_id,
        message: format!(
            "Assigned employee {} to the {} shift on {}",
            request.employee_id, request.shift_type, request.date
        ),
    })
}

/// Creates a shift-swap request.
///
/// # Errors
///
/// Returns an error if the target fields are partially populated, the
/// requester or target does not hold the named shift, or the reason is
/// empty.
pub fn create_swap_request(
    persistence: &mut Persistence,
    context: &SchedulingContext,
    request: CreateSwapRequestRequest,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<CreateSwapRequestResponse, ServiceError> {
    let requester_shift_type: ShiftType =
        ShiftType::parse(&request.requester_shift_type).map_err(translate_domain_error)?;

    let target: Option<SwapCounterpart> = match (
        request.target_employee_id,
        request.target_date,
        request.target_shift_type.as_deref(),
    ) {
        (Some(employee_id), Some(date), Some(shift_type)) => Some(SwapCounterpart {
            employee_id,
            date,
            shift_type: ShiftType::parse(shift_type).map_err(translate_domain_error)?,
        }),
        (None, None, None) => None,
        _ => {
            return Err(ServiceError::InvalidInput {
                field: String::from("target"),
                message: String::from(
                    "Target employee, date, and shift type must be given together or not at all",
                ),
            });
        }
    };

    let mut dates: Vec<NaiveDate> = vec![request.requester_date];
    if let Some(counterpart) = &target {
        if counterpart.date != request.requester_date {
            dates.push(counterpart.date);
        }
    }
    let assignments: Vec<ScheduleAssignment> = persistence
        .assignments_on_dates(&dates)
        .map_err(translate_persistence_error)?;
    let state: State = State::with_rows(assignments, Vec::new());

    let command: Command = Command::CreateSwapRequest {
        requester_id: request.requester_id,
        requester_date: request.requester_date,
        requester_shift_type,
        target,
        reason: request.reason,
    };
    let transition: TransitionResult =
        apply(context, &state, command, actor, cause, now).map_err(translate_core_error)?;

    let persisted: SwapRequest = persistence
        .persist_swap_request(&transition)
        .map_err(translate_persistence_error)?;

    Ok(CreateSwapRequestResponse {
        message: format!(
            "Created swap request {} for employee {}",
            persisted.swap_id.unwrap_or_default(),
            request.requester_id
        ),
        request: SwapRequestView::from_request(&persisted),
    })
}

/// Records a volunteer's claim on an open swap request.
///
/// # Errors
///
/// Returns an error if the request is unknown, not open, already
/// claimed, or the volunteer is already scheduled on the date.
pub fn claim_open_swap(
    persistence: &mut Persistence,
    context: &SchedulingContext,
    request: ClaimOpenSwapRequest,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ClaimOpenSwapResponse, ServiceError> {
    let persisted: SwapRequest = run_swap_transition(
        persistence,
        context,
        request.swap_id,
        |swap_id| Command::ClaimOpenSwap {
            swap_id,
            volunteer_id: request.volunteer_id,
        },
        actor,
        cause,
        now,
    )?;

    Ok(ClaimOpenSwapResponse {
        message: format!(
            "Employee {} volunteered to cover swap request {}",
            request.volunteer_id, request.swap_id
        ),
        request: SwapRequestView::from_request(&persisted),
    })
}

/// Records one supervisor side's approval of a pending request.
///
/// Same-crew requests approve on the first recorded side; cross-crew
/// requests approve once both sides are recorded, at which point the
/// assignment exchange commits atomically with the status transition.
///
/// # Errors
///
/// Returns an error if the side is invalid, the request is terminal,
/// or approval-time re-validation finds an intervening double-booking
/// (the request then stays pending for the supervisor to re-check).
pub fn approve_swap(
    persistence: &mut Persistence,
    context: &SchedulingContext,
    request: ApproveSwapRequest,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ApproveSwapResponse, ServiceError> {
    let side: ApprovalSide =
        ApprovalSide::parse(&request.approving_side).map_err(translate_domain_error)?;

    let persisted: SwapRequest = run_swap_transition(
        persistence,
        context,
        request.swap_id,
        |swap_id| Command::ApproveSwap { swap_id, side },
        actor,
        cause,
        now,
    )?;

    let message: String = match persisted.status {
        SwapStatus::Approved => format!("Swap request {} approved", request.swap_id),
        _ => format!(
            "{side} side approval recorded for swap request {}; waiting for other approval",
            request.swap_id
        ),
    };

    Ok(ApproveSwapResponse {
        message,
        request: SwapRequestView::from_request(&persisted),
    })
}

/// Denies a pending request. Denial by either side is final.
///
/// # Errors
///
/// Returns an error if the side is invalid, the reason is empty, or the
/// request is terminal.
pub fn deny_swap(
    persistence: &mut Persistence,
    context: &SchedulingContext,
    request: DenySwapRequest,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<DenySwapResponse, ServiceError> {
    let side: ApprovalSide =
        ApprovalSide::parse(&request.approving_side).map_err(translate_domain_error)?;
    let reason: String = request.reason.clone();

    let persisted: SwapRequest = run_swap_transition(
        persistence,
        context,
        request.swap_id,
        move |swap_id| Command::DenySwap {
            swap_id,
            side,
            reason: reason.clone(),
        },
        actor,
        cause,
        now,
    )?;

    Ok(DenySwapResponse {
        message: format!("Swap request {} denied", request.swap_id),
        request: SwapRequestView::from_request(&persisted),
    })
}

/// Rolls up scheduled hours for an employee over a trailing window
/// ending at `as_of`.
///
/// # Errors
///
/// Returns an error if the employee is unknown or the window is zero.
pub fn hours_in_window(
    persistence: &mut Persistence,
    context: &SchedulingContext,
    request: HoursInWindowRequest,
    as_of: NaiveDate,
) -> Result<HoursInWindowResponse, ServiceError> {
    if context.employee(request.employee_id).is_none() {
        return Err(ServiceError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {} does not exist", request.employee_id),
        });
    }

    let window_days: u32 = request
        .window_days
        .unwrap_or_else(|| context.overtime.window_days());
    if window_days == 0 {
        return Err(ServiceError::InvalidInput {
            field: String::from("window_days"),
            message: String::from("Window must be at least one day"),
        });
    }

    let start: NaiveDate = as_of - Duration::days(i64::from(window_days) - 1);
    let assignments: Vec<ScheduleAssignment> = persistence
        .assignments_for_employee_in_range(request.employee_id, start, as_of)
        .map_err(translate_persistence_error)?;

    let report: HoursReport =
        calculate_hours_in_window(&assignments, &context.durations, &context.overtime);

    Ok(HoursInWindowResponse {
        employee_id: request.employee_id,
        window_days,
        total_hours: report.total_hours,
        regular_hours: report.regular_hours,
        overtime_hours: report.overtime_hours,
    })
}

/// Lists assignments in a date range.
///
/// # Errors
///
/// Returns an error if the range is invalid or the query fails.
pub fn list_assignments(
    persistence: &mut Persistence,
    request: ListAssignmentsRequest,
) -> Result<ListAssignmentsResponse, ServiceError> {
    validate_date_range(request.start_date, request.end_date).map_err(translate_domain_error)?;
    let assignments: Vec<ScheduleAssignment> = persistence
        .assignments_in_range(request.start_date, request.end_date)
        .map_err(translate_persistence_error)?;

    Ok(ListAssignmentsResponse {
        assignments: assignments.iter().map(AssignmentView::from).collect(),
    })
}

/// Lists swap requests for supervisor queues, filtered by status and/or
/// crew.
///
/// # Errors
///
/// Returns an error if a filter value is invalid or the query fails.
pub fn list_swap_requests(
    persistence: &mut Persistence,
    request: ListSwapRequestsRequest,
) -> Result<ListSwapRequestsResponse, ServiceError> {
    let status: Option<SwapStatus> = request
        .status
        .as_deref()
        .map(SwapStatus::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let crew: Option<Crew> = request
        .crew
        .as_deref()
        .map(Crew::parse)
        .transpose()
        .map_err(translate_domain_error)?;

    let requests: Vec<SwapRequest> = persistence
        .list_swap_requests(status, crew)
        .map_err(translate_persistence_error)?;

    Ok(ListSwapRequestsResponse {
        requests: requests.iter().map(SwapRequestView::from_request).collect(),
    })
}

/// Loads a swap request with the assignments on its relevant dates,
/// applies a command, and persists the result under the optimistic
/// version check. A writer that loses the version race reloads current
/// state and retries the transition once against it.
fn run_swap_transition<F>(
    persistence: &mut Persistence,
    context: &SchedulingContext,
    swap_id: i64,
    command_for: F,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<SwapRequest, ServiceError>
where
    F: Fn(i64) -> Command,
{
    for attempt in 1..=CAS_ATTEMPTS {
        let loaded: SwapRequest = persistence
            .get_swap_request(swap_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ServiceError::ResourceNotFound {
                resource_type: String::from("Swap request"),
                message: format!("Swap request {swap_id} does not exist"),
            })?;

        let mut dates: Vec<NaiveDate> = vec![loaded.requester.date];
        if let Some(target) = loaded.target {
            if target.date != loaded.requester.date {
                dates.push(target.date);
            }
        }
        let assignments: Vec<ScheduleAssignment> = persistence
            .assignments_on_dates(&dates)
            .map_err(translate_persistence_error)?;
        let expected_version: i64 = loaded.version;
        let state: State = State::with_rows(assignments, vec![loaded]);

        let transition: TransitionResult = apply(
            context,
            &state,
            command_for(swap_id),
            actor.clone(),
            cause.clone(),
            now,
        )
        .map_err(translate_core_error)?;

        match persistence.persist_swap_update(&transition, swap_id, expected_version) {
            Ok(persisted) => return Ok(persisted),
            Err(PersistenceError::StaleVersion { .. }) if attempt < CAS_ATTEMPTS => {
                warn!(
                    swap_id,
                    attempt, "Swap request changed concurrently; retrying against current state"
                );
            }
            Err(err) => return Err(translate_persistence_error(err)),
        }
    }

    // The loop either returns or retries; a second stale failure lands
    // here.
    Err(ServiceError::Conflict {
        message: format!("Swap request {swap_id} kept changing concurrently; please retry"),
    })
}
