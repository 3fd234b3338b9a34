// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service request and response data transfer objects.
//!
//! Requests carry primitive field types and are parsed into closed
//! domain enumerations exactly once, at the boundary. Responses are
//! serializable views, distinct from domain types.

use chrono::NaiveDate;
use crew_rota_domain::{CoverageGap, ScheduleAssignment, SwapRequest};

/// Request to expand a rotation pattern over a date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRotationRequest {
    /// The configured pattern identifier.
    pub pattern_id: String,
    /// `(crew, phase offset)` pairs, e.g. `[("A", 0), ("B", 2)]`.
    pub phase_offsets: Vec<(String, u32)>,
    /// First date of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last date of the range (inclusive).
    pub end_date: NaiveDate,
    /// Whether rotation-sourced rows already in the range may be
    /// replaced.
    pub replace_rotation: bool,
}

/// Response for a successful rotation generation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerateRotationResponse {
    /// Assignments inserted.
    pub inserted: usize,
    /// Rotation-sourced assignments replaced.
    pub replaced: usize,
    /// First date of the generated range.
    pub start_date: NaiveDate,
    /// Last date of the generated range.
    pub end_date: NaiveDate,
    /// A success message.
    pub message: String,
}

/// Request to compute coverage gaps over a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputeCoverageGapsRequest {
    /// First date of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last date of the range (inclusive).
    pub end_date: NaiveDate,
}

/// A serializable view of one coverage figure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CoverageGapView {
    /// The calendar date.
    pub date: NaiveDate,
    /// The shift type.
    pub shift_type: String,
    /// The skill.
    pub skill: String,
    /// The required qualified headcount.
    pub required: u32,
    /// The scheduled qualified headcount.
    pub scheduled: u32,
    /// The shortfall.
    pub gap: u32,
    /// The severity classification.
    pub severity: String,
}

impl From<&CoverageGap> for CoverageGapView {
    fn from(gap: &CoverageGap) -> Self {
        Self {
            date: gap.date,
            shift_type: gap.shift_type.as_str().to_string(),
            skill: gap.skill.value().to_string(),
            required: gap.required,
            scheduled: gap.scheduled,
            gap: gap.gap,
            severity: gap.severity.as_str().to_string(),
        }
    }
}

/// Response for a coverage computation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComputeCoverageGapsResponse {
    /// One figure per (date, shift type, skill) combination in the
    /// requirements.
    pub gaps: Vec<CoverageGapView>,
}

/// Request to assign an employee to cover a coverage gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillGapRequest {
    /// The employee covering the gap.
    pub employee_id: i64,
    /// The date of the uncovered shift.
    pub date: NaiveDate,
    /// The shift type of the uncovered shift.
    pub shift_type: String,
    /// The crew whose schedule the slot belongs to.
    pub crew: String,
}

/// Response for a successful gap fill.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FillGapResponse {
    /// The assigned row's identifier.
    pub assignment_id: i64,
    /// A success message.
    pub message: String,
}

/// Request to create a shift-swap request.
///
/// The three target fields must be all present (a paired swap) or all
/// absent (an open give-away).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSwapRequestRequest {
    /// The employee requesting the swap.
    pub requester_id: i64,
    /// The date of the requester's shift.
    pub requester_date: NaiveDate,
    /// The shift type of the requester's shift.
    pub requester_shift_type: String,
    /// The colleague being asked to swap, for paired swaps.
    pub target_employee_id: Option<i64>,
    /// The date of the colleague's shift, for paired swaps.
    pub target_date: Option<NaiveDate>,
    /// The shift type of the colleague's shift, for paired swaps.
    pub target_shift_type: Option<String>,
    /// The requester's stated reason.
    pub reason: String,
}

/// A serializable view of a swap request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SwapRequestView {
    /// The request identifier.
    pub swap_id: i64,
    /// Paired or open.
    pub kind: String,
    /// The requester.
    pub requester_id: i64,
    /// The requester's shift date.
    pub requester_date: NaiveDate,
    /// The requester's shift type.
    pub requester_shift_type: String,
    /// The requester's crew.
    pub requester_crew: String,
    /// The other side's employee, if named or claimed.
    pub target_employee_id: Option<i64>,
    /// The other side's shift date.
    pub target_date: Option<NaiveDate>,
    /// The other side's shift type.
    pub target_shift_type: Option<String>,
    /// The other side's crew.
    pub target_crew: Option<String>,
    /// The state-machine state.
    pub status: String,
    /// Whether the requester-side supervisor has approved.
    pub requester_approved: bool,
    /// Whether the target-side supervisor has approved.
    pub target_approved: bool,
    /// The requester's stated reason.
    pub reason: String,
    /// The denial reason, for denied requests.
    pub denial_reason: Option<String>,
    /// When the request was created (RFC 3339).
    pub created_at: String,
    /// The optimistic-concurrency version.
    pub version: i64,
}

impl SwapRequestView {
    /// Builds a view from a persisted request.
    ///
    /// Requests without an assigned id cannot be viewed; persistence
    /// always returns them with one.
    #[must_use]
    pub fn from_request(request: &SwapRequest) -> Self {
        Self {
            swap_id: request.swap_id.unwrap_or_default(),
            kind: request.kind.as_str().to_string(),
            requester_id: request.requester.employee_id,
            requester_date: request.requester.date,
            requester_shift_type: request.requester.shift_type.as_str().to_string(),
            requester_crew: request.requester.crew.as_str().to_string(),
            target_employee_id: request.target.map(|t| t.employee_id),
            target_date: request.target.map(|t| t.date),
            target_shift_type: request.target.map(|t| t.shift_type.as_str().to_string()),
            target_crew: request.target.map(|t| t.crew.as_str().to_string()),
            status: request.status.as_str().to_string(),
            requester_approved: request.requester_approved,
            target_approved: request.target_approved,
            reason: request.reason.clone(),
            denial_reason: request.denial_reason.clone(),
            created_at: request.created_at.to_rfc3339(),
            version: request.version,
        }
    }
}

/// Response for a successful swap request creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateSwapRequestResponse {
    /// The created request.
    pub request: SwapRequestView,
    /// A success message.
    pub message: String,
}

/// Request to record a volunteer's claim on an open request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimOpenSwapRequest {
    /// The open request being claimed.
    pub swap_id: i64,
    /// The volunteering employee.
    pub volunteer_id: i64,
}

/// Response for a successful claim.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClaimOpenSwapResponse {
    /// The updated request.
    pub request: SwapRequestView,
    /// A success message.
    pub message: String,
}

/// Request to approve one side of a pending swap request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveSwapRequest {
    /// The request being approved.
    pub swap_id: i64,
    /// The supervisor side approving ("Requester" or "Target").
    pub approving_side: String,
}

/// Response for an approval action.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApproveSwapResponse {
    /// The updated request.
    pub request: SwapRequestView,
    /// A success message.
    pub message: String,
}

/// Request to deny a pending swap request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenySwapRequest {
    /// The request being denied.
    pub swap_id: i64,
    /// The supervisor side denying ("Requester" or "Target").
    pub approving_side: String,
    /// The denial reason.
    pub reason: String,
}

/// Response for a denial action.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DenySwapResponse {
    /// The updated request.
    pub request: SwapRequestView,
    /// A success message.
    pub message: String,
}

/// Request to roll up an employee's scheduled hours over a trailing
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursInWindowRequest {
    /// The employee.
    pub employee_id: i64,
    /// The trailing window length in days; the configured overtime
    /// window applies when absent.
    pub window_days: Option<u32>,
}

/// Response for an hours roll-up.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HoursInWindowResponse {
    /// The employee.
    pub employee_id: i64,
    /// The window the roll-up covered, in days.
    pub window_days: u32,
    /// Total scheduled hours in the window.
    pub total_hours: u32,
    /// Hours at or below the overtime threshold.
    pub regular_hours: u32,
    /// Hours above the overtime threshold.
    pub overtime_hours: u32,
}

/// Request to list assignments in a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListAssignmentsRequest {
    /// First date of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last date of the range (inclusive).
    pub end_date: NaiveDate,
}

/// A serializable view of one schedule assignment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignmentView {
    /// The assignment identifier.
    pub assignment_id: i64,
    /// The assigned employee.
    pub employee_id: i64,
    /// The shift date.
    pub date: NaiveDate,
    /// The shift type.
    pub shift_type: String,
    /// The crew whose schedule the slot belongs to.
    pub crew: String,
    /// How the assignment came to exist.
    pub source: String,
}

impl From<&ScheduleAssignment> for AssignmentView {
    fn from(assignment: &ScheduleAssignment) -> Self {
        Self {
            assignment_id: assignment.assignment_id.unwrap_or_default(),
            employee_id: assignment.employee_id,
            date: assignment.date,
            shift_type: assignment.shift_type.as_str().to_string(),
            crew: assignment.crew.as_str().to_string(),
            source: assignment.source.as_str().to_string(),
        }
    }
}

/// Response for an assignment listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListAssignmentsResponse {
    /// The assignments, ordered by date, crew, and employee.
    pub assignments: Vec<AssignmentView>,
}

/// Request to list swap requests for supervisor queues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSwapRequestsRequest {
    /// Optional status filter ("Pending", "Approved", "Denied").
    pub status: Option<String>,
    /// Optional crew filter; matches either side of a request.
    pub crew: Option<String>,
}

/// Response for a swap request listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListSwapRequestsResponse {
    /// The matching requests, ordered by id.
    pub requests: Vec<SwapRequestView>,
}
