// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use crew_rota_domain::{ApprovalSide, Crew, CrewPhaseMap, ShiftType};

/// The counterpart shift named in a paired swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapCounterpart {
    /// The colleague being asked to swap.
    pub employee_id: i64,
    /// The date of the colleague's shift.
    pub date: NaiveDate,
    /// The shift type of the colleague's shift.
    pub shift_type: ShiftType,
}

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Expand a rotation pattern over a date range into assignments.
    GenerateRotation {
        /// The configured pattern to expand.
        pattern_id: String,
        /// Crew phase offsets within the pattern cycle.
        phase_map: CrewPhaseMap,
        /// First date of the range (inclusive).
        start_date: NaiveDate,
        /// Last date of the range (inclusive).
        end_date: NaiveDate,
        /// Whether rotation-sourced rows already in the range may be
        /// replaced. Manual-fill and swap rows are never replaced.
        replace_rotation: bool,
    },
    /// Assign an available employee to cover an identified coverage gap.
    FillGap {
        /// The employee covering the gap.
        employee_id: i64,
        /// The date of the uncovered shift.
        date: NaiveDate,
        /// The shift type of the uncovered shift.
        shift_type: ShiftType,
        /// The crew whose schedule the slot belongs to.
        crew: Crew,
    },
    /// Create a shift-swap request.
    CreateSwapRequest {
        /// The employee requesting the swap.
        requester_id: i64,
        /// The date of the requester's shift.
        requester_date: NaiveDate,
        /// The shift type of the requester's shift.
        requester_shift_type: ShiftType,
        /// The named counterpart for a paired swap; `None` opens the
        /// request for a volunteer.
        target: Option<SwapCounterpart>,
        /// The requester's stated reason.
        reason: String,
    },
    /// Record a volunteer's claim on an open swap request.
    ClaimOpenSwap {
        /// The open request being claimed.
        swap_id: i64,
        /// The volunteering employee.
        volunteer_id: i64,
    },
    /// Record one supervisor side's approval of a pending request.
    ApproveSwap {
        /// The request being approved.
        swap_id: i64,
        /// The supervisor side approving.
        side: ApprovalSide,
    },
    /// Deny a pending request. Denial by either side is final.
    DenySwap {
        /// The request being denied.
        swap_id: i64,
        /// The supervisor side denying.
        side: ApprovalSide,
        /// The denial reason.
        reason: String,
    },
}
