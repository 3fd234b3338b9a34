// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift-swap request model.
//!
//! A swap request is an employee-initiated proposal to exchange a shift
//! with a named colleague (paired) or to give a shift away to a volunteer
//! found later through the gap-fill path (open). Requests move through an
//! explicit state machine; the transition function itself lives in the
//! core crate.

use crate::error::DomainError;
use crate::types::{Crew, ShiftType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the lifecycle state of a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SwapStatus {
    /// Initial state. Approvals and denials are accepted.
    #[default]
    Pending,
    /// All required approvals were given and the assignment mutation
    /// committed. Terminal.
    Approved,
    /// A supervisor denied the request. Terminal.
    Denied,
}

impl SwapStatus {
    /// Parses a swap status from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid status.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Denied" => Ok(Self::Denied),
            _ => Err(DomainError::InvalidSwapStatus(format!(
                "Unknown swap status: {s}"
            ))),
        }
    }

    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Denied => "Denied",
        }
    }

    /// Returns whether this status is terminal. Terminal requests are
    /// immutable: any further action is an invalid state transition.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Denied)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Approved
    /// - Pending → Denied
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Denied)
        )
    }
}

impl FromStr for SwapStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Distinguishes paired swaps from open give-aways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapKind {
    /// Two named employees exchange two assignments.
    Paired,
    /// The requester gives a shift away; a volunteer claims it through
    /// the external gap-fill path before approval.
    Open,
}

impl SwapKind {
    /// Parses a swap kind from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid kind.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Paired" => Ok(Self::Paired),
            "Open" => Ok(Self::Open),
            _ => Err(DomainError::InvalidSwapKind(format!(
                "Unknown swap kind: {s}"
            ))),
        }
    }

    /// Returns the string representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paired => "Paired",
            Self::Open => "Open",
        }
    }
}

impl FromStr for SwapKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for SwapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifies which supervisor side is acting on a request.
///
/// Crew-matching authorization (a supervisor may only act for their own
/// crew's side) is enforced by the external collaborator before the core
/// is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalSide {
    /// The requester's crew supervisor.
    Requester,
    /// The target employee's crew supervisor.
    Target,
}

impl ApprovalSide {
    /// Parses an approval side from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid side.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Requester" => Ok(Self::Requester),
            "Target" => Ok(Self::Target),
            _ => Err(DomainError::InvalidApprovalSide(format!(
                "Unknown approval side: {s}"
            ))),
        }
    }

    /// Returns the string representation of this side.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requester => "Requester",
            Self::Target => "Target",
        }
    }
}

impl FromStr for ApprovalSide {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ApprovalSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One side of a swap: an employee, the date and shift type they hold,
/// and the crew whose schedule the slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapShift {
    /// The employee holding (or claiming) the shift.
    pub employee_id: i64,
    /// The shift date.
    pub date: NaiveDate,
    /// The shift type.
    pub shift_type: ShiftType,
    /// The crew whose schedule the slot belongs to.
    pub crew: Crew,
}

impl SwapShift {
    /// Creates a new `SwapShift`.
    #[must_use]
    pub const fn new(employee_id: i64, date: NaiveDate, shift_type: ShiftType, crew: Crew) -> Self {
        Self {
            employee_id,
            date,
            shift_type,
            crew,
        }
    }
}

/// A shift-swap request.
///
/// Crews are denormalized onto the request so supervisor queues can
/// filter by crew without a roster join. The `version` field is the
/// optimistic-concurrency token: every persisted update increments it,
/// and the approve/deny transition commits only if the version it read
/// is still current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the request has not been persisted yet.
    pub swap_id: Option<i64>,
    /// Whether this is a paired exchange or an open give-away.
    pub kind: SwapKind,
    /// The requester's side of the swap.
    pub requester: SwapShift,
    /// The other side: the named colleague for paired swaps, the claimed
    /// volunteer for open swaps, `None` for unclaimed open swaps.
    pub target: Option<SwapShift>,
    /// The state-machine state.
    pub status: SwapStatus,
    /// Whether the requester-side supervisor has approved.
    pub requester_approved: bool,
    /// When the requester-side supervisor decided, if they have.
    pub requester_decided_at: Option<DateTime<Utc>>,
    /// Whether the target-side supervisor has approved.
    pub target_approved: bool,
    /// When the target-side supervisor decided, if they have.
    pub target_decided_at: Option<DateTime<Utc>>,
    /// The requester's stated reason.
    pub reason: String,
    /// The denial reason, for denied requests.
    pub denial_reason: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// Optimistic-concurrency token.
    pub version: i64,
}

impl SwapRequest {
    /// Creates a new pending `SwapRequest` without a persisted ID.
    #[must_use]
    pub const fn new(
        kind: SwapKind,
        requester: SwapShift,
        target: Option<SwapShift>,
        reason: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            swap_id: None,
            kind,
            requester,
            target,
            status: SwapStatus::Pending,
            requester_approved: false,
            requester_decided_at: None,
            target_approved: false,
            target_decided_at: None,
            reason,
            denial_reason: None,
            created_at,
            version: 0,
        }
    }

    /// Returns whether the two sides belong to different crews.
    ///
    /// An unclaimed open swap has no second crew and is not cross-crew.
    #[must_use]
    pub fn is_cross_crew(&self) -> bool {
        self.target
            .is_some_and(|target| target.crew != self.requester.crew)
    }

    /// Returns whether both supervisors must approve before the request
    /// transitions to `Approved`.
    ///
    /// Same-crew requests need one approval from either side; cross-crew
    /// requests need both.
    #[must_use]
    pub fn requires_dual_approval(&self) -> bool {
        self.is_cross_crew()
    }

    /// Returns whether a side has already approved.
    #[must_use]
    pub const fn side_approved(&self, side: ApprovalSide) -> bool {
        match side {
            ApprovalSide::Requester => self.requester_approved,
            ApprovalSide::Target => self.target_approved,
        }
    }

    /// Returns whether the approval flags satisfy the request's approval
    /// rule.
    #[must_use]
    pub fn is_fully_approved(&self) -> bool {
        if self.requires_dual_approval() {
            self.requester_approved && self.target_approved
        } else {
            self.requester_approved || self.target_approved
        }
    }
}
