// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use crew_rota_domain::{AssignmentSource, DomainError, SwapStatus};

/// Errors that can occur during state transitions.
///
/// Every variant is an expected, caller-recoverable condition; nothing
/// here is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated (invalid input).
    DomainViolation(DomainError),
    /// The mutation would leave an employee with two assignments on one
    /// date.
    DoubleBooked {
        /// The employee who would be double-booked.
        employee_id: i64,
        /// The date of the collision.
        date: NaiveDate,
    },
    /// Regeneration would overwrite an assignment that was not produced
    /// by rotation.
    RegenerationConflict {
        /// The employee holding the conflicting assignment.
        employee_id: i64,
        /// The date of the conflicting assignment.
        date: NaiveDate,
        /// How the conflicting assignment came to exist.
        source: AssignmentSource,
    },
    /// Approval-time re-validation failed: the schedule changed after
    /// the request was created. The request remains pending.
    SwapRevalidationFailed {
        /// The request whose approval was rejected.
        swap_id: i64,
        /// What the re-validation found.
        detail: String,
    },
    /// An open request was approved before any volunteer claimed it.
    OpenSwapUnclaimed {
        /// The unclaimed request.
        swap_id: i64,
    },
    /// An open request already has a volunteer claim.
    SwapAlreadyClaimed {
        /// The claimed request.
        swap_id: i64,
    },
    /// An action was attempted on a request whose status cannot accept
    /// it.
    InvalidStateTransition {
        /// The request.
        swap_id: i64,
        /// The request's current status.
        status: SwapStatus,
        /// The attempted action.
        action: &'static str,
    },
    /// A referenced swap request does not exist.
    SwapRequestNotFound {
        /// The unknown request identifier.
        swap_id: i64,
    },
    /// A referenced assignment does not exist.
    AssignmentNotFound {
        /// The employee said to hold the assignment.
        employee_id: i64,
        /// The date of the missing assignment.
        date: NaiveDate,
    },
}

impl CoreError {
    /// Returns whether this error is a scheduling conflict (as opposed
    /// to invalid input, an invalid transition, or a missing record).
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DoubleBooked { .. }
                | Self::RegenerationConflict { .. }
                | Self::SwapRevalidationFailed { .. }
                | Self::OpenSwapUnclaimed { .. }
                | Self::SwapAlreadyClaimed { .. }
        )
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::DoubleBooked { employee_id, date } => {
                write!(f, "Employee {employee_id} is already scheduled on {date}")
            }
            Self::RegenerationConflict {
                employee_id,
                date,
                source,
            } => {
                write!(
                    f,
                    "Regeneration would overwrite a {source} assignment for employee {employee_id} on {date}"
                )
            }
            Self::SwapRevalidationFailed { swap_id, detail } => {
                write!(f, "Approval of swap request {swap_id} failed re-validation: {detail}")
            }
            Self::OpenSwapUnclaimed { swap_id } => {
                write!(f, "Open swap request {swap_id} has no volunteer claim yet")
            }
            Self::SwapAlreadyClaimed { swap_id } => {
                write!(f, "Open swap request {swap_id} already has a volunteer claim")
            }
            Self::InvalidStateTransition {
                swap_id,
                status,
                action,
            } => {
                write!(
                    f,
                    "Cannot {action} swap request {swap_id} in status {status}"
                )
            }
            Self::SwapRequestNotFound { swap_id } => {
                write!(f, "Swap request {swap_id} not found")
            }
            Self::AssignmentNotFound { employee_id, date } => {
                write!(
                    f,
                    "No assignment found for employee {employee_id} on {date}"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
