// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the service boundary layer.

use crew_rota::CoreError;
use crew_rota_domain::DomainError;
use crew_rota_persistence::PersistenceError;

/// Service-level errors.
///
/// These are distinct from domain/core errors and represent the
/// boundary contract: invalid input, conflict, invalid state
/// transition, and not-found, plus an internal bucket for storage
/// faults. All are expected, caller-recoverable conditions; the core
/// never retries on the caller's behalf beyond the single
/// stale-version reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The operation conflicts with the current schedule; the caller
    /// re-checks and decides whether to retry.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An action was attempted that the target's state cannot accept.
    InvalidStateTransition {
        /// A human-readable description of the rejected transition.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::InvalidStateTransition { message } => {
                write!(f, "Invalid state transition: {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Translates a domain error into a service error.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ServiceError {
    match &err {
        DomainError::InvalidCrew(_) => invalid_input("crew", &err),
        DomainError::InvalidShiftType(_) => invalid_input("shift_type", &err),
        DomainError::InvalidDayClass(_) => invalid_input("day_class", &err),
        DomainError::InvalidAssignmentSource(_) => invalid_input("source", &err),
        DomainError::InvalidSwapStatus(_) => invalid_input("status", &err),
        DomainError::InvalidSwapKind(_) => invalid_input("kind", &err),
        DomainError::InvalidApprovalSide(_) => invalid_input("approving_side", &err),
        DomainError::InvalidSkill(_) => invalid_input("skill", &err),
        DomainError::InvalidDateRange { .. } => invalid_input("date_range", &err),
        DomainError::EmptyCycle { .. }
        | DomainError::InvalidPatternId(_)
        | DomainError::InvalidPhaseOffset { .. }
        | DomainError::InsufficientCrewCoverage { .. }
        | DomainError::InvalidRequiredOnDuty { .. }
        | DomainError::EmptyPhaseMap => invalid_input("pattern", &err),
        DomainError::InvalidShiftDuration { .. } => invalid_input("durations", &err),
        DomainError::InvalidOvertimePolicy(_) => invalid_input("overtime_policy", &err),
        DomainError::InvalidRequirement(_) => invalid_input("requirement", &err),
        DomainError::EmptyReason => invalid_input("reason", &err),
        DomainError::SwapWithSelf { .. } => invalid_input("target_employee_id", &err),
        DomainError::EmployeeInactive { .. } | DomainError::EmployeeWithoutCrew { .. } => {
            invalid_input("employee_id", &err)
        }
        DomainError::EmployeeNotFound { employee_id } => ServiceError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {employee_id} does not exist"),
        },
        DomainError::PatternNotFound { pattern_id } => ServiceError::ResourceNotFound {
            resource_type: String::from("Rotation pattern"),
            message: format!("Rotation pattern '{pattern_id}' does not exist"),
        },
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ServiceError {
    ServiceError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a core error into a service error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ServiceError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidStateTransition { .. } => ServiceError::InvalidStateTransition {
            message: err.to_string(),
        },
        CoreError::SwapRequestNotFound { swap_id } => ServiceError::ResourceNotFound {
            resource_type: String::from("Swap request"),
            message: format!("Swap request {swap_id} does not exist"),
        },
        CoreError::AssignmentNotFound { employee_id, date } => ServiceError::ResourceNotFound {
            resource_type: String::from("Assignment"),
            message: format!("No assignment found for employee {employee_id} on {date}"),
        },
        CoreError::DoubleBooked { .. }
        | CoreError::RegenerationConflict { .. }
        | CoreError::SwapRevalidationFailed { .. }
        | CoreError::OpenSwapUnclaimed { .. }
        | CoreError::SwapAlreadyClaimed { .. } => ServiceError::Conflict {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into a service error.
///
/// Conflicts detected inside the committing transaction surface the
/// same way as conflicts the core detected up front.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ServiceError {
    match err {
        PersistenceError::NotFound(message) => ServiceError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::StaleVersion { .. }
        | PersistenceError::DuplicateAssignment { .. }
        | PersistenceError::AssignmentMissing { .. }
        | PersistenceError::RegenerationConflict { .. } => ServiceError::Conflict {
            message: err.to_string(),
        },
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::SerializationError(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::IntegrityViolation { .. } => ServiceError::Internal {
            message: err.to_string(),
        },
    }
}
