// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    NotFound(String),
    /// The optimistic version check failed: another writer committed
    /// first. The caller reloads current state and retries.
    StaleVersion {
        /// The request whose update lost the race.
        swap_id: i64,
        /// The version the losing writer read.
        expected_version: i64,
    },
    /// An insert would create a second assignment for an employee on one
    /// date.
    DuplicateAssignment {
        /// The employee who would be double-booked.
        employee_id: i64,
        /// The date of the collision.
        date: NaiveDate,
    },
    /// An assignment expected by a committed transition no longer exists.
    AssignmentMissing {
        /// The employee said to hold the row.
        employee_id: i64,
        /// The date of the missing row.
        date: NaiveDate,
    },
    /// Regeneration found rows in the range it may not overwrite.
    RegenerationConflict {
        /// The employee holding the conflicting row.
        employee_id: i64,
        /// The date of the conflicting row.
        date: NaiveDate,
        /// The conflicting row's source.
        source: String,
    },
    /// Two assignment rows for the same `(employee_id, date)` were found
    /// already persisted. This indicates an invariant breach upstream and
    /// is logged as a data-integrity alarm, never silently patched.
    IntegrityViolation {
        /// The double-booked employee.
        employee_id: i64,
        /// The date of the duplicate rows.
        date: NaiveDate,
    },
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::StaleVersion {
                swap_id,
                expected_version,
            } => {
                write!(
                    f,
                    "Swap request {swap_id} changed since version {expected_version} was read"
                )
            }
            Self::DuplicateAssignment { employee_id, date } => {
                write!(f, "Employee {employee_id} is already scheduled on {date}")
            }
            Self::AssignmentMissing { employee_id, date } => {
                write!(
                    f,
                    "Assignment for employee {employee_id} on {date} no longer exists"
                )
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
            Self::IntegrityViolation { employee_id, date } => {
                write!(
                    f,
                    "Data-integrity violation: two assignments persisted for employee {employee_id} on {date}"
                )
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
