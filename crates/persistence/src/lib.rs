// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the CrewRota Shift Scheduling System.
//!
//! This crate stores the scheduling core's canonical state — schedule
//! assignments and swap requests — together with the audit trail, on
//! `Diesel` over `SQLite`.
//!
//! ## Invariants enforced here
//!
//! - `(employee_id, date)` is unique for schedule assignments, backed by
//!   a database unique index. Finding an already-persisted duplicate is
//!   a data-integrity alarm: it is logged at error level and surfaced,
//!   never silently patched.
//! - Every mutating operation (rotation persistence, gap fill, swap
//!   create/claim/approve/deny) runs inside a single transaction: read,
//!   re-validate, write, commit.
//! - Swap request updates use an optimistic version check. A writer that
//!   loses the race gets [`PersistenceError::StaleVersion`] and retries
//!   against reloaded state; the final transition and its assignment
//!   mutation commit exactly once.
//!
//! ## Testing
//!
//! `new_in_memory` hands out isolated shared-cache databases named by an
//! atomic counter, so tests are deterministic and need no filesystem.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use chrono::NaiveDate;
use crew_rota::{AssignmentMutation, TransitionResult};
use crew_rota_audit::AuditEvent;
use crew_rota_domain::{
    Crew, ScheduleAssignment, SwapRequest, SwapStatus, find_duplicate_assignment,
};
use diesel::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::error;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// test isolation never depends on timing.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The outcome of persisting a rotation generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Rows inserted by this generation.
    pub inserted: usize,
    /// Rotation-sourced rows replaced by this generation.
    pub replaced: usize,
}

/// Persistence adapter for schedule assignments, swap requests, and
/// audit events.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_crew_rota_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Assignment Queries
    // ========================================================================

    /// Loads all assignments with dates in `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried or the loaded
    /// rows violate the `(employee_id, date)` uniqueness invariant.
    pub fn assignments_in_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduleAssignment>, PersistenceError> {
        let assignments: Vec<ScheduleAssignment> =
            queries::assignments::assignments_in_range(&mut self.conn, start, end)?;
        verify_assignment_integrity(&assignments)?;
        Ok(assignments)
    }

    /// Loads all assignments on any of the given dates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried or the loaded
    /// rows violate the `(employee_id, date)` uniqueness invariant.
    pub fn assignments_on_dates(
        &mut self,
        dates: &[NaiveDate],
    ) -> Result<Vec<ScheduleAssignment>, PersistenceError> {
        let assignments: Vec<ScheduleAssignment> =
            queries::assignments::assignments_on_dates(&mut self.conn, dates)?;
        verify_assignment_integrity(&assignments)?;
        Ok(assignments)
    }

    /// Loads one employee's assignments with dates in `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried or the loaded
    /// rows violate the `(employee_id, date)` uniqueness invariant.
    pub fn assignments_for_employee_in_range(
        &mut self,
        employee_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduleAssignment>, PersistenceError> {
        let assignments: Vec<ScheduleAssignment> =
            queries::assignments::assignments_for_employee_in_range(
                &mut self.conn,
                employee_id,
                start,
                end,
            )?;
        verify_assignment_integrity(&assignments)?;
        Ok(assignments)
    }

    /// Counts assignments stored for a date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn count_assignments_in_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64, PersistenceError> {
        queries::assignments::count_assignments_in_range(&mut self.conn, start, end)
    }

    // ========================================================================
    // Swap Request Queries
    // ========================================================================

    /// Loads a swap request by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn get_swap_request(
        &mut self,
        swap_id: i64,
    ) -> Result<Option<SwapRequest>, PersistenceError> {
        queries::swaps::get_swap_request(&mut self.conn, swap_id)
    }

    /// Lists swap requests, optionally filtered by status and by crew.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_swap_requests(
        &mut self,
        status: Option<SwapStatus>,
        crew: Option<Crew>,
    ) -> Result<Vec<SwapRequest>, PersistenceError> {
        queries::swaps::list_swap_requests(&mut self.conn, status, crew)
    }

    // ========================================================================
    // Audit Queries
    // ========================================================================

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be
    /// deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the ordered audit event timeline.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn get_audit_timeline(&mut self) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn)
    }

    // ========================================================================
    // Transactional Mutations
    // ========================================================================

    /// Persists a rotation generation transition.
    ///
    /// The range is re-validated inside the transaction: without the
    /// replace flag any existing row in the range aborts the commit, and
    /// with it only rotation-sourced rows are deleted. Generated rows
    /// landing on an occupied `(employee, date)` are skipped so preserved
    /// rows keep their slot.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::RegenerationConflict`] if the range
    /// holds rows that may not be overwritten, or a database error.
    pub fn persist_generation(
        &mut self,
        result: &TransitionResult,
        start: NaiveDate,
        end: NaiveDate,
        replace_rotation: bool,
    ) -> Result<GenerationOutcome, PersistenceError> {
        let mutation_list: &[AssignmentMutation] = &result.mutations;
        let event: &AuditEvent = &result.audit_event;
        self.conn
            .transaction::<GenerationOutcome, PersistenceError, _>(|conn| {
                let existing: Vec<ScheduleAssignment> =
                    queries::assignments::assignments_in_range(conn, start, end)?;
                if !replace_rotation {
                    let conflicting: Option<&ScheduleAssignment> = existing
                        .iter()
                        .find(|a| a.source != crew_rota_domain::AssignmentSource::Rotation)
                        .or_else(|| existing.first());
                    if let Some(conflicting) = conflicting {
                        return Err(PersistenceError::RegenerationConflict {
                            employee_id: conflicting.employee_id,
                            date: conflicting.date,
                            source: conflicting.source.as_str().to_string(),
                        });
                    }
                }

                let mut outcome: GenerationOutcome = GenerationOutcome {
                    inserted: 0,
                    replaced: 0,
                };
                for mutation in mutation_list {
                    match mutation {
                        AssignmentMutation::DeleteRotationRange { start, end } => {
                            outcome.replaced +=
                                mutations::assignments::delete_rotation_range(conn, *start, *end)?;
                        }
                        AssignmentMutation::Insert(assignment) => {
                            if queries::assignments::assignment_exists(
                                conn,
                                assignment.employee_id,
                                assignment.date,
                            )? {
                                continue;
                            }
                            mutations::assignments::insert_assignment(conn, assignment)?;
                            outcome.inserted += 1;
                        }
                        AssignmentMutation::Delete { employee_id, date } => {
                            mutations::assignments::delete_assignment(conn, *employee_id, *date)?;
                        }
                    }
                }

                mutations::audit::insert_audit_event(conn, event)?;
                Ok(outcome)
            })
    }

    /// Persists a gap-fill transition: one manual-fill insert plus its
    /// audit event.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::DuplicateAssignment`] if a concurrent
    /// writer booked the employee first, or a database error.
    pub fn persist_fill_gap(
        &mut self,
        result: &TransitionResult,
    ) -> Result<i64, PersistenceError> {
        let mutation_list: &[AssignmentMutation] = &result.mutations;
        let event: &AuditEvent = &result.audit_event;
        self.conn
            .transaction::<i64, PersistenceError, _>(|conn| {
                let mut assignment_id: Option<i64> = None;
                for mutation in mutation_list {
                    match mutation {
                        AssignmentMutation::Insert(assignment) => {
                            assignment_id = Some(mutations::assignments::insert_assignment(
                                conn, assignment,
                            )?);
                        }
                        AssignmentMutation::Delete { employee_id, date } => {
                            mutations::assignments::delete_assignment(conn, *employee_id, *date)?;
                        }
                        AssignmentMutation::DeleteRotationRange { start, end } => {
                            mutations::assignments::delete_rotation_range(conn, *start, *end)?;
                        }
                    }
                }
                mutations::audit::insert_audit_event(conn, event)?;
                assignment_id.ok_or_else(|| {
                    PersistenceError::DatabaseError(String::from(
                        "Gap-fill transition produced no insert",
                    ))
                })
            })
    }

    /// Persists a newly created swap request and returns it with its
    /// assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition holds no new request or the
    /// database insert fails.
    pub fn persist_swap_request(
        &mut self,
        result: &TransitionResult,
    ) -> Result<SwapRequest, PersistenceError> {
        let created: &SwapRequest = result
            .new_state
            .swap_requests
            .iter()
            .find(|request| request.swap_id.is_none())
            .ok_or_else(|| {
                PersistenceError::DatabaseError(String::from(
                    "Transition produced no new swap request",
                ))
            })?;
        let event: &AuditEvent = &result.audit_event;

        self.conn
            .transaction::<SwapRequest, PersistenceError, _>(|conn| {
                let swap_id: i64 = mutations::swaps::insert_swap_request(conn, created)?;
                mutations::audit::insert_audit_event(conn, event)?;
                let mut persisted: SwapRequest = created.clone();
                persisted.swap_id = Some(swap_id);
                Ok(persisted)
            })
    }

    /// Persists a swap request transition (claim, approval, or denial)
    /// with its assignment mutations, under the optimistic version
    /// check.
    ///
    /// # Arguments
    ///
    /// * `result` - The transition to persist
    /// * `swap_id` - The request being updated
    /// * `expected_version` - The version the caller read before
    ///   applying the command
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::StaleVersion`] if another writer
    /// committed first, [`PersistenceError::DuplicateAssignment`] or
    /// [`PersistenceError::AssignmentMissing`] if the schedule raced the
    /// approval, or a database error otherwise.
    pub fn persist_swap_update(
        &mut self,
        result: &TransitionResult,
        swap_id: i64,
        expected_version: i64,
    ) -> Result<SwapRequest, PersistenceError> {
        let updated: &SwapRequest = result
            .new_state
            .swap_request(swap_id)
            .ok_or_else(|| PersistenceError::NotFound(format!("Swap request {swap_id}")))?;
        let mutation_list: &[AssignmentMutation] = &result.mutations;
        let event: &AuditEvent = &result.audit_event;

        self.conn
            .transaction::<SwapRequest, PersistenceError, _>(|conn| {
                mutations::swaps::update_swap_request_versioned(
                    conn,
                    swap_id,
                    expected_version,
                    updated,
                )?;

                for mutation in mutation_list {
                    match mutation {
                        AssignmentMutation::Delete { employee_id, date } => {
                            mutations::assignments::delete_assignment(conn, *employee_id, *date)?;
                        }
                        AssignmentMutation::Insert(assignment) => {
                            mutations::assignments::insert_assignment(conn, assignment)?;
                        }
                        AssignmentMutation::DeleteRotationRange { start, end } => {
                            mutations::assignments::delete_rotation_range(conn, *start, *end)?;
                        }
                    }
                }

                mutations::audit::insert_audit_event(conn, event)?;

                let mut persisted: SwapRequest = updated.clone();
                persisted.version = expected_version + 1;
                Ok(persisted)
            })
    }
}

/// Checks a loaded assignment set for duplicate `(employee_id, date)`
/// rows.
///
/// A duplicate here means the unique index was bypassed upstream; it is
/// logged as a data-integrity alarm and surfaced as an error.
fn verify_assignment_integrity(
    assignments: &[ScheduleAssignment],
) -> Result<(), PersistenceError> {
    if let Some((employee_id, date)) = find_duplicate_assignment(assignments) {
        error!(
            employee_id,
            %date,
            "Data-integrity alarm: duplicate assignment rows persisted for one employee and date"
        );
        return Err(PersistenceError::IntegrityViolation { employee_id, date });
    }
    Ok(())
}
