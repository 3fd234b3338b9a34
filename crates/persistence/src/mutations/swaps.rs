// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Swap request mutations.

use crate::data_models::NewSwapRequest;
use crate::diesel_schema::swap_requests;
use crate::error::PersistenceError;
use crew_rota_domain::SwapRequest;
use diesel::prelude::*;

/// Inserts a new swap request and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_swap_request(
    conn: &mut SqliteConnection,
    request: &SwapRequest,
) -> Result<i64, PersistenceError> {
    let record: NewSwapRequest = NewSwapRequest::from(request);
    let swap_id: i64 = diesel::insert_into(swap_requests::table)
        .values(&record)
        .returning(swap_requests::swap_id)
        .get_result(conn)?;
    Ok(swap_id)
}

/// Updates a swap request with an optimistic version check.
///
/// The update commits only if the stored version still equals
/// `expected_version`; the stored version is then incremented. Zero rows
/// updated means another writer committed first (or the request is
/// gone): the caller reloads current state and retries against it rather
/// than overwriting.
///
/// # Errors
///
/// Returns [`PersistenceError::StaleVersion`] if the version check
/// fails, [`PersistenceError::NotFound`] if the request does not exist,
/// or a database error otherwise.
pub fn update_swap_request_versioned(
    conn: &mut SqliteConnection,
    swap_id: i64,
    expected_version: i64,
    updated: &SwapRequest,
) -> Result<(), PersistenceError> {
    let record: NewSwapRequest = NewSwapRequest::from(updated);
    let rows_affected: usize = diesel::update(
        swap_requests::table
            .filter(swap_requests::swap_id.eq(swap_id))
            .filter(swap_requests::version.eq(expected_version)),
    )
    .set((
        swap_requests::target_employee_id.eq(record.target_employee_id),
        swap_requests::target_date.eq(record.target_date),
        swap_requests::target_shift_type.eq(record.target_shift_type),
        swap_requests::target_crew.eq(record.target_crew),
        swap_requests::status.eq(record.status),
        swap_requests::requester_approved.eq(record.requester_approved),
        swap_requests::requester_decided_at.eq(record.requester_decided_at),
        swap_requests::target_approved.eq(record.target_approved),
        swap_requests::target_decided_at.eq(record.target_decided_at),
        swap_requests::denial_reason.eq(record.denial_reason),
        swap_requests::version.eq(expected_version + 1),
    ))
    .execute(conn)?;

    if rows_affected == 0 {
        let exists: i64 = swap_requests::table
            .filter(swap_requests::swap_id.eq(swap_id))
            .count()
            .get_result(conn)?;
        if exists == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Swap request {swap_id}"
            )));
        }
        return Err(PersistenceError::StaleVersion {
            swap_id,
            expected_version,
        });
    }
    Ok(())
}
