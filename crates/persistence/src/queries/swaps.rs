// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Swap request queries.

use crate::data_models::SwapRequestRow;
use crate::diesel_schema::swap_requests;
use crate::error::PersistenceError;
use crew_rota_domain::{Crew, SwapRequest, SwapStatus};
use diesel::prelude::*;

/// Loads a swap request by id.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or the row cannot
/// be decoded.
pub fn get_swap_request(
    conn: &mut SqliteConnection,
    swap_id: i64,
) -> Result<Option<SwapRequest>, PersistenceError> {
    let row: Option<SwapRequestRow> = swap_requests::table
        .filter(swap_requests::swap_id.eq(swap_id))
        .first(conn)
        .optional()?;
    row.map(SwapRequestRow::into_domain).transpose()
}

/// Lists swap requests for supervisor queues, optionally filtered by
/// status and by crew.
///
/// A crew filter matches requests where the crew appears on either side,
/// so a supervisor sees both outgoing and incoming cross-crew requests.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a row cannot be
/// decoded.
pub fn list_swap_requests(
    conn: &mut SqliteConnection,
    status: Option<SwapStatus>,
    crew: Option<Crew>,
) -> Result<Vec<SwapRequest>, PersistenceError> {
    let mut query = swap_requests::table.into_boxed();
    if let Some(status) = status {
        query = query.filter(swap_requests::status.eq(status.as_str().to_string()));
    }
    if let Some(crew) = crew {
        let crew_str: String = crew.as_str().to_string();
        // requester_crew is non-null; lift it so both sides of the OR
        // share the nullable boolean type.
        query = query.filter(
            swap_requests::requester_crew
                .nullable()
                .eq(crew_str.clone())
                .or(swap_requests::target_crew.eq(crew_str)),
        );
    }

    let rows: Vec<SwapRequestRow> = query.order(swap_requests::swap_id).load(conn)?;
    rows.into_iter().map(SwapRequestRow::into_domain).collect()
}
