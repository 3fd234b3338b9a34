// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use crate::data_models::NewAuditEvent;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use crew_rota_audit::AuditEvent;
use diesel::prelude::*;

/// Persists an audit event and returns its assigned event id.
///
/// Every mutating operation writes exactly one audit event inside the
/// same transaction as the rows it describes.
///
/// # Errors
///
/// Returns an error if serialization or the database insert fails.
pub fn insert_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let record: NewAuditEvent = NewAuditEvent::try_from_event(event)?;
    let event_id: i64 = diesel::insert_into(audit_events::table)
        .values(&record)
        .returning(audit_events::event_id)
        .get_result(conn)?;
    Ok(event_id)
}
