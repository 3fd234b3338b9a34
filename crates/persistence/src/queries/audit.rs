// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use crew_rota_audit::AuditEvent;
use diesel::prelude::*;

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Audit event {event_id}")))?;
    row.into_audit()
}

/// Retrieves the ordered audit timeline.
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .order(audit_events::event_id)
        .load(conn)?;
    rows.into_iter().map(AuditEventRow::into_audit).collect()
}
