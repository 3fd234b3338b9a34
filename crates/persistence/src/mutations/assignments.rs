// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule assignment mutations.

use crate::data_models::NewScheduleAssignment;
use crate::diesel_schema::schedule_assignments;
use crate::error::PersistenceError;
use chrono::NaiveDate;
use crew_rota_domain::{AssignmentSource, ScheduleAssignment};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;

/// Inserts one assignment row.
///
/// The table's unique `(employee_id, date)` index is the last line of
/// defense against double-booking; a violation is reported as a conflict
/// with the offending pair.
///
/// # Errors
///
/// Returns [`PersistenceError::DuplicateAssignment`] if the employee
/// already holds a row on the date, or a database error otherwise.
pub fn insert_assignment(
    conn: &mut SqliteConnection,
    assignment: &ScheduleAssignment,
) -> Result<i64, PersistenceError> {
    let record: NewScheduleAssignment = NewScheduleAssignment::from(assignment);
    let assignment_id: i64 = diesel::insert_into(schedule_assignments::table)
        .values(&record)
        .returning(schedule_assignments::assignment_id)
        .get_result(conn)
        .map_err(|err| match err {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::DuplicateAssignment {
                    employee_id: assignment.employee_id,
                    date: assignment.date,
                }
            }
            other => other.into(),
        })?;
    Ok(assignment_id)
}

/// Deletes the row held by an employee on a date.
///
/// # Errors
///
/// Returns [`PersistenceError::AssignmentMissing`] if no such row
/// exists: a transition that expected the row has raced an intervening
/// change, and the enclosing transaction must roll back.
pub fn delete_assignment(
    conn: &mut SqliteConnection,
    employee_id: i64,
    date: NaiveDate,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(
        schedule_assignments::table
            .filter(schedule_assignments::employee_id.eq(employee_id))
            .filter(schedule_assignments::date.eq(date.to_string())),
    )
    .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::AssignmentMissing { employee_id, date });
    }
    Ok(())
}

/// Deletes every rotation-sourced row with a date in `[start, end]`.
///
/// Manual-fill and swap rows are untouched by design of the filter.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_rotation_range(
    conn: &mut SqliteConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(
        schedule_assignments::table
            .filter(schedule_assignments::source.eq(AssignmentSource::Rotation.as_str()))
            .filter(schedule_assignments::date.ge(start.to_string()))
            .filter(schedule_assignments::date.le(end.to_string())),
    )
    .execute(conn)?;
    Ok(rows_affected)
}
