// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule assignment queries.

use crate::data_models::ScheduleAssignmentRow;
use crate::diesel_schema::schedule_assignments;
use crate::error::PersistenceError;
use chrono::NaiveDate;
use crew_rota_domain::ScheduleAssignment;
use diesel::prelude::*;

fn into_domain_rows(
    rows: Vec<ScheduleAssignmentRow>,
) -> Result<Vec<ScheduleAssignment>, PersistenceError> {
    rows.into_iter()
        .map(ScheduleAssignmentRow::into_domain)
        .collect()
}

/// Loads all assignments with dates in `[start, end]`, ordered by date,
/// crew, and employee.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a row cannot be
/// decoded.
pub fn assignments_in_range(
    conn: &mut SqliteConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ScheduleAssignment>, PersistenceError> {
    let rows: Vec<ScheduleAssignmentRow> = schedule_assignments::table
        .filter(schedule_assignments::date.ge(start.to_string()))
        .filter(schedule_assignments::date.le(end.to_string()))
        .order((
            schedule_assignments::date,
            schedule_assignments::crew,
            schedule_assignments::employee_id,
        ))
        .load(conn)?;
    into_domain_rows(rows)
}

/// Loads all assignments on any of the given dates.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a row cannot be
/// decoded.
pub fn assignments_on_dates(
    conn: &mut SqliteConnection,
    dates: &[NaiveDate],
) -> Result<Vec<ScheduleAssignment>, PersistenceError> {
    let date_strings: Vec<String> = dates.iter().map(ToString::to_string).collect();
    let rows: Vec<ScheduleAssignmentRow> = schedule_assignments::table
        .filter(schedule_assignments::date.eq_any(date_strings))
        .order((schedule_assignments::date, schedule_assignments::employee_id))
        .load(conn)?;
    into_domain_rows(rows)
}

/// Loads one employee's assignments with dates in `[start, end]`.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a row cannot be
/// decoded.
pub fn assignments_for_employee_in_range(
    conn: &mut SqliteConnection,
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ScheduleAssignment>, PersistenceError> {
    let rows: Vec<ScheduleAssignmentRow> = schedule_assignments::table
        .filter(schedule_assignments::employee_id.eq(employee_id))
        .filter(schedule_assignments::date.ge(start.to_string()))
        .filter(schedule_assignments::date.le(end.to_string()))
        .order(schedule_assignments::date)
        .load(conn)?;
    into_domain_rows(rows)
}

/// Counts assignments currently stored for a date range.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_assignments_in_range(
    conn: &mut SqliteConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<i64, PersistenceError> {
    let count: i64 = schedule_assignments::table
        .filter(schedule_assignments::date.ge(start.to_string()))
        .filter(schedule_assignments::date.le(end.to_string()))
        .count()
        .get_result(conn)?;
    Ok(count)
}

/// Checks whether an employee holds an assignment on a date.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn assignment_exists(
    conn: &mut SqliteConnection,
    employee_id: i64,
    date: NaiveDate,
) -> Result<bool, PersistenceError> {
    let count: i64 = schedule_assignments::table
        .filter(schedule_assignments::employee_id.eq(employee_id))
        .filter(schedule_assignments::date.eq(date.to_string()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
