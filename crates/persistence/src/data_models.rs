// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::{audit_events, schedule_assignments, swap_requests};
use crate::error::PersistenceError;
use chrono::{DateTime, NaiveDate, Utc};
use crew_rota_audit::{Action, Actor, ActorKind, AuditEvent, Cause, StateSnapshot};
use crew_rota_domain::{
    AssignmentSource, Crew, ScheduleAssignment, ShiftType, SwapKind, SwapRequest, SwapShift,
    SwapStatus,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Parses an ISO 8601 date column.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, PersistenceError> {
    value.parse().map_err(|_| {
        PersistenceError::SerializationError(format!("Invalid date value: {value}"))
    })
}

/// Parses an RFC 3339 timestamp column.
pub(crate) fn parse_datetime(value: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            PersistenceError::SerializationError(format!("Invalid timestamp value: {value}"))
        })
}

fn parse_domain<T>(result: Result<T, crew_rota_domain::DomainError>) -> Result<T, PersistenceError> {
    result.map_err(|err| PersistenceError::SerializationError(err.to_string()))
}

/// A persisted schedule assignment row.
#[derive(Debug, Clone, Queryable)]
pub struct ScheduleAssignmentRow {
    pub assignment_id: i64,
    pub employee_id: i64,
    pub date: String,
    pub shift_type: String,
    pub crew: String,
    pub source: String,
}

impl ScheduleAssignmentRow {
    /// Converts the row into the domain type.
    ///
    /// # Errors
    ///
    /// Returns an error if any column holds a value outside the closed
    /// enumerations.
    pub fn into_domain(self) -> Result<ScheduleAssignment, PersistenceError> {
        Ok(ScheduleAssignment::with_id(
            self.assignment_id,
            self.employee_id,
            parse_date(&self.date)?,
            parse_domain(ShiftType::parse(&self.shift_type))?,
            parse_domain(Crew::parse(&self.crew))?,
            parse_domain(AssignmentSource::parse(&self.source))?,
        ))
    }
}

/// An insertable schedule assignment row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schedule_assignments)]
pub struct NewScheduleAssignment {
    pub employee_id: i64,
    pub date: String,
    pub shift_type: String,
    pub crew: String,
    pub source: String,
}

impl From<&ScheduleAssignment> for NewScheduleAssignment {
    fn from(assignment: &ScheduleAssignment) -> Self {
        Self {
            employee_id: assignment.employee_id,
            date: assignment.date.to_string(),
            shift_type: assignment.shift_type.as_str().to_string(),
            crew: assignment.crew.as_str().to_string(),
            source: assignment.source.as_str().to_string(),
        }
    }
}

/// A persisted swap request row.
#[derive(Debug, Clone, Queryable)]
pub struct SwapRequestRow {
    pub swap_id: i64,
    pub kind: String,
    pub requester_id: i64,
    pub requester_date: String,
    pub requester_shift_type: String,
    pub requester_crew: String,
    pub target_employee_id: Option<i64>,
    pub target_date: Option<String>,
    pub target_shift_type: Option<String>,
    pub target_crew: Option<String>,
    pub status: String,
    pub requester_approved: i32,
    pub requester_decided_at: Option<String>,
    pub target_approved: i32,
    pub target_decided_at: Option<String>,
    pub reason: String,
    pub denial_reason: Option<String>,
    pub created_at: String,
    pub version: i64,
}

impl SwapRequestRow {
    /// Converts the row into the domain type.
    ///
    /// # Errors
    ///
    /// Returns an error if any column holds a value outside the closed
    /// enumerations, or the target columns are only partially populated.
    pub fn into_domain(self) -> Result<SwapRequest, PersistenceError> {
        let target: Option<SwapShift> = match (
            self.target_employee_id,
            self.target_date.as_deref(),
            self.target_shift_type.as_deref(),
            self.target_crew.as_deref(),
        ) {
            (Some(employee_id), Some(date), Some(shift_type), Some(crew)) => {
                Some(SwapShift::new(
                    employee_id,
                    parse_date(date)?,
                    parse_domain(ShiftType::parse(shift_type))?,
                    parse_domain(Crew::parse(crew))?,
                ))
            }
            (None, None, None, None) => None,
            _ => {
                return Err(PersistenceError::SerializationError(format!(
                    "Swap request {} has partially populated target columns",
                    self.swap_id
                )));
            }
        };

        let requester_decided_at: Option<DateTime<Utc>> = self
            .requester_decided_at
            .as_deref()
            .map(parse_datetime)
            .transpose()?;
        let target_decided_at: Option<DateTime<Utc>> = self
            .target_decided_at
            .as_deref()
            .map(parse_datetime)
            .transpose()?;

        Ok(SwapRequest {
            swap_id: Some(self.swap_id),
            kind: parse_domain(SwapKind::parse(&self.kind))?,
            requester: SwapShift::new(
                self.requester_id,
                parse_date(&self.requester_date)?,
                parse_domain(ShiftType::parse(&self.requester_shift_type))?,
                parse_domain(Crew::parse(&self.requester_crew))?,
            ),
            target,
            status: parse_domain(SwapStatus::parse(&self.status))?,
            requester_approved: self.requester_approved != 0,
            requester_decided_at,
            target_approved: self.target_approved != 0,
            target_decided_at,
            reason: self.reason,
            denial_reason: self.denial_reason,
            created_at: parse_datetime(&self.created_at)?,
            version: self.version,
        })
    }
}

/// An insertable swap request row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = swap_requests)]
pub struct NewSwapRequest {
    pub kind: String,
    pub requester_id: i64,
    pub requester_date: String,
    pub requester_shift_type: String,
    pub requester_crew: String,
    pub target_employee_id: Option<i64>,
    pub target_date: Option<String>,
    pub target_shift_type: Option<String>,
    pub target_crew: Option<String>,
    pub status: String,
    pub requester_approved: i32,
    pub requester_decided_at: Option<String>,
    pub target_approved: i32,
    pub target_decided_at: Option<String>,
    pub reason: String,
    pub denial_reason: Option<String>,
    pub created_at: String,
    pub version: i64,
}

impl From<&SwapRequest> for NewSwapRequest {
    fn from(request: &SwapRequest) -> Self {
        Self {
            kind: request.kind.as_str().to_string(),
            requester_id: request.requester.employee_id,
            requester_date: request.requester.date.to_string(),
            requester_shift_type: request.requester.shift_type.as_str().to_string(),
            requester_crew: request.requester.crew.as_str().to_string(),
            target_employee_id: request.target.map(|t| t.employee_id),
            target_date: request.target.map(|t| t.date.to_string()),
            target_shift_type: request.target.map(|t| t.shift_type.as_str().to_string()),
            target_crew: request.target.map(|t| t.crew.as_str().to_string()),
            status: request.status.as_str().to_string(),
            requester_approved: i32::from(request.requester_approved),
            requester_decided_at: request.requester_decided_at.map(|dt| dt.to_rfc3339()),
            target_approved: i32::from(request.target_approved),
            target_decided_at: request.target_decided_at.map(|dt| dt.to_rfc3339()),
            reason: request.reason.clone(),
            denial_reason: request.denial_reason.clone(),
            created_at: request.created_at.to_rfc3339(),
            version: request.version,
        }
    }
}

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub kind: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            kind: actor.kind.as_str().to_string(),
        }
    }
}

impl ActorData {
    /// Converts the payload back into the audit type.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor kind is unknown.
    pub fn into_audit(self) -> Result<Actor, PersistenceError> {
        let kind: ActorKind = match self.kind.as_str() {
            "Supervisor" => ActorKind::Supervisor,
            "Employee" => ActorKind::Employee,
            "System" => ActorKind::System,
            other => {
                return Err(PersistenceError::SerializationError(format!(
                    "Unknown actor kind: {other}"
                )));
            }
        };
        Ok(Actor::new(self.id, kind))
    }
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.name, data.details)
    }
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

impl From<&StateSnapshot> for StateSnapshotData {
    fn from(snapshot: &StateSnapshot) -> Self {
        Self {
            data: snapshot.data.clone(),
        }
    }
}

impl From<StateSnapshotData> for StateSnapshot {
    fn from(data: StateSnapshotData) -> Self {
        Self::new(data.data)
    }
}

/// A persisted audit event row.
#[derive(Debug, Clone, Queryable)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: Option<String>,
}

impl AuditEventRow {
    /// Converts the row into the audit type.
    ///
    /// # Errors
    ///
    /// Returns an error if any JSON payload cannot be deserialized.
    pub fn into_audit(self) -> Result<AuditEvent, PersistenceError> {
        let actor: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause: CauseData = serde_json::from_str(&self.cause_json)?;
        let action: ActionData = serde_json::from_str(&self.action_json)?;
        let before: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;
        Ok(AuditEvent::new(
            actor.into_audit()?,
            cause.into(),
            action.into(),
            before.into(),
            after.into(),
        ))
    }
}

/// An insertable audit event row. `created_at` is filled by the schema
/// default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEvent {
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
}

impl NewAuditEvent {
    /// Serializes an audit event into an insertable row.
    ///
    /// # Errors
    ///
    /// Returns an error if any payload cannot be serialized.
    pub fn try_from_event(event: &AuditEvent) -> Result<Self, PersistenceError> {
        Ok(Self {
            actor_json: serde_json::to_string(&ActorData::from(&event.actor))?,
            cause_json: serde_json::to_string(&CauseData::from(&event.cause))?,
            action_json: serde_json::to_string(&ActionData::from(&event.action))?,
            before_snapshot_json: serde_json::to_string(&StateSnapshotData::from(&event.before))?,
            after_snapshot_json: serde_json::to_string(&StateSnapshotData::from(&event.after))?,
        })
    }
}
