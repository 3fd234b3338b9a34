// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

/// The kind of entity performing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    /// A crew supervisor acting on a swap request.
    Supervisor,
    /// An employee acting on their own schedule.
    Employee,
    /// A scheduled or administrative system process.
    System,
}

impl ActorKind {
    /// Returns the string representation of this actor kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Supervisor => "Supervisor",
            Self::Employee => "Employee",
            Self::System => "System",
        }
    }
}

impl std::fmt::Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change: a
/// supervisor approving a swap, an employee requesting one, or a system
/// process running a scheduled regeneration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The kind of actor.
    pub kind: ActorKind,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `kind` - The kind of actor
    #[must_use]
    pub const fn new(id: String, kind: ActorKind) -> Self {
        Self { id, kind }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`GenerateRotation`", "`ApproveSwap`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact summary of schedule state at a point in time.
///
/// Snapshots capture counts, not full row data; the canonical tables
/// remain the authoritative record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before the transition (before)
/// - The state after the transition (after)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> AuditEvent {
        AuditEvent::new(
            Actor::new(String::from("sup-14"), ActorKind::Supervisor),
            Cause::new(String::from("swap-9"), String::from("Swap approval")),
            Action::new(String::from("ApproveSwap"), None),
            StateSnapshot::new(String::from("assignments_count=40")),
            StateSnapshot::new(String::from("assignments_count=40")),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("sup-14"), ActorKind::Supervisor);

        assert_eq!(actor.id, "sup-14");
        assert_eq!(actor.kind, ActorKind::Supervisor);
    }

    #[test]
    fn test_actor_kind_strings() {
        assert_eq!(ActorKind::Supervisor.as_str(), "Supervisor");
        assert_eq!(ActorKind::Employee.as_str(), "Employee");
        assert_eq!(ActorKind::System.as_str(), "System");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("swap-9"), String::from("Swap approval"));

        assert_eq!(cause.id, "swap-9");
        assert_eq!(cause.description, "Swap approval");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("GenerateRotation"),
            Some(String::from("2026-01-05 through 2026-03-29")),
        );

        assert_eq!(action.name, "GenerateRotation");
        assert!(action.details.is_some());
    }

    #[test]
    fn test_audit_event_captures_before_and_after() {
        let event: AuditEvent = AuditEvent::new(
            Actor::new(String::from("system"), ActorKind::System),
            Cause::new(String::from("gen-1"), String::from("Quarterly generation")),
            Action::new(String::from("GenerateRotation"), None),
            StateSnapshot::new(String::from("assignments_count=0")),
            StateSnapshot::new(String::from("assignments_count=168")),
        );

        assert_eq!(event.before.data, "assignments_count=0");
        assert_eq!(event.after.data, "assignments_count=168");
    }

    #[test]
    fn test_audit_event_equality() {
        assert_eq!(sample_event(), sample_event());
    }

    #[test]
    fn test_audit_event_is_immutable_once_created() {
        let event: AuditEvent = sample_event();
        let cloned: AuditEvent = event.clone();

        assert_eq!(event, cloned);
        assert_eq!(event.action.name, "ApproveSwap");
    }
}
