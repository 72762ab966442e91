// Copyright (C) 2026 Fred Clausen
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

//! Audit records for event administration.
//!
//! Every committed admin command and every availability change made by the
//! refresher produces exactly one [`AuditEvent`]. Audit events are never
//! updated once recorded.

use boxoffice_domain::{AdvisoryKind, Availability, EventType};
use serde::{Deserialize, Serialize};
use time::Date;

/// Who initiated a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// A human administrator.
    Admin,
    /// An automated process such as the periodic refresher.
    System,
}

impl ActorRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::System => "system",
        }
    }
}

/// The entity performing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identifier of the administrator or process.
    pub id: String,
    pub role: ActorRole,
}

impl Actor {
    /// Creates an administrator actor.
    #[must_use]
    pub fn admin(id: &str) -> Self {
        Self {
            id: id.to_string(),
            role: ActorRole::Admin,
        }
    }

    /// Creates a system actor, named after the process.
    #[must_use]
    pub fn system(name: &str) -> Self {
        Self {
            id: name.to_string(),
            role: ActorRole::System,
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.role.as_str(), self.id)
    }
}

/// Why a change was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// Correlation identifier, such as a request id.
    pub id: String,
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - A correlation identifier for the triggering request
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub fn new(id: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
        }
    }

    /// The cause attached to changes made by a periodic refresh.
    #[must_use]
    pub fn scheduled_refresh() -> Self {
        Self::new("refresh", "Time-driven availability refresh")
    }
}

/// What was done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The command name, e.g. `create` or `convert_coming_soon_to_ticketed`.
    pub name: String,
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub fn new(name: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            details,
        }
    }
}

/// The audited state of one event at a point in time.
///
/// `None` fields describe an event that did not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub event_type: Option<EventType>,
    pub availability: Option<Availability>,
    pub total_tickets: u64,
    pub claiming_dates: Vec<Date>,
}

impl EventSnapshot {
    /// The snapshot of an event that does not exist yet.
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn new(
        event_type: EventType,
        availability: Availability,
        total_tickets: u64,
        claiming_dates: Vec<Date>,
    ) -> Self {
        Self {
            event_type: Some(event_type),
            availability: Some(availability),
            total_tickets,
            claiming_dates,
        }
    }

    #[must_use]
    pub const fn exists(&self) -> bool {
        self.availability.is_some()
    }
}

/// An immutable record of one change to one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Assigned by persistence; `None` until recorded.
    pub audit_id: Option<i64>,
    /// The event changed. `None` until the event has been stored.
    pub event_id: Option<i64>,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: EventSnapshot,
    pub after: EventSnapshot,
    /// Advisory kinds the actor confirmed before the change was committed.
    pub acknowledged: Vec<AdvisoryKind>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - Who initiated the change
    /// * `cause` - Why the change was made
    /// * `action` - The command that was executed
    /// * `before` - The event state before the change
    /// * `after` - The event state after the change
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: EventSnapshot,
        after: EventSnapshot,
    ) -> Self {
        Self {
            audit_id: None,
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            acknowledged: Vec::new(),
        }
    }

    /// Attaches the stored event id.
    #[must_use]
    pub const fn for_event(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }

    /// Records the advisories the actor acknowledged.
    #[must_use]
    pub fn with_acknowledged(mut self, acknowledged: Vec<AdvisoryKind>) -> Self {
        self.acknowledged = acknowledged;
        self
    }

    /// Returns true if the availability changed.
    #[must_use]
    pub fn changes_availability(&self) -> bool {
        self.before.availability != self.after.availability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_domain::{EventStatus, Visibility};
    use time::macros::date;

    fn create_test_event() -> AuditEvent {
        AuditEvent::new(
            Actor::admin("admin-7"),
            Cause::new("req-42", "Admin edit"),
            Action::new("update", None),
            EventSnapshot::new(
                EventType::Ticketed,
                Availability::new(EventStatus::Scheduled, Visibility::Published),
                100,
                vec![date!(2026 - 06 - 10)],
            ),
            EventSnapshot::new(
                EventType::Ticketed,
                Availability::new(EventStatus::Open, Visibility::Published),
                120,
                vec![date!(2026 - 06 - 10)],
            ),
        )
    }

    #[test]
    fn test_actor_display() {
        assert_eq!(Actor::admin("admin-7").to_string(), "admin:admin-7");
        assert_eq!(Actor::system("refresher").to_string(), "system:refresher");
    }

    #[test]
    fn test_absent_snapshot() {
        let snapshot = EventSnapshot::absent();
        assert!(!snapshot.exists());
        assert_eq!(snapshot.total_tickets, 0);
    }

    #[test]
    fn test_new_event_has_no_ids() {
        let event = create_test_event();
        assert_eq!(event.audit_id, None);
        assert_eq!(event.event_id, None);
        assert!(event.acknowledged.is_empty());

        let event = event.for_event(9);
        assert_eq!(event.event_id, Some(9));
    }

    #[test]
    fn test_changes_availability() {
        let event = create_test_event();
        assert!(event.changes_availability());

        let mut unchanged = create_test_event();
        unchanged.after.availability = unchanged.before.availability;
        assert!(!unchanged.changes_availability());
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let event = create_test_event()
            .with_acknowledged(vec![AdvisoryKind::ReservationsOpenImmediately]);

        let json = serde_json::to_string(&event.after).unwrap_or_default();
        assert!(json.contains("\"status\":\"open\""));
        assert!(json.contains("\"claiming_dates\""));

        let parsed: Result<EventSnapshot, _> = serde_json::from_str(&json);
        assert_eq!(parsed.ok(), Some(event.after));
    }
}
