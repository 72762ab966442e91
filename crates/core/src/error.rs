// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::event::EventId;
use boxoffice_domain::{Advisory, DomainError};

/// Errors that can occur while running an admin command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The submitted event failed validation. Every violation is listed.
    ValidationFailed(Vec<DomainError>),
    /// The command is on a sensitive path and these advisories were not
    /// acknowledged.
    AdvisoriesNotAcknowledged(Vec<Advisory>),
    /// A stored derived value disagrees with the data it is derived from.
    ConsistencyFault {
        /// The affected event.
        event_id: EventId,
        /// Description of the mismatch.
        detail: String,
    },
    /// No event exists with this id.
    EventNotFound(EventId),
    /// The command operates on an existing event, but none was given.
    MissingEvent {
        /// The command name.
        command: &'static str,
    },
    /// The command creates an event, but an existing event was given.
    EventAlreadyExists(EventId),
    /// The event store failed.
    Store(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ValidationFailed(errors) => {
                write!(f, "Validation failed: ")?;
                for (index, err) in errors.iter().enumerate() {
                    if index > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
            Self::AdvisoriesNotAcknowledged(advisories) => {
                write!(
                    f,
                    "{} advisories must be acknowledged before saving",
                    advisories.len()
                )
            }
            Self::ConsistencyFault { event_id, detail } => {
                write!(f, "Consistency fault in event {event_id}: {detail}")
            }
            Self::EventNotFound(id) => write!(f, "Event {id} not found"),
            Self::MissingEvent { command } => {
                write!(f, "Command '{command}' requires an existing event")
            }
            Self::EventAlreadyExists(id) => write!(f, "Event {id} already exists"),
            Self::Store(msg) => write!(f, "Event store error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
