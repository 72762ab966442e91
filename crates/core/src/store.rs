// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence seam.
//!
//! The core never talks to a database directly. Everything it needs from
//! storage goes through [`EventStore`], which the persistence crate
//! implements on `SQLite` and the tests implement in memory.

use crate::consistency::StoredTotals;
use crate::error::CoreError;
use crate::event::{Event, EventId};
use boxoffice_audit::AuditEvent;
use boxoffice_domain::{
    Availability, ClaimingSlot, EventStatus, EventType, TicketTier, Visibility,
};

/// An event as loaded from storage, together with the derived values that
/// were written alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvent {
    /// The event, with `id` set and its availability as last written.
    pub event: Event,
    pub totals: StoredTotals,
}

/// Selects events for listing.
///
/// Archived events are excluded unless `include_archived` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventFilter {
    pub visibility: Option<Visibility>,
    pub status: Option<EventStatus>,
    pub event_type: Option<EventType>,
    pub include_archived: bool,
}

impl EventFilter {
    /// Matches every event that is not archived.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            visibility: None,
            status: None,
            event_type: None,
            include_archived: false,
        }
    }

    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    #[must_use]
    pub const fn including_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    /// Returns true if the filter admits an event with this type and
    /// availability.
    #[must_use]
    pub fn matches(&self, event_type: EventType, availability: Availability) -> bool {
        (self.wants_archived() || !availability.is_archived())
            && self
                .visibility
                .is_none_or(|visibility| visibility == availability.visibility)
            && self.status.is_none_or(|status| status == availability.status)
            && self.event_type.is_none_or(|wanted| wanted == event_type)
    }

    /// An explicit archived visibility filter implies archived events.
    #[must_use]
    pub const fn wants_archived(&self) -> bool {
        self.include_archived || matches!(self.visibility, Some(Visibility::Archived))
    }
}

/// Storage for events, their tiers and slots, and the audit trail.
///
/// Writes made inside [`EventStore::atomically`] either all land or none do.
pub trait EventStore {
    /// Loads one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_event(&mut self, id: EventId) -> Result<Option<StoredEvent>, CoreError>;

    /// Loads events that may match `filter`.
    ///
    /// Implementations must apply the `event_type` and archived criteria.
    /// Status and visibility are time-driven, so the caller matches them
    /// after re-resolving.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_events(&mut self, filter: &EventFilter) -> Result<Vec<StoredEvent>, CoreError>;

    /// Inserts the event when its id is `None`, otherwise overwrites the
    /// stored row. The derived totals are written from the event's tiers
    /// and slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or the id is unknown.
    fn save_event(&mut self, event: &Event) -> Result<EventId, CoreError>;

    /// Replaces every ticket tier of the event.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn replace_tickets(&mut self, id: EventId, tiers: &[TicketTier]) -> Result<(), CoreError>;

    /// Replaces every claiming slot of the event.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn replace_claiming_slots(
        &mut self,
        id: EventId,
        slots: &[ClaimingSlot],
    ) -> Result<(), CoreError>;

    /// Overwrites the stored status and visibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or the id is unknown.
    fn update_availability(
        &mut self,
        id: EventId,
        availability: Availability,
    ) -> Result<(), CoreError>;

    /// Appends an audit event and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn record_audit_event(&mut self, audit_event: &AuditEvent) -> Result<i64, CoreError>;

    /// Runs `f` in a transaction, rolling back every write if it fails.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or an error if the transaction cannot be
    /// opened or committed.
    fn atomically<T, F>(&mut self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Self) -> Result<T, CoreError>,
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: Availability = Availability::new(EventStatus::Open, Visibility::Published);

    #[test]
    fn test_default_filter_hides_archived() {
        let archived = Availability::new(EventStatus::Closed, Visibility::Archived);

        assert!(EventFilter::all().matches(EventType::Ticketed, OPEN));
        assert!(!EventFilter::all().matches(EventType::Ticketed, archived));
        assert!(
            EventFilter::all()
                .including_archived()
                .matches(EventType::Ticketed, archived)
        );
    }

    #[test]
    fn test_filter_criteria_combine() {
        let filter = EventFilter::all()
            .with_status(EventStatus::Open)
            .with_event_type(EventType::Free);

        assert!(filter.matches(EventType::Free, OPEN));
        assert!(!filter.matches(EventType::Ticketed, OPEN));
        assert!(!filter.matches(EventType::Free, Availability::draft()));
    }

    #[test]
    fn test_archived_visibility_filter_implies_archived() {
        let filter = EventFilter::all().with_visibility(Visibility::Archived);
        assert!(filter.wants_archived());
        assert!(!EventFilter::all().wants_archived());
    }
}
