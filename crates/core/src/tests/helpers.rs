// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CoreError, EventDraft, EventFilter, EventId, EventService, EventStore, StoredEvent,
    StoredTotals,
};
use boxoffice_audit::{Actor, AuditEvent, Cause};
use boxoffice_domain::{
    Availability, ClaimingSchedule, ClaimingSlot, DisplayPeriod, EventDetails, EventType,
    FixedClock, ReservationPeriod, SlotInput, TicketPlan, TicketTier, TierInput, TimeWindow,
};
use std::collections::BTreeMap;
use time::PrimitiveDateTime;
use time::macros::{date, datetime, time};

pub const NOW: PrimitiveDateTime = datetime!(2026-05-10 12:00);

/// An `EventStore` held in memory.
///
/// `atomically` snapshots everything and puts it back if the closure fails.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    events: BTreeMap<EventId, StoredEvent>,
    audit_events: Vec<AuditEvent>,
    last_id: EventId,
    fail_audit_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audit_events(&self) -> &[AuditEvent] {
        &self.audit_events
    }

    pub fn stored(&self, id: EventId) -> &StoredEvent {
        self.events.get(&id).expect("event should be stored")
    }

    /// Makes every later audit write fail.
    pub const fn fail_audit_writes(&mut self) {
        self.fail_audit_writes = true;
    }

    /// Overwrites the stored ticket total without touching the tiers.
    pub fn corrupt_total_tickets(&mut self, id: EventId, total_tickets: u64) {
        let stored = self.events.get_mut(&id).expect("event should be stored");
        stored.totals.total_tickets = total_tickets;
    }

    /// Overwrites the stored availability, as a stale row would hold it.
    pub fn force_availability(&mut self, id: EventId, availability: Availability) {
        let stored = self.events.get_mut(&id).expect("event should be stored");
        stored.event.availability = availability;
    }

    fn entry(&mut self, id: EventId) -> Result<&mut StoredEvent, CoreError> {
        self.events.get_mut(&id).ok_or(CoreError::EventNotFound(id))
    }
}

impl EventStore for InMemoryStore {
    fn get_event(&mut self, id: EventId) -> Result<Option<StoredEvent>, CoreError> {
        Ok(self.events.get(&id).cloned())
    }

    fn list_events(&mut self, filter: &EventFilter) -> Result<Vec<StoredEvent>, CoreError> {
        Ok(self
            .events
            .values()
            .filter(|stored| {
                filter
                    .event_type
                    .is_none_or(|event_type| event_type == stored.event.event_type)
            })
            .filter(|stored| filter.wants_archived() || !stored.event.availability.is_archived())
            .cloned()
            .collect())
    }

    fn save_event(&mut self, event: &crate::Event) -> Result<EventId, CoreError> {
        let id = match event.id {
            Some(id) if self.events.contains_key(&id) => id,
            Some(id) => return Err(CoreError::EventNotFound(id)),
            None => {
                self.last_id += 1;
                self.last_id
            }
        };
        let mut event = event.clone();
        event.id = Some(id);
        let totals = StoredTotals::of(&event);
        self.events.insert(id, StoredEvent { event, totals });
        Ok(id)
    }

    fn replace_tickets(&mut self, id: EventId, tiers: &[TicketTier]) -> Result<(), CoreError> {
        let stored = self.entry(id)?;
        stored.event.tiers = tiers.to_vec();
        stored.totals.total_tickets = stored.event.total_tickets();
        Ok(())
    }

    fn replace_claiming_slots(
        &mut self,
        id: EventId,
        slots: &[ClaimingSlot],
    ) -> Result<(), CoreError> {
        let stored = self.entry(id)?;
        stored.event.claiming_slots = slots.to_vec();
        stored.totals.claiming_dates = stored.event.claiming_dates();
        Ok(())
    }

    fn update_availability(
        &mut self,
        id: EventId,
        availability: Availability,
    ) -> Result<(), CoreError> {
        self.entry(id)?.event.availability = availability;
        Ok(())
    }

    fn record_audit_event(&mut self, audit_event: &AuditEvent) -> Result<i64, CoreError> {
        if self.fail_audit_writes {
            return Err(CoreError::Store(String::from("audit log unavailable")));
        }
        let audit_id = i64::try_from(self.audit_events.len()).unwrap() + 1;
        let mut recorded = audit_event.clone();
        recorded.audit_id = Some(audit_id);
        self.audit_events.push(recorded);
        Ok(audit_id)
    }

    fn atomically<T, F>(&mut self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Self) -> Result<T, CoreError>,
    {
        let snapshot = self.clone();
        f(self).inspect_err(|_| *self = snapshot)
    }
}

pub type TestService = EventService<InMemoryStore, FixedClock>;

pub fn create_test_service() -> TestService {
    EventService::new(InMemoryStore::new(), FixedClock::new(NOW))
}

pub fn create_test_actor() -> Actor {
    Actor::admin("admin-123")
}

pub fn create_test_cause() -> Cause {
    Cause::new("req-456", "Admin request")
}

pub fn window(start: PrimitiveDateTime, end: PrimitiveDateTime) -> TimeWindow {
    TimeWindow::between(start, end)
}

/// Display period that started before `NOW` and ends the day before the
/// event.
pub fn running_display() -> DisplayPeriod {
    window(datetime!(2026-05-01 00:00), datetime!(2026-06-19 23:59))
}

/// Display period that starts after `NOW`.
pub fn future_display() -> DisplayPeriod {
    window(datetime!(2026-05-11 00:00), datetime!(2026-06-19 23:59))
}

/// Reservation period that starts after `NOW`.
pub fn future_reservation() -> ReservationPeriod {
    window(datetime!(2026-05-12 09:00), datetime!(2026-06-15 18:00))
}

/// Reservation period that contains `NOW`.
pub fn active_reservation() -> ReservationPeriod {
    window(datetime!(2026-05-09 09:00), datetime!(2026-05-11 18:00))
}

pub fn create_test_details() -> EventDetails {
    EventDetails::new("Spring Gala", "Main Hall", date!(2026 - 06 - 20), time!(19:00))
}

/// Two tiers: 100 General and 20 VIP.
pub fn create_test_ticket_plan(event_type: EventType) -> TicketPlan {
    let mut plan = TicketPlan::tiered(event_type);
    plan.add_tier("General", &TierInput::new("100", "15.00", "4"))
        .unwrap();
    plan.add_tier("VIP", &TierInput::new("20", "50.00", "2"))
        .unwrap();
    plan
}

/// One slot on 2026-06-12.
pub fn create_test_claiming(event_type: EventType) -> ClaimingSchedule {
    let mut claiming = ClaimingSchedule::new(date!(2026 - 06 - 20), event_type);
    claiming
        .upsert_slot(SlotInput {
            id: None,
            claiming_date: date!(2026 - 06 - 12),
            start_time: time!(10:00),
            end_time: time!(14:00),
            venue: String::from("Box office"),
            max_claimers: None,
        })
        .unwrap();
    claiming
}

pub fn create_ticketed_draft(
    display: DisplayPeriod,
    reservation: ReservationPeriod,
) -> EventDraft {
    EventDraft::new(create_test_details(), EventType::Ticketed)
        .with_display(display)
        .with_reservation(reservation)
        .with_tickets(create_test_ticket_plan(EventType::Ticketed))
        .with_claiming(create_test_claiming(EventType::Ticketed))
}

pub fn create_free_draft(display: DisplayPeriod) -> EventDraft {
    EventDraft::new(create_test_details(), EventType::Free)
        .with_display(display)
        .with_tickets(TicketPlan::free_seating(EventType::Free, "200", "0", "4").unwrap())
        .with_claiming(create_test_claiming(EventType::Free))
}

pub fn create_coming_soon_draft(display: DisplayPeriod) -> EventDraft {
    EventDraft::new(create_test_details(), EventType::ComingSoon).with_display(display)
}

/// Creates an event through the service and returns its id.
pub fn create_event(service: &mut TestService, draft: EventDraft) -> EventId {
    service
        .create(draft, create_test_actor(), create_test_cause())
        .unwrap()
        .event
        .id
        .unwrap()
}
