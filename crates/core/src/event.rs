// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boxoffice_audit::EventSnapshot;
use boxoffice_domain::{
    Availability, ClaimingSchedule, ClaimingSlot, DisplayPeriod, EventDetails, EventType,
    ReservationPeriod, TicketPlan, TicketTier, resolve,
};
use std::collections::BTreeSet;
use time::{Date, PrimitiveDateTime};

/// Identifier assigned to an event by the event store.
pub type EventId = i64;

/// The admin's in-progress input for an event.
///
/// Nothing in a draft is validated until it is submitted with a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub details: EventDetails,
    pub event_type: EventType,
    pub display: Option<DisplayPeriod>,
    pub reservation: Option<ReservationPeriod>,
    pub tickets: Option<TicketPlan>,
    pub claiming: ClaimingSchedule,
}

impl EventDraft {
    /// Creates a draft with no windows, no ticket plan and no claiming slots.
    #[must_use]
    pub fn new(details: EventDetails, event_type: EventType) -> Self {
        let claiming = ClaimingSchedule::new(details.event_date, event_type);
        Self {
            details,
            event_type,
            display: None,
            reservation: None,
            tickets: None,
            claiming,
        }
    }

    #[must_use]
    pub const fn with_display(mut self, display: DisplayPeriod) -> Self {
        self.display = Some(display);
        self
    }

    #[must_use]
    pub const fn with_reservation(mut self, reservation: ReservationPeriod) -> Self {
        self.reservation = Some(reservation);
        self
    }

    #[must_use]
    pub fn with_tickets(mut self, tickets: TicketPlan) -> Self {
        self.tickets = Some(tickets);
        self
    }

    #[must_use]
    pub fn with_claiming(mut self, claiming: ClaimingSchedule) -> Self {
        self.claiming = claiming;
        self
    }
}

/// The event aggregate: an event together with the tiers and claiming slots
/// it owns.
///
/// `total_tickets` and the claiming date list are never stored here; they
/// are derived from `tiers` and `claiming_slots` on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// `None` until the event has been stored.
    pub id: Option<EventId>,
    pub details: EventDetails,
    pub event_type: EventType,
    pub availability: Availability,
    /// Only drafts may lack a display period.
    pub display: Option<DisplayPeriod>,
    pub reservation: Option<ReservationPeriod>,
    pub tiers: Vec<TicketTier>,
    pub claiming_slots: Vec<ClaimingSlot>,
}

impl Event {
    /// Sum of the quantities of every tier.
    #[must_use]
    pub fn total_tickets(&self) -> u64 {
        self.tiers
            .iter()
            .map(|tier| u64::from(tier.total_quantity))
            .sum()
    }

    /// Distinct claiming dates across all slots, in ascending order.
    #[must_use]
    pub fn claiming_dates(&self) -> Vec<Date> {
        self.claiming_slots
            .iter()
            .map(|slot| slot.claiming_date)
            .collect::<BTreeSet<Date>>()
            .into_iter()
            .collect()
    }

    /// Claiming slots shown to end users.
    ///
    /// Coming soon events may carry preliminary claiming data, which stays
    /// admin-only until the event is converted.
    #[must_use]
    pub fn public_claiming_slots(&self) -> &[ClaimingSlot] {
        match self.event_type {
            EventType::ComingSoon => &[],
            EventType::Ticketed | EventType::Free => &self.claiming_slots,
        }
    }

    /// Returns the availability at `now`.
    ///
    /// Time-driven events are re-resolved; drafts, cancelled and archived
    /// events keep their stored availability.
    #[must_use]
    pub fn current_availability(&self, now: PrimitiveDateTime) -> Availability {
        match &self.display {
            Some(display) if self.availability.is_time_driven() => resolve(
                self.event_type,
                now,
                display,
                self.reservation.as_ref(),
            ),
            _ => self.availability,
        }
    }

    /// Rebuilds the editable draft for this event.
    #[must_use]
    pub fn to_draft(&self) -> EventDraft {
        let tickets = (!self.tiers.is_empty())
            .then(|| TicketPlan::from_tiers(self.event_type, &self.tiers));
        EventDraft {
            details: self.details.clone(),
            event_type: self.event_type,
            display: self.display,
            reservation: self.reservation,
            tickets,
            claiming: ClaimingSchedule::from_slots(
                self.details.event_date,
                self.event_type,
                self.claiming_slots.clone(),
            ),
        }
    }

    /// Captures the audited state of the event.
    #[must_use]
    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot::new(
            self.event_type,
            self.availability,
            self.total_tickets(),
            self.claiming_dates(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_domain::{EventStatus, SlotId, TimeWindow, Visibility};
    use time::macros::{date, datetime, time};

    fn slot(id: u32, claiming_date: Date) -> ClaimingSlot {
        ClaimingSlot {
            id: SlotId::new(id),
            claiming_date,
            start_time: time!(10:00),
            end_time: time!(12:00),
            venue: String::from("Lobby"),
            max_claimers: 0,
        }
    }

    fn create_test_event() -> Event {
        Event {
            id: Some(1),
            details: EventDetails::new("Gala", "Main Hall", date!(2026 - 06 - 20), time!(19:00)),
            event_type: EventType::ComingSoon,
            availability: Availability::new(EventStatus::Closed, Visibility::Published),
            display: Some(TimeWindow::new(
                date!(2026 - 05 - 01),
                None,
                date!(2026 - 06 - 20),
                None,
            )),
            reservation: None,
            tiers: vec![
                TicketTier {
                    name: String::from("VIP"),
                    total_quantity: 20,
                    price_cents: 5_000,
                    max_per_person: 2,
                },
                TicketTier {
                    name: String::from("General"),
                    total_quantity: 180,
                    price_cents: 1_500,
                    max_per_person: 6,
                },
            ],
            claiming_slots: vec![
                slot(1, date!(2026 - 06 - 12)),
                slot(2, date!(2026 - 06 - 10)),
                slot(3, date!(2026 - 06 - 12)),
            ],
        }
    }

    #[test]
    fn test_derived_totals() {
        let event = create_test_event();
        assert_eq!(event.total_tickets(), 200);
        assert_eq!(
            event.claiming_dates(),
            vec![date!(2026 - 06 - 10), date!(2026 - 06 - 12)]
        );
    }

    #[test]
    fn test_coming_soon_claiming_slots_are_admin_only() {
        let mut event = create_test_event();
        assert!(event.public_claiming_slots().is_empty());

        event.event_type = EventType::Ticketed;
        assert_eq!(event.public_claiming_slots().len(), 3);
    }

    #[test]
    fn test_current_availability_skips_cancelled_events() {
        let mut event = create_test_event();
        event.availability = Availability::new(EventStatus::Cancelled, Visibility::Published);

        assert_eq!(
            event.current_availability(datetime!(2026-04-01 00:00)),
            event.availability
        );
    }

    #[test]
    fn test_current_availability_re_resolves() {
        let event = create_test_event();
        assert_eq!(
            event.current_availability(datetime!(2026-04-01 00:00)),
            Availability::new(EventStatus::Scheduled, Visibility::Unpublished)
        );
    }

    #[test]
    fn test_to_draft_round_trip() {
        let event = create_test_event();
        let draft = event.to_draft();

        let tickets = draft.tickets.as_ref().map(TicketPlan::total_tickets);
        assert_eq!(tickets, Some(200));
        assert_eq!(draft.claiming.slots().len(), 3);
        assert_eq!(draft.claiming.date_list(), event.claiming_dates());
    }
}
