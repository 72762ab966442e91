// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use boxoffice::{EventDraft, EventService};
use boxoffice_audit::{Actor, Cause};
use boxoffice_domain::{
    ClaimingSchedule, EventDetails, EventType, FixedClock, SlotInput, TicketPlan, TierInput,
    TimeWindow,
};
use time::PrimitiveDateTime;
use time::macros::{date, datetime, time};

use crate::Persistence;

pub const NOW: PrimitiveDateTime = datetime!(2026-05-10 12:00);

pub fn create_test_actor() -> Actor {
    Actor::admin("test-admin")
}

pub fn create_test_cause() -> Cause {
    Cause::new("test-cause", "Test operation")
}

pub fn create_test_service() -> EventService<Persistence, FixedClock> {
    EventService::new(Persistence::new_in_memory().unwrap(), FixedClock::new(NOW))
}

/// A ticketed event on 2026-06-20, displayed since 2026-05-01, with
/// reservations from 2026-05-12 and one claiming slot on 2026-06-12.
pub fn create_ticketed_draft() -> EventDraft {
    let mut details = EventDetails::new(
        "Spring Gala",
        "Main Hall",
        date!(2026 - 06 - 20),
        time!(19:00),
    );
    details.description = String::from("An evening of music");
    details.category = String::from("Concert");
    details.end_time = Some(time!(22:30));
    details.image = Some(String::from("uploads/gala.png"));

    let mut tickets = TicketPlan::tiered(EventType::Ticketed);
    tickets
        .add_tier("General", &TierInput::new("100", "15.00", "4"))
        .unwrap();
    tickets
        .add_tier("VIP", &TierInput::new("20", "50.00", "2"))
        .unwrap();

    let mut claiming = ClaimingSchedule::new(date!(2026 - 06 - 20), EventType::Ticketed);
    claiming
        .upsert_slot(SlotInput {
            id: None,
            claiming_date: date!(2026 - 06 - 12),
            start_time: time!(10:00),
            end_time: time!(14:00),
            venue: String::from("Box office"),
            max_claimers: Some(50),
        })
        .unwrap();

    EventDraft::new(details, EventType::Ticketed)
        .with_display(TimeWindow::new(
            date!(2026 - 05 - 01),
            None,
            date!(2026 - 06 - 19),
            None,
        ))
        .with_reservation(TimeWindow::between(
            datetime!(2026-05-12 09:00),
            datetime!(2026-06-15 18:00),
        ))
        .with_tickets(tickets)
        .with_claiming(claiming)
}
