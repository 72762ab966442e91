// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event state resolution.
//!
//! The resolver derives an event's `{status, visibility}` from its type,
//! its windows and the current time. It is pure and never fails: malformed
//! windows are rejected by validation before the resolver runs.
//!
//! ## Rules
//!
//! - Display not yet started: unpublished; `open` for free events,
//!   `scheduled` otherwise
//! - Free events: `open` and published once displayed
//! - Coming soon events: `closed` and published once displayed
//! - Ticketed events: `scheduled`, `open` or `closed` following the
//!   reservation period, published once displayed
//! - A ticketed event without a reservation period stays `scheduled`
//!
//! `draft`, `cancelled` and `archived` are never produced here; they come
//! from explicit admin commands.

use crate::time_window::{TimeWindow, WindowPhase};
use crate::types::{Availability, EventStatus, EventType, Visibility};
use time::PrimitiveDateTime;

/// Computes the availability of an event at `now`.
#[must_use]
pub fn resolve(
    event_type: EventType,
    now: PrimitiveDateTime,
    display: &TimeWindow,
    reservation: Option<&TimeWindow>,
) -> Availability {
    if now < display.start() {
        let status = match event_type {
            EventType::Free => EventStatus::Open,
            EventType::Ticketed | EventType::ComingSoon => EventStatus::Scheduled,
        };
        return Availability::new(status, Visibility::Unpublished);
    }

    let status = match event_type {
        EventType::Free => EventStatus::Open,
        EventType::ComingSoon => EventStatus::Closed,
        EventType::Ticketed => reservation.map_or(EventStatus::Scheduled, |window| {
            match window.phase(now) {
                WindowPhase::NotStarted => EventStatus::Scheduled,
                WindowPhase::Active => EventStatus::Open,
                WindowPhase::Ended => EventStatus::Closed,
            }
        }),
    };
    Availability::new(status, Visibility::Published)
}

/// A change of availability, used to tell the caller how public exposure
/// of the event moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Availability before the change; `None` for a new event.
    pub before: Option<Availability>,
    pub after: Availability,
}

impl Transition {
    #[must_use]
    pub const fn new(before: Option<Availability>, after: Availability) -> Self {
        Self { before, after }
    }

    /// Returns true if the availability differs from before.
    #[must_use]
    pub fn is_change(&self) -> bool {
        self.before != Some(self.after)
    }

    /// The event was visible and will no longer be.
    #[must_use]
    pub const fn will_unpublish(&self) -> bool {
        matches!(self.before, Some(before) if before.is_published()) && !self.after.is_published()
    }

    /// The event was not visible and will be.
    #[must_use]
    pub const fn will_publish(&self) -> bool {
        !matches!(self.before, Some(before) if before.is_published()) && self.after.is_published()
    }

    /// Reservations were not open and will be.
    #[must_use]
    pub const fn opens_reservations(&self) -> bool {
        !matches!(self.before, Some(before) if matches!(before.status, EventStatus::Open))
            && matches!(self.after.status, EventStatus::Open)
    }

    /// Reservations were open and will no longer be.
    #[must_use]
    pub const fn closes_reservations(&self) -> bool {
        matches!(self.before, Some(before) if matches!(before.status, EventStatus::Open))
            && !matches!(self.after.status, EventStatus::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    const NOW: PrimitiveDateTime = datetime!(2026-05-10 12:00);

    fn window(start: PrimitiveDateTime, end: PrimitiveDateTime) -> TimeWindow {
        TimeWindow::between(start, end)
    }

    fn display_from(start: PrimitiveDateTime) -> TimeWindow {
        window(start, datetime!(2026-06-01 23:59))
    }

    #[test]
    fn test_future_display_is_unpublished() {
        let display = display_from(datetime!(2026-05-11 09:00));

        assert_eq!(
            resolve(EventType::Ticketed, NOW, &display, None),
            Availability::new(EventStatus::Scheduled, Visibility::Unpublished)
        );
        assert_eq!(
            resolve(EventType::ComingSoon, NOW, &display, None),
            Availability::new(EventStatus::Scheduled, Visibility::Unpublished)
        );
        assert_eq!(
            resolve(EventType::Free, NOW, &display, None),
            Availability::new(EventStatus::Open, Visibility::Unpublished)
        );
    }

    #[test]
    fn test_free_event_open_once_displayed() {
        let display = display_from(datetime!(2026-05-09 09:00));
        // A stray reservation window has no effect on free events.
        let reservation = window(datetime!(2026-05-20 09:00), datetime!(2026-05-25 09:00));

        assert_eq!(
            resolve(EventType::Free, NOW, &display, Some(&reservation)),
            Availability::new(EventStatus::Open, Visibility::Published)
        );
    }

    #[test]
    fn test_coming_soon_closed_once_displayed() {
        let display = display_from(datetime!(2026-05-09 09:00));

        assert_eq!(
            resolve(EventType::ComingSoon, NOW, &display, None),
            Availability::new(EventStatus::Closed, Visibility::Published)
        );
    }

    #[test]
    fn test_ticketed_follows_reservation_period() {
        let display = display_from(datetime!(2026-05-01 00:00));
        let cases = [
            (
                window(datetime!(2026-05-11 00:00), datetime!(2026-05-20 00:00)),
                EventStatus::Scheduled,
            ),
            (
                window(datetime!(2026-05-09 00:00), datetime!(2026-05-11 00:00)),
                EventStatus::Open,
            ),
            (
                window(datetime!(2026-05-02 00:00), datetime!(2026-05-09 00:00)),
                EventStatus::Closed,
            ),
        ];

        for (reservation, expected) in cases {
            let availability = resolve(EventType::Ticketed, NOW, &display, Some(&reservation));
            assert_eq!(availability.status, expected);
            assert_eq!(availability.visibility, Visibility::Published);
        }
    }

    #[test]
    fn test_ticketed_without_reservation_is_scheduled() {
        let display = display_from(datetime!(2026-05-01 00:00));
        assert_eq!(
            resolve(EventType::Ticketed, NOW, &display, None),
            Availability::new(EventStatus::Scheduled, Visibility::Published)
        );
    }

    #[test]
    fn test_display_start_boundary_counts_as_started() {
        let display = TimeWindow::new(date!(2026 - 05 - 10), None, date!(2026 - 06 - 01), None);
        let start_of_day = datetime!(2026-05-10 00:00);

        assert!(resolve(EventType::ComingSoon, start_of_day, &display, None).is_published());
    }

    #[test]
    fn test_transition_flags() {
        let scheduled = Availability::new(EventStatus::Scheduled, Visibility::Published);
        let open = Availability::new(EventStatus::Open, Visibility::Published);
        let hidden = Availability::new(EventStatus::Scheduled, Visibility::Unpublished);

        let unpublish = Transition::new(Some(scheduled), hidden);
        assert!(unpublish.will_unpublish());
        assert!(!unpublish.will_publish());

        let opening = Transition::new(Some(scheduled), open);
        assert!(opening.opens_reservations());
        assert!(!opening.closes_reservations());

        let created = Transition::new(None, open);
        assert!(created.will_publish());
        assert!(created.is_change());

        assert!(!Transition::new(Some(open), open).is_change());
    }
}
