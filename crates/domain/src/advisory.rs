// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Non-blocking advisories.
//!
//! Advisories never reject a save. On sensitive paths the caller must
//! acknowledge them before the save proceeds.

use crate::claiming::ClaimingSchedule;
use crate::error::DomainError;
use crate::time_window::TimeWindow;
use crate::types::{Availability, EventStatus, EventType, Visibility};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Duration, PrimitiveDateTime};

/// Reservation periods shorter than this produce an advisory.
pub const SHORT_RESERVATION_DAYS: i64 = 3;

/// The category of an advisory, used for acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    ShortReservationPeriod,
    ClaimingDateNearEvent,
    TemporaryUnpublish,
    ReservationsOpenImmediately,
}

impl AdvisoryKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ShortReservationPeriod => "short_reservation_period",
            Self::ClaimingDateNearEvent => "claiming_date_near_event",
            Self::TemporaryUnpublish => "temporary_unpublish",
            Self::ReservationsOpenImmediately => "reservations_open_immediately",
        }
    }
}

impl FromStr for AdvisoryKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short_reservation_period" => Ok(Self::ShortReservationPeriod),
            "claiming_date_near_event" => Ok(Self::ClaimingDateNearEvent),
            "temporary_unpublish" => Ok(Self::TemporaryUnpublish),
            "reservations_open_immediately" => Ok(Self::ReservationsOpenImmediately),
            _ => Err(DomainError::InvalidAdvisoryKind(s.to_string())),
        }
    }
}

/// A warning that accompanies a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// The reservation period is shorter than [`SHORT_RESERVATION_DAYS`].
    ShortReservationPeriod {
        /// Length of the period in whole hours.
        hours: i64,
    },
    /// Tickets are claimed close to the event date.
    ClaimingDateNearEvent {
        claiming_date: Date,
        event_date: Date,
    },
    /// A published, scheduled event is hidden until the new display period
    /// takes effect.
    TemporaryUnpublish,
    /// The reservation period has already started, so reservations open on
    /// save.
    ReservationsOpenImmediately,
}

impl Advisory {
    #[must_use]
    pub const fn kind(&self) -> AdvisoryKind {
        match self {
            Self::ShortReservationPeriod { .. } => AdvisoryKind::ShortReservationPeriod,
            Self::ClaimingDateNearEvent { .. } => AdvisoryKind::ClaimingDateNearEvent,
            Self::TemporaryUnpublish => AdvisoryKind::TemporaryUnpublish,
            Self::ReservationsOpenImmediately => AdvisoryKind::ReservationsOpenImmediately,
        }
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShortReservationPeriod { hours } => {
                write!(
                    f,
                    "The reservation period lasts only {hours} hours (less than {SHORT_RESERVATION_DAYS} days)"
                )
            }
            Self::ClaimingDateNearEvent {
                claiming_date,
                event_date,
            } => {
                write!(
                    f,
                    "Claiming date {claiming_date} is within 2 days of the event on {event_date}"
                )
            }
            Self::TemporaryUnpublish => write!(
                f,
                "The event will be unpublished until the new display period takes effect"
            ),
            Self::ReservationsOpenImmediately => {
                write!(f, "Reservations will open immediately upon save")
            }
        }
    }
}

/// What the event looked like before the edit.
#[derive(Debug, Clone, Copy)]
pub struct PriorState<'a> {
    pub availability: Availability,
    pub event_type: EventType,
    pub display: Option<&'a TimeWindow>,
}

/// Everything needed to compute advisories for a save.
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryContext<'a> {
    pub now: PrimitiveDateTime,
    pub event_type: EventType,
    pub prior: Option<PriorState<'a>>,
    pub display: &'a TimeWindow,
    pub reservation: Option<&'a TimeWindow>,
    pub claiming: Option<&'a ClaimingSchedule>,
}

/// Collects the advisories for a save.
#[must_use]
pub fn collect_advisories(ctx: &AdvisoryContext<'_>) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    let short_reservation = ctx
        .reservation
        .filter(|_| ctx.event_type == EventType::Ticketed)
        .map(TimeWindow::duration)
        .filter(|length| *length < Duration::days(SHORT_RESERVATION_DAYS));
    if let Some(length) = short_reservation {
        advisories.push(Advisory::ShortReservationPeriod {
            hours: length.whole_hours(),
        });
    }

    if let Some(claiming) = ctx.claiming {
        advisories.extend(claiming.dates_near_event().into_iter().map(|claiming_date| {
            Advisory::ClaimingDateNearEvent {
                claiming_date,
                event_date: claiming.event_date(),
            }
        }));
    }

    if let Some(prior) = ctx.prior.filter(|p| is_published_scheduled(p.availability)) {
        if prior.display.is_some_and(|display| display != ctx.display) {
            advisories.push(Advisory::TemporaryUnpublish);
        }
        if prior.event_type == EventType::Ticketed
            && ctx.event_type == EventType::Ticketed
            && ctx
                .reservation
                .is_some_and(|reservation| reservation.start() <= ctx.now)
        {
            advisories.push(Advisory::ReservationsOpenImmediately);
        }
    }

    advisories
}

const fn is_published_scheduled(availability: Availability) -> bool {
    matches!(
        (availability.status, availability.visibility),
        (EventStatus::Scheduled, Visibility::Published)
    )
}
