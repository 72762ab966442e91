// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::time_window::{TimeWindow, WindowKind};
use crate::types::{EventDetails, EventType};
use time::Date;

/// Validates the descriptive fields of an event.
///
/// Every violation is collected; validation does not stop at the first.
///
/// # Arguments
///
/// * `details` - The event details to validate
///
/// # Returns
///
/// All violations found. An empty vector means the details are valid.
#[must_use]
pub fn validate_details(details: &EventDetails) -> Vec<DomainError> {
    let mut errors = Vec::new();

    if details.name.trim().is_empty() {
        errors.push(DomainError::MissingField { field: "name" });
    }
    if details.venue.trim().is_empty() {
        errors.push(DomainError::MissingField { field: "venue" });
    }
    if let Some(end_time) = details.end_time.filter(|end| *end <= details.start_time) {
        errors.push(DomainError::InvalidEventTime {
            start_time: details.start_time,
            end_time,
        });
    }

    errors
}

/// Validates the display and reservation periods of an event.
///
/// Rules:
/// - A display period is required and must not end before it starts
/// - For ticketed events the display period ends on or before the event date
/// - Ticketed events require a reservation period; free events may not have one
/// - A reservation period must end strictly after it starts, end on or
///   before the event date and lie within the display period
///
/// # Arguments
///
/// * `event_type` - The type of the event
/// * `event_date` - The date the event takes place
/// * `display` - The display period, if supplied
/// * `reservation` - The reservation period, if supplied
///
/// # Returns
///
/// All violations found. An empty vector means the windows are valid.
#[must_use]
pub fn validate_windows(
    event_type: EventType,
    event_date: Date,
    display: Option<&TimeWindow>,
    reservation: Option<&TimeWindow>,
) -> Vec<DomainError> {
    let mut errors = Vec::new();

    match display {
        None => errors.push(DomainError::MissingField {
            field: "display period",
        }),
        Some(display) => {
            if display.end() < display.start() {
                errors.push(DomainError::InvalidWindow {
                    window: WindowKind::Display,
                    reason: format!("end {} is before start {}", display.end(), display.start()),
                });
            }
            if event_type == EventType::Ticketed && display.end().date() > event_date {
                errors.push(DomainError::WindowEndsAfterEventDate {
                    window: WindowKind::Display,
                    event_date,
                });
            }
        }
    }

    match (event_type, reservation) {
        (EventType::Ticketed, None) => errors.push(DomainError::MissingReservationPeriod),
        (EventType::Free, Some(_)) => {
            errors.push(DomainError::ReservationNotAllowed { event_type });
        }
        (EventType::Ticketed | EventType::ComingSoon, Some(reservation)) => {
            errors.extend(validate_reservation(event_date, display, reservation));
        }
        (EventType::Free | EventType::ComingSoon, None) => {}
    }

    errors
}

fn validate_reservation(
    event_date: Date,
    display: Option<&TimeWindow>,
    reservation: &TimeWindow,
) -> Vec<DomainError> {
    let mut errors = Vec::new();

    if reservation.end() <= reservation.start() {
        errors.push(DomainError::InvalidWindow {
            window: WindowKind::Reservation,
            reason: format!(
                "end {} must be after start {}",
                reservation.end(),
                reservation.start()
            ),
        });
    }
    if reservation.end().date() > event_date {
        errors.push(DomainError::WindowEndsAfterEventDate {
            window: WindowKind::Reservation,
            event_date,
        });
    }
    if display.is_some_and(|display| !display.contains(reservation)) {
        errors.push(DomainError::ReservationOutsideDisplay);
    }

    errors
}
