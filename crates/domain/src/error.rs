// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::claiming::SlotId;
use crate::time_window::WindowKind;
use crate::types::{EventType, Visibility};
use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was left empty.
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// The event end time is not after its start time.
    InvalidEventTime {
        /// The event start time.
        start_time: time::Time,
        /// The event end time.
        end_time: time::Time,
    },
    /// A window's boundaries are out of order.
    InvalidWindow {
        /// Which window is malformed.
        window: WindowKind,
        /// Description of the violation.
        reason: String,
    },
    /// A window ends after the event date.
    WindowEndsAfterEventDate {
        /// Which window is too late.
        window: WindowKind,
        /// The event date.
        event_date: Date,
    },
    /// The reservation period is not contained in the display period.
    ReservationOutsideDisplay,
    /// A ticketed event was saved without a reservation period.
    MissingReservationPeriod,
    /// A reservation period was supplied for an event type that has none.
    ReservationNotAllowed {
        /// The event type.
        event_type: EventType,
    },
    /// An event type that sells tickets was saved without a ticket plan.
    MissingTicketPlan {
        /// The event type.
        event_type: EventType,
    },
    /// A claiming date falls on or after the date of a ticketed event.
    ClaimingDateNotBeforeEvent {
        /// The rejected claiming date.
        claiming_date: Date,
        /// The event date.
        event_date: Date,
    },
    /// A claiming date falls after the event date.
    ClaimingDateAfterEvent {
        /// The rejected claiming date.
        claiming_date: Date,
        /// The event date.
        event_date: Date,
    },
    /// The claiming date is already in the schedule.
    DuplicateClaimingDate(Date),
    /// The claiming date is not in the schedule.
    ClaimingDateNotFound(Date),
    /// A claiming date was added but no slot uses it.
    EmptyClaimingDate(Date),
    /// No slot with this id exists.
    ClaimingSlotNotFound(SlotId),
    /// A claiming slot has invalid fields.
    InvalidClaimingSlot {
        /// Description of the violation.
        reason: String,
    },
    /// No ticket tier is included in a tiered plan.
    NoTiersIncluded,
    /// An included tier is missing a numeric field.
    IncompleteTier {
        /// The tier name.
        tier: String,
        /// The missing field.
        field: &'static str,
    },
    /// A numeric field received text that is not a number.
    NonNumericInput {
        /// The field being set.
        field: String,
        /// The rejected input.
        value: String,
    },
    /// A numeric field received a negative number.
    NegativeValue {
        /// The field being set.
        field: String,
        /// The rejected input.
        value: String,
    },
    /// A price has more than two fractional digits or overflows.
    InvalidPrice {
        /// The rejected input.
        value: String,
    },
    /// Max per person is not a positive integer.
    InvalidMaxPerPerson {
        /// The tier name.
        tier: String,
        /// The rejected input.
        value: String,
    },
    /// A tier name is already used within the event.
    TierNameCollision {
        /// The colliding name.
        name: String,
    },
    /// No tier with this name exists.
    TierNotFound {
        /// The requested name.
        name: String,
    },
    /// A tier name is empty.
    InvalidTierName(String),
    /// The operation is not supported by the plan's seating mode.
    SeatingModeMismatch {
        /// Description of the operation.
        operation: &'static str,
    },
    /// Invalid event type value.
    InvalidEventType(String),
    /// Invalid event status value.
    InvalidEventStatus(String),
    /// Invalid visibility value.
    InvalidVisibility(String),
    /// Invalid advisory kind value.
    InvalidAdvisoryKind(String),
    /// An admin command is not permitted from the current state.
    InvalidStatusTransition {
        /// The current state.
        from: String,
        /// The requested state.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// The event is archived and must be restored first.
    EventArchived,
    /// Restore was requested for an event that is not archived.
    EventNotArchived,
    /// Delete is only permitted for unpublished events.
    DeleteRequiresUnpublished {
        /// The current visibility.
        visibility: Visibility,
    },
    /// Conversion requires a coming-soon event.
    NotComingSoon {
        /// The current event type.
        event_type: EventType,
    },
    /// Timezone name is not a known IANA zone.
    InvalidTimezone(String),
    /// Failed to parse a date or time from a string.
    DateParseError {
        /// The invalid string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to format a date or time.
    DateFormatError {
        /// The value that could not be formatted.
        value: String,
        /// The formatting error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Missing required field: {field}"),
            Self::InvalidEventTime {
                start_time,
                end_time,
            } => {
                write!(
                    f,
                    "Event end time {end_time} must be after start time {start_time}"
                )
            }
            Self::InvalidWindow { window, reason } => {
                write!(f, "Invalid {window} period: {reason}")
            }
            Self::WindowEndsAfterEventDate { window, event_date } => {
                write!(
                    f,
                    "The {window} period must end on or before the event date {event_date}"
                )
            }
            Self::ReservationOutsideDisplay => {
                write!(f, "The reservation period must lie within the display period")
            }
            Self::MissingReservationPeriod => {
                write!(f, "Ticketed events require a reservation period")
            }
            Self::ReservationNotAllowed { event_type } => {
                write!(f, "Events of type '{event_type}' cannot have a reservation period")
            }
            Self::MissingTicketPlan { event_type } => {
                write!(f, "Events of type '{event_type}' require a ticket plan")
            }
            Self::ClaimingDateNotBeforeEvent {
                claiming_date,
                event_date,
            } => {
                write!(
                    f,
                    "Claiming date {claiming_date} must be before the event date {event_date}"
                )
            }
            Self::ClaimingDateAfterEvent {
                claiming_date,
                event_date,
            } => {
                write!(
                    f,
                    "Claiming date {claiming_date} must be on or before the event date {event_date}"
                )
            }
            Self::DuplicateClaimingDate(date) => {
                write!(f, "Claiming date {date} is already scheduled")
            }
            Self::ClaimingDateNotFound(date) => {
                write!(f, "Claiming date {date} is not scheduled")
            }
            Self::EmptyClaimingDate(date) => {
                write!(f, "Claiming date {date} has no claiming slots")
            }
            Self::ClaimingSlotNotFound(id) => write!(f, "Claiming slot {id} not found"),
            Self::InvalidClaimingSlot { reason } => write!(f, "Invalid claiming slot: {reason}"),
            Self::NoTiersIncluded => write!(f, "At least one ticket tier must be included"),
            Self::IncompleteTier { tier, field } => {
                write!(f, "Ticket tier '{tier}' is missing {field}")
            }
            Self::NonNumericInput { field, value } => {
                write!(f, "Field '{field}' must be numeric, got '{value}'")
            }
            Self::NegativeValue { field, value } => {
                write!(f, "Field '{field}' must not be negative, got '{value}'")
            }
            Self::InvalidPrice { value } => {
                write!(
                    f,
                    "Invalid price '{value}': at most two decimal places are allowed"
                )
            }
            Self::InvalidMaxPerPerson { tier, value } => {
                write!(
                    f,
                    "Max per person for tier '{tier}' must be a whole number of at least 1, got '{value}'"
                )
            }
            Self::TierNameCollision { name } => {
                write!(f, "A ticket tier named '{name}' already exists")
            }
            Self::TierNotFound { name } => write!(f, "Ticket tier '{name}' not found"),
            Self::InvalidTierName(msg) => write!(f, "Invalid tier name: {msg}"),
            Self::SeatingModeMismatch { operation } => {
                write!(f, "Operation '{operation}' is not supported by this seating mode")
            }
            Self::InvalidEventType(value) => write!(f, "Invalid event type: {value}"),
            Self::InvalidEventStatus(value) => write!(f, "Invalid event status: {value}"),
            Self::InvalidVisibility(value) => write!(f, "Invalid visibility: {value}"),
            Self::InvalidAdvisoryKind(value) => write!(f, "Invalid advisory kind: {value}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from {from} to {to}: {reason}")
            }
            Self::EventArchived => {
                write!(f, "Event is archived and must be restored first")
            }
            Self::EventNotArchived => write!(f, "Event is not archived"),
            Self::DeleteRequiresUnpublished { visibility } => {
                write!(f, "Only unpublished events can be deleted, event is {visibility}")
            }
            Self::NotComingSoon { event_type } => {
                write!(
                    f,
                    "Only coming soon events can be converted, event is '{event_type}'"
                )
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateFormatError { value, error } => {
                write!(f, "Failed to format '{value}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
