// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

/// How an event is offered to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Tickets are reserved during a reservation period.
    Ticketed,
    /// No reservation gate; the event is open once displayed.
    Free,
    /// A public teaser; reservations never open while in this state.
    ComingSoon,
}

impl EventType {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ticketed => "ticketed",
            Self::Free => "free",
            Self::ComingSoon => "coming_soon",
        }
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ticketed" => Ok(Self::Ticketed),
            "free" => Ok(Self::Free),
            "coming_soon" => Ok(Self::ComingSoon),
            _ => Err(DomainError::InvalidEventType(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of an event.
///
/// `Scheduled`, `Open` and `Closed` are derived from time windows.
/// `Draft` and `Cancelled` are only reached through explicit admin commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Scheduled,
    Open,
    Closed,
    Cancelled,
}

impl EventStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "scheduled" => Ok(Self::Scheduled),
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidEventStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether end users can see an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Unpublished,
    Published,
    /// Soft-removed from user-facing listings. Terminal until restored.
    Archived,
}

impl Visibility {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unpublished => "unpublished",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for Visibility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpublished" => Ok(Self::Unpublished),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidVisibility(s.to_string())),
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The `{status, visibility}` pair computed for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Availability {
    pub status: EventStatus,
    pub visibility: Visibility,
}

impl Availability {
    #[must_use]
    pub const fn new(status: EventStatus, visibility: Visibility) -> Self {
        Self { status, visibility }
    }

    /// The fixed availability of a saved draft.
    #[must_use]
    pub const fn draft() -> Self {
        Self::new(EventStatus::Draft, Visibility::Unpublished)
    }

    #[must_use]
    pub const fn is_archived(&self) -> bool {
        matches!(self.visibility, Visibility::Archived)
    }

    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self.visibility, Visibility::Published)
    }

    /// Returns true if the resolver owns this state.
    ///
    /// Drafts, cancelled events and archived events only change through
    /// explicit admin commands and are skipped by periodic refresh.
    #[must_use]
    pub const fn is_time_driven(&self) -> bool {
        !matches!(self.status, EventStatus::Draft | EventStatus::Cancelled) && !self.is_archived()
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.status, self.visibility)
    }
}

/// Descriptive metadata of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub name: String,
    pub description: String,
    pub venue: String,
    pub category: String,
    pub event_date: Date,
    pub start_time: Time,
    pub end_time: Option<Time>,
    /// Opaque reference to an uploaded image.
    pub image: Option<String>,
}

impl EventDetails {
    /// Creates event details with an empty description, no category,
    /// no end time and no image.
    #[must_use]
    pub fn new(name: &str, venue: &str, event_date: Date, start_time: Time) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            venue: venue.to_string(),
            category: String::new(),
            event_date,
            start_time,
            end_time: None,
            image: None,
        }
    }
}

/// Formats a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, DomainError> {
    date.format(DATE_FORMAT)
        .map_err(|e| DomainError::DateFormatError {
            value: date.to_string(),
            error: e.to_string(),
        })
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a time of day as `HH:MM:SS`.
///
/// # Errors
///
/// Returns an error if the time cannot be formatted.
pub fn format_time(value: Time) -> Result<String, DomainError> {
    value
        .format(TIME_FORMAT)
        .map_err(|e| DomainError::DateFormatError {
            value: value.to_string(),
            error: e.to_string(),
        })
}

/// Parses an `HH:MM:SS` time of day.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid time.
pub fn parse_time(value: &str) -> Result<Time, DomainError> {
    Time::parse(value, TIME_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}
