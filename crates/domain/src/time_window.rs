// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time window evaluation.
//!
//! A window is a pair of wall-clock boundaries built from a date and an
//! optional time of day. Every component that asks "is this window active
//! now" goes through [`evaluate`].
//!
//! ## Boundary defaults
//!
//! - A start boundary without a time begins at `00:00:00`
//! - An end boundary without a time ends at `23:59:59`
//! - Both boundaries are inclusive

use serde::{Deserialize, Serialize};
use time::macros::time;
use time::{Date, Duration, PrimitiveDateTime, Time};

/// Time used when a start boundary omits its time of day.
pub const START_OF_DAY: Time = Time::MIDNIGHT;

/// Time used when an end boundary omits its time of day.
pub const END_OF_DAY: Time = time!(23:59:59);

/// Where "now" falls relative to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPhase {
    /// `now` is before the start boundary.
    NotStarted,
    /// `now` is within the window, boundaries included.
    Active,
    /// `now` is after the end boundary.
    Ended,
}

/// Identifies which of an event's windows a validation message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// The period during which the event is visible to end users.
    Display,
    /// The period during which reservations are accepted.
    Reservation,
}

impl WindowKind {
    /// Returns the label used in messages and persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Reservation => "reservation",
        }
    }
}

impl std::fmt::Display for WindowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compares `now` against an inclusive `[start, end]` range.
#[must_use]
pub fn evaluate(
    now: PrimitiveDateTime,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
) -> WindowPhase {
    if now < start {
        WindowPhase::NotStarted
    } else if now > end {
        WindowPhase::Ended
    } else {
        WindowPhase::Active
    }
}

/// A start/end window expressed as dates with optional times of day.
///
/// Used for both the display period and the reservation period of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start_date: Date,
    start_time: Option<Time>,
    end_date: Date,
    end_time: Option<Time>,
}

/// The window during which an event is visible to end users.
pub type DisplayPeriod = TimeWindow;

/// The window during which reservations are accepted.
pub type ReservationPeriod = TimeWindow;

impl TimeWindow {
    /// Creates a window. Ordering of the boundaries is checked by validation,
    /// not here, so that every violation can be reported together.
    #[must_use]
    pub const fn new(
        start_date: Date,
        start_time: Option<Time>,
        end_date: Date,
        end_time: Option<Time>,
    ) -> Self {
        Self {
            start_date,
            start_time,
            end_date,
            end_time,
        }
    }

    /// Creates a window from two fully specified instants.
    #[must_use]
    pub const fn between(start: PrimitiveDateTime, end: PrimitiveDateTime) -> Self {
        Self::new(start.date(), Some(start.time()), end.date(), Some(end.time()))
    }

    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.start_date
    }

    #[must_use]
    pub const fn start_time(&self) -> Option<Time> {
        self.start_time
    }

    #[must_use]
    pub const fn end_date(&self) -> Date {
        self.end_date
    }

    #[must_use]
    pub const fn end_time(&self) -> Option<Time> {
        self.end_time
    }

    /// Returns the start boundary, defaulting a missing time to `00:00:00`.
    #[must_use]
    pub fn start(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.start_date, self.start_time.unwrap_or(START_OF_DAY))
    }

    /// Returns the end boundary, defaulting a missing time to `23:59:59`.
    #[must_use]
    pub fn end(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.end_date, self.end_time.unwrap_or(END_OF_DAY))
    }

    /// Evaluates `now` against this window.
    #[must_use]
    pub fn phase(&self, now: PrimitiveDateTime) -> WindowPhase {
        evaluate(now, self.start(), self.end())
    }

    /// Returns the span between the resolved boundaries.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end() - self.start()
    }

    /// Returns true if `other` lies entirely within this window.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.start() >= self.start() && other.end() <= self.end()
    }

    /// Returns a copy of this window whose start is moved to `start`.
    #[must_use]
    pub const fn starting_at(&self, start: PrimitiveDateTime) -> Self {
        Self::new(start.date(), Some(start.time()), self.end_date, self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_evaluate_before_start() {
        let phase = evaluate(
            datetime!(2026-03-01 09:59:59),
            datetime!(2026-03-01 10:00),
            datetime!(2026-03-05 18:00),
        );
        assert_eq!(phase, WindowPhase::NotStarted);
    }

    #[test]
    fn test_evaluate_boundaries_are_inclusive() {
        let start = datetime!(2026-03-01 10:00);
        let end = datetime!(2026-03-05 18:00);

        assert_eq!(evaluate(start, start, end), WindowPhase::Active);
        assert_eq!(evaluate(end, start, end), WindowPhase::Active);
    }

    #[test]
    fn test_evaluate_after_end() {
        let phase = evaluate(
            datetime!(2026-03-05 18:00:01),
            datetime!(2026-03-01 10:00),
            datetime!(2026-03-05 18:00),
        );
        assert_eq!(phase, WindowPhase::Ended);
    }

    #[test]
    fn test_missing_times_default_to_whole_days() {
        let window = TimeWindow::new(date!(2026 - 03 - 01), None, date!(2026 - 03 - 02), None);

        assert_eq!(window.start(), datetime!(2026-03-01 00:00:00));
        assert_eq!(window.end(), datetime!(2026-03-02 23:59:59));
        assert_eq!(window.phase(datetime!(2026-03-02 23:59:30)), WindowPhase::Active);
    }

    #[test]
    fn test_contains() {
        let outer = TimeWindow::new(date!(2026 - 03 - 01), None, date!(2026 - 03 - 10), None);
        let inner = TimeWindow::between(datetime!(2026-03-02 09:00), datetime!(2026-03-09 17:00));
        let overlapping =
            TimeWindow::between(datetime!(2026-02-28 09:00), datetime!(2026-03-09 17:00));

        assert!(outer.contains(&inner));
        assert!(!outer.contains(&overlapping));
    }

    #[test]
    fn test_duration_uses_resolved_boundaries() {
        let window = TimeWindow::new(date!(2026 - 03 - 01), None, date!(2026 - 03 - 01), None);
        assert_eq!(window.duration(), Duration::seconds(86_399));
    }

    #[test]
    fn test_starting_at_keeps_end() {
        let window = TimeWindow::new(date!(2026 - 03 - 05), None, date!(2026 - 03 - 10), None);
        let moved = window.starting_at(datetime!(2026-03-01 12:30));

        assert_eq!(moved.start(), datetime!(2026-03-01 12:30));
        assert_eq!(moved.end(), window.end());
    }
}
