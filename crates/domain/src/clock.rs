// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock sources.
//!
//! Windows are expressed in the venue's local wall-clock time, so "now" is a
//! `PrimitiveDateTime` in that zone rather than a UTC instant.

use crate::error::DomainError;
use chrono::{Offset, TimeZone};
use chrono_tz::Tz;
use std::sync::{Mutex, PoisonError};
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current local date and time.
    fn now(&self) -> PrimitiveDateTime;
}

/// The real clock, read in a fixed IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    /// Creates a clock for the named timezone.
    ///
    /// # Arguments
    ///
    /// * `timezone` - An IANA timezone name such as `America/New_York`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is not known.
    pub fn new(timezone: &str) -> Result<Self, DomainError> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;
        Ok(Self { tz })
    }

    /// Creates a clock that reads UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        chrono::DateTime::from_timestamp(instant.unix_timestamp(), 0)
            .map(|utc| {
                self.tz
                    .offset_from_utc_datetime(&utc.naive_utc())
                    .fix()
                    .local_minus_utc()
            })
            .and_then(|seconds| UtcOffset::from_whole_seconds(seconds).ok())
            .unwrap_or(UtcOffset::UTC)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> PrimitiveDateTime {
        let utc = OffsetDateTime::now_utc();
        let local = utc.to_offset(self.offset_at(utc));
        PrimitiveDateTime::new(local.date(), local.time())
    }
}

/// A clock pinned to a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<PrimitiveDateTime>,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now: PrimitiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: PrimitiveDateTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.saturating_add(by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> PrimitiveDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
