// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Domain model for event ticketing.
//!
//! Everything in this crate is pure: no I/O and no wall-clock reads outside
//! of [`SystemClock`]. The event state resolver, ticket plan and claiming
//! schedule live here; orchestration and persistence live in other crates.

mod advisory;
mod claiming;
mod clock;
mod error;
mod lifecycle;
mod resolver;
mod ticket_plan;
mod time_window;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use advisory::{
    Advisory, AdvisoryContext, AdvisoryKind, PriorState, SHORT_RESERVATION_DAYS,
    collect_advisories,
};
pub use claiming::{ClaimingSchedule, ClaimingSlot, NEAR_EVENT_DAYS, SlotId, SlotInput};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::DomainError;
pub use lifecycle::{archive, cancel, delete, restore};
pub use resolver::{Transition, resolve};
pub use ticket_plan::{
    FREE_SEATING_TIER, MAX_PRICE_CENTS, SeatingMode, TicketPlan, TicketTier, TierDraft,
    TierInput, parse_max_per_person, parse_price, parse_quantity,
};
pub use time_window::{
    DisplayPeriod, END_OF_DAY, ReservationPeriod, START_OF_DAY, TimeWindow, WindowKind,
    WindowPhase, evaluate,
};
pub use types::{
    Availability, EventDetails, EventStatus, EventType, Visibility, format_date, format_time,
    parse_date, parse_time,
};
pub use validation::{validate_details, validate_windows};
