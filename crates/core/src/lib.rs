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

//! Event aggregate orchestration for the Boxoffice ticketing system.
//!
//! Commands are evaluated by [`preview`] and applied by [`commit`]; both
//! are pure. [`EventService`] wires them to an [`EventStore`] and a
//! [`Clock`](boxoffice_domain::Clock).

mod apply;
mod command;
mod consistency;
mod error;
mod event;
mod service;
mod state;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{commit, preview};
pub use command::Command;
pub use consistency::{StoredTotals, verify_consistency};
pub use error::CoreError;
pub use event::{Event, EventDraft, EventId};
pub use service::EventService;
pub use state::{Preview, RefreshReport, TransitionResult};
pub use store::{EventFilter, EventStore, StoredEvent};
