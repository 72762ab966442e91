// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `events` — Events with their tiers, claiming slots and stored totals
//! - `audit` — Audit event lookups and per-event timelines

pub mod audit;
pub mod events;

pub use audit::{get_audit_event, get_audit_events_for_event};
pub use events::{get_event, list_events};
