// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `events` — Event rows and their ticket tiers and claiming slots
//! - `audit` — Audit event persistence

pub mod audit;
pub mod events;

pub use audit::record_audit_event;
pub use events::{
    insert_event, replace_claiming_slots, replace_tickets, update_availability, update_event,
};
