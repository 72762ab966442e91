// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types mapped onto the Diesel schema.

use diesel::prelude::*;

use crate::diesel_schema::{audit_events, claiming_slots, events, ticket_tiers};

/// A stored event row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventRow {
    pub event_id: i64,
    pub name: String,
    pub description: String,
    pub venue: String,
    pub category: String,
    pub event_date: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub image: Option<String>,
    pub event_type: String,
    pub status: String,
    pub visibility: String,
    pub display_start_date: Option<String>,
    pub display_start_time: Option<String>,
    pub display_end_date: Option<String>,
    pub display_end_time: Option<String>,
    pub reservation_start_date: Option<String>,
    pub reservation_start_time: Option<String>,
    pub reservation_end_date: Option<String>,
    pub reservation_end_time: Option<String>,
    pub total_tickets: i64,
    pub claiming_dates: String,
}

/// Column values written for an event on insert and update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = events)]
#[diesel(treat_none_as_null = true)]
pub struct EventValues {
    pub name: String,
    pub description: String,
    pub venue: String,
    pub category: String,
    pub event_date: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub image: Option<String>,
    pub event_type: String,
    pub status: String,
    pub visibility: String,
    pub display_start_date: Option<String>,
    pub display_start_time: Option<String>,
    pub display_end_date: Option<String>,
    pub display_end_time: Option<String>,
    pub reservation_start_date: Option<String>,
    pub reservation_start_time: Option<String>,
    pub reservation_end_date: Option<String>,
    pub reservation_end_time: Option<String>,
    pub total_tickets: i64,
    pub claiming_dates: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ticket_tiers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TierRow {
    pub name: String,
    pub total_quantity: i64,
    pub price_cents: i64,
    pub max_per_person: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ticket_tiers)]
pub struct NewTier {
    pub event_id: i64,
    pub position: i32,
    pub name: String,
    pub total_quantity: i64,
    pub price_cents: i64,
    pub max_per_person: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = claiming_slots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SlotRow {
    pub slot_id: i64,
    pub claiming_date: String,
    pub start_time: String,
    pub end_time: String,
    pub venue: String,
    pub max_claimers: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = claiming_slots)]
pub struct NewSlot {
    pub event_id: i64,
    pub slot_id: i64,
    pub claiming_date: String,
    pub start_time: String,
    pub end_time: String,
    pub venue: String,
    pub max_claimers: i64,
}

/// A stored audit event row. Every structured field is JSON.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditEventRow {
    pub audit_id: i64,
    pub event_id: Option<i64>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub acknowledged_json: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEvent {
    pub event_id: Option<i64>,
    pub action_name: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub acknowledged_json: String,
}
