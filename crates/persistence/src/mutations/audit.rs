// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.
//!
//! Audit events are append-only; nothing here updates or deletes them.

use boxoffice_audit::AuditEvent;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewAuditEvent;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The audit event to persist
///
/// # Returns
///
/// The audit id assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn record_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let row: NewAuditEvent = NewAuditEvent {
        event_id: event.event_id,
        action_name: event.action.name.clone(),
        actor_json: serde_json::to_string(&event.actor)?,
        cause_json: serde_json::to_string(&event.cause)?,
        action_json: serde_json::to_string(&event.action)?,
        before_snapshot_json: serde_json::to_string(&event.before)?,
        after_snapshot_json: serde_json::to_string(&event.after)?,
        acknowledged_json: serde_json::to_string(&event.acknowledged)?,
    };

    diesel::insert_into(audit_events::table)
        .values(&row)
        .execute(conn)?;
    let audit_id: i64 = get_last_insert_rowid(conn)?;

    debug!(audit_id, event_id = ?event.event_id, action = %event.action.name, "Recorded audit event");
    Ok(audit_id)
}
