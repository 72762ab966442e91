// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boxoffice_audit::AuditEvent;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Retrieves an audit event by id.
///
/// # Errors
///
/// Returns `PersistenceError::AuditEventNotFound` if no row has this id, or
/// an error if the row cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    audit_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .find(audit_id)
        .select(AuditEventRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::AuditEventNotFound(audit_id))?;
    to_audit_event(row)
}

/// Retrieves the audit timeline of one event, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn get_audit_events_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .order(audit_events::audit_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?;
    rows.into_iter().map(to_audit_event).collect()
}

fn to_audit_event(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let mut event = AuditEvent::new(
        serde_json::from_str(&row.actor_json)?,
        serde_json::from_str(&row.cause_json)?,
        serde_json::from_str(&row.action_json)?,
        serde_json::from_str(&row.before_snapshot_json)?,
        serde_json::from_str(&row.after_snapshot_json)?,
    )
    .with_acknowledged(serde_json::from_str(&row.acknowledged_json)?);
    event.audit_id = Some(row.audit_id);
    event.event_id = row.event_id;
    Ok(event)
}
