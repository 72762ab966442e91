// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event, tier and claiming slot mutations.
//!
//! Tiers and slots are always replaced as a whole: every existing row of
//! the event is deleted before the new set is inserted, so no stale row
//! survives an edit. Each replacement also rewrites the derived column it
//! affects on the event row.

use boxoffice::Event;
use boxoffice_domain::{
    Availability, ClaimingSlot, TicketTier, TimeWindow, format_date, format_time,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{EventValues, NewSlot, NewTier};
use crate::diesel_schema::{claiming_slots, events, ticket_tiers};
use crate::error::PersistenceError;

/// Inserts a new event row and returns its id.
///
/// # Errors
///
/// Returns an error if a value cannot be encoded or the insert fails.
pub fn insert_event(conn: &mut SqliteConnection, event: &Event) -> Result<i64, PersistenceError> {
    let values: EventValues = event_values(event)?;
    diesel::insert_into(events::table)
        .values(&values)
        .execute(conn)?;
    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, "Inserted event");
    Ok(event_id)
}

/// Overwrites an existing event row.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no row has this id, or an
/// error if a value cannot be encoded or the update fails.
pub fn update_event(
    conn: &mut SqliteConnection,
    event_id: i64,
    event: &Event,
) -> Result<(), PersistenceError> {
    let values: EventValues = event_values(event)?;
    let updated: usize = diesel::update(events::table.find(event_id))
        .set(&values)
        .execute(conn)?;
    require_row(updated, event_id)
}

/// Replaces every ticket tier of an event and its stored ticket total.
///
/// # Errors
///
/// Returns an error if a tier value is out of range or a write fails.
pub fn replace_tickets(
    conn: &mut SqliteConnection,
    event_id: i64,
    tiers: &[TicketTier],
) -> Result<(), PersistenceError> {
    let rows: Vec<NewTier> = tiers
        .iter()
        .enumerate()
        .map(|(position, tier)| -> Result<NewTier, PersistenceError> {
            Ok(NewTier {
                event_id,
                position: to_i32(position, "tier position")?,
                name: tier.name.clone(),
                total_quantity: i64::from(tier.total_quantity),
                price_cents: to_i64(tier.price_cents, "price_cents")?,
                max_per_person: i64::from(tier.max_per_person),
            })
        })
        .collect::<Result<_, _>>()?;
    let total_tickets: u64 = tiers
        .iter()
        .map(|tier| u64::from(tier.total_quantity))
        .sum();

    diesel::delete(ticket_tiers::table.filter(ticket_tiers::event_id.eq(event_id)))
        .execute(conn)?;
    if !rows.is_empty() {
        diesel::insert_into(ticket_tiers::table)
            .values(&rows)
            .execute(conn)?;
    }

    let updated: usize = diesel::update(events::table.find(event_id))
        .set(events::total_tickets.eq(to_i64(total_tickets, "total_tickets")?))
        .execute(conn)?;
    require_row(updated, event_id)?;

    debug!(event_id, tiers = rows.len(), total_tickets, "Replaced ticket tiers");
    Ok(())
}

/// Replaces every claiming slot of an event and its stored date list.
///
/// # Errors
///
/// Returns an error if a slot value cannot be encoded or a write fails.
pub fn replace_claiming_slots(
    conn: &mut SqliteConnection,
    event_id: i64,
    slots: &[ClaimingSlot],
) -> Result<(), PersistenceError> {
    let rows: Vec<NewSlot> = slots
        .iter()
        .map(|slot| -> Result<NewSlot, PersistenceError> {
            Ok(NewSlot {
                event_id,
                slot_id: i64::from(slot.id.value()),
                claiming_date: format_date(slot.claiming_date)?,
                start_time: format_time(slot.start_time)?,
                end_time: format_time(slot.end_time)?,
                venue: slot.venue.clone(),
                max_claimers: i64::from(slot.max_claimers),
            })
        })
        .collect::<Result<_, _>>()?;
    let mut dates: Vec<Date> = slots.iter().map(|slot| slot.claiming_date).collect();
    dates.sort_unstable();
    dates.dedup();

    diesel::delete(claiming_slots::table.filter(claiming_slots::event_id.eq(event_id)))
        .execute(conn)?;
    if !rows.is_empty() {
        diesel::insert_into(claiming_slots::table)
            .values(&rows)
            .execute(conn)?;
    }

    let updated: usize = diesel::update(events::table.find(event_id))
        .set(events::claiming_dates.eq(join_dates(&dates)?))
        .execute(conn)?;
    require_row(updated, event_id)?;

    debug!(event_id, slots = rows.len(), "Replaced claiming slots");
    Ok(())
}

/// Overwrites the stored status and visibility of an event.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no row has this id.
pub fn update_availability(
    conn: &mut SqliteConnection,
    event_id: i64,
    availability: Availability,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(events::table.find(event_id))
        .set((
            events::status.eq(availability.status.as_str()),
            events::visibility.eq(availability.visibility.as_str()),
        ))
        .execute(conn)?;
    require_row(updated, event_id)
}

fn event_values(event: &Event) -> Result<EventValues, PersistenceError> {
    let details = &event.details;
    let [display_start_date, display_start_time, display_end_date, display_end_time] =
        window_columns(event.display.as_ref())?;
    let [
        reservation_start_date,
        reservation_start_time,
        reservation_end_date,
        reservation_end_time,
    ] = window_columns(event.reservation.as_ref())?;

    Ok(EventValues {
        name: details.name.clone(),
        description: details.description.clone(),
        venue: details.venue.clone(),
        category: details.category.clone(),
        event_date: format_date(details.event_date)?,
        start_time: format_time(details.start_time)?,
        end_time: details.end_time.map(format_time).transpose()?,
        image: details.image.clone(),
        event_type: event.event_type.as_str().to_string(),
        status: event.availability.status.as_str().to_string(),
        visibility: event.availability.visibility.as_str().to_string(),
        display_start_date,
        display_start_time,
        display_end_date,
        display_end_time,
        reservation_start_date,
        reservation_start_time,
        reservation_end_date,
        reservation_end_time,
        total_tickets: to_i64(event.total_tickets(), "total_tickets")?,
        claiming_dates: join_dates(&event.claiming_dates())?,
    })
}

/// Start date, start time, end date and end time of a window.
fn window_columns(window: Option<&TimeWindow>) -> Result<[Option<String>; 4], PersistenceError> {
    let Some(window) = window else {
        return Ok([None, None, None, None]);
    };
    Ok([
        Some(format_date(window.start_date())?),
        window.start_time().map(format_time).transpose()?,
        Some(format_date(window.end_date())?),
        window.end_time().map(format_time).transpose()?,
    ])
}

/// Comma-joined `YYYY-MM-DD` dates.
fn join_dates(dates: &[Date]) -> Result<String, PersistenceError> {
    let formatted: Vec<String> = dates
        .iter()
        .map(|date| format_date(*date))
        .collect::<Result<_, _>>()?;
    Ok(formatted.join(","))
}

const fn require_row(updated: usize, event_id: i64) -> Result<(), PersistenceError> {
    if updated == 0 {
        return Err(PersistenceError::EventNotFound(event_id));
    }
    Ok(())
}

fn to_i64(value: u64, field: &str) -> Result<i64, PersistenceError> {
    i64::try_from(value)
        .map_err(|_| PersistenceError::QueryFailed(format!("{field} {value} is out of range")))
}

fn to_i32(value: usize, field: &str) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|_| PersistenceError::QueryFailed(format!("{field} {value} is out of range")))
}
