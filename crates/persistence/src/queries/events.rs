// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event queries.
//!
//! Rows are turned back into [`Event`] values together with the derived
//! totals stored beside them, so the core can check one against the other.

use boxoffice::{Event, EventFilter, StoredEvent, StoredTotals};
use boxoffice_domain::{
    Availability, ClaimingSlot, EventDetails, EventStatus, EventType, SlotId, TicketTier,
    TimeWindow, Visibility, parse_date, parse_time,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;

use crate::data_models::{EventRow, SlotRow, TierRow};
use crate::diesel_schema::{claiming_slots, events, ticket_tiers};
use crate::error::PersistenceError;

/// Loads one event with its tiers and slots.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn get_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<StoredEvent>, PersistenceError> {
    let row: Option<EventRow> = events::table
        .find(event_id)
        .select(EventRow::as_select())
        .first(conn)
        .optional()?;

    row.map(|row| load_children(conn, row)).transpose()
}

/// Loads the events admitted by the filter's type and archived criteria,
/// ordered by id.
///
/// Status and visibility are left to the caller, which matches them after
/// re-resolving availability.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_events(
    conn: &mut SqliteConnection,
    filter: &EventFilter,
) -> Result<Vec<StoredEvent>, PersistenceError> {
    let mut query = events::table
        .select(EventRow::as_select())
        .order(events::event_id.asc())
        .into_boxed();
    if let Some(event_type) = filter.event_type {
        query = query.filter(events::event_type.eq(event_type.as_str()));
    }
    if !filter.wants_archived() {
        query = query.filter(events::visibility.ne(Visibility::Archived.as_str()));
    }

    let rows: Vec<EventRow> = query.load(conn)?;
    rows.into_iter()
        .map(|row| load_children(conn, row))
        .collect()
}

fn load_children(
    conn: &mut SqliteConnection,
    row: EventRow,
) -> Result<StoredEvent, PersistenceError> {
    let tiers: Vec<TierRow> = ticket_tiers::table
        .filter(ticket_tiers::event_id.eq(row.event_id))
        .order(ticket_tiers::position.asc())
        .select(TierRow::as_select())
        .load(conn)?;
    let slots: Vec<SlotRow> = claiming_slots::table
        .filter(claiming_slots::event_id.eq(row.event_id))
        .order(claiming_slots::claiming_slot_id.asc())
        .select(SlotRow::as_select())
        .load(conn)?;

    let tiers: Vec<TicketTier> = tiers.into_iter().map(to_tier).collect::<Result<_, _>>()?;
    let claiming_slots: Vec<ClaimingSlot> =
        slots.into_iter().map(to_slot).collect::<Result<_, _>>()?;

    let totals = StoredTotals {
        total_tickets: from_i64(row.total_tickets, "total_tickets")?,
        claiming_dates: split_dates(&row.claiming_dates)?,
    };

    let details = EventDetails {
        name: row.name,
        description: row.description,
        venue: row.venue,
        category: row.category,
        event_date: parse_date(&row.event_date)?,
        start_time: parse_time(&row.start_time)?,
        end_time: row.end_time.as_deref().map(parse_time).transpose()?,
        image: row.image,
    };
    let event = Event {
        id: Some(row.event_id),
        details,
        event_type: row.event_type.parse::<EventType>()?,
        availability: Availability::new(
            row.status.parse::<EventStatus>()?,
            row.visibility.parse::<Visibility>()?,
        ),
        display: to_window(
            "display",
            [
                row.display_start_date,
                row.display_start_time,
                row.display_end_date,
                row.display_end_time,
            ],
        )?,
        reservation: to_window(
            "reservation",
            [
                row.reservation_start_date,
                row.reservation_start_time,
                row.reservation_end_date,
                row.reservation_end_time,
            ],
        )?,
        tiers,
        claiming_slots,
    };

    Ok(StoredEvent { event, totals })
}

fn to_window(
    name: &str,
    [start_date, start_time, end_date, end_time]: [Option<String>; 4],
) -> Result<Option<TimeWindow>, PersistenceError> {
    match (start_date, end_date) {
        (Some(start_date), Some(end_date)) => Ok(Some(TimeWindow::new(
            parse_date(&start_date)?,
            start_time.as_deref().map(parse_time).transpose()?,
            parse_date(&end_date)?,
            end_time.as_deref().map(parse_time).transpose()?,
        ))),
        (None, None) => Ok(None),
        _ => Err(PersistenceError::ReconstructionError(format!(
            "{name} period has only one bound"
        ))),
    }
}

fn to_tier(row: TierRow) -> Result<TicketTier, PersistenceError> {
    Ok(TicketTier {
        total_quantity: from_i64(row.total_quantity, "total_quantity")?,
        price_cents: from_i64(row.price_cents, "price_cents")?,
        max_per_person: from_i64(row.max_per_person, "max_per_person")?,
        name: row.name,
    })
}

fn to_slot(row: SlotRow) -> Result<ClaimingSlot, PersistenceError> {
    Ok(ClaimingSlot {
        id: SlotId::new(from_i64(row.slot_id, "slot_id")?),
        claiming_date: parse_date(&row.claiming_date)?,
        start_time: parse_time(&row.start_time)?,
        end_time: parse_time(&row.end_time)?,
        venue: row.venue,
        max_claimers: from_i64(row.max_claimers, "max_claimers")?,
    })
}

fn split_dates(value: &str) -> Result<Vec<Date>, PersistenceError> {
    value
        .split(',')
        .filter(|part| !part.is_empty())
        .map(|part| parse_date(part).map_err(PersistenceError::from))
        .collect()
}

fn from_i64<T: TryFrom<i64>>(value: i64, field: &str) -> Result<T, PersistenceError> {
    T::try_from(value).map_err(|_| {
        PersistenceError::ReconstructionError(format!("{field} {value} is out of range"))
    })
}
