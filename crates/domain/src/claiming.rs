// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Claiming schedule management.
//!
//! A claiming slot is a date, a time range, a venue and a capacity at which
//! reserved tickets are picked up. The schedule owns every slot of one event.
//!
//! ## Invariants
//!
//! - The date list is derived from the slots and always equals the set of
//!   slot dates
//! - A date added ahead of its first slot is held as pending and never
//!   appears in the date list on its own
//! - Removing a date removes every slot on that date
//! - Slot ids are never reused within a schedule

use crate::error::DomainError;
use crate::types::EventType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::{Date, Time};

/// Claiming dates this many days or fewer before the event produce a warning.
pub const NEAR_EVENT_DAYS: i64 = 2;

/// Identifier of a slot within its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(u32);

impl SlotId {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scheduled pickup window for reserved tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimingSlot {
    pub id: SlotId,
    pub claiming_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub venue: String,
    pub max_claimers: u32,
}

/// Admin input for creating or editing a slot.
///
/// `id` is `None` when creating a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInput {
    pub id: Option<SlotId>,
    pub claiming_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub venue: String,
    /// Defaults to 0 when unset.
    pub max_claimers: Option<u32>,
}

/// The claiming slots of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimingSchedule {
    event_date: Date,
    event_type: EventType,
    slots: Vec<ClaimingSlot>,
    pending_dates: BTreeSet<Date>,
    next_id: u32,
}

impl ClaimingSchedule {
    /// Creates an empty schedule for an event.
    #[must_use]
    pub const fn new(event_date: Date, event_type: EventType) -> Self {
        Self {
            event_date,
            event_type,
            slots: Vec::new(),
            pending_dates: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a schedule from stored slots.
    #[must_use]
    pub fn from_slots(event_date: Date, event_type: EventType, slots: Vec<ClaimingSlot>) -> Self {
        let next_id = slots
            .iter()
            .map(|slot| slot.id.value())
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self {
            event_date,
            event_type,
            slots,
            pending_dates: BTreeSet::new(),
            next_id,
        }
    }

    #[must_use]
    pub const fn event_date(&self) -> Date {
        self.event_date
    }

    #[must_use]
    pub fn slots(&self) -> &[ClaimingSlot] {
        &self.slots
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.pending_dates.is_empty()
    }

    /// Distinct claiming dates across all slots, in ascending order.
    #[must_use]
    pub fn date_list(&self) -> Vec<Date> {
        self.slot_dates().into_iter().collect()
    }

    /// Dates added ahead of their first slot.
    #[must_use]
    pub fn pending_dates(&self) -> Vec<Date> {
        self.pending_dates.iter().copied().collect()
    }

    /// Checks a claiming date against the event date.
    ///
    /// # Errors
    ///
    /// Ticketed events require the date to be strictly before the event
    /// date; other events allow the event date itself.
    pub fn check_date(&self, date: Date) -> Result<(), DomainError> {
        match self.event_type {
            EventType::Ticketed if date >= self.event_date => {
                Err(DomainError::ClaimingDateNotBeforeEvent {
                    claiming_date: date,
                    event_date: self.event_date,
                })
            }
            _ if date > self.event_date => Err(DomainError::ClaimingDateAfterEvent {
                claiming_date: date,
                event_date: self.event_date,
            }),
            _ => Ok(()),
        }
    }

    /// Adds a claiming date ahead of its first slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the date is not allowed for the event or is
    /// already scheduled.
    pub fn add_date(&mut self, date: Date) -> Result<(), DomainError> {
        self.check_date(date)?;
        if self.pending_dates.contains(&date) || self.slot_dates().contains(&date) {
            return Err(DomainError::DuplicateClaimingDate(date));
        }
        self.pending_dates.insert(date);
        Ok(())
    }

    /// Creates a slot, or replaces the slot with the given id in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot fields are invalid or the id is unknown.
    pub fn upsert_slot(&mut self, input: SlotInput) -> Result<SlotId, DomainError> {
        self.check_date(input.claiming_date)?;
        validate_slot_fields(&input)?;

        let id = match input.id {
            Some(id) => {
                let index = self
                    .slots
                    .iter()
                    .position(|slot| slot.id == id)
                    .ok_or(DomainError::ClaimingSlotNotFound(id))?;
                self.slots[index] = build_slot(id, input);
                id
            }
            None => {
                let id = SlotId::new(self.next_id);
                self.next_id = self.next_id.saturating_add(1);
                self.slots.push(build_slot(id, input));
                id
            }
        };

        let date = self.slot_date(id);
        if let Some(date) = date {
            self.pending_dates.remove(&date);
        }
        Ok(id)
    }

    /// Removes a single slot. Its date leaves the date list only if no other
    /// slot uses it.
    ///
    /// # Errors
    ///
    /// Returns an error if no slot has the given id.
    pub fn remove_slot(&mut self, id: SlotId) -> Result<ClaimingSlot, DomainError> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.id == id)
            .ok_or(DomainError::ClaimingSlotNotFound(id))?;
        Ok(self.slots.remove(index))
    }

    /// Removes a date together with every slot on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the date is neither pending nor used by a slot.
    pub fn remove_date(&mut self, date: Date) -> Result<Vec<ClaimingSlot>, DomainError> {
        let was_pending = self.pending_dates.remove(&date);
        let (removed, kept): (Vec<ClaimingSlot>, Vec<ClaimingSlot>) = self
            .slots
            .drain(..)
            .partition(|slot| slot.claiming_date == date);
        self.slots = kept;

        if !was_pending && removed.is_empty() {
            return Err(DomainError::ClaimingDateNotFound(date));
        }
        Ok(removed)
    }

    /// Points the schedule at a new event date or type.
    ///
    /// Existing dates are kept; [`ClaimingSchedule::validate`] reports any
    /// that are no longer allowed.
    pub const fn retarget(&mut self, event_date: Date, event_type: EventType) {
        self.event_date = event_date;
        self.event_type = event_type;
    }

    /// Claiming dates close enough to the event to warrant a warning.
    #[must_use]
    pub fn dates_near_event(&self) -> Vec<Date> {
        self.slot_dates()
            .into_iter()
            .filter(|date| (0..=NEAR_EVENT_DAYS).contains(&(self.event_date - *date).whole_days()))
            .collect()
    }

    /// Collects every violation in the schedule.
    #[must_use]
    pub fn validate(&self) -> Vec<DomainError> {
        let mut errors: Vec<DomainError> = self
            .slot_dates()
            .into_iter()
            .filter_map(|date| self.check_date(date).err())
            .collect();
        errors.extend(
            self.pending_dates
                .iter()
                .map(|date| DomainError::EmptyClaimingDate(*date)),
        );
        errors
    }

    /// Returns true if `dates` is exactly the set of slot dates.
    #[must_use]
    pub fn matches_date_list(&self, dates: &[Date]) -> bool {
        dates.iter().copied().collect::<BTreeSet<Date>>() == self.slot_dates()
    }

    fn slot_dates(&self) -> BTreeSet<Date> {
        self.slots.iter().map(|slot| slot.claiming_date).collect()
    }

    fn slot_date(&self, id: SlotId) -> Option<Date> {
        self.slots
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| slot.claiming_date)
    }
}

fn validate_slot_fields(input: &SlotInput) -> Result<(), DomainError> {
    if input.end_time <= input.start_time {
        return Err(DomainError::InvalidClaimingSlot {
            reason: format!(
                "end time {} must be after start time {}",
                input.end_time, input.start_time
            ),
        });
    }
    if input.venue.trim().is_empty() {
        return Err(DomainError::InvalidClaimingSlot {
            reason: String::from("venue cannot be empty"),
        });
    }
    Ok(())
}

fn build_slot(id: SlotId, input: SlotInput) -> ClaimingSlot {
    ClaimingSlot {
        id,
        claiming_date: input.claiming_date,
        start_time: input.start_time,
        end_time: input.end_time,
        venue: input.venue.trim().to_string(),
        max_claimers: input.max_claimers.unwrap_or(0),
    }
}
