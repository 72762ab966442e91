// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::event::{Event, EventId};
use std::collections::BTreeSet;
use time::Date;
use tracing::error;

/// Derived values as they were written to storage alongside an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoredTotals {
    pub total_tickets: u64,
    pub claiming_dates: Vec<Date>,
}

impl StoredTotals {
    /// Computes the values to store for an event.
    #[must_use]
    pub fn of(event: &Event) -> Self {
        Self {
            total_tickets: event.total_tickets(),
            claiming_dates: event.claiming_dates(),
        }
    }
}

/// Checks that stored derived values match the tiers and slots they were
/// derived from.
///
/// A mismatch means something bypassed the event aggregate. It is logged
/// and reported, never repaired.
///
/// # Errors
///
/// Returns `CoreError::ConsistencyFault` describing the first mismatch.
pub fn verify_consistency(
    event_id: EventId,
    event: &Event,
    stored: &StoredTotals,
) -> Result<(), CoreError> {
    let total_tickets = event.total_tickets();
    if stored.total_tickets != total_tickets {
        return Err(fault(
            event_id,
            format!(
                "stored total_tickets {} but tiers sum to {total_tickets}",
                stored.total_tickets
            ),
        ));
    }

    let stored_dates: BTreeSet<Date> = stored.claiming_dates.iter().copied().collect();
    let slot_dates: BTreeSet<Date> = event.claiming_dates().into_iter().collect();
    if stored_dates != slot_dates {
        let orphaned: Vec<String> = stored_dates
            .difference(&slot_dates)
            .map(ToString::to_string)
            .collect();
        let unlisted: Vec<String> = slot_dates
            .difference(&stored_dates)
            .map(ToString::to_string)
            .collect();
        return Err(fault(
            event_id,
            format!(
                "claiming date list diverges from slots (orphaned: [{}], unlisted: [{}])",
                orphaned.join(", "),
                unlisted.join(", ")
            ),
        ));
    }

    Ok(())
}

fn fault(event_id: EventId, detail: String) -> CoreError {
    error!(event_id, %detail, "Consistency fault");
    CoreError::ConsistencyFault { event_id, detail }
}
