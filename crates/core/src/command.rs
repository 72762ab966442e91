// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::event::EventDraft;
use boxoffice_domain::{ClaimingSchedule, ReservationPeriod, TicketPlan};

/// A command represents admin intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new event and let the resolver compute its availability.
    Create {
        /// The submitted event.
        draft: EventDraft,
    },
    /// Replace the content of an existing event.
    Update {
        /// The edited event.
        draft: EventDraft,
    },
    /// Turn a coming soon event into a ticketed event that is visible
    /// immediately.
    ConvertComingSoonToTicketed {
        /// The reservation period of the converted event.
        reservation: ReservationPeriod,
        /// A new ticket plan; `None` keeps the preliminary tiers.
        tickets: Option<TicketPlan>,
        /// A new claiming schedule; `None` keeps the preliminary slots.
        claiming: Option<ClaimingSchedule>,
    },
    /// Cancel the event.
    Cancel,
    /// Archive the event.
    Archive,
    /// Soft-delete an event that was never published.
    Delete,
    /// Bring an archived event back.
    Restore,
    /// Store the input as a draft without validation or resolution.
    SaveAsDraft {
        /// The in-progress event.
        draft: EventDraft,
    },
}

impl Command {
    /// Returns the name recorded in audit events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::ConvertComingSoonToTicketed { .. } => "convert_coming_soon_to_ticketed",
            Self::Cancel => "cancel",
            Self::Archive => "archive",
            Self::Delete => "delete",
            Self::Restore => "restore",
            Self::SaveAsDraft { .. } => "save_as_draft",
        }
    }

    /// Returns true if the command replaces the event's tiers and claiming
    /// slots.
    #[must_use]
    pub const fn replaces_content(&self) -> bool {
        matches!(
            self,
            Self::Create { .. }
                | Self::Update { .. }
                | Self::ConvertComingSoonToTicketed { .. }
                | Self::SaveAsDraft { .. }
        )
    }
}
