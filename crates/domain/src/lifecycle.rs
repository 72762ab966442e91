// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Explicit admin lifecycle commands.
//!
//! These are the only way an event reaches `cancelled` or `archived`, and
//! the only way out of `archived`. Time never drives these transitions.

use crate::error::DomainError;
use crate::resolver::resolve;
use crate::time_window::TimeWindow;
use crate::types::{Availability, EventStatus, EventType, Visibility};
use time::PrimitiveDateTime;

/// Cancels an event, keeping its current visibility.
///
/// # Errors
///
/// Returns an error if the event is archived or already cancelled.
pub fn cancel(current: Availability) -> Result<Availability, DomainError> {
    reject_archived(current)?;
    if current.status == EventStatus::Cancelled {
        return Err(DomainError::InvalidStatusTransition {
            from: current.to_string(),
            to: EventStatus::Cancelled.as_str().to_string(),
            reason: "event is already cancelled".to_string(),
        });
    }
    Ok(Availability::new(EventStatus::Cancelled, current.visibility))
}

/// Archives an event, removing it from user-facing listings.
///
/// Drafts and cancelled events keep their status so that [`restore`] can
/// bring them back as they were; every other status becomes `closed`.
///
/// # Errors
///
/// Returns an error if the event is already archived.
pub fn archive(current: Availability) -> Result<Availability, DomainError> {
    reject_archived(current)?;
    Ok(archived(current))
}

/// Soft-deletes an event that was never shown to end users.
///
/// # Errors
///
/// Returns an error if the event is archived or currently published.
pub fn delete(current: Availability) -> Result<Availability, DomainError> {
    reject_archived(current)?;
    if current.visibility != Visibility::Unpublished {
        return Err(DomainError::DeleteRequiresUnpublished {
            visibility: current.visibility,
        });
    }
    Ok(archived(current))
}

/// Brings an archived event back.
///
/// A restored draft is a draft again and a restored cancelled event stays
/// cancelled, both unpublished. Any other event is handed back to the
/// resolver and evaluated against its current windows.
///
/// # Errors
///
/// Returns `DomainError::EventNotArchived` if the event is not archived.
pub fn restore(
    current: Availability,
    event_type: EventType,
    now: PrimitiveDateTime,
    display: Option<&TimeWindow>,
    reservation: Option<&TimeWindow>,
) -> Result<Availability, DomainError> {
    if !current.is_archived() {
        return Err(DomainError::EventNotArchived);
    }
    let restored = match (current.status, display) {
        (EventStatus::Cancelled, _) => {
            Availability::new(EventStatus::Cancelled, Visibility::Unpublished)
        }
        (EventStatus::Draft, _) | (_, None) => Availability::draft(),
        (_, Some(display)) => resolve(event_type, now, display, reservation),
    };
    Ok(restored)
}

const fn reject_archived(current: Availability) -> Result<(), DomainError> {
    if current.is_archived() {
        return Err(DomainError::EventArchived);
    }
    Ok(())
}

const fn archived(current: Availability) -> Availability {
    let status = match current.status {
        EventStatus::Draft | EventStatus::Cancelled => current.status,
        EventStatus::Scheduled | EventStatus::Open | EventStatus::Closed => EventStatus::Closed,
    };
    Availability::new(status, Visibility::Archived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    const OPEN: Availability = Availability::new(EventStatus::Open, Visibility::Published);
    const ARCHIVED: Availability = Availability::new(EventStatus::Closed, Visibility::Archived);

    #[test]
    fn test_cancel_keeps_visibility() {
        assert_eq!(
            cancel(OPEN),
            Ok(Availability::new(EventStatus::Cancelled, Visibility::Published))
        );
        assert_eq!(
            cancel(Availability::draft()),
            Ok(Availability::new(EventStatus::Cancelled, Visibility::Unpublished))
        );
    }

    #[test]
    fn test_cancel_twice_rejected() {
        let cancelled = Availability::new(EventStatus::Cancelled, Visibility::Published);
        assert!(matches!(
            cancel(cancelled),
            Err(DomainError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_archived_is_terminal() {
        assert_eq!(cancel(ARCHIVED), Err(DomainError::EventArchived));
        assert_eq!(archive(ARCHIVED), Err(DomainError::EventArchived));
        assert_eq!(delete(ARCHIVED), Err(DomainError::EventArchived));
    }

    #[test]
    fn test_delete_requires_unpublished() {
        assert_eq!(
            delete(OPEN),
            Err(DomainError::DeleteRequiresUnpublished {
                visibility: Visibility::Published
            })
        );
        assert_eq!(
            delete(Availability::draft()),
            Ok(Availability::new(EventStatus::Draft, Visibility::Archived))
        );
    }

    #[test]
    fn test_archive_closes_time_driven_events() {
        assert_eq!(archive(OPEN), Ok(ARCHIVED));
        let cancelled = Availability::new(EventStatus::Cancelled, Visibility::Published);
        assert_eq!(
            archive(cancelled),
            Ok(Availability::new(EventStatus::Cancelled, Visibility::Archived))
        );
    }

    #[test]
    fn test_restore_reresolves() {
        let display = TimeWindow::new(date!(2026 - 05 - 01), None, date!(2026 - 06 - 01), None);
        let now = datetime!(2026-05-10 12:00);

        assert_eq!(
            restore(ARCHIVED, EventType::ComingSoon, now, Some(&display), None),
            Ok(Availability::new(EventStatus::Closed, Visibility::Published))
        );
        assert_eq!(
            restore(OPEN, EventType::ComingSoon, now, Some(&display), None),
            Err(DomainError::EventNotArchived)
        );
    }

    #[test]
    fn test_restore_keeps_drafts_and_cancellations() {
        let display = TimeWindow::new(date!(2026 - 05 - 01), None, date!(2026 - 06 - 01), None);
        let now = datetime!(2026-05-10 12:00);
        let archived_draft = Availability::new(EventStatus::Draft, Visibility::Archived);
        let archived_cancelled = Availability::new(EventStatus::Cancelled, Visibility::Archived);

        assert_eq!(
            restore(archived_draft, EventType::Free, now, Some(&display), None),
            Ok(Availability::draft())
        );
        assert_eq!(
            restore(archived_cancelled, EventType::Free, now, Some(&display), None),
            Ok(Availability::new(EventStatus::Cancelled, Visibility::Unpublished))
        );
        assert_eq!(
            restore(ARCHIVED, EventType::Free, now, None, None),
            Ok(Availability::draft())
        );
    }
}
