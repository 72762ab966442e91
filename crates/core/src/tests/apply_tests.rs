// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    NOW, active_reservation, create_coming_soon_draft, create_test_actor, create_test_cause,
    create_test_details, create_test_ticket_plan, create_ticketed_draft, future_display,
    future_reservation, running_display, window,
};
use crate::{Command, CoreError, Event, EventDraft, Preview, TransitionResult, commit, preview};
use boxoffice_domain::{
    Advisory, AdvisoryKind, Availability, DomainError, EventStatus, EventType, Visibility,
};
use time::macros::{date, datetime};

/// Builds a stored event the way a create would leave it.
fn stored_event(draft: EventDraft, id: i64) -> Event {
    let mut event = preview(None, &Command::Create { draft }, NOW)
        .unwrap()
        .event;
    event.id = Some(id);
    event
}

#[test]
fn test_preview_create_resolves_availability() {
    let draft = create_ticketed_draft(running_display(), future_reservation());

    let result: Preview = preview(None, &Command::Create { draft }, NOW).unwrap();

    assert_eq!(
        result.availability(),
        Availability::new(EventStatus::Scheduled, Visibility::Published)
    );
    assert_eq!(result.transition.before, None);
    assert_eq!(result.event.total_tickets(), 120);
    assert!(result.advisories.is_empty());
    assert!(!result.requires_acknowledgment);
}

#[test]
fn test_create_reports_advisories_without_requiring_acknowledgment() {
    let draft = create_ticketed_draft(running_display(), active_reservation());

    let result: Preview = preview(None, &Command::Create { draft }, NOW).unwrap();

    assert!(matches!(
        result.advisories.as_slice(),
        [Advisory::ShortReservationPeriod { hours: 57 }]
    ));
    assert!(!result.requires_acknowledgment);
}

#[test]
fn test_validation_lists_every_violation() {
    let mut draft = create_ticketed_draft(running_display(), future_reservation());
    draft.details.name = String::new();
    draft.reservation = None;
    draft.tickets = None;

    let result = preview(None, &Command::Create { draft }, NOW);

    let Err(CoreError::ValidationFailed(errors)) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    assert!(errors.contains(&DomainError::MissingField { field: "name" }));
    assert!(errors.contains(&DomainError::MissingReservationPeriod));
    assert!(errors.contains(&DomainError::MissingTicketPlan {
        event_type: EventType::Ticketed
    }));
}

#[test]
fn test_pending_claiming_date_blocks_save() {
    let mut draft = create_ticketed_draft(running_display(), future_reservation());
    draft
        .claiming
        .add_date(date!(2026 - 06 - 10))
        .unwrap();

    let result = preview(None, &Command::Create { draft }, NOW);

    assert_eq!(
        result.map(|preview| preview.availability()),
        Err(CoreError::ValidationFailed(vec![DomainError::EmptyClaimingDate(
            date!(2026 - 06 - 10)
        )]))
    );
}

#[test]
fn test_create_with_existing_event_rejected() {
    let existing = stored_event(
        create_ticketed_draft(running_display(), future_reservation()),
        7,
    );
    let draft = create_ticketed_draft(running_display(), future_reservation());

    let result = preview(Some(&existing), &Command::Create { draft }, NOW);

    assert!(matches!(result, Err(CoreError::EventAlreadyExists(7))));
}

#[test]
fn test_lifecycle_command_requires_existing_event() {
    let result = preview(None, &Command::Cancel, NOW);
    assert!(matches!(
        result,
        Err(CoreError::MissingEvent { command: "cancel" })
    ));
}

#[test]
fn test_update_of_published_ticketed_event_requires_acknowledgment() {
    let existing = stored_event(
        create_ticketed_draft(running_display(), future_reservation()),
        1,
    );
    let draft = create_ticketed_draft(
        running_display(),
        window(datetime!(2026-05-20 09:00), datetime!(2026-05-22 09:00)),
    );
    let command = Command::Update { draft };

    let result: Preview = preview(Some(&existing), &command, NOW).unwrap();
    assert!(result.requires_acknowledgment);

    let rejected = commit(
        Some(&existing),
        &command,
        &[],
        NOW,
        create_test_actor(),
        create_test_cause(),
    );
    assert!(matches!(
        rejected,
        Err(CoreError::AdvisoriesNotAcknowledged(ref missing)) if missing.len() == 1
    ));

    let committed: TransitionResult = commit(
        Some(&existing),
        &command,
        &[AdvisoryKind::ShortReservationPeriod],
        NOW,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(
        committed.audit_event.acknowledged,
        vec![AdvisoryKind::ShortReservationPeriod]
    );
}

#[test]
fn test_moving_display_start_warns_of_temporary_unpublish() {
    let existing = stored_event(
        create_ticketed_draft(running_display(), future_reservation()),
        1,
    );
    let draft = create_ticketed_draft(future_display(), future_reservation());

    let result: Preview = preview(Some(&existing), &Command::Update { draft }, NOW).unwrap();

    assert_eq!(result.advisories, vec![Advisory::TemporaryUnpublish]);
    assert!(result.transition.will_unpublish());
    assert!(result.requires_acknowledgment);
}

#[test]
fn test_moving_reservation_start_into_past_warns_of_immediate_opening() {
    let existing = stored_event(
        create_ticketed_draft(running_display(), future_reservation()),
        1,
    );
    let draft = create_ticketed_draft(
        running_display(),
        window(datetime!(2026-05-09 09:00), datetime!(2026-06-15 18:00)),
    );

    let result: Preview = preview(Some(&existing), &Command::Update { draft }, NOW).unwrap();

    assert_eq!(result.advisories, vec![Advisory::ReservationsOpenImmediately]);
    assert!(result.transition.opens_reservations());
}

#[test]
fn test_update_of_unpublished_event_needs_no_acknowledgment() {
    let existing = stored_event(
        create_ticketed_draft(future_display(), future_reservation()),
        1,
    );
    let draft = create_ticketed_draft(
        future_display(),
        window(datetime!(2026-05-20 09:00), datetime!(2026-05-22 09:00)),
    );

    let result = commit(
        Some(&existing),
        &Command::Update { draft },
        &[],
        NOW,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.advisories.len(), 1);
    assert!(result.audit_event.acknowledged.is_empty());
}

#[test]
fn test_commit_records_before_and_after_snapshots() {
    let draft = create_ticketed_draft(running_display(), future_reservation());

    let result: TransitionResult = commit(
        None,
        &Command::Create { draft },
        &[],
        NOW,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let audit = &result.audit_event;
    assert_eq!(audit.action.name, "create");
    assert_eq!(audit.actor.id, "admin-123");
    assert_eq!(audit.cause.id, "req-456");
    assert!(!audit.before.exists());
    assert_eq!(audit.after.total_tickets, 120);
    assert_eq!(audit.after.claiming_dates.len(), 1);
    assert_eq!(audit.event_id, None);
    assert!(audit.action.details.is_some());
}

#[test]
fn test_convert_requires_coming_soon_event() {
    let existing = stored_event(
        create_ticketed_draft(running_display(), future_reservation()),
        1,
    );
    let command = Command::ConvertComingSoonToTicketed {
        reservation: future_reservation(),
        tickets: None,
        claiming: None,
    };

    assert!(matches!(
        preview(Some(&existing), &command, NOW),
        Err(CoreError::DomainViolation(DomainError::NotComingSoon {
            event_type: EventType::Ticketed
        }))
    ));
}

#[test]
fn test_convert_rejects_reservation_before_conversion() {
    let mut draft = create_coming_soon_draft(running_display());
    draft.tickets = Some(create_test_ticket_plan(EventType::ComingSoon));
    let existing = stored_event(draft, 1);
    let command = Command::ConvertComingSoonToTicketed {
        reservation: window(datetime!(2026-05-09 09:00), datetime!(2026-06-15 18:00)),
        tickets: None,
        claiming: None,
    };

    let result = preview(Some(&existing), &command, NOW);

    let Err(CoreError::ValidationFailed(errors)) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    assert_eq!(errors, vec![DomainError::ReservationOutsideDisplay]);
}

#[test]
fn test_convert_opens_only_when_reservation_starts_now() {
    let mut draft = create_coming_soon_draft(running_display());
    draft.tickets = Some(create_test_ticket_plan(EventType::ComingSoon));
    let existing = stored_event(draft, 1);
    let convert = |start| Command::ConvertComingSoonToTicketed {
        reservation: window(start, datetime!(2026-06-15 18:00)),
        tickets: None,
        claiming: None,
    };

    let opened = preview(Some(&existing), &convert(NOW), NOW).unwrap();
    assert_eq!(opened.event.display.unwrap().start(), NOW);
    assert_eq!(
        opened.availability(),
        Availability::new(EventStatus::Open, Visibility::Published)
    );

    let later = preview(Some(&existing), &convert(datetime!(2026-05-10 13:00)), NOW).unwrap();
    assert_eq!(
        later.availability(),
        Availability::new(EventStatus::Scheduled, Visibility::Published)
    );
}

#[test]
fn test_save_as_draft_skips_validation() {
    let mut draft = EventDraft::new(create_test_details(), EventType::Ticketed);
    draft.details.venue = String::new();

    let result: Preview = preview(None, &Command::SaveAsDraft { draft }, NOW).unwrap();

    assert_eq!(result.availability(), Availability::draft());
    assert_eq!(result.event.display, None);
    assert!(result.advisories.is_empty());
}
