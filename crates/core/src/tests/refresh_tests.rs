// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_event, create_free_draft, create_test_actor, create_test_cause, create_test_service,
    create_ticketed_draft, future_display, future_reservation, running_display,
};
use boxoffice_audit::{Actor, ActorRole};
use crate::CoreError;
use boxoffice_domain::{Availability, Clock, EventStatus, Visibility};
use time::Duration;

fn refresher() -> Actor {
    Actor::system("refresher")
}

#[test]
fn test_refresh_persists_time_driven_changes() {
    let mut service = create_test_service();
    let id = create_event(
        &mut service,
        create_ticketed_draft(running_display(), future_reservation()),
    );
    service.clock().advance(Duration::days(3));

    let report = service.refresh(&refresher()).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.changed.len(), 1);
    let (changed_id, transition) = report.changed[0];
    assert_eq!(changed_id, id);
    assert!(transition.opens_reservations());

    let stored = service.store().stored(id);
    assert_eq!(
        stored.event.availability,
        Availability::new(EventStatus::Open, Visibility::Published)
    );

    let audit = service.store().audit_events().last().unwrap();
    assert_eq!(audit.action.name, "refresh");
    assert_eq!(audit.actor.role, ActorRole::System);
    assert_eq!(audit.cause.id, "refresh");
    assert!(audit.changes_availability());
}

#[test]
fn test_refresh_is_idempotent() {
    let mut service = create_test_service();
    create_event(
        &mut service,
        create_ticketed_draft(future_display(), future_reservation()),
    );
    service.clock().advance(Duration::days(1));

    assert_eq!(service.refresh(&refresher()).unwrap().changed.len(), 1);
    assert!(service.refresh(&refresher()).unwrap().changed.is_empty());
    assert_eq!(service.store().audit_events().len(), 2);
}

#[test]
fn test_refresh_skips_unchanged_and_terminal_events() {
    let mut service = create_test_service();
    create_event(&mut service, create_free_draft(running_display()));
    let cancelled = create_event(
        &mut service,
        create_ticketed_draft(future_display(), future_reservation()),
    );
    service
        .cancel(cancelled, create_test_actor(), create_test_cause())
        .unwrap();
    service.clock().advance(Duration::days(2));

    assert!(service.refresh(&refresher()).unwrap().changed.is_empty());
    assert_eq!(
        service.store().stored(cancelled).event.availability.status,
        EventStatus::Cancelled
    );
}

#[test]
fn test_refresh_closes_elapsed_reservations() {
    let mut service = create_test_service();
    let id = create_event(
        &mut service,
        create_ticketed_draft(running_display(), future_reservation()),
    );
    let clock_now = service.clock().now();
    service.clock().set(clock_now + Duration::days(40));

    let changed = service.refresh(&refresher()).unwrap().changed;

    assert_eq!(changed.len(), 1);
    assert_eq!(
        changed[0].1.after,
        Availability::new(EventStatus::Closed, Visibility::Published)
    );
    assert_eq!(
        service.get_event(id).unwrap().availability,
        changed[0].1.after
    );
}

#[test]
fn test_refresh_continues_past_inconsistent_event() {
    let mut service = create_test_service();
    let corrupt = create_event(
        &mut service,
        create_ticketed_draft(running_display(), future_reservation()),
    );
    let healthy = create_event(
        &mut service,
        create_ticketed_draft(running_display(), future_reservation()),
    );
    service.store_mut().corrupt_total_tickets(corrupt, 999);
    service.clock().advance(Duration::days(3));

    for pass in 0..3 {
        let report = service.refresh(&refresher()).unwrap();

        assert_eq!(report.faults.len(), 1);
        assert!(matches!(
            report.faults[0],
            CoreError::ConsistencyFault { event_id, .. } if event_id == corrupt
        ));
        if pass == 0 {
            assert_eq!(report.changed.len(), 1);
            assert_eq!(report.changed[0].0, healthy);
        } else {
            assert!(report.changed.is_empty());
        }
    }

    assert_eq!(
        service.store().stored(healthy).event.availability,
        Availability::new(EventStatus::Open, Visibility::Published)
    );
    assert_eq!(
        service.store().stored(corrupt).event.availability.status,
        EventStatus::Scheduled
    );
    assert_eq!(service.store().audit_events().len(), 3);
}
