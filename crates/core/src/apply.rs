// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command application.
//!
//! Saving is a two-step protocol. [`preview`] validates the command,
//! resolves the resulting availability and collects advisories without
//! side effects. [`commit`] repeats that work, checks acknowledgment on
//! sensitive paths and produces the audit event. Neither touches storage.

use crate::command::Command;
use crate::error::CoreError;
use crate::event::{Event, EventDraft};
use crate::state::{Preview, TransitionResult};
use boxoffice_audit::{Action, Actor, AuditEvent, Cause, EventSnapshot};
use boxoffice_domain::{
    Advisory, AdvisoryContext, AdvisoryKind, Availability, ClaimingSchedule, DisplayPeriod,
    DomainError, EventStatus, EventType, PriorState, ReservationPeriod, TicketPlan, TicketTier,
    Transition, archive, cancel, collect_advisories, delete, resolve, restore, validate_details,
    validate_windows,
};
use time::PrimitiveDateTime;

/// Computes the outcome of a command without side effects.
///
/// # Arguments
///
/// * `existing` - The stored event, with its availability already
///   re-resolved; `None` when creating
/// * `command` - The command to evaluate
/// * `now` - The current wall-clock time
///
/// # Errors
///
/// Returns an error if:
/// - The submitted event fails validation (every violation is listed)
/// - The command is not permitted from the event's current state
/// - The command needs an existing event and none was given, or the reverse
pub fn preview(
    existing: Option<&Event>,
    command: &Command,
    now: PrimitiveDateTime,
) -> Result<Preview, CoreError> {
    let before = existing.map(|event| event.availability);

    let (event, advisories, sensitive) = match command {
        Command::Create { draft } => {
            if let Some(id) = existing.and_then(|event| event.id) {
                return Err(CoreError::EventAlreadyExists(id));
            }
            let (event, advisories) = build_event(None, draft, now)?;
            (event, advisories, false)
        }
        Command::Update { draft } => {
            let current = require(existing, command)?;
            reject_archived(current)?;
            let (event, advisories) = build_event(Some(current), draft, now)?;
            (event, advisories, is_sensitive(current))
        }
        Command::ConvertComingSoonToTicketed {
            reservation,
            tickets,
            claiming,
        } => {
            let current = require(existing, command)?;
            let draft = conversion_draft(
                current,
                *reservation,
                tickets.as_ref(),
                claiming.as_ref(),
                now,
            )?;
            let (event, advisories) = build_event(Some(current), &draft, now)?;
            (event, advisories, false)
        }
        Command::Cancel => {
            let current = require(existing, command)?;
            (with_availability(current, cancel(current.availability)?), Vec::new(), false)
        }
        Command::Archive => {
            let current = require(existing, command)?;
            (with_availability(current, archive(current.availability)?), Vec::new(), false)
        }
        Command::Delete => {
            let current = require(existing, command)?;
            (with_availability(current, delete(current.availability)?), Vec::new(), false)
        }
        Command::Restore => {
            let current = require(existing, command)?;
            let availability = restore(
                current.availability,
                current.event_type,
                now,
                current.display.as_ref(),
                current.reservation.as_ref(),
            )?;
            (with_availability(current, availability), Vec::new(), false)
        }
        Command::SaveAsDraft { draft } => {
            if let Some(current) = existing {
                reject_archived(current)?;
            }
            (build_draft(existing, draft), Vec::new(), false)
        }
    };

    let requires_acknowledgment = sensitive && !advisories.is_empty();
    Ok(Preview {
        transition: Transition::new(before, event.availability),
        event,
        advisories,
        requires_acknowledgment,
    })
}

/// Applies a command, producing the resulting event and its audit event.
///
/// # Arguments
///
/// * `existing` - The stored event, with its availability already
///   re-resolved; `None` when creating
/// * `command` - The command to apply
/// * `acknowledged` - Advisory kinds the admin has confirmed
/// * `now` - The current wall-clock time
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns every error [`preview`] returns, and
/// `CoreError::AdvisoriesNotAcknowledged` if the command is on a sensitive
/// path and some advisory kind was not acknowledged.
pub fn commit(
    existing: Option<&Event>,
    command: &Command,
    acknowledged: &[AdvisoryKind],
    now: PrimitiveDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let preview = preview(existing, command, now)?;

    if preview.requires_acknowledgment {
        let missing = preview.unacknowledged(acknowledged);
        if !missing.is_empty() {
            return Err(CoreError::AdvisoriesNotAcknowledged(missing));
        }
    }

    let mut confirmed: Vec<AdvisoryKind> = preview
        .advisories
        .iter()
        .map(Advisory::kind)
        .filter(|kind| acknowledged.contains(kind))
        .collect();
    confirmed.sort_unstable();
    confirmed.dedup();

    let before = existing.map_or_else(EventSnapshot::absent, Event::snapshot);
    let details = describe(&preview.transition);
    let mut audit_event = AuditEvent::new(
        actor,
        cause,
        Action::new(command.name(), details),
        before,
        preview.event.snapshot(),
    )
    .with_acknowledged(confirmed);
    if let Some(id) = preview.event.id {
        audit_event = audit_event.for_event(id);
    }

    Ok(TransitionResult {
        event: preview.event,
        transition: preview.transition,
        advisories: preview.advisories,
        audit_event,
    })
}

fn require<'a>(existing: Option<&'a Event>, command: &Command) -> Result<&'a Event, CoreError> {
    existing.ok_or(CoreError::MissingEvent {
        command: command.name(),
    })
}

const fn reject_archived(current: &Event) -> Result<(), DomainError> {
    if current.availability.is_archived() {
        return Err(DomainError::EventArchived);
    }
    Ok(())
}

/// Editing an event that end users can already see and reserve.
const fn is_sensitive(current: &Event) -> bool {
    matches!(current.event_type, EventType::Ticketed) && current.availability.is_published()
}

fn with_availability(current: &Event, availability: Availability) -> Event {
    Event {
        availability,
        ..current.clone()
    }
}

/// Audit details for an availability change; `None` when nothing changed.
pub fn describe(transition: &Transition) -> Option<String> {
    transition.is_change().then(|| match transition.before {
        Some(before) => format!("{before} -> {}", transition.after),
        None => format!("-> {}", transition.after),
    })
}

/// Validates a submitted event, resolves its availability and collects
/// advisories.
fn build_event(
    existing: Option<&Event>,
    draft: &EventDraft,
    now: PrimitiveDateTime,
) -> Result<(Event, Vec<Advisory>), CoreError> {
    let (display, tiers, claiming) = validate_draft(draft)?;

    let availability = match existing {
        // Cancellation is only lifted by an explicit command.
        Some(current) if current.availability.status == EventStatus::Cancelled => {
            current.availability
        }
        _ => resolve(draft.event_type, now, &display, draft.reservation.as_ref()),
    };

    let advisories = collect_advisories(&AdvisoryContext {
        now,
        event_type: draft.event_type,
        prior: existing.map(|current| PriorState {
            availability: current.availability,
            event_type: current.event_type,
            display: current.display.as_ref(),
        }),
        display: &display,
        reservation: draft.reservation.as_ref(),
        claiming: Some(&claiming),
    });

    let event = Event {
        id: existing.and_then(|current| current.id),
        details: draft.details.clone(),
        event_type: draft.event_type,
        availability,
        display: Some(display),
        reservation: draft.reservation,
        tiers,
        claiming_slots: claiming.slots().to_vec(),
    };
    Ok((event, advisories))
}

/// Collects every violation in a submitted event.
fn validate_draft(
    draft: &EventDraft,
) -> Result<(DisplayPeriod, Vec<TicketTier>, ClaimingSchedule), CoreError> {
    let mut errors = validate_details(&draft.details);
    errors.extend(validate_windows(
        draft.event_type,
        draft.details.event_date,
        draft.display.as_ref(),
        draft.reservation.as_ref(),
    ));

    let tiers = match &draft.tickets {
        Some(plan) => {
            let mut plan = plan.clone();
            plan.set_event_type(draft.event_type);
            plan.normalize().unwrap_or_else(|violations| {
                errors.extend(violations);
                Vec::new()
            })
        }
        // Coming soon events may leave their ticket plan for later.
        None if draft.event_type == EventType::ComingSoon => Vec::new(),
        None => {
            errors.push(DomainError::MissingTicketPlan {
                event_type: draft.event_type,
            });
            Vec::new()
        }
    };

    let mut claiming = draft.claiming.clone();
    claiming.retarget(draft.details.event_date, draft.event_type);
    errors.extend(claiming.validate());

    match draft.display {
        Some(display) if errors.is_empty() => Ok((display, tiers, claiming)),
        _ => Err(CoreError::ValidationFailed(errors)),
    }
}

/// Builds the draft of a coming soon event converted to ticketed.
fn conversion_draft(
    current: &Event,
    reservation: ReservationPeriod,
    tickets: Option<&TicketPlan>,
    claiming: Option<&ClaimingSchedule>,
    now: PrimitiveDateTime,
) -> Result<EventDraft, DomainError> {
    reject_archived(current)?;
    if current.event_type != EventType::ComingSoon {
        return Err(DomainError::NotComingSoon {
            event_type: current.event_type,
        });
    }
    if current.availability.status == EventStatus::Cancelled {
        return Err(DomainError::InvalidStatusTransition {
            from: current.availability.to_string(),
            to: EventType::Ticketed.as_str().to_string(),
            reason: "cancelled events cannot be converted".to_string(),
        });
    }

    let mut draft = current.to_draft();
    draft.event_type = EventType::Ticketed;
    draft.display = draft.display.map(|display| display.starting_at(now));
    draft.reservation = Some(reservation);
    if let Some(tickets) = tickets {
        draft.tickets = Some(tickets.clone());
    }
    if let Some(claiming) = claiming {
        draft.claiming = claiming.clone();
    }
    Ok(draft)
}

/// Stores the admin's input as a draft.
///
/// Nothing is validated. Tiers missing a numeric field and claiming dates
/// without slots are not kept, since neither can be stored.
fn build_draft(existing: Option<&Event>, draft: &EventDraft) -> Event {
    let tiers = draft.tickets.as_ref().map_or_else(Vec::new, |plan| {
        let mut plan = plan.clone();
        plan.set_event_type(draft.event_type);
        plan.complete_tiers()
    });
    Event {
        id: existing.and_then(|current| current.id),
        details: draft.details.clone(),
        event_type: draft.event_type,
        availability: Availability::draft(),
        display: draft.display,
        reservation: draft.reservation,
        tiers,
        claiming_slots: draft.claiming.slots().to_vec(),
    }
}
