// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end command execution against an [`EventStore`].

use crate::apply::{commit, describe, preview};
use crate::command::Command;
use crate::consistency::verify_consistency;
use crate::error::CoreError;
use crate::event::{Event, EventDraft, EventId};
use crate::state::{Preview, RefreshReport, TransitionResult};
use crate::store::{EventFilter, EventStore, StoredEvent};
use boxoffice_audit::{Action, Actor, AuditEvent, Cause};
use boxoffice_domain::{
    AdvisoryKind, ClaimingSchedule, Clock, ReservationPeriod, TicketPlan, Transition,
};
use tracing::{debug, info};

/// Runs admin commands and the periodic refresh.
///
/// Every event read through the service has its time-driven availability
/// re-resolved against the clock; stored status and visibility are never
/// trusted as current.
pub struct EventService<S, C> {
    store: S,
    clock: C,
}

impl<S: EventStore, C: Clock> EventService<S, C> {
    #[must_use]
    pub const fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Loads an event with its availability as of now.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EventNotFound` if no event has this id, or
    /// `CoreError::ConsistencyFault` if its stored totals are stale.
    pub fn get_event(&mut self, id: EventId) -> Result<Event, CoreError> {
        let stored = self
            .store
            .get_event(id)?
            .ok_or(CoreError::EventNotFound(id))?;
        self.current(id, stored)
    }

    /// Lists events matching `filter`, judged by their availability as of
    /// now.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or a listed event is
    /// inconsistent.
    pub fn list_events(&mut self, filter: &EventFilter) -> Result<Vec<Event>, CoreError> {
        let mut events = Vec::new();
        for stored in self.store.list_events(filter)? {
            let id = stored
                .event
                .id
                .ok_or_else(|| CoreError::Store(String::from("listed event has no id")))?;
            let event = self.current(id, stored)?;
            if filter.matches(event.event_type, event.availability) {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Computes the outcome of a command without writing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the target event cannot be loaded or the command
    /// is rejected.
    pub fn preview(&mut self, id: Option<EventId>, command: &Command) -> Result<Preview, CoreError> {
        let existing = id.map(|id| self.get_event(id)).transpose()?;
        preview(existing.as_ref(), command, self.clock.now())
    }

    /// Applies a command and stores the result with its audit event in one
    /// transaction.
    ///
    /// # Arguments
    ///
    /// * `id` - The target event; `None` for a new event
    /// * `command` - The command to apply
    /// * `acknowledged` - Advisory kinds the admin has confirmed
    /// * `actor` - The actor performing this action
    /// * `cause` - The cause or reason for this action
    ///
    /// # Errors
    ///
    /// Returns an error if the target event cannot be loaded, the command is
    /// rejected, or the store fails. Nothing is written on error.
    pub fn execute(
        &mut self,
        id: Option<EventId>,
        command: &Command,
        acknowledged: &[AdvisoryKind],
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        let existing = id.map(|id| self.get_event(id)).transpose()?;
        let mut result = commit(
            existing.as_ref(),
            command,
            acknowledged,
            self.clock.now(),
            actor,
            cause,
        )?;

        let (event_id, audit_event) = self.store.atomically(|store| {
            let event_id = if command.replaces_content() {
                let event_id = store.save_event(&result.event)?;
                store.replace_tickets(event_id, &result.event.tiers)?;
                store.replace_claiming_slots(event_id, &result.event.claiming_slots)?;
                event_id
            } else {
                let event_id = result.event.id.ok_or(CoreError::MissingEvent {
                    command: command.name(),
                })?;
                store.update_availability(event_id, result.event.availability)?;
                event_id
            };

            let mut audit_event = result.audit_event.clone().for_event(event_id);
            audit_event.audit_id = Some(store.record_audit_event(&audit_event)?);
            Ok((event_id, audit_event))
        })?;

        result.event.id = Some(event_id);
        result.audit_event = audit_event;

        info!(
            event_id,
            command = command.name(),
            actor = %result.audit_event.actor.id,
            availability = %result.event.availability,
            "Committed event command"
        );
        for advisory in &result.advisories {
            debug!(event_id, kind = advisory.kind().as_str(), %advisory, "Advisory");
        }

        Ok(result)
    }

    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft fails validation or the store fails.
    pub fn create(
        &mut self,
        draft: EventDraft,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        self.execute(None, &Command::Create { draft }, &[], actor, cause)
    }

    /// Replaces the content of an event.
    ///
    /// Editing a published ticketed event requires every advisory kind the
    /// preview reports to be in `acknowledged`.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing or archived, the draft fails
    /// validation, an advisory is unacknowledged, or the store fails.
    pub fn update(
        &mut self,
        id: EventId,
        draft: EventDraft,
        acknowledged: &[AdvisoryKind],
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        self.execute(Some(id), &Command::Update { draft }, acknowledged, actor, cause)
    }

    /// Converts a coming soon event into a ticketed event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not an active coming soon event, the
    /// converted event fails validation, or the store fails.
    pub fn convert_coming_soon_to_ticketed(
        &mut self,
        id: EventId,
        reservation: ReservationPeriod,
        tickets: Option<TicketPlan>,
        claiming: Option<ClaimingSchedule>,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        let command = Command::ConvertComingSoonToTicketed {
            reservation,
            tickets,
            claiming,
        };
        self.execute(Some(id), &command, &[], actor, cause)
    }

    /// # Errors
    ///
    /// Returns an error if the event is missing, archived or already
    /// cancelled, or the store fails.
    pub fn cancel(
        &mut self,
        id: EventId,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        self.execute(Some(id), &Command::Cancel, &[], actor, cause)
    }

    /// # Errors
    ///
    /// Returns an error if the event is missing or already archived, or the
    /// store fails.
    pub fn archive(
        &mut self,
        id: EventId,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        self.execute(Some(id), &Command::Archive, &[], actor, cause)
    }

    /// # Errors
    ///
    /// Returns an error if the event is missing, archived or published, or
    /// the store fails.
    pub fn delete(
        &mut self,
        id: EventId,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        self.execute(Some(id), &Command::Delete, &[], actor, cause)
    }

    /// # Errors
    ///
    /// Returns an error if the event is missing or not archived, or the
    /// store fails.
    pub fn restore(
        &mut self,
        id: EventId,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        self.execute(Some(id), &Command::Restore, &[], actor, cause)
    }

    /// Stores in-progress input as a draft, creating the event if `id` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing or archived, or the store
    /// fails.
    pub fn save_as_draft(
        &mut self,
        id: Option<EventId>,
        draft: EventDraft,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        self.execute(id, &Command::SaveAsDraft { draft }, &[], actor, cause)
    }

    /// Re-resolves every time-driven event and persists the ones whose
    /// availability changed.
    ///
    /// Each change is written with its own audit event in its own
    /// transaction. An event whose stored totals are inconsistent is logged,
    /// left untouched and reported in [`RefreshReport::faults`]; the pass
    /// carries on with the remaining events.
    ///
    /// # Errors
    ///
    /// Returns the first store error encountered. Changes written before it
    /// stay written.
    pub fn refresh(&mut self, actor: &Actor) -> Result<RefreshReport, CoreError> {
        let now = self.clock.now();
        let mut report = RefreshReport::default();

        for stored in self.store.list_events(&EventFilter::all())? {
            let Some(id) = stored.event.id else {
                continue;
            };
            if let Err(fault) = verify_consistency(id, &stored.event, &stored.totals) {
                report.faults.push(fault);
                continue;
            }

            let event = stored.event;
            if !event.availability.is_time_driven() {
                continue;
            }
            let after = event.current_availability(now);
            let transition = Transition::new(Some(event.availability), after);
            if !transition.is_change() {
                continue;
            }

            let updated = Event {
                availability: after,
                ..event.clone()
            };
            let audit_event = AuditEvent::new(
                actor.clone(),
                Cause::scheduled_refresh(),
                Action::new("refresh", describe(&transition)),
                event.snapshot(),
                updated.snapshot(),
            )
            .for_event(id);

            self.store.atomically(|store| {
                store.update_availability(id, after)?;
                store.record_audit_event(&audit_event)
            })?;

            info!(
                event_id = id,
                from = %event.availability,
                to = %after,
                "Refreshed event availability"
            );
            report.changed.push((id, transition));
        }

        debug!(
            checked_at = %now,
            changed = report.changed.len(),
            faults = report.faults.len(),
            "Refresh complete"
        );
        Ok(report)
    }

    fn current(&self, id: EventId, stored: StoredEvent) -> Result<Event, CoreError> {
        verify_consistency(id, &stored.event, &stored.totals)?;
        let mut event = stored.event;
        event.availability = event.current_availability(self.clock.now());
        Ok(event)
    }
}
