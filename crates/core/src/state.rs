// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::event::{Event, EventId};
use boxoffice_audit::AuditEvent;
use boxoffice_domain::{Advisory, AdvisoryKind, Availability, Transition};

/// The outcome of a command, computed without side effects.
///
/// A preview is the first step of the two-step save: the caller renders
/// the advisories, collects acknowledgment and then commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// The event as it would be stored.
    pub event: Event,
    /// How the availability would change.
    pub transition: Transition,
    /// Warnings to show the admin.
    pub advisories: Vec<Advisory>,
    /// True when the command is on a sensitive path and has advisories;
    /// commit then requires every advisory kind to be acknowledged.
    pub requires_acknowledgment: bool,
}

impl Preview {
    #[must_use]
    pub const fn availability(&self) -> Availability {
        self.transition.after
    }

    /// Advisories whose kind is not in `acknowledged`.
    #[must_use]
    pub fn unacknowledged(&self, acknowledged: &[AdvisoryKind]) -> Vec<Advisory> {
        self.advisories
            .iter()
            .filter(|advisory| !acknowledged.contains(&advisory.kind()))
            .cloned()
            .collect()
    }
}

/// The result of a committed command.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The event after the command.
    pub event: Event,
    pub transition: Transition,
    /// The advisories that accompanied the command.
    pub advisories: Vec<Advisory>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

impl TransitionResult {
    #[must_use]
    pub const fn availability(&self) -> Availability {
        self.transition.after
    }
}

/// The outcome of one refresh pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Events whose availability changed and was persisted, in id order.
    pub changed: Vec<(EventId, Transition)>,
    /// Events skipped because their stored totals are inconsistent. Each
    /// entry is a `CoreError::ConsistencyFault`.
    pub faults: Vec<CoreError>,
}

impl RefreshReport {
    /// Returns true if no event was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}
