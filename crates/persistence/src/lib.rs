// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for Boxoffice.
//!
//! [`Persistence`] implements [`EventStore`] on a Diesel `SqliteConnection`.
//! Events, their ticket tiers, their claiming slots and the audit trail
//! live in four tables created by embedded migrations.
//!
//! ## Derived columns
//!
//! `events.total_tickets` and `events.claiming_dates` are written on every
//! save from the tiers and slots being saved. They are never read back as a
//! source of truth: the core recomputes both from the child rows on load
//! and reports a consistency fault on any difference.
//!
//! ## Transactions
//!
//! [`EventStore::atomically`] wraps a closure in a `SQLite` transaction.
//! The core runs every command's event write, child replacement and audit
//! insert inside one, so a failure leaves no partial state.
//!
//! ## Testing
//!
//! Tests use [`Persistence::new_in_memory`], which gives every call its own
//! shared-cache in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use boxoffice::{CoreError, Event, EventFilter, EventId, EventStore, StoredEvent};
use boxoffice_audit::AuditEvent;
use boxoffice_domain::{Availability, ClaimingSlot, TicketTier};
use diesel::SqliteConnection;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

use crate::backend::sqlite::JournalMode;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Event store backed by a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// so tests never share state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("boxoffice_memdb_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection =
            backend::sqlite::open(&shared_memory_url, JournalMode::Rollback)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database
    /// in WAL mode.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = backend::sqlite::open(path_str, JournalMode::Wal)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Retrieves an audit event by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the audit event is not found or cannot be
    /// deserialized.
    pub fn get_audit_event(&mut self, audit_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, audit_id)
    }

    /// Retrieves every audit event recorded for an event, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be deserialized.
    pub fn get_audit_events_for_event(
        &mut self,
        event_id: EventId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_events_for_event(&mut self.conn, event_id)
    }
}

impl EventStore for Persistence {
    fn get_event(&mut self, id: EventId) -> Result<Option<StoredEvent>, CoreError> {
        Ok(queries::get_event(&mut self.conn, id)?)
    }

    fn list_events(&mut self, filter: &EventFilter) -> Result<Vec<StoredEvent>, CoreError> {
        Ok(queries::list_events(&mut self.conn, filter)?)
    }

    fn save_event(&mut self, event: &Event) -> Result<EventId, CoreError> {
        let id = match event.id {
            Some(id) => {
                mutations::update_event(&mut self.conn, id, event)?;
                id
            }
            None => mutations::insert_event(&mut self.conn, event)?,
        };
        Ok(id)
    }

    fn replace_tickets(&mut self, id: EventId, tiers: &[TicketTier]) -> Result<(), CoreError> {
        Ok(mutations::replace_tickets(&mut self.conn, id, tiers)?)
    }

    fn replace_claiming_slots(
        &mut self,
        id: EventId,
        slots: &[ClaimingSlot],
    ) -> Result<(), CoreError> {
        Ok(mutations::replace_claiming_slots(&mut self.conn, id, slots)?)
    }

    fn update_availability(
        &mut self,
        id: EventId,
        availability: Availability,
    ) -> Result<(), CoreError> {
        Ok(mutations::update_availability(
            &mut self.conn,
            id,
            availability,
        )?)
    }

    fn record_audit_event(&mut self, audit_event: &AuditEvent) -> Result<i64, CoreError> {
        Ok(mutations::record_audit_event(&mut self.conn, audit_event)?)
    }

    fn atomically<T, F>(&mut self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Self) -> Result<T, CoreError>,
    {
        AnsiTransactionManager::begin_transaction(&mut self.conn).map_err(PersistenceError::from)?;

        match f(self) {
            Ok(value) => {
                // A failed COMMIT is rolled back by the transaction manager.
                AnsiTransactionManager::commit_transaction(&mut self.conn)
                    .map_err(PersistenceError::from)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = AnsiTransactionManager::rollback_transaction(&mut self.conn)
                {
                    warn!(error = %rollback, "Transaction rollback failed");
                }
                Err(err)
            }
        }
    }
}
