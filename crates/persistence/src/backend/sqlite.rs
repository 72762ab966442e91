// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup.
//!
//! Every connection is opened through [`open`], which applies the
//! connection pragmas, runs the embedded migrations and then checks that
//! foreign keys are actually enforced.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Schema migrations for events, tiers, claiming slots and audit events.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a writer waits on a locked file database, in milliseconds.
///
/// The refresher and an admin process may write to the same file.
pub const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Journal mode of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    /// The `SQLite` default; used for in-memory databases.
    Rollback,
    /// Write-ahead logging; used for file databases so readers do not block
    /// the refresher.
    Wal,
}

#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens a connection, migrates it and verifies foreign key enforcement.
///
/// # Arguments
///
/// * `database_url` - A file path or a `file:` URI
/// * `journal` - The journal mode to switch to
///
/// # Errors
///
/// Returns an error if the connection cannot be established, a pragma
/// fails, a migration fails or foreign keys are not enforced.
pub fn open(
    database_url: &str,
    journal: JournalMode,
) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, ?journal, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    // Diesel has no PRAGMA DSL.
    pragma(&mut conn, "PRAGMA foreign_keys = ON")?;
    if journal == JournalMode::Wal {
        pragma(&mut conn, "PRAGMA journal_mode = WAL")?;
        pragma(&mut conn, &format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"))?;
    }

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    debug!(migrations = applied.len(), "Applied pending migrations");

    verify_foreign_key_enforcement(&mut conn)?;
    Ok(conn)
}

/// Checks `PRAGMA foreign_keys`.
///
/// Tiers and claiming slots rely on `ON DELETE CASCADE`, which `SQLite` only
/// honors when the pragma is on for the connection.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` if it is off.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: PragmaRow = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    Ok(())
}

/// Returns the rowid assigned by the most recent insert on `conn`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

fn pragma(conn: &mut SqliteConnection, statement: &str) -> Result<(), PersistenceError> {
    diesel::sql_query(statement)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("{statement}: {e}")))?;
    Ok(())
}
