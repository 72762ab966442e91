// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Boxoffice refresher.
//!
//! Re-resolves the availability of every time-driven event and persists
//! the ones that changed, each with a `refresh` audit event. Runs a single
//! pass, or one pass per interval when `--interval-secs` is given.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use boxoffice::{CoreError, EventService, RefreshReport};
use boxoffice_audit::Actor;
use boxoffice_domain::{Clock, DomainError, SystemClock};
use boxoffice_persistence::{Persistence, PersistenceError};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// Actor name recorded on every refresh audit event.
const REFRESHER_ACTOR: &str = "refresher";

/// Boxoffice Refresher - keeps stored event availability current
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// IANA timezone the event windows are expressed in
    #[arg(short, long, default_value = "UTC")]
    timezone: String,

    /// Seconds between refresh passes. If not provided, runs once and exits.
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    interval_secs: Option<u64>,
}

/// Refresher errors.
#[derive(Debug, Error)]
enum RefresherError {
    /// The configured timezone is not a known IANA name.
    #[error("Invalid timezone: {0}")]
    Timezone(#[from] DomainError),

    /// The database could not be opened.
    #[error("Failed to open database: {0}")]
    Persistence(#[from] PersistenceError),

    /// A refresh pass failed.
    #[error("Refresh failed: {0}")]
    Refresh(#[from] CoreError),

    /// A single pass skipped events with inconsistent stored totals.
    #[error("Refresh skipped {0} inconsistent event(s)")]
    Inconsistent(usize),
}

type Service = EventService<Persistence, SystemClock>;

fn open_service(args: &Args) -> Result<Service, RefresherError> {
    let clock = SystemClock::new(&args.timezone)?;

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!(database = %db_path, "Using file-based database");
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    Ok(EventService::new(persistence, clock))
}

/// Runs one refresh pass, logging every change and every skipped event.
fn run_pass<C: Clock>(
    service: &mut EventService<Persistence, C>,
    actor: &Actor,
) -> Result<RefreshReport, RefresherError> {
    let report = service.refresh(actor)?;
    for (event_id, transition) in &report.changed {
        info!(
            event_id,
            from = ?transition.before,
            to = %transition.after,
            "Event availability changed"
        );
    }
    for fault in &report.faults {
        error!(error = %fault, "Skipped inconsistent event");
    }
    info!(
        changed = report.changed.len(),
        skipped = report.faults.len(),
        "Refresh pass complete"
    );
    Ok(report)
}

async fn run(args: &Args) -> Result<(), RefresherError> {
    let mut service = open_service(args)?;
    let actor = Actor::system(REFRESHER_ACTOR);

    let Some(interval_secs) = args.interval_secs else {
        let report = run_pass(&mut service, &actor)?;
        if !report.is_clean() {
            return Err(RefresherError::Inconsistent(report.faults.len()));
        }
        return Ok(());
    };

    info!(interval_secs, timezone = %args.timezone, "Starting periodic refresh");
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    loop {
        interval.tick().await;
        // Skipped events are checked again on the next tick.
        run_pass(&mut service, &actor)?;
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Boxoffice Refresher");

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Refresher exited with error");
            ExitCode::FAILURE
        }
    }
}
