//! # venuebook — venue availability and booking CLI
//!
//! Composition root that wires the JSON store into the booking service.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Initialize logging
//! - Construct the venue repository and reservation gateway (adapters)
//! - Construct the booking service, injecting adapters via port traits
//! - Dispatch the requested command
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod commands;
mod config;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use venuebook_adapter_json_store::{JsonLinesReservationGateway, JsonVenueRepository};
use venuebook_app::services::booking_service::BookingService;
use venuebook_domain::id::{BookingId, VenueId};
use venuebook_domain::time::{CalendarDate, Clock, FixedClock, SystemClock};

use crate::commands::BookRequest;
use crate::config::Config;

/// Check venue availability and book stays.
#[derive(Parser, Debug)]
#[command(name = "venuebook")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults to `venuebook.toml` when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Evaluate availability as of this date instead of the local date
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    today: Option<CalendarDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List venues in the snapshot
    Venues,
    /// Show which days can be picked as check-in
    Calendar {
        /// Venue id
        venue: VenueId,
        /// First day to show (defaults to today)
        #[arg(short, long)]
        start: Option<CalendarDate>,
        /// Number of days to show
        #[arg(short, long)]
        days: Option<u32>,
        /// Booking being edited; its own dates stay selectable
        #[arg(short, long)]
        editing: Option<BookingId>,
    },
    /// List days in gaps too short for the minimum stay
    Gaps {
        /// Venue id
        venue: VenueId,
        /// Booking being edited; it is left out of the gap computation
        #[arg(short, long)]
        editing: Option<BookingId>,
    },
    /// Reserve a stay, or move an existing one with --editing
    Book {
        /// Venue id
        venue: VenueId,
        /// Check-in day
        #[arg(long)]
        from: CalendarDate,
        /// Check-out day
        #[arg(long)]
        to: CalendarDate,
        /// Number of guests
        #[arg(short, long)]
        guests: Option<u32>,
        /// Booking to update instead of creating a new one
        #[arg(short, long)]
        editing: Option<BookingId>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    match start(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", report(err.as_ref()));
            ExitCode::FAILURE
        }
    }
}

/// Render an error followed by its `source()` chain.
fn report(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

async fn start(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config::load(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let venues = JsonVenueRepository::new(&config.store.venues_path);
    let gateway = JsonLinesReservationGateway::new(&config.store.outbox_path);
    let minimum_stay = config.minimum_stay();

    match args.today {
        Some(today) => {
            let service = BookingService::new(venues, gateway, FixedClock(today), minimum_stay);
            run(&service, &config, args.command, args.json).await
        }
        None => {
            let service = BookingService::new(venues, gateway, SystemClock, minimum_stay);
            run(&service, &config, args.command, args.json).await
        }
    }
}

async fn run<C: Clock>(
    service: &BookingService<JsonVenueRepository, JsonLinesReservationGateway, C>,
    config: &Config,
    command: Command,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    tracing::debug!(?command, "running command");
    match command {
        Command::Venues => commands::venues(service, json).await?,
        Command::Calendar {
            venue,
            start,
            days,
            editing,
        } => {
            let days = days.unwrap_or(config.booking.calendar_days);
            commands::calendar(service, &venue, editing.as_ref(), start, days, json).await?;
        }
        Command::Gaps { venue, editing } => {
            commands::gaps(service, &venue, editing.as_ref(), json).await?;
        }
        Command::Book {
            venue,
            from,
            to,
            guests,
            editing,
        } => {
            let request = BookRequest {
                venue_id: &venue,
                editing: editing.as_ref(),
                from,
                to,
                guests,
            };
            commands::book(service, request, json).await?;
        }
    }
    Ok(())
}
