//! Subcommand implementations.
//!
//! Each command resolves its inputs through [`BookingService`] and prints
//! either a plain-text table or JSON on stdout.

use chrono::Days;
use serde::Serialize;

use venuebook_app::ports::{ReservationGateway, VenueRepository};
use venuebook_app::services::booking_service::BookingService;
use venuebook_domain::availability::{Availability, DisabledReason};
use venuebook_domain::date_range::DateRange;
use venuebook_domain::error::{ValidationError, VenuebookError};
use venuebook_domain::id::{BookingId, VenueId};
use venuebook_domain::selection::{SelectionOutcome, SelectionState};
use venuebook_domain::time::{CalendarDate, Clock};

/// Errors surfaced to the user by a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Domain(#[from] VenuebookError),

    #[error("{date} can not be selected: {reason}")]
    Unavailable {
        date: CalendarDate,
        reason: DisabledReason,
    },

    #[error("{0}")]
    Rejected(String),

    #[error("failed to encode output")]
    Output(#[from] serde_json::Error),
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

#[derive(Serialize)]
struct DayRow {
    date: CalendarDate,
    #[serde(flatten)]
    availability: Availability,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VenueRow<'a> {
    id: &'a VenueId,
    name: &'a str,
    max_guests: u32,
    bookings: usize,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print every venue in the snapshot.
pub async fn venues<V, G, C>(
    service: &BookingService<V, G, C>,
    json: bool,
) -> Result<(), CommandError>
where
    V: VenueRepository,
    G: ReservationGateway,
    C: Clock,
{
    let venues = service.list_venues().await?;
    let rows: Vec<VenueRow<'_>> = venues
        .iter()
        .map(|venue| VenueRow {
            id: &venue.id,
            name: &venue.name,
            max_guests: venue.max_guests,
            bookings: venue.bookings.len(),
        })
        .collect();

    if json {
        return print_json(&rows);
    }
    for row in rows {
        println!(
            "{}\t{}\tmax {} guests\t{} booking(s)",
            row.id, row.name, row.max_guests, row.bookings
        );
    }
    Ok(())
}

/// Print check-in availability for `days` days starting at `start`.
pub async fn calendar<V, G, C>(
    service: &BookingService<V, G, C>,
    venue_id: &VenueId,
    editing: Option<&BookingId>,
    start: Option<CalendarDate>,
    days: u32,
    json: bool,
) -> Result<(), CommandError>
where
    V: VenueRepository,
    G: ReservationGateway,
    C: Clock,
{
    let calculator = service.availability(venue_id, editing).await?;
    let start = start.unwrap_or_else(|| calculator.today());
    let end = start
        .checked_add_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(start);
    let selection = SelectionState::default();

    let rows: Vec<DayRow> = DateRange::new(start, end)
        .days()
        .map(|date| DayRow {
            date,
            availability: calculator.check_date(date, &selection),
        })
        .collect();

    if json {
        return print_json(&rows);
    }
    for row in rows {
        match row.availability {
            Availability::Available => println!("{}  available", row.date),
            Availability::Disabled(reason) => println!("{}  disabled ({reason})", row.date),
        }
    }
    Ok(())
}

/// Print the days of gaps too short for the minimum stay.
pub async fn gaps<V, G, C>(
    service: &BookingService<V, G, C>,
    venue_id: &VenueId,
    editing: Option<&BookingId>,
    json: bool,
) -> Result<(), CommandError>
where
    V: VenueRepository,
    G: ReservationGateway,
    C: Clock,
{
    let calculator = service.availability(venue_id, editing).await?;
    let dates = calculator.gap_dates();

    if json {
        return print_json(&dates);
    }
    if dates.is_empty() {
        println!(
            "no gaps shorter than {} between bookings",
            calculator.minimum_stay()
        );
    }
    for date in dates {
        println!("{date}");
    }
    Ok(())
}

/// Dates and guests requested by `book`.
pub struct BookRequest<'a> {
    pub venue_id: &'a VenueId,
    pub editing: Option<&'a BookingId>,
    pub from: CalendarDate,
    pub to: CalendarDate,
    pub guests: Option<u32>,
}

/// Select `from` then `to`, finalize, and submit the reservation.
pub async fn book<V, G, C>(
    service: &BookingService<V, G, C>,
    request: BookRequest<'_>,
    json: bool,
) -> Result<(), CommandError>
where
    V: VenueRepository,
    G: ReservationGateway,
    C: Clock,
{
    let mut session = service
        .open_session(request.venue_id, request.editing)
        .await?;
    let controller = session.controller_mut();

    if let SelectionOutcome::Ignored(reason) = controller.select_day(request.from) {
        return Err(CommandError::Unavailable {
            date: request.from,
            reason,
        });
    }
    match controller.select_day(request.to) {
        SelectionOutcome::RangeCompleted => {}
        SelectionOutcome::Rejected(warning) => {
            tracing::warn!(error = %warning.to_validation_error(), "selection rejected");
            return Err(CommandError::Rejected(warning.to_string()));
        }
        SelectionOutcome::Ignored(reason) => {
            return Err(CommandError::Unavailable {
                date: request.to,
                reason,
            });
        }
        SelectionOutcome::StartSelected | SelectionOutcome::Restarted => {
            return Err(ValidationError::IncompleteRange.into());
        }
    }

    if let Some(guests) = request.guests
        && !controller.set_guests(guests)
    {
        return Err(ValidationError::InvalidGuestCount {
            guests,
            max: controller.max_guests(),
        }
        .into());
    }

    let stored = service.submit(&session).await?;
    if json {
        return print_json(&stored);
    }
    println!(
        "booked {} -> {} for {} guest(s) (booking {})",
        stored.date_from, stored.date_to, stored.guests, stored.id
    );
    Ok(())
}
