//! Booking service — use-cases for checking availability and reserving a venue.

use venuebook_domain::availability::{AvailabilityCalculator, MinimumStay};
use venuebook_domain::booked::BookedRangeSet;
use venuebook_domain::date_range::DateRange;
use venuebook_domain::error::{NotFoundError, VenuebookError};
use venuebook_domain::id::{BookingId, VenueId};
use venuebook_domain::selection::RangeSelectionController;
use venuebook_domain::time::Clock;
use venuebook_domain::venue::{BookingRecord, Venue};

use crate::ports::{ReservationGateway, VenueRepository};

/// Turn raw booking records into a [`BookedRangeSet`].
///
/// Records with unreadable dates are dropped. Records whose checkout
/// precedes their check-in are kept (they never block a day) and reported
/// as a data-quality warning.
#[must_use]
pub fn booked_ranges(bookings: &[BookingRecord]) -> BookedRangeSet {
    bookings
        .iter()
        .filter_map(|booking| match booking.date_range() {
            Ok(range) => {
                if let Err(err) = range.validate() {
                    tracing::warn!(booking_id = %booking.id, error = %err, "malformed booked range");
                }
                Some(range)
            }
            Err(err) => {
                tracing::warn!(booking_id = %booking.id, error = %err, "skipping booking with unreadable dates");
                None
            }
        })
        .collect()
}

/// One user's selection session for a venue.
#[derive(Debug, Clone)]
pub struct BookingSession {
    venue_id: VenueId,
    editing: Option<BookingId>,
    controller: RangeSelectionController,
}

impl BookingSession {
    #[must_use]
    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }

    /// The booking being edited, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&BookingId> {
        self.editing.as_ref()
    }

    #[must_use]
    pub fn controller(&self) -> &RangeSelectionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RangeSelectionController {
        &mut self.controller
    }
}

/// Application service for venue availability and reservations.
pub struct BookingService<V, G, C> {
    venues: V,
    gateway: G,
    clock: C,
    minimum_stay: MinimumStay,
}

impl<V, G, C> BookingService<V, G, C>
where
    V: VenueRepository,
    G: ReservationGateway,
    C: Clock,
{
    /// Create a new service backed by the given ports.
    pub fn new(venues: V, gateway: G, clock: C, minimum_stay: MinimumStay) -> Self {
        Self {
            venues,
            gateway,
            clock,
            minimum_stay,
        }
    }

    #[must_use]
    pub fn minimum_stay(&self) -> MinimumStay {
        self.minimum_stay
    }

    /// Look up a venue by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`VenuebookError::NotFound`] when no venue with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_venue(&self, id: &VenueId) -> Result<Venue, VenuebookError> {
        self.venues.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Venue",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all venues.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_venues(&self) -> Result<Vec<Venue>, VenuebookError> {
        self.venues.get_all().await
    }

    /// Build the availability predicate for a venue as of today.
    ///
    /// When `editing` names one of the venue's bookings, that booking's
    /// own dates stay selectable.
    ///
    /// # Errors
    ///
    /// Returns [`VenuebookError::NotFound`] for an unknown venue or booking,
    /// [`VenuebookError::Validation`] when the edited booking's dates are
    /// unreadable, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn availability(
        &self,
        venue_id: &VenueId,
        editing: Option<&BookingId>,
    ) -> Result<AvailabilityCalculator, VenuebookError> {
        let venue = self.get_venue(venue_id).await?;
        let (calculator, _) = self.calculator_for(&venue, editing)?;
        Ok(calculator)
    }

    /// Open a selection session for a new reservation, or for editing one.
    ///
    /// # Errors
    ///
    /// Same as [`availability`](Self::availability).
    #[tracing::instrument(skip(self))]
    pub async fn open_session(
        &self,
        venue_id: &VenueId,
        editing: Option<&BookingId>,
    ) -> Result<BookingSession, VenuebookError> {
        let venue = self.get_venue(venue_id).await?;
        let (calculator, original) = self.calculator_for(&venue, editing)?;

        let controller = match original {
            Some(Original { range, guests }) => {
                RangeSelectionController::editing(calculator, venue.max_guests, range, guests)
            }
            None => RangeSelectionController::new(calculator, venue.max_guests),
        };

        Ok(BookingSession {
            venue_id: venue.id,
            editing: editing.cloned(),
            controller,
        })
    }

    /// Finalize the session's selection and hand it to the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`VenuebookError::Validation`] when the selection is
    /// incomplete or the guest count is out of range, or any error raised
    /// by the gateway.
    #[tracing::instrument(skip(self, session), fields(venue_id = %session.venue_id))]
    pub async fn submit(&self, session: &BookingSession) -> Result<BookingRecord, VenuebookError> {
        let request = session.controller.finalize(&session.venue_id)?;
        let stored = match &session.editing {
            Some(id) => self.gateway.update(id.clone(), request).await?,
            None => self.gateway.create(request).await?,
        };
        tracing::info!(
            booking_id = %stored.id,
            date_from = %stored.date_from,
            date_to = %stored.date_to,
            guests = stored.guests,
            "reservation submitted"
        );
        Ok(stored)
    }

    fn calculator_for(
        &self,
        venue: &Venue,
        editing: Option<&BookingId>,
    ) -> Result<(AvailabilityCalculator, Option<Original>), VenuebookError> {
        let booked = booked_ranges(&venue.bookings);
        let today = self.clock.today();
        tracing::debug!(
            venue_id = %venue.id,
            bookings = booked.len(),
            %today,
            minimum_stay = %self.minimum_stay,
            "building availability"
        );
        let calculator = AvailabilityCalculator::new(booked, self.minimum_stay, today);

        let Some(booking_id) = editing else {
            return Ok((calculator, None));
        };
        let booking = venue.booking(booking_id).ok_or_else(|| NotFoundError {
            entity: "Booking",
            id: booking_id.to_string(),
        })?;
        let original = booking.date_range()?;
        Ok((
            calculator.with_original_range(original),
            Some(Original {
                range: original,
                guests: booking.guests,
            }),
        ))
    }
}

/// Dates and guests of the booking being edited.
struct Original {
    range: DateRange,
    guests: u32,
}
