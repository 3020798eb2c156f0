//! Venue — a bookable place and the reservations already made for it.

use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::error::{ValidationError, VenuebookError};
use crate::id::{BookingId, VenueId};
use crate::time::parse_calendar_date;

/// An existing reservation as delivered by the booking API.
///
/// Dates are kept as received (`YYYY-MM-DD` or an RFC 3339 timestamp) and
/// only become calendar dates through [`BookingRecord::date_range`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: BookingId,
    pub date_from: String,
    pub date_to: String,
    #[serde(default = "default_guests")]
    pub guests: u32,
}

fn default_guests() -> u32 {
    1
}

impl BookingRecord {
    /// The booked span as calendar dates.
    ///
    /// A span that ends before it starts is returned as-is; callers decide
    /// how to report it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] when either date is unreadable.
    pub fn date_range(&self) -> Result<DateRange, ValidationError> {
        Ok(DateRange::new(
            parse_calendar_date(&self.date_from)?,
            parse_calendar_date(&self.date_to)?,
        ))
    }
}

/// A bookable venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub max_guests: u32,
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
}

impl Venue {
    /// Create a builder for constructing a [`Venue`].
    #[must_use]
    pub fn builder() -> VenueBuilder {
        VenueBuilder::default()
    }

    /// Look up one of this venue's bookings.
    #[must_use]
    pub fn booking(&self, id: &BookingId) -> Option<&BookingRecord> {
        self.bookings.iter().find(|b| &b.id == id)
    }
}

/// Step-by-step builder for [`Venue`].
#[derive(Debug, Default)]
pub struct VenueBuilder {
    id: Option<VenueId>,
    name: Option<String>,
    max_guests: Option<u32>,
    bookings: Vec<BookingRecord>,
}

impl VenueBuilder {
    #[must_use]
    pub fn id(mut self, id: VenueId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn max_guests(mut self, max_guests: u32) -> Self {
        self.max_guests = Some(max_guests);
        self
    }

    #[must_use]
    pub fn booking(mut self, booking: BookingRecord) -> Self {
        self.bookings.push(booking);
        self
    }

    /// Consume the builder and return a [`Venue`].
    ///
    /// Missing ids are generated; `max_guests` defaults to 1.
    ///
    /// # Errors
    ///
    /// Returns [`VenuebookError::Validation`] when `max_guests` is zero.
    pub fn build(self) -> Result<Venue, VenuebookError> {
        let max_guests = self.max_guests.unwrap_or(1);
        if max_guests == 0 {
            return Err(ValidationError::InvalidGuestCount {
                guests: 0,
                max: 0,
            }
            .into());
        }
        Ok(Venue {
            id: self.id.unwrap_or_else(VenueId::generate),
            name: self.name.unwrap_or_default(),
            max_guests,
            bookings: self.bookings,
        })
    }
}
