//! Calendar-date helpers and the injectable clock.
//!
//! Every availability rule works on [`CalendarDate`] values: no time of day
//! and no timezone. Conversion from API timestamps happens once, here.

use chrono::{DateTime, Local, NaiveDate};

use crate::error::ValidationError;

/// A day on the calendar, compared at day granularity only.
pub type CalendarDate = NaiveDate;

/// Source of "today" for availability checks.
pub trait Clock {
    /// The current calendar date.
    fn today(&self) -> CalendarDate;
}

/// Reads the host's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> CalendarDate {
        (**self).today()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn today(&self) -> CalendarDate {
        (**self).today()
    }
}

/// Read a calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps keep the calendar day as written (`2024-06-05T23:00:00+02:00`
/// is the 5th), so no local timezone can shift a booking by one day.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] when neither form matches.
pub fn parse_calendar_date(value: &str) -> Result<CalendarDate, ValidationError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.date_naive())
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Number of nights from `from` to `to`; negative when `to` is earlier.
#[must_use]
pub fn nights_between(from: CalendarDate, to: CalendarDate) -> i64 {
    (to - from).num_days()
}
