//! Reservation request — the validated payload handed to the booking API.

use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::id::VenueId;
use crate::time::CalendarDate;

/// A finalized selection, ready to be created or used as an update.
///
/// Dates serialize as `YYYY-MM-DD` with no time or timezone component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub venue_id: VenueId,
    pub date_from: CalendarDate,
    pub date_to: CalendarDate,
    pub guests: u32,
}

impl ReservationRequest {
    #[must_use]
    pub fn range(&self) -> DateRange {
        DateRange::new(self.date_from, self.date_to)
    }

    #[must_use]
    pub fn nights(&self) -> i64 {
        self.range().nights()
    }
}
