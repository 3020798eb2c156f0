//! Reservation gateway port — hands finalized requests to the booking backend.

use std::future::Future;

use venuebook_domain::error::VenuebookError;
use venuebook_domain::id::BookingId;
use venuebook_domain::reservation::ReservationRequest;
use venuebook_domain::venue::BookingRecord;

/// Performs the create/update call for a finalized reservation.
pub trait ReservationGateway {
    /// Create a new reservation and return the stored booking.
    fn create(
        &self,
        request: ReservationRequest,
    ) -> impl Future<Output = Result<BookingRecord, VenuebookError>> + Send;

    /// Replace the dates and guest count of an existing reservation.
    fn update(
        &self,
        id: BookingId,
        request: ReservationRequest,
    ) -> impl Future<Output = Result<BookingRecord, VenuebookError>> + Send;
}

impl<T: ReservationGateway + Send + Sync> ReservationGateway for std::sync::Arc<T> {
    fn create(
        &self,
        request: ReservationRequest,
    ) -> impl Future<Output = Result<BookingRecord, VenuebookError>> + Send {
        (**self).create(request)
    }

    fn update(
        &self,
        id: BookingId,
        request: ReservationRequest,
    ) -> impl Future<Output = Result<BookingRecord, VenuebookError>> + Send {
        (**self).update(id, request)
    }
}
