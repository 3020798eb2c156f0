//! Venue repository port — read access to venues and their bookings.

use std::future::Future;

use venuebook_domain::error::VenuebookError;
use venuebook_domain::id::VenueId;
use venuebook_domain::venue::Venue;

/// Source of [`Venue`] snapshots, bookings included.
pub trait VenueRepository {
    /// Get a venue by its identifier.
    fn get_by_id(
        &self,
        id: &VenueId,
    ) -> impl Future<Output = Result<Option<Venue>, VenuebookError>> + Send;

    /// Get all venues.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Venue>, VenuebookError>> + Send;
}

impl<T: VenueRepository + Send + Sync> VenueRepository for std::sync::Arc<T> {
    fn get_by_id(
        &self,
        id: &VenueId,
    ) -> impl Future<Output = Result<Option<Venue>, VenuebookError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Venue>, VenuebookError>> + Send {
        (**self).get_all()
    }
}
