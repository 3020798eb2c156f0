//! # venuebook-adapter-json-store
//!
//! File-backed implementations of the venuebook ports.
//!
//! ## Responsibilities
//! - Implement [`VenueRepository`](venuebook_app::ports::VenueRepository) over a
//!   JSON snapshot of the booking API's venues (bare array or `{"data": [...]}`)
//! - Implement [`ReservationGateway`](venuebook_app::ports::ReservationGateway) by
//!   appending each request to a JSON-lines outbox for later delivery
//! - Map IO and JSON failures into [`VenuebookError::Storage`](venuebook_domain::error::VenuebookError)
//!
//! ## Dependency rule
//! Depends on `venuebook-app` (for port traits) and `venuebook-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod reservation_outbox;
pub mod venue_repo;

pub use error::JsonStoreError;
pub use reservation_outbox::{JsonLinesReservationGateway, OutboxAction, OutboxEntry};
pub use venue_repo::JsonVenueRepository;
