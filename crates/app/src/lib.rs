//! # venuebook-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `VenueRepository` — fetch a venue with its existing bookings
//!   - `ReservationGateway` — create or update a reservation
//! - Define the **driving/inbound** use-case struct:
//!   - `BookingService` — build availability for a venue, open selection
//!     sessions, submit finalized reservations
//! - Map raw booking records into normalized booked ranges, logging bad data
//!
//! ## Dependency rule
//! Depends on `venuebook-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
