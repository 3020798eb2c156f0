//! # venuebook-domain
//!
//! Pure domain model for venue booking availability.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, calendar dates
//! - Define **date ranges** and a venue's **booked range set**
//! - Decide which days are selectable ([`availability::AvailabilityCalculator`])
//! - Drive two-click check-in / check-out selection
//!   ([`selection::RangeSelectionController`])
//! - Produce validated **reservation requests**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! "Today" is always passed in; see [`time::Clock`].

pub mod error;
pub mod id;
pub mod time;

pub mod availability;
pub mod booked;
pub mod date_range;
pub mod reservation;
pub mod selection;
pub mod venue;
