//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`VenuebookError`] via `#[from]`.

use crate::time::CalendarDate;

/// Top-level error shared by the domain, the application layer and adapters.
#[derive(Debug, thiserror::Error)]
pub enum VenuebookError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// An adapter failed while reading or writing data.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Finalize was attempted before both dates were chosen.
    #[error("both a check-in and a check-out date must be selected")]
    IncompleteRange,

    /// The requested span overlaps an existing booking.
    #[error("the dates {from}..{to} overlap an existing booking")]
    OverlapRejected {
        from: CalendarDate,
        to: CalendarDate,
    },

    /// Guest count outside `[1, max]`.
    #[error("guest count {guests} is outside 1..={max}")]
    InvalidGuestCount { guests: u32, max: u32 },

    /// A booked range ends before it starts.
    #[error("booked range {from}..{to} ends before it starts")]
    MalformedBookedRange {
        from: CalendarDate,
        to: CalendarDate,
    },

    /// A date string could not be read as a calendar date.
    #[error("invalid calendar date {0:?}")]
    InvalidDate(String),

    /// An identifier was empty.
    #[error("identifier must not be empty")]
    EmptyId,
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn should_display_overlap_with_both_dates() {
        let err = ValidationError::OverlapRejected {
            from: date("2024-06-08"),
            to: date("2024-06-14"),
        };
        assert_eq!(
            err.to_string(),
            "the dates 2024-06-08..2024-06-14 overlap an existing booking"
        );
    }

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Venue",
            id: "v1".to_string(),
        };
        assert_eq!(err.to_string(), "Venue v1 not found");
    }

    #[test]
    fn should_convert_validation_error_into_top_level_error() {
        let err: VenuebookError = ValidationError::IncompleteRange.into();
        assert!(matches!(
            err,
            VenuebookError::Validation(ValidationError::IncompleteRange)
        ));
    }
}
