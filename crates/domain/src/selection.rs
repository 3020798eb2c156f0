//! Range selection — the two-click check-in / check-out life cycle.
//!
//! The first click picks a check-in day, the second a check-out day. Clicks
//! on disabled days are silent no-ops; a second click on or before the
//! check-in restarts the selection from that day; a check-out whose span
//! crosses a booking is rejected with a [`SelectionWarning`].

use serde::{Deserialize, Serialize};

use crate::availability::{AvailabilityCalculator, DisabledReason};
use crate::date_range::DateRange;
use crate::error::ValidationError;
use crate::id::VenueId;
use crate::reservation::ReservationRequest;
use crate::time::CalendarDate;

/// Current picks of an in-progress selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub from: Option<CalendarDate>,
    pub to: Option<CalendarDate>,
    pub is_selecting_start: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            is_selecting_start: true,
        }
    }
}

impl SelectionState {
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        match (self.from, self.to) {
            (Some(_), Some(_)) => SelectionPhase::RangeComplete,
            _ if !self.is_selecting_start => SelectionPhase::AwaitingEnd,
            _ => SelectionPhase::AwaitingStart,
        }
    }

    /// The selected range, once both ends are chosen.
    #[must_use]
    pub fn range(&self) -> Option<DateRange> {
        Some(DateRange::new(self.from?, self.to?))
    }
}

/// Where the selection is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    AwaitingStart,
    AwaitingEnd,
    RangeComplete,
}

/// User-facing warning raised by a rejected click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionWarning {
    /// The span from check-in to the clicked day crosses an existing booking.
    Overlap {
        from: CalendarDate,
        to: CalendarDate,
    },
}

impl SelectionWarning {
    #[must_use]
    pub fn to_validation_error(self) -> ValidationError {
        match self {
            Self::Overlap { from, to } => ValidationError::OverlapRejected { from, to },
        }
    }
}

impl std::fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overlap { .. } => f.write_str(
                "The selected dates overlap an existing booking. Please choose different dates.",
            ),
        }
    }
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The day is disabled; nothing changed.
    Ignored(DisabledReason),
    /// A check-in day was chosen.
    StartSelected,
    /// The second click was on or before the check-in and became the new check-in.
    Restarted,
    /// A check-out day was chosen; the range is complete.
    RangeCompleted,
    /// The check-out was refused; nothing changed.
    Rejected(SelectionWarning),
}

/// Drives one booking or editing session.
///
/// Owns its [`SelectionState`] and guest count exclusively. All availability
/// decisions are delegated to the [`AvailabilityCalculator`].
#[derive(Debug, Clone)]
pub struct RangeSelectionController {
    calculator: AvailabilityCalculator,
    state: SelectionState,
    guests: u32,
    max_guests: u32,
}

impl RangeSelectionController {
    /// Start an empty selection for a new reservation with one guest.
    #[must_use]
    pub fn new(calculator: AvailabilityCalculator, max_guests: u32) -> Self {
        Self {
            calculator,
            state: SelectionState::default(),
            guests: 1,
            max_guests,
        }
    }

    /// Start a session that edits an existing reservation.
    ///
    /// `original` stays selectable for the whole session and the selection
    /// starts out holding it, together with the booked guest count clamped
    /// to the venue's current capacity.
    #[must_use]
    pub fn editing(
        calculator: AvailabilityCalculator,
        max_guests: u32,
        original: DateRange,
        guests: u32,
    ) -> Self {
        let mut controller = Self::new(calculator.with_original_range(original), max_guests);
        controller.state = SelectionState {
            from: Some(original.from),
            to: Some(original.to),
            is_selecting_start: true,
        };
        controller.guests = guests.clamp(1, max_guests.max(1));
        controller
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn guests(&self) -> u32 {
        self.guests
    }

    #[must_use]
    pub fn max_guests(&self) -> u32 {
        self.max_guests
    }

    #[must_use]
    pub fn calculator(&self) -> &AvailabilityCalculator {
        &self.calculator
    }

    /// Whether `date` is disabled for the next click.
    #[must_use]
    pub fn is_date_disabled(&self, date: CalendarDate) -> bool {
        self.calculator.is_date_disabled(date, &self.state)
    }

    /// Apply a click on `date`.
    pub fn select_day(&mut self, date: CalendarDate) -> SelectionOutcome {
        match (self.state.phase(), self.state.from) {
            (SelectionPhase::AwaitingEnd, Some(from)) if date > from => self.pick_end(from, date),
            (SelectionPhase::AwaitingEnd, _) => self.pick_start(date, SelectionOutcome::Restarted),
            _ => self.pick_start(date, SelectionOutcome::StartSelected),
        }
    }

    /// Set the guest count when it lies in `[1, max_guests]`.
    ///
    /// Returns `false`, leaving the count untouched, otherwise.
    pub fn set_guests(&mut self, guests: u32) -> bool {
        if (1..=self.max_guests).contains(&guests) {
            self.guests = guests;
            true
        } else {
            false
        }
    }

    pub fn increment_guests(&mut self) -> bool {
        self.set_guests(self.guests.saturating_add(1))
    }

    pub fn decrement_guests(&mut self) -> bool {
        self.set_guests(self.guests.saturating_sub(1))
    }

    /// Clear both dates; the guest count is kept.
    pub fn reset(&mut self) {
        self.state = SelectionState::default();
    }

    /// Build the reservation request for a completed selection.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompleteRange`] unless both dates are
    /// chosen, and [`ValidationError::InvalidGuestCount`] when the guest
    /// count lies outside `[1, max_guests]`.
    pub fn finalize(&self, venue_id: &VenueId) -> Result<ReservationRequest, ValidationError> {
        let range = self
            .state
            .range()
            .ok_or(ValidationError::IncompleteRange)?;

        if !(1..=self.max_guests).contains(&self.guests) {
            return Err(ValidationError::InvalidGuestCount {
                guests: self.guests,
                max: self.max_guests,
            });
        }

        Ok(ReservationRequest {
            venue_id: venue_id.clone(),
            date_from: range.from,
            date_to: range.to,
            guests: self.guests,
        })
    }

    fn pick_start(&mut self, date: CalendarDate, outcome: SelectionOutcome) -> SelectionOutcome {
        if let Some(reason) = self
            .calculator
            .check_date(date, &SelectionState::default())
            .reason()
        {
            return SelectionOutcome::Ignored(reason);
        }
        self.state = SelectionState {
            from: Some(date),
            to: None,
            is_selecting_start: false,
        };
        outcome
    }

    fn pick_end(&mut self, from: CalendarDate, date: CalendarDate) -> SelectionOutcome {
        if self.calculator.span_conflicts(&DateRange::new(from, date)) {
            return SelectionOutcome::Rejected(SelectionWarning::Overlap { from, to: date });
        }
        if let Some(reason) = self.calculator.check_date(date, &self.state).reason() {
            return SelectionOutcome::Ignored(reason);
        }
        self.state.to = Some(date);
        self.state.is_selecting_start = true;
        SelectionOutcome::RangeCompleted
    }
}
