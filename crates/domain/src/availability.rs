//! Availability — which calendar days may be picked for a reservation.
//!
//! [`AvailabilityCalculator`] is a pure predicate over a venue's
//! [`BookedRangeSet`]. The same calculator drives calendar rendering
//! (`is_date_disabled` per day, or [`AvailabilityCalculator::disabled_dates`]
//! for widgets that want an explicit list) and the
//! [`RangeSelectionController`](crate::selection::RangeSelectionController).
//!
//! Overlap is inclusive on both ends: a checkout day can not be someone
//! else's check-in day.

use chrono::Days;
use serde::{Deserialize, Serialize};

use crate::booked::BookedRangeSet;
use crate::date_range::DateRange;
use crate::selection::SelectionState;
use crate::time::CalendarDate;

/// Smallest number of nights a stay, or a gap between stays, must span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinimumStay(u32);

impl MinimumStay {
    #[must_use]
    pub const fn nights(nights: u32) -> Self {
        Self(nights)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for MinimumStay {
    fn default() -> Self {
        Self(1)
    }
}

impl std::fmt::Display for MinimumStay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} night(s)", self.0)
    }
}

/// Why a day can not be picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledReason {
    /// The day is before today.
    Past,
    /// An end date was requested before any start date.
    NoStartSelected,
    /// The day precedes the chosen start date.
    BeforeStart,
    /// The day is inside an existing booking.
    Booked,
    /// The day sits in a gap between bookings shorter than the minimum stay.
    ShortGap,
    /// Checking in here leaves fewer free nights than the minimum stay.
    NoFreeNightAfter,
    /// The span from the start date to this day crosses a booking.
    OverlapsBooking,
    /// The span from the start date to this day is shorter than the minimum stay.
    BelowMinimumStay,
}

impl std::fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Past => "past",
            Self::NoStartSelected => "no start selected",
            Self::BeforeStart => "before start",
            Self::Booked => "booked",
            Self::ShortGap => "short gap",
            Self::NoFreeNightAfter => "no free night after",
            Self::OverlapsBooking => "overlaps booking",
            Self::BelowMinimumStay => "below minimum stay",
        })
    }
}

/// Outcome of checking one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Availability {
    Available,
    Disabled(DisabledReason),
}

impl Availability {
    #[must_use]
    pub fn is_disabled(self) -> bool {
        matches!(self, Self::Disabled(_))
    }

    #[must_use]
    pub fn reason(self) -> Option<DisabledReason> {
        match self {
            Self::Available => None,
            Self::Disabled(reason) => Some(reason),
        }
    }
}

/// Decides whether a calendar day is selectable for a venue.
///
/// Holds the venue's bookings, the minimum stay, the current day and, when
/// editing, the reservation's original range. Every check is a pure
/// function of those and the [`SelectionState`] passed in.
#[derive(Debug, Clone)]
pub struct AvailabilityCalculator {
    booked: BookedRangeSet,
    effective: BookedRangeSet,
    short_gaps: Vec<DateRange>,
    minimum_stay: MinimumStay,
    today: CalendarDate,
    original: Option<DateRange>,
}

impl AvailabilityCalculator {
    #[must_use]
    pub fn new(booked: BookedRangeSet, minimum_stay: MinimumStay, today: CalendarDate) -> Self {
        let short_gaps = short_gaps(&booked, minimum_stay);
        Self {
            effective: booked.clone(),
            booked,
            short_gaps,
            minimum_stay,
            today,
            original: None,
        }
    }

    /// Exempt the range of the reservation being edited.
    ///
    /// Days inside `original` are never disabled, and the booked entry equal
    /// to it no longer takes part in gap or overlap checks.
    #[must_use]
    pub fn with_original_range(mut self, original: DateRange) -> Self {
        self.effective = self.booked.without(&original);
        self.short_gaps = short_gaps(&self.effective, self.minimum_stay);
        self.original = Some(original);
        self
    }

    #[must_use]
    pub fn booked(&self) -> &BookedRangeSet {
        &self.booked
    }

    #[must_use]
    pub fn minimum_stay(&self) -> MinimumStay {
        self.minimum_stay
    }

    #[must_use]
    pub fn today(&self) -> CalendarDate {
        self.today
    }

    #[must_use]
    pub fn original_range(&self) -> Option<DateRange> {
        self.original
    }

    #[must_use]
    pub fn is_date_disabled(&self, date: CalendarDate, selection: &SelectionState) -> bool {
        self.check_date(date, selection).is_disabled()
    }

    /// Same decision as [`is_date_disabled`](Self::is_date_disabled), with the reason.
    #[must_use]
    pub fn check_date(&self, date: CalendarDate, selection: &SelectionState) -> Availability {
        use Availability::{Available, Disabled};

        if date < self.today {
            return Disabled(DisabledReason::Past);
        }
        if !selection.is_selecting_start {
            match selection.from {
                None => return Disabled(DisabledReason::NoStartSelected),
                Some(from) if date < from => return Disabled(DisabledReason::BeforeStart),
                Some(_) => {}
            }
        }
        if self.original.is_some_and(|r| r.contains(date)) {
            // The exemption covers the day itself, not a span reaching it.
            if !selection.is_selecting_start
                && let Some(from) = selection.from
                && self.effective.overlaps(&DateRange::new(from, date))
            {
                return Disabled(DisabledReason::OverlapsBooking);
            }
            return Available;
        }
        if self.effective.contains(date) {
            return Disabled(DisabledReason::Booked);
        }
        if self.short_gaps.iter().any(|gap| gap.contains(date)) {
            return Disabled(DisabledReason::ShortGap);
        }

        match (selection.is_selecting_start, selection.from) {
            (true, _) => {
                if !self.has_free_nights_after(date) {
                    return Disabled(DisabledReason::NoFreeNightAfter);
                }
            }
            (false, Some(from)) => {
                let span = DateRange::new(from, date);
                if self.effective.overlaps(&span) {
                    return Disabled(DisabledReason::OverlapsBooking);
                }
                if span.nights() < i64::from(self.minimum_stay.get()) {
                    return Disabled(DisabledReason::BelowMinimumStay);
                }
            }
            (false, None) => return Disabled(DisabledReason::NoStartSelected),
        }
        Available
    }

    /// Whether `[from, to]` crosses any booking other than the one being edited.
    #[must_use]
    pub fn span_conflicts(&self, span: &DateRange) -> bool {
        self.effective.overlaps(span)
    }

    /// Days of gaps too short for the minimum stay, ascending.
    #[must_use]
    pub fn gap_dates(&self) -> Vec<CalendarDate> {
        self.short_gaps.iter().flat_map(DateRange::days).collect()
    }

    /// Every disabled day in `window` (inclusive), ascending.
    #[must_use]
    pub fn disabled_dates(&self, window: DateRange, selection: &SelectionState) -> Vec<CalendarDate> {
        window
            .days()
            .filter(|day| self.is_date_disabled(*day, selection))
            .collect()
    }

    fn has_free_nights_after(&self, date: CalendarDate) -> bool {
        let nights = u64::from(self.minimum_stay.get());
        if nights == 0 {
            return true;
        }
        match (
            date.checked_add_days(Days::new(1)),
            date.checked_add_days(Days::new(nights)),
        ) {
            (Some(first), Some(last)) => !self.effective.overlaps(&DateRange::new(first, last)),
            _ => false,
        }
    }
}

/// Days between adjacent bookings that can not host a stay of `minimum_stay`.
///
/// Each gap of free days strictly between two temporally adjacent bookings
/// is emitted in full when it holds fewer days than `minimum_stay` nights.
/// Back-to-back bookings produce nothing; malformed ranges are ignored.
#[must_use]
pub fn compute_gap_dates(booked: &BookedRangeSet, minimum_stay: MinimumStay) -> Vec<CalendarDate> {
    short_gaps(booked, minimum_stay)
        .iter()
        .flat_map(DateRange::days)
        .collect()
}

fn short_gaps(booked: &BookedRangeSet, minimum_stay: MinimumStay) -> Vec<DateRange> {
    booked
        .gaps()
        .into_iter()
        .filter(|gap| gap.nights() + 1 < i64::from(minimum_stay.get()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn range(from: &str, to: &str) -> DateRange {
        DateRange::new(date(from), date(to))
    }

    fn calculator(ranges: &[(&str, &str)], minimum: u32) -> AvailabilityCalculator {
        let booked = ranges.iter().map(|(from, to)| range(from, to)).collect();
        AvailabilityCalculator::new(booked, MinimumStay::nights(minimum), date("2024-05-01"))
    }

    fn selecting_start() -> SelectionState {
        SelectionState::default()
    }

    fn selecting_end(from: &str) -> SelectionState {
        SelectionState {
            from: Some(date(from)),
            to: None,
            is_selecting_start: false,
        }
    }

    #[test]
    fn should_disable_every_day_inside_a_booking() {
        let calc = calculator(&[("2024-06-10", "2024-06-15")], 1);
        let state = selecting_start();
        for day in range("2024-06-10", "2024-06-15").days() {
            assert!(calc.is_date_disabled(day, &state), "{day} should be disabled");
        }
        assert!(!calc.is_date_disabled(date("2024-06-16"), &state));
    }

    #[test]
    fn should_disable_days_before_today() {
        let calc = calculator(&[], 1);
        assert_eq!(
            calc.check_date(date("2024-04-30"), &selecting_start()),
            Availability::Disabled(DisabledReason::Past)
        );
        assert!(!calc.is_date_disabled(date("2024-05-01"), &selecting_start()));
    }

    #[test]
    fn should_return_identical_results_for_identical_arguments() {
        let calc = calculator(&[("2024-06-10", "2024-06-15")], 2);
        let state = selecting_end("2024-06-01");
        for day in range("2024-05-25", "2024-06-20").days() {
            assert_eq!(calc.check_date(day, &state), calc.check_date(day, &state));
        }
    }

    #[test]
    fn should_disable_single_day_gap_when_minimum_is_two() {
        let calc = calculator(&[("2024-06-01", "2024-06-03"), ("2024-06-05", "2024-06-07")], 2);
        assert_eq!(
            calc.check_date(date("2024-06-04"), &selecting_start()),
            Availability::Disabled(DisabledReason::ShortGap)
        );
        assert_eq!(calc.gap_dates(), vec![date("2024-06-04")]);
    }

    #[test]
    fn should_not_flag_single_day_gap_when_minimum_is_one() {
        let booked: BookedRangeSet = [range("2024-06-01", "2024-06-03"), range("2024-06-05", "2024-06-07")]
            .into_iter()
            .collect();
        assert!(compute_gap_dates(&booked, MinimumStay::nights(1)).is_empty());

        // The gap rule alone keeps 4 June; the free-night rule still blocks it.
        let calc = calculator(&[("2024-06-01", "2024-06-03"), ("2024-06-05", "2024-06-07")], 1);
        assert_eq!(
            calc.check_date(date("2024-06-04"), &selecting_start()),
            Availability::Disabled(DisabledReason::NoFreeNightAfter)
        );
    }

    #[test]
    fn should_disable_start_when_next_day_is_booked() {
        let calc = calculator(&[("2024-06-10", "2024-06-12")], 1);
        assert_eq!(
            calc.check_date(date("2024-06-09"), &selecting_start()),
            Availability::Disabled(DisabledReason::NoFreeNightAfter)
        );
        assert!(!calc.is_date_disabled(date("2024-06-08"), &selecting_start()));
    }

    #[test]
    fn should_require_enough_free_nights_for_longer_minimum() {
        let calc = calculator(&[("2024-06-10", "2024-06-12")], 3);
        assert!(calc.is_date_disabled(date("2024-06-07"), &selecting_start()));
        assert!(!calc.is_date_disabled(date("2024-06-06"), &selecting_start()));
    }

    #[test]
    fn should_allow_start_next_to_booking_when_minimum_is_zero() {
        let calc = calculator(&[("2024-06-10", "2024-06-12")], 0);
        assert!(!calc.is_date_disabled(date("2024-06-09"), &selecting_start()));
    }

    #[test]
    fn should_disable_every_end_date_without_a_start() {
        let calc = calculator(&[], 1);
        let state = SelectionState {
            from: None,
            to: None,
            is_selecting_start: false,
        };
        assert_eq!(
            calc.check_date(date("2024-06-10"), &state),
            Availability::Disabled(DisabledReason::NoStartSelected)
        );
    }

    #[test]
    fn should_disable_end_date_before_start() {
        let calc = calculator(&[], 1);
        assert_eq!(
            calc.check_date(date("2024-06-04"), &selecting_end("2024-06-05")),
            Availability::Disabled(DisabledReason::BeforeStart)
        );
    }

    #[test]
    fn should_disable_end_date_whose_span_crosses_a_booking() {
        let calc = calculator(&[("2024-06-10", "2024-06-12")], 1);
        let state = selecting_end("2024-06-08");
        assert_eq!(
            calc.check_date(date("2024-06-14"), &state),
            Availability::Disabled(DisabledReason::OverlapsBooking)
        );
        assert!(!calc.is_date_disabled(date("2024-06-09"), &state));
    }

    #[test]
    fn should_disable_end_date_on_next_check_in_day() {
        let calc = calculator(&[("2024-06-10", "2024-06-12")], 1);
        assert!(calc.is_date_disabled(date("2024-06-10"), &selecting_end("2024-06-07")));
    }

    #[test]
    fn should_disable_end_date_shorter_than_minimum_stay() {
        let calc = calculator(&[], 3);
        let state = selecting_end("2024-06-05");
        assert_eq!(
            calc.check_date(date("2024-06-07"), &state),
            Availability::Disabled(DisabledReason::BelowMinimumStay)
        );
        assert!(!calc.is_date_disabled(date("2024-06-08"), &state));
    }

    #[test]
    fn should_keep_original_range_selectable_while_editing() {
        let original = range("2024-06-10", "2024-06-15");
        let calc = calculator(&[("2024-06-10", "2024-06-15"), ("2024-06-17", "2024-06-20")], 1)
            .with_original_range(original);
        for day in original.days() {
            assert!(!calc.is_date_disabled(day, &selecting_start()), "{day} should be selectable");
        }
        assert!(calc.is_date_disabled(date("2024-06-18"), &selecting_start()));
    }

    #[test]
    fn should_disable_original_end_day_when_span_crosses_other_booking() {
        let original = range("2024-06-10", "2024-06-15");
        let calc = calculator(&[("2024-06-07", "2024-06-08"), ("2024-06-10", "2024-06-15")], 1)
            .with_original_range(original);
        let state = selecting_end("2024-06-05");

        assert_eq!(
            calc.check_date(date("2024-06-12"), &state),
            Availability::Disabled(DisabledReason::OverlapsBooking)
        );
        assert!(!calc.is_date_disabled(date("2024-06-12"), &selecting_end("2024-06-09")));
        assert!(!calc.is_date_disabled(date("2024-06-12"), &selecting_start()));
    }

    #[test]
    fn should_disable_past_days_of_original_range() {
        let original = range("2024-04-28", "2024-05-03");
        let calc = calculator(&[("2024-04-28", "2024-05-03")], 1).with_original_range(original);

        assert_eq!(
            calc.check_date(date("2024-04-30"), &selecting_start()),
            Availability::Disabled(DisabledReason::Past)
        );
        assert!(!calc.is_date_disabled(date("2024-05-01"), &selecting_start()));
        assert_eq!(
            calc.check_date(date("2024-05-02"), &selecting_end("2024-05-03")),
            Availability::Disabled(DisabledReason::BeforeStart)
        );
    }

    #[test]
    fn should_drop_edited_booking_from_gap_and_overlap_checks() {
        let original = range("2024-06-04", "2024-06-05");
        let calc = calculator(
            &[("2024-06-01", "2024-06-02"), ("2024-06-04", "2024-06-05"), ("2024-06-08", "2024-06-09")],
            3,
        );
        assert!(calc.gap_dates().contains(&date("2024-06-03")));

        let editing = calc.with_original_range(original);
        assert!(editing.gap_dates().is_empty());
        assert!(!editing.span_conflicts(&range("2024-06-03", "2024-06-06")));
        assert!(editing.span_conflicts(&range("2024-06-03", "2024-06-08")));
    }

    #[test]
    fn should_ignore_malformed_booked_range() {
        let calc = calculator(&[("2024-06-15", "2024-06-10")], 1);
        for day in range("2024-06-08", "2024-06-17").days() {
            assert!(!calc.is_date_disabled(day, &selecting_start()));
        }
        assert!(!calc.is_date_disabled(date("2024-06-17"), &selecting_end("2024-06-08")));
    }

    #[test]
    fn should_emit_every_day_of_a_short_gap() {
        let booked: BookedRangeSet = [range("2024-06-01", "2024-06-03"), range("2024-06-07", "2024-06-09")]
            .into_iter()
            .collect();
        assert_eq!(
            compute_gap_dates(&booked, MinimumStay::nights(4)),
            vec![date("2024-06-04"), date("2024-06-05"), date("2024-06-06")]
        );
        assert!(compute_gap_dates(&booked, MinimumStay::nights(3)).is_empty());
    }

    #[test]
    fn should_produce_same_gap_dates_on_every_call() {
        let booked: BookedRangeSet = [range("2024-06-01", "2024-06-03"), range("2024-06-05", "2024-06-07")]
            .into_iter()
            .collect();
        let first = compute_gap_dates(&booked, MinimumStay::nights(2));
        let second = compute_gap_dates(&booked, MinimumStay::nights(2));
        assert_eq!(first, second);
    }

    #[test]
    fn should_list_disabled_dates_in_window() {
        let calc = calculator(&[("2024-06-10", "2024-06-11")], 1);
        let disabled = calc.disabled_dates(range("2024-06-07", "2024-06-13"), &selecting_start());
        assert_eq!(
            disabled,
            vec![date("2024-06-09"), date("2024-06-10"), date("2024-06-11")]
        );
    }

    #[test]
    fn should_serialize_availability_with_reason() {
        let json = serde_json::to_value(Availability::Disabled(DisabledReason::ShortGap)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "disabled", "reason": "short_gap"}));
    }
}
