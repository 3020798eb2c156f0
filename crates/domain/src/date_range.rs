//! `DateRange` — an inclusive span of calendar days.

use chrono::Days;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{CalendarDate, nights_between};

/// Inclusive span `[from, to]` of calendar days.
///
/// A range whose `to` precedes `from` is *malformed*. Such ranges can still
/// be constructed because booking data comes from outside; they contain no
/// day and overlap nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: CalendarDate,
    pub to: CalendarDate,
}

impl DateRange {
    #[must_use]
    pub fn new(from: CalendarDate, to: CalendarDate) -> Self {
        Self { from, to }
    }

    /// A range covering exactly one day.
    #[must_use]
    pub fn single(day: CalendarDate) -> Self {
        Self { from: day, to: day }
    }

    /// Check that the range does not end before it starts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedBookedRange`] when `to < from`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_well_formed() {
            Ok(())
        } else {
            Err(ValidationError::MalformedBookedRange {
                from: self.from,
                to: self.to,
            })
        }
    }

    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.from <= self.to
    }

    /// Whether `day` lies in `[from, to]`. Always `false` when malformed.
    #[must_use]
    pub fn contains(&self, day: CalendarDate) -> bool {
        self.is_well_formed() && self.from <= day && day <= self.to
    }

    /// Inclusive overlap: sharing a single boundary day counts.
    #[must_use]
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.is_well_formed()
            && other.is_well_formed()
            && self.from <= other.to
            && other.from <= self.to
    }

    /// Nights from check-in to check-out.
    #[must_use]
    pub fn nights(&self) -> i64 {
        nights_between(self.from, self.to)
    }

    /// Every day in the range, ascending. Empty when malformed.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> + Clone + use<> {
        let from = self.from;
        let count = u64::try_from(self.nights() + 1).unwrap_or(0);
        (0..count).filter_map(move |offset| from.checked_add_days(Days::new(offset)))
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
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

    #[test]
    fn should_contain_both_endpoints() {
        let r = range("2024-06-10", "2024-06-15");
        assert!(r.contains(date("2024-06-10")));
        assert!(r.contains(date("2024-06-12")));
        assert!(r.contains(date("2024-06-15")));
        assert!(!r.contains(date("2024-06-09")));
        assert!(!r.contains(date("2024-06-16")));
    }

    #[test]
    fn should_overlap_when_sharing_a_boundary_day() {
        let a = range("2024-06-01", "2024-06-03");
        let b = range("2024-06-03", "2024-06-05");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn should_not_overlap_when_separated_by_a_day() {
        let a = range("2024-06-01", "2024-06-03");
        let b = range("2024-06-04", "2024-06-05");
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn should_treat_malformed_range_as_empty() {
        let bad = range("2024-06-15", "2024-06-10");
        assert!(!bad.is_well_formed());
        assert!(!bad.contains(date("2024-06-12")));
        assert!(!bad.overlaps(&range("2024-06-01", "2024-06-30")));
        assert_eq!(bad.days().count(), 0);
        assert_eq!(
            bad.validate(),
            Err(ValidationError::MalformedBookedRange {
                from: date("2024-06-15"),
                to: date("2024-06-10"),
            })
        );
    }

    #[test]
    fn should_list_every_day_in_order() {
        let days: Vec<String> = range("2024-06-29", "2024-07-02")
            .days()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(
            days,
            ["2024-06-29", "2024-06-30", "2024-07-01", "2024-07-02"]
        );
    }

    #[test]
    fn should_count_nights() {
        assert_eq!(range("2024-06-05", "2024-06-09").nights(), 4);
        assert_eq!(DateRange::single(date("2024-06-05")).nights(), 0);
    }
}
