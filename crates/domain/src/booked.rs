//! `BookedRangeSet` — a venue's existing reservations as sorted date ranges.

use chrono::Days;

use crate::date_range::DateRange;
use crate::time::CalendarDate;

/// Booked ranges for one venue, sorted ascending by `from` (then `to`).
///
/// Built once per selection session and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedRangeSet {
    ranges: Vec<DateRange>,
}

impl BookedRangeSet {
    #[must_use]
    pub fn new(ranges: impl IntoIterator<Item = DateRange>) -> Self {
        let mut ranges: Vec<DateRange> = ranges.into_iter().collect();
        ranges.sort_by_key(|r| (r.from, r.to));
        Self { ranges }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[DateRange] {
        &self.ranges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DateRange> {
        self.ranges.iter()
    }

    /// Ranges whose `to` precedes `from`.
    pub fn malformed(&self) -> impl Iterator<Item = &DateRange> {
        self.ranges.iter().filter(|r| !r.is_well_formed())
    }

    /// A copy without the first entry equal to `range`.
    ///
    /// Used when editing a reservation: its own dates must not conflict
    /// with themselves.
    #[must_use]
    pub fn without(&self, range: &DateRange) -> Self {
        let mut ranges = self.ranges.clone();
        if let Some(pos) = ranges.iter().position(|r| r == range) {
            ranges.remove(pos);
        }
        Self { ranges }
    }

    /// Whether any well-formed range contains `day`.
    #[must_use]
    pub fn contains(&self, day: CalendarDate) -> bool {
        self.ranges.iter().any(|r| r.contains(day))
    }

    /// Whether any well-formed range overlaps `span` (inclusive).
    #[must_use]
    pub fn overlaps(&self, span: &DateRange) -> bool {
        self.ranges.iter().any(|r| r.overlaps(span))
    }

    /// Free spans strictly between temporally adjacent bookings.
    ///
    /// Adjacency is measured from the furthest checkout seen so far, so a
    /// booking nested inside another never opens a gap. Back-to-back
    /// bookings (no free day in between) yield nothing. Malformed ranges
    /// are skipped.
    #[must_use]
    pub fn gaps(&self) -> Vec<DateRange> {
        let mut gaps = Vec::new();
        let mut reach: Option<CalendarDate> = None;
        for range in self.ranges.iter().filter(|r| r.is_well_formed()) {
            if let Some(end) = reach
                && let Some(first_free) = end.checked_add_days(Days::new(1))
                && let Some(last_free) = range.from.checked_sub_days(Days::new(1))
                && first_free <= last_free
            {
                gaps.push(DateRange::new(first_free, last_free));
            }
            reach = Some(reach.map_or(range.to, |end| end.max(range.to)));
        }
        gaps
    }
}

impl<'a> IntoIterator for &'a BookedRangeSet {
    type Item = &'a DateRange;
    type IntoIter = std::slice::Iter<'a, DateRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl FromIterator<DateRange> for BookedRangeSet {
    fn from_iter<T: IntoIterator<Item = DateRange>>(iter: T) -> Self {
        Self::new(iter)
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
    fn should_sort_ranges_by_start() {
        let set = BookedRangeSet::new([
            range("2024-06-20", "2024-06-22"),
            range("2024-06-01", "2024-06-03"),
            range("2024-06-10", "2024-06-12"),
        ]);
        let starts: Vec<String> = set.iter().map(|r| r.from.to_string()).collect();
        assert_eq!(starts, ["2024-06-01", "2024-06-10", "2024-06-20"]);
    }

    #[test]
    fn should_find_gap_between_bookings() {
        let set = BookedRangeSet::new([
            range("2024-06-01", "2024-06-03"),
            range("2024-06-05", "2024-06-07"),
        ]);
        assert_eq!(set.gaps(), vec![range("2024-06-04", "2024-06-04")]);
    }

    #[test]
    fn should_not_report_gap_for_back_to_back_bookings() {
        let set = BookedRangeSet::new([
            range("2024-06-01", "2024-06-03"),
            range("2024-06-04", "2024-06-07"),
        ]);
        assert!(set.gaps().is_empty());
    }

    #[test]
    fn should_not_open_gap_inside_a_longer_booking() {
        let set = BookedRangeSet::new([
            range("2024-06-01", "2024-06-20"),
            range("2024-06-05", "2024-06-07"),
            range("2024-06-22", "2024-06-25"),
        ]);
        assert_eq!(set.gaps(), vec![range("2024-06-21", "2024-06-21")]);
    }

    #[test]
    fn should_skip_malformed_ranges() {
        let set = BookedRangeSet::new([
            range("2024-06-01", "2024-06-03"),
            range("2024-06-30", "2024-06-04"),
            range("2024-06-06", "2024-06-07"),
        ]);
        assert_eq!(set.malformed().count(), 1);
        assert_eq!(set.gaps(), vec![range("2024-06-04", "2024-06-05")]);
        assert!(!set.contains(date("2024-06-10")));
    }

    #[test]
    fn should_remove_only_the_matching_entry() {
        let edited = range("2024-06-10", "2024-06-15");
        let set = BookedRangeSet::new([edited, range("2024-06-20", "2024-06-21")]);
        let rest = set.without(&edited);
        assert_eq!(rest.len(), 1);
        assert!(!rest.contains(date("2024-06-12")));
        assert_eq!(set.len(), 2);
    }
}
