//! Inclusive date ranges and the two-tap selection state machine.

use chrono::{Datelike, Duration, NaiveDate};

/// Inclusive calendar-date interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range from two days in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// One-day range.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive membership test on both ends.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Every day of the range in order, both ends included.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut cursor = self.start;
        while cursor <= self.end {
            days.push(cursor);
            cursor += Duration::days(1);
        }
        days
    }

    /// Number of days covered, counting both ends.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Two-tap selection progress on the calendar sheet.
///
/// First tap fixes a pending start; the second completes the range,
/// swapping when the user taps backwards. A third tap starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeSelection {
    #[default]
    Empty,
    PendingEnd {
        start: NaiveDate,
    },
    Complete {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl RangeSelection {
    /// Advances the state machine with a tapped day.
    pub fn tap(self, day: NaiveDate) -> Self {
        match self {
            RangeSelection::Empty | RangeSelection::Complete { .. } => {
                RangeSelection::PendingEnd { start: day }
            }
            RangeSelection::PendingEnd { start } => {
                if day < start {
                    RangeSelection::Complete {
                        start: day,
                        end: start,
                    }
                } else {
                    RangeSelection::Complete { start, end: day }
                }
            }
        }
    }

    /// Range to apply for the current state.
    ///
    /// A lone pending start applies as a one-day range; nothing selected
    /// applies as nothing.
    pub fn resolve(&self) -> Option<DateRange> {
        match self {
            RangeSelection::Empty => None,
            RangeSelection::PendingEnd { start } => Some(DateRange::single(*start)),
            RangeSelection::Complete { start, end } => Some(DateRange::new(*start, *end)),
        }
    }

    /// Day currently highlighted as the range start, if any.
    pub fn start(&self) -> Option<NaiveDate> {
        match self {
            RangeSelection::Empty => None,
            RangeSelection::PendingEnd { start } | RangeSelection::Complete { start, .. } => {
                Some(*start)
            }
        }
    }
}

/// Quick-pick shortcuts shown above the calendar sheet.
///
/// Presets bypass the tap state machine and set the range directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    Today,
    Yesterday,
    LastSevenDays,
    MonthToDate,
    YearToDate,
}

impl RangePreset {
    /// Display label as the app shows it.
    pub fn label(&self) -> &'static str {
        match self {
            RangePreset::Today => "Hôm nay",
            RangePreset::Yesterday => "Hôm qua",
            RangePreset::LastSevenDays => "7 ngày qua",
            RangePreset::MonthToDate => "Tháng này",
            RangePreset::YearToDate => "Năm này",
        }
    }

    /// Resolves the preset against the current day.
    ///
    /// Every preset ends at `today`; yesterday keeps today as the end so
    /// the strip still shows the current day.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self {
            RangePreset::Today => DateRange::single(today),
            RangePreset::Yesterday => DateRange::new(today - Duration::days(1), today),
            RangePreset::LastSevenDays => DateRange::new(today - Duration::days(6), today),
            RangePreset::MonthToDate => DateRange::new(today.with_day(1).unwrap_or(today), today),
            RangePreset::YearToDate => DateRange::new(
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
                today,
            ),
        }
    }

    /// All presets in display order.
    pub const ALL: [RangePreset; 5] = [
        RangePreset::Today,
        RangePreset::Yesterday,
        RangePreset::LastSevenDays,
        RangePreset::MonthToDate,
        RangePreset::YearToDate,
    ];
}

/// Range the tracker opens with: the last seven days.
pub fn default_range(today: NaiveDate) -> DateRange {
    RangePreset::LastSevenDays.resolve(today)
}

#[cfg(test)]
mod tests {
    use super::{default_range, DateRange, RangePreset, RangeSelection};
    use chrono::NaiveDate;

    fn day(year: i32, month: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, d).unwrap()
    }

    #[test]
    fn constructor_normalizes_order() {
        let range = DateRange::new(day(2025, 6, 20), day(2025, 6, 5));
        assert_eq!(range.start(), day(2025, 6, 5));
        assert_eq!(range.end(), day(2025, 6, 20));
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let range = DateRange::new(day(2025, 6, 5), day(2025, 6, 10));

        assert!(range.contains(day(2025, 6, 5)));
        assert!(range.contains(day(2025, 6, 10)));
        assert!(range.contains(day(2025, 6, 7)));
        assert!(!range.contains(day(2025, 6, 4)));
        assert!(!range.contains(day(2025, 6, 11)));
    }

    #[test]
    fn days_walks_the_inclusive_strip() {
        let range = DateRange::new(day(2025, 6, 28), day(2025, 7, 2));
        let days = range.days();

        assert_eq!(days.len(), 5);
        assert_eq!(range.len_days(), 5);
        assert_eq!(days.first().copied(), Some(day(2025, 6, 28)));
        assert_eq!(days.last().copied(), Some(day(2025, 7, 2)));
    }

    #[test]
    fn first_tap_sets_pending_start() {
        let state = RangeSelection::Empty.tap(day(2025, 6, 10));
        assert_eq!(
            state,
            RangeSelection::PendingEnd {
                start: day(2025, 6, 10)
            }
        );
    }

    #[test]
    fn backwards_second_tap_swaps_the_ends() {
        let state = RangeSelection::Empty
            .tap(day(2025, 6, 10))
            .tap(day(2025, 6, 5));

        assert_eq!(
            state,
            RangeSelection::Complete {
                start: day(2025, 6, 5),
                end: day(2025, 6, 10)
            }
        );
    }

    #[test]
    fn forward_second_tap_completes_in_order() {
        let state = RangeSelection::Empty
            .tap(day(2025, 6, 5))
            .tap(day(2025, 6, 10));

        assert_eq!(
            state,
            RangeSelection::Complete {
                start: day(2025, 6, 5),
                end: day(2025, 6, 10)
            }
        );
    }

    #[test]
    fn tap_after_complete_starts_a_new_selection() {
        let state = RangeSelection::Empty
            .tap(day(2025, 6, 5))
            .tap(day(2025, 6, 10))
            .tap(day(2025, 6, 20));

        assert_eq!(
            state,
            RangeSelection::PendingEnd {
                start: day(2025, 6, 20)
            }
        );
    }

    #[test]
    fn resolve_turns_pending_start_into_single_day() {
        assert_eq!(RangeSelection::Empty.resolve(), None);
        assert_eq!(
            RangeSelection::Empty.tap(day(2025, 6, 8)).resolve(),
            Some(DateRange::single(day(2025, 6, 8)))
        );
    }

    #[test]
    fn presets_resolve_against_a_fixed_today() {
        let today = day(2025, 6, 15);

        assert_eq!(
            RangePreset::Today.resolve(today),
            DateRange::single(today)
        );
        assert_eq!(
            RangePreset::Yesterday.resolve(today),
            DateRange::new(day(2025, 6, 14), today)
        );
        assert_eq!(
            RangePreset::LastSevenDays.resolve(today),
            DateRange::new(day(2025, 6, 9), today)
        );
        assert_eq!(
            RangePreset::MonthToDate.resolve(today),
            DateRange::new(day(2025, 6, 1), today)
        );
        assert_eq!(
            RangePreset::YearToDate.resolve(today),
            DateRange::new(day(2025, 1, 1), today)
        );
        assert_eq!(default_range(today), DateRange::new(day(2025, 6, 9), today));
    }
}
