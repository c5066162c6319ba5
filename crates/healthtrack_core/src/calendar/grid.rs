//! Month grid generation.

use chrono::{Datelike, Duration, NaiveDate};

/// Builds the flattened week-by-week grid for the month containing `month`.
///
/// The grid starts on the Sunday at or before the 1st, covers every day of
/// the month, and is padded forward until the last row is full, so its
/// length is always a multiple of 7. Pure function; any day of the target
/// month may be passed.
pub fn month_grid(month: NaiveDate) -> Vec<NaiveDate> {
    let first = month.with_day(1).unwrap_or(month);
    let last = last_of_month(first);

    let mut cursor = first - Duration::days(i64::from(first.weekday().num_days_from_sunday()));
    let mut grid = Vec::new();
    while cursor <= last || grid.len() % 7 != 0 {
        grid.push(cursor);
        cursor += Duration::days(1);
    }
    grid
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next_first
        .and_then(|day| day.pred_opt())
        .unwrap_or(first)
}
