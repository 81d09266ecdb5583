//! Interval allocation primitives
//!
//! Pure functions of dates, shared by the schedule curve and the monthly
//! budget pro-rating. Day counts are inclusive on both ends: a range
//! from the 1st to the 10th is ten days.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Inclusive day count of a range; non-positive when `end < start`.
pub fn range_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Inclusive day count of the intersection of a range and a window;
/// non-positive when they do not intersect.
pub fn overlap_days(
    range_start: NaiveDate,
    range_end: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> i64 {
    let start = range_start.max(window_start);
    let end = range_end.min(window_end);
    (end - start).num_days() + 1
}

/// Fraction of a date range that falls inside a calendar window, in
/// [0, 1]. Zero when the range is empty/inverted or does not overlap
/// the window.
pub fn overlap_fraction(
    range_start: NaiveDate,
    range_end: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> f64 {
    let total = range_days(range_start, range_end);
    if total <= 0 {
        return 0.0;
    }
    let overlap = overlap_days(range_start, range_end, window_start, window_end).max(0);
    overlap as f64 / total as f64
}

/// [`overlap_fraction`] at monetary precision: a `Decimal` ratio with
/// four decimal places, half-up. Used for budget pro-rating.
pub fn overlap_ratio(
    range_start: NaiveDate,
    range_end: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Decimal {
    let total = range_days(range_start, range_end);
    if total <= 0 {
        return Decimal::ZERO;
    }
    let overlap = overlap_days(range_start, range_end, window_start, window_end).max(0);
    (Decimal::from(overlap) / Decimal::from(total))
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Straight-line planned progress of a range at a given date, in
/// [0, 100]: 0 before the range starts, 100 after it ends, linear in
/// between. Inverted or zero-length ranges yield 0.
pub fn planned_progress_at(range_start: NaiveDate, range_end: NaiveDate, as_of: NaiveDate) -> f64 {
    if range_end < range_start {
        return 0.0;
    }
    if as_of < range_start {
        return 0.0;
    }
    if as_of > range_end {
        return 100.0;
    }
    let total = (range_end - range_start).num_days();
    if total <= 0 {
        return 0.0;
    }
    let elapsed = (as_of - range_start).num_days();
    100.0 * elapsed as f64 / total as f64
}
