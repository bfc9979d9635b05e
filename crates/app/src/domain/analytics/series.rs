//! Window arithmetic and daily series helpers.

use jiff::{SignedDuration, Timestamp, ToSpan, civil::Date, tz::TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};
use rustc_hash::FxHashMap;

use crate::domain::analytics::models::DailyValue;

/// Length of the trailing analysis window in days.
pub const WINDOW_DAYS: i64 = 30;

/// Bounds of the analysis window: `(start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Window {
    /// The 30 days leading up to and including `point_in_time`.
    ///
    /// # Errors
    ///
    /// Returns an error if the start of the window is before the minimum timestamp.
    pub fn ending_at(point_in_time: Timestamp) -> Result<Self, jiff::Error> {
        let start = point_in_time.checked_sub(SignedDuration::from_hours(WINDOW_DAYS * 24))?;

        Ok(Self {
            start,
            end: point_in_time,
        })
    }

    /// The UTC calendar days the window touches, oldest first: `today - 30 ..= today`.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let first = self.start.to_zoned(TimeZone::UTC).date();
        let last = self.end.to_zoned(TimeZone::UTC).date();

        first.series(1.day()).take_while(move |day| *day <= last)
    }
}

/// Expand a sparse day series into one point per window day, filling gaps with zero.
pub fn fill_missing_days<T>(window: &Window, sparse: &[DailyValue<T>]) -> Vec<DailyValue<T>>
where
    T: Copy + Default,
{
    let known: FxHashMap<Date, T> = sparse.iter().map(|point| (point.day, point.value)).collect();

    window
        .days()
        .map(|day| DailyValue {
            day,
            value: known.get(&day).copied().unwrap_or_default(),
        })
        .collect()
}

/// Arithmetic mean rounded to cents; `None` when empty.
pub fn average(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    let sum: Decimal = values.iter().sum();

    Some(to_cents(sum / Decimal::from(values.len())))
}

/// Median rounded to cents; the mean of the middle pair for even counts.
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let middle = sorted.len() / 2;

    let value = if sorted.len().is_multiple_of(2) {
        let low = sorted.get(middle.checked_sub(1)?)?;
        let high = sorted.get(middle)?;

        (low + high) / Decimal::TWO
    } else {
        *sorted.get(middle)?
    };

    Some(to_cents(value))
}

/// Apply `aggregate` to each day's values, keeping only days that produce a value.
pub fn per_day<F>(values: &[DailyValue<Decimal>], aggregate: F) -> Vec<DailyValue<Decimal>>
where
    F: Fn(&[Decimal]) -> Option<Decimal>,
{
    let mut grouped: FxHashMap<Date, Vec<Decimal>> = FxHashMap::default();

    for point in values {
        grouped.entry(point.day).or_default().push(point.value);
    }

    let mut days: Vec<DailyValue<Decimal>> = grouped
        .into_iter()
        .filter_map(|(day, values)| aggregate(&values).map(|value| DailyValue { day, value }))
        .collect();

    days.sort_unstable_by_key(|point| point.day);

    days
}

/// Day with the lowest (`want_max == false`) or highest count; ties go to the earliest day.
pub fn extreme_day(counts: &[DailyValue<u64>], want_max: bool) -> Option<DailyValue<u64>> {
    counts.iter().copied().reduce(|best, candidate| {
        let better = if want_max {
            candidate.value > best.value
        } else {
            candidate.value < best.value
        };

        if better || (candidate.value == best.value && candidate.day < best.day) {
            candidate
        } else {
            best
        }
    })
}

fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
