//! Partitions date ranges into ordered day or month buckets.
//!
//! Buckets only describe time slots and which slot a date falls into, summing
//! amounts is left to the dashboard calculators.

use serde::Serialize;
use time::{Date, Month, util::days_in_year_month};

use crate::Error;

/// The size of the time slots produced by [bucketize].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// One bucket per calendar day.
    Day,
    /// One bucket per calendar month of a year.
    Month,
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket {
    /// The first day in the bucket.
    pub start: Date,
    /// The last day in the bucket.
    pub end: Date,
}

impl Bucket {
    /// A bucket covering a single day.
    pub fn day(date: Date) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Whether `date` falls within this bucket.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Split a date range into ordered buckets.
///
/// For [Granularity::Day] there is one bucket for every day from `range_start`
/// to `range_end` inclusive. For [Granularity::Month] there are always twelve
/// buckets, January to December of the year of `range_start`.
///
/// # Errors
/// Returns [Error::InvalidRange] if `range_end` is before `range_start`.
pub fn bucketize(
    range_start: Date,
    range_end: Date,
    granularity: Granularity,
) -> Result<Vec<Bucket>, Error> {
    if range_end < range_start {
        return Err(Error::InvalidRange {
            start: Some(range_start),
            end: Some(range_end),
        });
    }

    match granularity {
        Granularity::Day => Ok(day_buckets(range_start, range_end)),
        Granularity::Month => month_buckets(range_start.year()),
    }
}

fn day_buckets(range_start: Date, range_end: Date) -> Vec<Bucket> {
    let day_count = (range_end - range_start).whole_days() + 1;
    let mut buckets = Vec::with_capacity(day_count as usize);
    let mut current = Some(range_start);

    while let Some(date) = current.filter(|date| *date <= range_end) {
        buckets.push(Bucket::day(date));
        current = date.next_day();
    }

    buckets
}

/// The twelve months of `year` in calendar order.
///
/// # Errors
/// Returns [Error::InvalidRange] if `year` is outside the supported calendar.
pub fn month_buckets(year: i32) -> Result<Vec<Bucket>, Error> {
    let mut month = Month::January;
    let mut buckets = Vec::with_capacity(12);

    for _ in 0..12 {
        buckets.push(month_bounds(year, month)?);
        month = month.next();
    }

    Ok(buckets)
}

/// The first and last day of `month` in `year`.
///
/// # Errors
/// Returns [Error::InvalidRange] if `year` is outside the supported calendar.
pub fn month_bounds(year: i32, month: Month) -> Result<Bucket, Error> {
    let invalid_range = |_| Error::InvalidRange {
        start: None,
        end: None,
    };
    let start = Date::from_calendar_date(year, month, 1).map_err(invalid_range)?;
    let end = Date::from_calendar_date(year, month, days_in_year_month(year, month))
        .map_err(invalid_range)?;

    Ok(Bucket { start, end })
}

/// The first and last day of `year`.
///
/// # Errors
/// Returns [Error::InvalidRange] if `year` is outside the supported calendar.
pub fn year_bounds(year: i32) -> Result<Bucket, Error> {
    let start = month_bounds(year, Month::January)?.start;
    let end = month_bounds(year, Month::December)?.end;

    Ok(Bucket { start, end })
}

/// Find the bucket that `date` belongs to.
///
/// `buckets` must be ordered and non-overlapping, as produced by [bucketize].
/// Returns `None` if `date` is outside every bucket.
pub fn bucket_index(buckets: &[Bucket], date: Date) -> Option<usize> {
    let index = buckets.partition_point(|bucket| bucket.end < date);

    buckets
        .get(index)
        .filter(|bucket| bucket.contains(date))
        .map(|_| index)
}
