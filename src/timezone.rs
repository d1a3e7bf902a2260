//! Resolves "today" for a canonical timezone name.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the UTC offset of `canonical_timezone` at the instant `now`.
///
/// Returns `None` if `canonical_timezone` is not a known IANA timezone name,
/// e.g. "Pacific/Auckland".
pub fn get_local_offset(canonical_timezone: &str, now: OffsetDateTime) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone).map(|tz| tz.get_offset_utc(&now).to_utc())
}

/// Get the calendar date in `canonical_timezone` at the instant `now`.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if the timezone name is unknown.
pub fn today_in_timezone(canonical_timezone: &str, now: OffsetDateTime) -> Result<Date, Error> {
    let offset = get_local_offset(canonical_timezone, now)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))?;

    Ok(now.to_offset(offset).date())
}
