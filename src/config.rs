//! Settings for building a report.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    dashboard::{DEFAULT_TOP_CATEGORIES, DEFAULT_TRAILING_DAYS},
    timezone::today_in_timezone,
    transaction::DEFAULT_RECENT_COUNT,
};

/// The timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// The currency symbol used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Controls which windows and how many entries a report contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// The canonical timezone name used to decide what "today" is,
    /// e.g. "Pacific/Auckland".
    pub timezone: String,
    /// The number of days in the balance chart, ending today.
    pub trailing_days: u16,
    /// The number of categories in the spending breakdown.
    pub top_categories: usize,
    /// The number of entries in the recent transactions list.
    pub recent_count: usize,
    /// The year of the monthly rollup, the current year if `None`.
    pub year: Option<i32>,
    /// The symbol placed before amounts in the text report.
    pub currency_symbol: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_owned(),
            trailing_days: DEFAULT_TRAILING_DAYS,
            top_categories: DEFAULT_TOP_CATEGORIES,
            recent_count: DEFAULT_RECENT_COUNT,
            year: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_owned(),
        }
    }
}

impl ReportConfig {
    /// Read settings from a JSON object. Missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns an [Error::JSONDeserializationError] if the reader fails or a
    /// field has the wrong type.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader)
            .map_err(|error| Error::JSONDeserializationError(error.to_string()))
    }

    /// Read settings from the JSON file at `path`, see [ReportConfig::from_reader].
    ///
    /// # Errors
    /// Returns an [Error::ReadInput] if the file cannot be opened, otherwise
    /// the same errors as [ReportConfig::from_reader].
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|error| {
            tracing::error!("Could not open {}: {error}", path.display());
            Error::ReadInput(format!("{}: {error}", path.display()))
        })?;

        let config = Self::from_reader(BufReader::new(file))?;
        tracing::debug!("Loaded report settings from {}", path.display());

        Ok(config)
    }

    /// The local date in the configured timezone at the instant `now`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the timezone is unknown.
    pub fn today(&self, now: OffsetDateTime) -> Result<Date, Error> {
        today_in_timezone(&self.timezone, now)
    }

    /// The year to roll up, falling back to the year of `today`.
    pub fn rollup_year(&self, today: Date) -> i32 {
        self.year.unwrap_or(today.year())
    }
}
