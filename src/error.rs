//! Defines the crate level error type.

use time::Date;

/// The errors that may occur while loading data or building reports.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A date range was requested where the end comes before the start, or
    /// where one of the bounds falls outside the representable calendar.
    ///
    /// `start` or `end` are `None` when the bound itself could not be computed.
    #[error("invalid date range {start:?} to {end:?}")]
    InvalidRange {
        /// The first day of the requested range.
        start: Option<Date>,
        /// The last day of the requested range.
        end: Option<Date>,
    },

    /// A transaction or category record violates the data contract owed by
    /// the persistence layer, e.g. a negative amount.
    ///
    /// Records are rejected rather than corrected so that sums are never
    /// silently corrupted.
    #[error("invalid record \"{id}\": {reason}")]
    InvalidRecord {
        /// The ID of the offending record.
        id: String,
        /// What is wrong with the record.
        reason: String,
    },

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The input data could not be read.
    #[error("could not read input: {0}")]
    ReadInput(String),

    /// The input data is not valid JSON or does not have the expected shape.
    #[error("could not deserialize JSON: {0}")]
    JSONDeserializationError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// The transactions could not be written as CSV.
    #[error("could not export CSV: {0}")]
    CsvExport(String),

    /// The currency symbol cannot be used for formatting amounts.
    #[error("invalid currency symbol \"{0}\"")]
    InvalidCurrencySymbol(String),
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvExport(value.to_string())
    }
}
