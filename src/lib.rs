//! Budget insights turns a list of income and expense transactions into the
//! figures shown on a personal finance dashboard.
//!
//! The calculations are pure functions over borrowed slices: filtering,
//! day and month bucketing, running balances, monthly rollups, category
//! rankings and summary statistics. Loading data, resolving the current date
//! and rendering output live at the edges of the crate.
//!
//! Amounts are [rust_decimal::Decimal] and dates are [time::Date], so sums are
//! exact and independent of the order of the input.

#![warn(missing_docs)]

pub mod bucket;
pub mod category;
pub mod config;
pub mod csv_export;
pub mod dashboard;
pub mod dataset;
mod error;
pub mod logging;
pub mod report;
pub mod timezone;
pub mod transaction;

pub use category::{Category, CategoryId, CategoryName};
pub use config::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_TIMEZONE, ReportConfig};
pub use csv_export::{default_export_file_name, export_csv, to_csv_string};
pub use dashboard::{DEFAULT_TOP_CATEGORIES, DEFAULT_TRAILING_DAYS};
pub use dataset::Dataset;
pub use error::Error;
pub use logging::init_logging;
pub use report::Report;
pub use transaction::{
    CategoryFilter, DEFAULT_RECENT_COUNT, ResolvedTransaction, Transaction, TransactionFilter,
    TransactionType, TypeFilter, filter_transactions, resolve_transactions,
};
