//! Transactions and the views derived directly from a list of them.
//!
//! This module contains:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The join step that pairs transactions with their categories
//! - Filtering by type, category and search text
//! - The recent transactions list

mod core;
mod filter;
mod recent;
mod resolved;

pub use core::{
    Transaction, TransactionBuilder, TransactionId, TransactionType, parse_calendar_date,
};
pub use filter::{CategoryFilter, TransactionFilter, TypeFilter, filter_transactions};
pub use recent::{DEFAULT_RECENT_COUNT, recent_transactions};
pub use resolved::{ResolvedTransaction, resolve_transactions};
