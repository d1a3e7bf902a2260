//! The most recent transactions shown on the dashboard.

use std::cmp::Reverse;

use crate::transaction::ResolvedTransaction;

/// The number of transactions shown in the recent transactions list.
pub const DEFAULT_RECENT_COUNT: usize = 5;

/// Get up to `count` transactions ordered from newest to oldest.
///
/// Transactions on the same day keep their input order.
pub fn recent_transactions<'a>(
    transactions: &[ResolvedTransaction<'a>],
    count: usize,
) -> Vec<ResolvedTransaction<'a>> {
    let mut recent = transactions.to_vec();
    recent.sort_by_key(|transaction| Reverse(transaction.date()));
    recent.truncate(count);
    recent
}
