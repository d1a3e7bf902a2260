//! Totals, balance and savings rate over a set of transactions.

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    bucket::month_bounds,
    transaction::{ResolvedTransaction, TransactionType},
};

/// Income and expense totals for a set of transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// The sum of all income.
    pub total_income: Decimal,
    /// The sum of all expenses.
    pub total_expense: Decimal,
    /// Income minus expenses, may be negative.
    pub balance: Decimal,
    /// Income minus expenses, the same value as `balance`.
    pub net: Decimal,
    /// The percentage of income that was not spent, see [savings_rate].
    pub savings_rate: Decimal,
}

/// The headline figures on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// The all-time balance.
    pub balance: Decimal,
    /// Income during the month containing today.
    pub month_income: Decimal,
    /// Expenses during the month containing today.
    pub month_expense: Decimal,
}

/// The percentage of `income` that was not spent.
///
/// Returns zero when there is no income rather than dividing by zero. The rate
/// is negative when more was spent than earned.
pub fn savings_rate(income: Decimal, expense: Decimal) -> Decimal {
    if income > Decimal::ZERO {
        (income - expense) / income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Sum income and expenses over `transactions`.
pub fn summarize(transactions: &[ResolvedTransaction]) -> Summary {
    let (total_income, total_expense) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), transaction| match transaction.kind() {
            TransactionType::Income => (income + transaction.amount(), expense),
            TransactionType::Expense => (income, expense + transaction.amount()),
        },
    );
    let balance = total_income - total_expense;

    Summary {
        total_income,
        total_expense,
        balance,
        net: balance,
        savings_rate: savings_rate(total_income, total_expense),
    }
}

/// Sum income and expenses over the transactions dated between `month_start`
/// and `month_end` inclusive.
///
/// An empty range (end before start) gives an all-zero summary.
pub fn summarize_for_month(
    transactions: &[ResolvedTransaction],
    month_start: Date,
    month_end: Date,
) -> Summary {
    let in_month: Vec<ResolvedTransaction> = transactions
        .iter()
        .filter(|transaction| month_start <= transaction.date() && transaction.date() <= month_end)
        .copied()
        .collect();

    summarize(&in_month)
}

/// Get the dashboard headline figures as of `today`.
///
/// # Errors
/// Returns [Error::InvalidRange] if the month of `today` is outside the
/// supported calendar.
pub fn dashboard_stats(
    transactions: &[ResolvedTransaction],
    today: Date,
) -> Result<DashboardStats, Error> {
    let this_month = month_bounds(today.year(), today.month())?;
    let all_time = summarize(transactions);
    let month = summarize_for_month(transactions, this_month.start, this_month.end);

    Ok(DashboardStats {
        balance: all_time.balance,
        month_income: month.total_income,
        month_expense: month.total_expense,
    })
}
