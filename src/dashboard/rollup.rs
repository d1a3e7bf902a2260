//! Monthly income and expense totals for a calendar year.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use time::Month;

use crate::{
    Error,
    bucket::{Granularity, bucketize, year_bounds},
    dashboard::summary::savings_rate,
    transaction::{ResolvedTransaction, TransactionType},
};

/// Income and expense totals for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// The month of the totals.
    #[serde(serialize_with = "serialize_month_label")]
    pub month: Month,
    /// The sum of income during the month.
    pub income: Decimal,
    /// The sum of expenses during the month.
    pub expense: Decimal,
}

impl MonthlyTotals {
    fn empty(month: Month) -> Self {
        Self {
            month,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        }
    }

    fn has_activity(&self) -> bool {
        self.income > Decimal::ZERO || self.expense > Decimal::ZERO
    }
}

/// The month-by-month breakdown of a year and its year-to-date statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyRollup {
    /// The calendar year of the rollup.
    pub year: i32,
    /// Exactly twelve entries, January to December.
    pub months: Vec<MonthlyTotals>,
    /// The sum of income since the start of the year.
    pub ytd_income: Decimal,
    /// The sum of expenses since the start of the year.
    pub ytd_expense: Decimal,
    /// Income averaged over the months with any income or expenses.
    pub avg_monthly_income: Decimal,
    /// Expenses averaged over the months with any income or expenses.
    pub avg_monthly_expense: Decimal,
    /// The percentage of the year's income that was not spent.
    pub savings_rate: Decimal,
}

/// Get the transactions dated on or after the first day of `year`, in their
/// original order.
///
/// There is no upper bound, so transactions dated in later years are kept.
///
/// # Errors
/// Returns [Error::InvalidRange] if `year` is outside the supported calendar.
pub fn year_to_date_transactions<'a>(
    transactions: &[ResolvedTransaction<'a>],
    year: i32,
) -> Result<Vec<ResolvedTransaction<'a>>, Error> {
    let year_start = year_bounds(year)?.start;

    Ok(transactions
        .iter()
        .filter(|transaction| transaction.date() >= year_start)
        .copied()
        .collect())
}

/// Sum income and expenses per calendar month, starting from `year`.
///
/// Transactions before the first day of `year` are ignored. Every other
/// transaction is added to the entry for its calendar month, including
/// transactions dated in later years. Months without transactions are
/// reported as zero so there are always twelve entries. Averages only count
/// months with activity, with a minimum of one month.
///
/// # Errors
/// Returns [Error::InvalidRange] if `year` is outside the supported calendar.
pub fn yearly_monthly_rollup(
    transactions: &[ResolvedTransaction],
    year: i32,
) -> Result<YearlyRollup, Error> {
    let bounds = year_bounds(year)?;
    let buckets = bucketize(bounds.start, bounds.end, Granularity::Month)?;
    let mut months: Vec<MonthlyTotals> = buckets
        .iter()
        .map(|bucket| MonthlyTotals::empty(bucket.start.month()))
        .collect();

    let mut ytd_income = Decimal::ZERO;
    let mut ytd_expense = Decimal::ZERO;

    for transaction in transactions {
        if transaction.date() < bounds.start {
            continue;
        }

        let index = usize::from(u8::from(transaction.date().month())) - 1;

        match transaction.kind() {
            TransactionType::Income => {
                months[index].income += transaction.amount();
                ytd_income += transaction.amount();
            }
            TransactionType::Expense => {
                months[index].expense += transaction.amount();
                ytd_expense += transaction.amount();
            }
        }
    }

    let active_months = months.iter().filter(|month| month.has_activity()).count();
    let divisor = Decimal::from(active_months.max(1));

    Ok(YearlyRollup {
        year,
        ytd_income,
        ytd_expense,
        avg_monthly_income: ytd_income / divisor,
        avg_monthly_expense: ytd_expense / divisor,
        savings_rate: savings_rate(ytd_income, ytd_expense),
        months,
    })
}

/// Formats a month as a three-letter abbreviation, e.g. "Jan".
pub fn month_label(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

fn serialize_month_label<S>(month: &Month, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(month_label(*month))
}
