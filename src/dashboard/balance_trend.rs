//! Running balance for each day of a trailing window.

use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, Duration};

use crate::{
    Error,
    bucket::{Granularity, bucketize},
    transaction::ResolvedTransaction,
};

/// The number of days shown in the balance chart.
pub const DEFAULT_TRAILING_DAYS: u16 = 30;

/// The cumulative balance at the end of a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancePoint {
    /// The day of the balance.
    pub date: Date,
    /// All income minus all expenses dated on or before `date`.
    pub balance: Decimal,
}

/// Calculate the running balance for each of the `trailing_days` days ending
/// on `today`, oldest first.
///
/// Each balance includes every transaction dated on or before that day, so
/// transactions before the window still count towards every point.
///
/// # Errors
/// Returns [Error::InvalidRange] if `trailing_days` is zero or the window
/// starts before the supported calendar.
pub fn balance_trend(
    transactions: &[ResolvedTransaction],
    today: Date,
    trailing_days: u16,
) -> Result<Vec<BalancePoint>, Error> {
    let window_start = today
        .checked_sub(Duration::days(i64::from(trailing_days) - 1))
        .ok_or(Error::InvalidRange {
            start: None,
            end: Some(today),
        })?;
    let days = bucketize(window_start, today, Granularity::Day)?;

    let mut signed_amounts: Vec<(Date, Decimal)> = transactions
        .iter()
        .map(|transaction| (transaction.date(), transaction.transaction.signed_amount()))
        .collect();
    signed_amounts.sort_by_key(|(date, _)| *date);

    let mut balance = Decimal::ZERO;
    let mut remaining = signed_amounts.iter().peekable();

    Ok(days
        .into_iter()
        .map(|day| {
            while let Some((_, amount)) = remaining.next_if(|(date, _)| *date <= day.end) {
                balance += *amount;
            }

            BalancePoint {
                date: day.start,
                balance,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::{Date, Duration, macros::date};

    use crate::{
        Error,
        dashboard::{BalancePoint, DEFAULT_TRAILING_DAYS, balance_trend},
        transaction::{ResolvedTransaction, Transaction, TransactionType},
    };

    fn create_test_transaction(kind: TransactionType, amount: Decimal, date: Date) -> Transaction {
        Transaction::build(kind, amount, date).finalise("t")
    }

    fn resolve(transactions: &[Transaction]) -> Vec<ResolvedTransaction<'_>> {
        transactions
            .iter()
            .map(ResolvedTransaction::uncategorized)
            .collect()
    }

    /// Scans every transaction once per day.
    fn naive_balance_trend(transactions: &[Transaction], days: &[Date]) -> Vec<BalancePoint> {
        days.iter()
            .map(|day| BalancePoint {
                date: *day,
                balance: transactions
                    .iter()
                    .filter(|transaction| transaction.date <= *day)
                    .map(Transaction::signed_amount)
                    .sum(),
            })
            .collect()
    }

    fn get_test_transactions() -> Vec<Transaction> {
        vec![
            create_test_transaction(TransactionType::Expense, dec!(12.34), date!(2024 - 03 - 10)),
            create_test_transaction(TransactionType::Income, dec!(1000), date!(2023 - 12 - 25)),
            create_test_transaction(TransactionType::Expense, dec!(0.005), date!(2024 - 03 - 10)),
            create_test_transaction(TransactionType::Income, dec!(50), date!(2024 - 03 - 31)),
            create_test_transaction(TransactionType::Expense, dec!(99.99), date!(2024 - 03 - 02)),
            create_test_transaction(TransactionType::Income, dec!(7), date!(2024 - 04 - 01)),
        ]
    }

    #[test]
    fn returns_consecutive_days_ending_today() {
        let today = date!(2024 - 03 - 31);

        let trend = balance_trend(&[], today, DEFAULT_TRAILING_DAYS).unwrap();

        assert_eq!(trend.len(), 30);
        assert_eq!(trend[0].date, date!(2024 - 03 - 02));
        assert_eq!(trend[29].date, today);
        for pair in trend.windows(2) {
            assert_eq!(pair[0].date + Duration::days(1), pair[1].date);
        }
        assert!(trend.iter().all(|point| point.balance == Decimal::ZERO));
    }

    #[test]
    fn balance_is_cumulative_including_history_before_window() {
        let transactions = get_test_transactions();

        let trend = balance_trend(&resolve(&transactions), date!(2024 - 03 - 31), 30).unwrap();

        // 1000 from December, minus the expense on the first day of the window.
        assert_eq!(trend[0].balance, dec!(900.01));
        assert_eq!(trend[7].date, date!(2024 - 03 - 09));
        assert_eq!(trend[7].balance, dec!(900.01));
        assert_eq!(trend[8].date, date!(2024 - 03 - 10));
        assert_eq!(trend[8].balance, dec!(887.665));
        assert_eq!(trend[29].balance, dec!(937.665));
    }

    #[test]
    fn ignores_transactions_after_today() {
        let tomorrow = date!(2024 - 04 - 01);
        let income = create_test_transaction(TransactionType::Income, dec!(5), tomorrow);
        let transactions = vec![income];

        let trend = balance_trend(&resolve(&transactions), date!(2024 - 03 - 31), 3).unwrap();

        assert!(trend.iter().all(|point| point.balance == Decimal::ZERO));
    }

    #[test]
    fn matches_scan_per_day_for_any_order() {
        let mut transactions = get_test_transactions();
        let today = date!(2024 - 04 - 02);
        let days: Vec<Date> = (0..45)
            .rev()
            .map(|offset| today - Duration::days(offset))
            .collect();
        let expected = naive_balance_trend(&transactions, &days);

        for _ in 0..transactions.len() {
            let trend = balance_trend(&resolve(&transactions), today, 45).unwrap();
            assert_eq!(trend, expected);
            transactions.rotate_left(1);
        }

        transactions.reverse();
        let trend = balance_trend(&resolve(&transactions), today, 45).unwrap();
        assert_eq!(trend, expected);
    }

    #[test]
    fn repeated_calls_give_identical_output() {
        let transactions = get_test_transactions();
        let resolved = resolve(&transactions);

        let first = balance_trend(&resolved, date!(2024 - 03 - 31), 30).unwrap();
        let second = balance_trend(&resolved, date!(2024 - 03 - 31), 30).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn zero_day_window_is_invalid() {
        let result = balance_trend(&[], date!(2024 - 03 - 31), 0);

        assert!(matches!(result, Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn single_day_window_returns_today() {
        let trend = balance_trend(&[], date!(2024 - 03 - 31), 1).unwrap();

        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].date, date!(2024 - 03 - 31));
    }
}
