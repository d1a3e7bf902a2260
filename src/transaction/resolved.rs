//! Joins transactions with the categories they reference.

use std::collections::HashMap;

use rust_decimal::Decimal;
use time::Date;

use crate::{
    category::{Category, CategoryId},
    transaction::{Transaction, TransactionType},
};

/// A transaction paired with the category it references, if that category exists.
///
/// A transaction whose `category_id` points at a deleted category is treated
/// the same as an uncategorized transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTransaction<'a> {
    /// The transaction as stored.
    pub transaction: &'a Transaction,
    /// The category the transaction is tagged with.
    pub category: Option<&'a Category>,
}

impl<'a> ResolvedTransaction<'a> {
    /// A transaction without any category information.
    pub fn uncategorized(transaction: &'a Transaction) -> Self {
        Self {
            transaction,
            category: None,
        }
    }

    /// The ID of the resolved category, `None` for uncategorized or dangling references.
    pub fn category_id(&self) -> Option<&'a CategoryId> {
        self.category.map(|category| &category.id)
    }

    /// Shortcut for the transaction type.
    pub fn kind(&self) -> TransactionType {
        self.transaction.kind
    }

    /// Shortcut for the transaction amount.
    pub fn amount(&self) -> Decimal {
        self.transaction.amount
    }

    /// Shortcut for the transaction date.
    pub fn date(&self) -> Date {
        self.transaction.date
    }
}

/// Pair each transaction with its category.
///
/// The output has the same length and order as `transactions`. Neither input
/// is modified.
pub fn resolve_transactions<'a>(
    transactions: &'a [Transaction],
    categories: &'a [Category],
) -> Vec<ResolvedTransaction<'a>> {
    let categories_by_id: HashMap<&CategoryId, &Category> = categories
        .iter()
        .map(|category| (&category.id, category))
        .collect();

    let resolved: Vec<ResolvedTransaction> = transactions
        .iter()
        .map(|transaction| ResolvedTransaction {
            transaction,
            category: transaction
                .category_id
                .as_ref()
                .and_then(|category_id| categories_by_id.get(category_id).copied()),
        })
        .collect();

    let dangling_count = resolved
        .iter()
        .filter(|resolved| {
            resolved.transaction.category_id.is_some() && resolved.category.is_none()
        })
        .count();

    if dangling_count > 0 {
        tracing::debug!("{dangling_count} transactions reference missing categories");
    }

    resolved
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        category::{Category, CategoryName},
        transaction::{Transaction, TransactionType, resolve_transactions},
    };

    #[test]
    fn attaches_matching_category() {
        let categories = vec![Category::new(
            "rent",
            CategoryName::new_unchecked("Rent"),
            TransactionType::Expense,
            "#f00",
        )];
        let transactions = vec![
            Transaction::build(TransactionType::Expense, dec!(800), date!(2024 - 01 - 01))
                .category_id(Some("rent"))
                .finalise("t1"),
            Transaction::build(TransactionType::Income, dec!(50), date!(2024 - 01 - 02))
                .finalise("t2"),
        ];

        let resolved = resolve_transactions(&transactions, &categories);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].category, Some(&categories[0]));
        assert_eq!(
            resolved[0].category_id().map(|id| id.as_ref()),
            Some("rent")
        );
        assert_eq!(resolved[1].category, None);
        assert_eq!(resolved[1].transaction.id.as_ref(), "t2");
    }

    #[test]
    fn dangling_reference_is_uncategorized() {
        let transactions = vec![
            Transaction::build(TransactionType::Expense, dec!(10), date!(2024 - 01 - 01))
                .category_id(Some("deleted"))
                .finalise("t1"),
        ];

        let resolved = resolve_transactions(&transactions, &[]);

        assert_eq!(resolved[0].category, None);
        assert_eq!(resolved[0].category_id(), None);
    }

    #[test]
    fn tolerates_mismatched_category_type() {
        let categories = vec![Category::new(
            "salary",
            CategoryName::new_unchecked("Salary"),
            TransactionType::Income,
            "#0f0",
        )];
        let transactions = vec![
            Transaction::build(TransactionType::Expense, dec!(10), date!(2024 - 01 - 01))
                .category_id(Some("salary"))
                .finalise("t1"),
        ];

        let resolved = resolve_transactions(&transactions, &categories);

        assert_eq!(resolved[0].category, Some(&categories[0]));
    }
}
