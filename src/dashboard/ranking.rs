//! Ranks expense categories by total spend.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    category::{CategoryId, CategoryName},
    transaction::{ResolvedTransaction, TransactionType},
};

/// The number of categories shown in the spending breakdown.
pub const DEFAULT_TOP_CATEGORIES: usize = 6;

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The ID of the category.
    pub category_id: CategoryId,
    /// The display name of the category.
    pub name: CategoryName,
    /// The color token of the category.
    pub color: String,
    /// The sum of expenses tagged with the category.
    pub total: Decimal,
}

/// Get the `count` expense categories with the largest totals, largest first.
///
/// Income and uncategorized expenses are ignored. Categories with equal totals
/// keep the order in which they first appear in `transactions`.
pub fn top_categories(transactions: &[ResolvedTransaction], count: usize) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index_by_id: HashMap<&CategoryId, usize> = HashMap::new();

    for transaction in transactions {
        if transaction.kind() != TransactionType::Expense {
            continue;
        }

        let Some(category) = transaction.category else {
            continue;
        };

        let index = *index_by_id.entry(&category.id).or_insert_with(|| {
            totals.push(CategoryTotal {
                category_id: category.id.clone(),
                name: category.name.clone(),
                color: category.color.clone(),
                total: Decimal::ZERO,
            });
            totals.len() - 1
        });

        totals[index].total += transaction.amount();
    }

    // Stable, so ties stay in first-encounter order.
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals.truncate(count);
    totals
}

/// The percentage of `ytd_expense` that `total` makes up.
///
/// Returns `None` when there were no expenses.
pub fn category_share(total: Decimal, ytd_expense: Decimal) -> Option<Decimal> {
    if ytd_expense > Decimal::ZERO {
        Some(total / ytd_expense * Decimal::ONE_HUNDRED)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        category::{Category, CategoryName},
        dashboard::{DEFAULT_TOP_CATEGORIES, category_share, top_categories},
        transaction::{Transaction, TransactionType, resolve_transactions},
    };

    fn create_category(id: &str, name: &str) -> Category {
        Category::new(
            id,
            CategoryName::new_unchecked(name),
            TransactionType::Expense,
            "#123456",
        )
    }

    fn create_expense(category_id: Option<&str>, amount: Decimal) -> Transaction {
        Transaction::build(TransactionType::Expense, amount, date!(2024 - 01 - 01))
            .category_id(category_id)
            .finalise("t")
    }

    fn ranked_ids(
        transactions: &[Transaction],
        categories: &[Category],
        count: usize,
    ) -> Vec<String> {
        top_categories(&resolve_transactions(transactions, categories), count)
            .into_iter()
            .map(|total| total.category_id.to_string())
            .collect()
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let categories = vec![
            create_category("a", "A"),
            create_category("b", "B"),
            create_category("c", "C"),
        ];
        let transactions = vec![
            create_expense(Some("b"), dec!(10)),
            create_expense(Some("a"), dec!(30)),
            create_expense(Some("c"), dec!(10)),
        ];

        let ranked = top_categories(&resolve_transactions(&transactions, &categories), 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].category_id.as_ref(), "a");
        assert_eq!(ranked[0].total, dec!(30));
        assert_eq!(ranked[0].name.as_ref(), "A");
        assert_eq!(ranked[1].category_id.as_ref(), "b");
        assert_eq!(ranked[1].total, dec!(10));
    }

    #[test]
    fn sums_multiple_expenses_per_category() {
        let categories = vec![
            create_category("food", "Food"),
            create_category("fun", "Fun"),
        ];
        let transactions = vec![
            create_expense(Some("fun"), dec!(25)),
            create_expense(Some("food"), dec!(12.5)),
            create_expense(Some("food"), dec!(12.51)),
        ];

        let ranked = top_categories(
            &resolve_transactions(&transactions, &categories),
            DEFAULT_TOP_CATEGORIES,
        );

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].category_id.as_ref(), "food");
        assert_eq!(ranked[0].total, dec!(25.01));
        assert_eq!(ranked[0].color, "#123456");
        assert_eq!(ranked[1].total, dec!(25));
    }

    #[test]
    fn ignores_income_and_uncategorized_expenses() {
        let categories = vec![create_category("food", "Food")];
        let transactions = vec![
            create_expense(None, dec!(500)),
            create_expense(Some("deleted"), dec!(400)),
            Transaction::build(TransactionType::Income, dec!(300), date!(2024 - 01 - 01))
                .category_id(Some("food"))
                .finalise("income"),
            create_expense(Some("food"), dec!(1)),
        ];

        let ranked = top_categories(&resolve_transactions(&transactions, &categories), 6);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].total, dec!(1));
    }

    #[test]
    fn returns_fewer_than_requested_when_few_categories() {
        let categories = vec![create_category("a", "A")];
        let transactions = vec![create_expense(Some("a"), dec!(1))];

        assert_eq!(ranked_ids(&transactions, &categories, 6), vec!["a"]);
        assert!(ranked_ids(&transactions, &categories, 0).is_empty());
        assert!(ranked_ids(&[], &categories, 6).is_empty());
    }

    #[test]
    fn truncates_to_requested_count() {
        let categories: Vec<Category> = (0..10)
            .map(|i| create_category(&format!("c{i}"), &format!("Category {i}")))
            .collect();
        let transactions: Vec<Transaction> = (0..10)
            .map(|i| create_expense(Some(&format!("c{i}")), Decimal::from(i + 1)))
            .collect();

        let ids = ranked_ids(&transactions, &categories, DEFAULT_TOP_CATEGORIES);

        assert_eq!(ids, vec!["c9", "c8", "c7", "c6", "c5", "c4"]);
    }

    #[test]
    fn repeated_calls_give_identical_output_and_leave_input_unchanged() {
        let categories = vec![
            create_category("a", "A"),
            create_category("b", "B"),
            create_category("c", "C"),
        ];
        let transactions = vec![
            create_expense(Some("c"), dec!(5)),
            create_expense(Some("a"), dec!(7.5)),
            create_expense(Some("b"), dec!(5)),
            create_expense(None, dec!(100)),
        ];
        let resolved = resolve_transactions(&transactions, &categories);
        let original = resolved.clone();

        let first = top_categories(&resolved, DEFAULT_TOP_CATEGORIES);
        let second = top_categories(&resolved, DEFAULT_TOP_CATEGORIES);

        assert_eq!(first, second);
        assert_eq!(resolved, original);
    }

    #[test]
    fn category_share_is_percentage_of_expenses() {
        assert_eq!(category_share(dec!(25), dec!(200)), Some(dec!(12.5)));
        assert_eq!(category_share(dec!(0), dec!(200)), Some(Decimal::ZERO));
    }

    #[test]
    fn category_share_without_expenses_is_none() {
        assert_eq!(category_share(dec!(25), Decimal::ZERO), None);
    }
}
