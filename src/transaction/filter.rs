//! Filtering transactions by type, category and free-text search.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    category::CategoryId,
    transaction::{ResolvedTransaction, TransactionType},
};

/// Restricts transactions by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Keep both income and expenses.
    #[default]
    All,
    /// Keep income only.
    Income,
    /// Keep expenses only.
    Expense,
}

impl TypeFilter {
    fn matches(self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionType::Income,
            Self::Expense => kind == TransactionType::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!(
                "unknown transaction type \"{other}\", expected one of all, income or expense"
            )),
        }
    }
}

/// Restricts transactions by category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Keep transactions of any category, including uncategorized ones.
    #[default]
    All,
    /// Keep transactions tagged with exactly this category.
    Only(CategoryId),
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            id => Ok(Self::Only(CategoryId::new(id))),
        }
    }
}

/// The criteria for [filter_transactions]. All criteria must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// The transaction type to keep.
    pub kind: TypeFilter,
    /// The category to keep.
    pub category: CategoryFilter,
    /// Case-insensitive text that must appear in the description.
    ///
    /// `None` and the empty string do not restrict anything.
    pub search_text: Option<String>,
}

impl TransactionFilter {
    /// Whether `transaction` satisfies every criterion.
    pub fn matches(&self, transaction: &ResolvedTransaction) -> bool {
        if !self.kind.matches(transaction.kind()) {
            return false;
        }

        if let CategoryFilter::Only(category_id) = &self.category
            && transaction.category_id() != Some(category_id)
        {
            return false;
        }

        match self.search_text.as_deref() {
            None | Some("") => true,
            Some(search_text) => transaction
                .transaction
                .description
                .as_deref()
                .map(|description| {
                    description
                        .to_lowercase()
                        .contains(&search_text.to_lowercase())
                })
                .unwrap_or(false),
        }
    }
}

/// Get the transactions that match `filter`, in their original order.
pub fn filter_transactions<'a>(
    transactions: &[ResolvedTransaction<'a>],
    filter: &TransactionFilter,
) -> Vec<ResolvedTransaction<'a>> {
    transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .copied()
        .collect()
}
