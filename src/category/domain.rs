//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    transaction::{Transaction, TransactionType},
};

/// Opaque identifier for a category, assigned by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Create a category ID from the identifier used by the store.
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for CategoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidRecord] if `name` is empty
    /// or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::InvalidRecord {
                id: String::new(),
                reason: "category name cannot be empty".to_owned(),
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because
    /// an empty name causes incorrect behaviour but does not affect memory
    /// safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl TryFrom<String> for CategoryName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryName::new(&value)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn default_icon() -> String {
    "circle".to_owned()
}

/// A label for grouping transactions (e.g., 'Groceries', 'Salary').
///
/// A category only applies to transactions of the same [TransactionType].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name of the category.
    pub name: CategoryName,
    /// Whether the category is used for income or expenses.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// A color token used when rendering the category, e.g. "#22c55e".
    pub color: String,
    /// An icon token used when rendering the category.
    #[serde(default = "default_icon")]
    pub icon: String,
}

impl Category {
    /// Create a new category with the default icon.
    pub fn new(id: &str, name: CategoryName, kind: TransactionType, color: &str) -> Self {
        Self {
            id: CategoryId::new(id),
            name,
            kind,
            color: color.to_owned(),
            icon: default_icon(),
        }
    }

    /// Whether this category is a valid tag for `transaction`.
    ///
    /// Mismatched tags may still appear in data produced upstream and are
    /// tolerated by the dashboard calculations.
    pub fn accepts(&self, transaction: &Transaction) -> bool {
        self.kind == transaction.kind
    }
}

/// Get the categories that can be used to tag transactions of type `kind`.
///
/// The categories are returned in the same order as `categories`.
pub fn categories_of_type(categories: &[Category], kind: TransactionType) -> Vec<&Category> {
    categories
        .iter()
        .filter(|category| category.kind == kind)
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        category::{Category, CategoryName, categories_of_type},
        transaction::{Transaction, TransactionType},
    };

    #[test]
    fn new_fails_on_empty_string() {
        let category_name = CategoryName::new("");

        assert!(matches!(category_name, Err(Error::InvalidRecord { .. })));
    }

    #[test]
    fn new_fails_on_whitespace() {
        let category_name = CategoryName::new("   ");

        assert!(matches!(category_name, Err(Error::InvalidRecord { .. })));
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let category_name = CategoryName::new("🔥");

        assert!(category_name.is_ok())
    }

    #[test]
    fn deserializing_empty_name_fails() {
        let result = serde_json::from_str::<Category>(
            r##"{"id": "c1", "name": "", "type": "expense", "color": "#fff"}"##,
        );

        assert!(result.is_err());
    }

    #[test]
    fn deserializing_without_icon_uses_default() {
        let category = serde_json::from_str::<Category>(
            r##"{"id": "c1", "name": "Rent", "type": "expense", "color": "#fff"}"##,
        )
        .unwrap();

        assert_eq!(category.icon, "circle");
        assert_eq!(category.kind, TransactionType::Expense);
    }

    #[test]
    fn accepts_transaction_of_same_type() {
        let category = Category::new(
            "c1",
            CategoryName::new_unchecked("Salary"),
            TransactionType::Income,
            "#22c55e",
        );
        let income = Transaction::build(TransactionType::Income, dec!(10), date!(2024 - 01 - 01))
            .finalise("t1");
        let expense = Transaction::build(TransactionType::Expense, dec!(10), date!(2024 - 01 - 01))
            .finalise("t2");

        assert!(category.accepts(&income));
        assert!(!category.accepts(&expense));
    }

    #[test]
    fn categories_of_type_preserves_order() {
        let categories = vec![
            Category::new(
                "c1",
                CategoryName::new_unchecked("Rent"),
                TransactionType::Expense,
                "#f00",
            ),
            Category::new(
                "c2",
                CategoryName::new_unchecked("Salary"),
                TransactionType::Income,
                "#0f0",
            ),
            Category::new(
                "c3",
                CategoryName::new_unchecked("Food"),
                TransactionType::Expense,
                "#00f",
            ),
        ];

        let expense_categories = categories_of_type(&categories, TransactionType::Expense);
        let income_categories = categories_of_type(&categories, TransactionType::Income);

        let expense_ids: Vec<&str> = expense_categories.iter().map(|c| c.id.as_ref()).collect();
        assert_eq!(expense_ids, vec!["c1", "c3"]);
        assert_eq!(income_categories.len(), 1);
        assert_eq!(income_categories[0].id.as_ref(), "c2");
    }
}
