//! Defines the core data model for transactions.

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, category::CategoryId};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Opaque identifier for a transaction, assigned by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Create a transaction ID from the identifier used by the store.
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. wages.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The lowercase name used in exports and query values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The direction of the money is carried by `kind` alone, `amount` is never
/// negative. To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The amount of money spent or earned in this transaction.
    pub amount: Decimal,
    /// The calendar day the transaction happened on.
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: Date,
    /// The ID of the category the transaction belongs to, `None` if uncategorized.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(kind: TransactionType, amount: Decimal, date: Date) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            date,
            category_id: None,
            description: None,
        }
    }

    /// The amount with income as positive and expenses as negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Check the data contract owed by the persistence layer.
    ///
    /// # Errors
    /// Returns an [Error::InvalidRecord] if the ID is empty or the amount is
    /// negative.
    pub fn validate(&self) -> Result<(), Error> {
        if self.id.as_ref().trim().is_empty() {
            return Err(Error::InvalidRecord {
                id: self.id.to_string(),
                reason: "transaction ID cannot be empty".to_owned(),
            });
        }

        if self.amount < Decimal::ZERO {
            return Err(Error::InvalidRecord {
                id: self.id.to_string(),
                reason: format!("amount {} is negative", self.amount),
            });
        }

        Ok(())
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```
/// use budget_insights::{Transaction, TransactionType};
/// use rust_decimal::Decimal;
/// use time::macros::date;
///
/// let transaction = Transaction::build(
///         TransactionType::Expense,
///         Decimal::new(4599, 2),
///         date!(2025 - 01 - 15),
///     )
///     .description("Coffee shop purchase")
///     .category_id(Some("eating-out"))
///     .finalise("tx-1");
///
/// assert_eq!(transaction.signed_amount(), Decimal::new(-4599, 2));
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Whether the transaction is income or an expense.
    pub kind: TransactionType,
    /// The non-negative amount of the transaction.
    pub amount: Decimal,
    /// The date when the transaction occurred.
    pub date: Date,
    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    pub category_id: Option<CategoryId>,
    /// A human-readable description of the transaction.
    pub description: Option<String>,
}

impl TransactionBuilder {
    /// Set the category ID for the transaction.
    pub fn category_id(mut self, category_id: Option<&str>) -> Self {
        self.category_id = category_id.map(CategoryId::new);
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Create the transaction with the ID assigned by the store.
    pub fn finalise(self, id: &str) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            kind: self.kind,
            amount: self.amount,
            date: self.date,
            category_id: self.category_id,
            description: self.description,
        }
    }
}

/// Parse a calendar day from either `YYYY-MM-DD` or a timestamp starting with
/// one, e.g. `2024-01-05T13:45:00Z`.
///
/// Any time-of-day is discarded.
pub fn parse_calendar_date(text: &str) -> Result<Date, time::error::Parse> {
    let text = text.trim();
    let day_part = match text.get(..10) {
        Some(day_part) if text.len() > 10 && matches!(text.as_bytes()[10], b'T' | b't' | b' ') => {
            day_part
        }
        _ => text,
    };

    Date::parse(day_part, DATE_FORMAT)
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_calendar_date(&text).map_err(serde::de::Error::custom)
}
