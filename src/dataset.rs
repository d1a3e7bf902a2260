//! Loads a snapshot of transactions and categories from JSON.
//!
//! The snapshot is the hand-off point from the persistence layer. Every
//! record is validated on load so the dashboard calculations only ever see
//! well-formed data.

use std::{fs::File, io::BufReader, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::Category,
    transaction::{ResolvedTransaction, Transaction, resolve_transactions},
};

/// All of a user's transactions and categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// The transactions in the order the store returned them.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// The categories in the order the store returned them.
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Dataset {
    /// Create a dataset and validate its records.
    ///
    /// # Errors
    /// Returns an [Error::InvalidRecord] for the first invalid record.
    pub fn new(transactions: Vec<Transaction>, categories: Vec<Category>) -> Result<Self, Error> {
        let dataset = Self {
            transactions,
            categories,
        };
        dataset.validate()?;

        Ok(dataset)
    }

    /// Read a dataset from JSON of the form
    /// `{"transactions": [...], "categories": [...]}`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - the reader fails or the JSON does not have the expected shape
    ///   ([Error::JSONDeserializationError]),
    /// - a record is invalid, e.g. has a negative amount ([Error::InvalidRecord]).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let dataset: Dataset = serde_json::from_reader(reader)
            .map_err(|error| Error::JSONDeserializationError(error.to_string()))?;
        dataset.validate()?;

        tracing::debug!(
            "Loaded {} transactions and {} categories",
            dataset.transactions.len(),
            dataset.categories.len()
        );

        Ok(dataset)
    }

    /// Read a dataset from the JSON file at `path`, see [Dataset::from_reader].
    ///
    /// # Errors
    /// Returns an [Error::ReadInput] if the file cannot be opened, otherwise
    /// the same errors as [Dataset::from_reader].
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|error| {
            tracing::error!("Could not open {}: {error}", path.display());
            Error::ReadInput(format!("{}: {error}", path.display()))
        })?;

        Self::from_reader(BufReader::new(file))
    }

    /// Pair each transaction with its category, see [resolve_transactions].
    pub fn resolve(&self) -> Vec<ResolvedTransaction<'_>> {
        resolve_transactions(&self.transactions, &self.categories)
    }

    fn validate(&self) -> Result<(), Error> {
        for transaction in &self.transactions {
            transaction.validate().inspect_err(|error| {
                tracing::warn!("Rejecting dataset: {error}");
            })?;
        }

        for category in &self.categories {
            if category.id.as_ref().trim().is_empty() {
                tracing::warn!(
                    "Rejecting dataset: category \"{}\" has no ID",
                    category.name
                );
                return Err(Error::InvalidRecord {
                    id: String::new(),
                    reason: format!("category \"{}\" has an empty ID", category.name),
                });
            }
        }

        Ok(())
    }
}
