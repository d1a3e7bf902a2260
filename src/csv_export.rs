//! Writes transactions as CSV for download.

use std::io::Write;

use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use time::Date;

use crate::{Error, transaction::ResolvedTransaction};

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Description")]
    description: &'a str,
}

impl<'a> From<&ResolvedTransaction<'a>> for CsvRow<'a> {
    fn from(resolved: &ResolvedTransaction<'a>) -> Self {
        let transaction = resolved.transaction;

        Self {
            date: transaction.date.to_string(),
            kind: transaction.kind.as_str(),
            category: resolved
                .category
                .map(|category| category.name.as_ref())
                .unwrap_or_default(),
            amount: transaction.amount.to_string(),
            description: transaction.description.as_deref().unwrap_or_default(),
        }
    }
}

/// Write `transactions` to `writer` as CSV, one row per transaction in the
/// given order.
///
/// The first row is the header `Date,Type,Category,Amount,Description`.
/// Uncategorized transactions and transactions without a description have
/// empty fields. Fields containing commas, quotes or newlines are quoted.
///
/// # Errors
/// Returns [Error::CsvExport] if writing to `writer` fails.
pub fn export_csv<W: Write>(transactions: &[ResolvedTransaction], writer: W) -> Result<(), Error> {
    let mut csv_writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    if transactions.is_empty() {
        csv_writer.write_record(["Date", "Type", "Category", "Amount", "Description"])?;
    }

    for transaction in transactions {
        csv_writer.serialize(CsvRow::from(transaction))?;
    }

    csv_writer
        .flush()
        .map_err(|error| Error::CsvExport(error.to_string()))?;

    tracing::debug!("Exported {} transactions as CSV", transactions.len());

    Ok(())
}

/// Export `transactions` as a CSV string, see [export_csv].
///
/// # Errors
/// Returns [Error::CsvExport] if the rows cannot be serialized.
pub fn to_csv_string(transactions: &[ResolvedTransaction]) -> Result<String, Error> {
    let mut buffer = Vec::new();
    export_csv(transactions, &mut buffer)?;

    String::from_utf8(buffer).map_err(|error| Error::CsvExport(error.to_string()))
}

/// The file name offered for an export made on `today`, e.g.
/// "transactions-2024-03-31.csv".
pub fn default_export_file_name(today: Date) -> String {
    format!("transactions-{today}.csv")
}
