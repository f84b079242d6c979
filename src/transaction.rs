use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::entities::Category;

/// One synthetic spending record
/// Immutable once generated: the data set is built at startup and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar day, serialized as ISO 8601 (`YYYY-MM-DD`)
    pub date: NaiveDate,

    pub item: String,

    pub category: Category,

    /// Dollars, rounded to 2 decimal places
    pub amount: f64,
}

impl Transaction {
    pub fn new(date: NaiveDate, item: impl Into<String>, category: Category, amount: f64) -> Self {
        Self {
            date,
            item: item.into(),
            category,
            amount,
        }
    }

    /// Date key used by chart points and selection events
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Round a dollar amount to cents
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// ============================================================================
// CSV EXPORT
// ============================================================================

/// Write transactions as CSV (header: date,item,category,amount)
pub fn write_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for tx in transactions {
        wtr.serialize(tx).context("Failed to serialize transaction")?;
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}
