// Aggregation - derived views over a transaction set
//
// All functions are pure and total: the empty set yields a zero total and
// empty summaries.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::entities::Category;
use crate::transaction::Transaction;

/// Rows shown in the default "recent transactions" table
pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total: f64,
}

/// Sum of all amounts
pub fn total_spending(transactions: &[Transaction]) -> f64 {
    // Empty total is +0.0 (float `sum()` can yield -0.0)
    transactions.iter().fold(0.0, |acc, tx| acc + tx.amount)
}

/// Per-category totals, in order of each category's first occurrence
pub fn category_spending(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for tx in transactions {
        match summaries.iter_mut().find(|s| s.category == tx.category) {
            Some(summary) => summary.total += tx.amount,
            None => summaries.push(CategorySummary {
                category: tx.category,
                total: tx.amount,
            }),
        }
    }

    summaries
}

/// Per-day totals, strictly ascending by date
pub fn daily_spending(transactions: &[Transaction]) -> Vec<DailySummary> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for tx in transactions {
        *by_day.entry(tx.date).or_insert(0.0) += tx.amount;
    }

    by_day
        .into_iter()
        .map(|(date, total)| DailySummary { date, total })
        .collect()
}

/// Newest first, at most `limit` entries; equal dates keep input order
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sort_newest_first(&mut sorted);
    sorted.truncate(limit);
    sorted
}

/// Transactions of one category, in input order
pub fn filter_by_category(transactions: &[Transaction], category: Category) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.category == category)
        .cloned()
        .collect()
}

/// Stable sort, descending by date
pub(crate) fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}
