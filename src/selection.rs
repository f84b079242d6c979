// Selection Filter - brush-selection on the time chart -> transactions table
//
// The filter is a pure function of the selected date keys and the transaction
// snapshot, so it runs the same wherever the selection event is handled.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::aggregation::{recent_transactions, sort_newest_first, DEFAULT_RECENT_LIMIT};
use crate::transaction::Transaction;

/// Rows shown while a selection is active
pub const SELECTION_DISPLAY_CAP: usize = 20;

// ============================================================================
// SELECTION EVENT
// ============================================================================

/// Payload of a `plotly_selected` event, as posted by the page
///
/// Every field is optional: a missing or odd-shaped payload is an empty
/// selection, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionEvent {
    #[serde(default)]
    pub points: Option<Vec<SelectedPoint>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectedPoint {
    /// Date key for line-chart points; other JSON types are ignored
    #[serde(default)]
    pub x: Option<serde_json::Value>,
}

impl SelectionEvent {
    /// Parse raw request bytes; malformed input is an empty selection
    pub fn from_slice(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Option<SelectionEvent>>(bytes) {
            Ok(event) => event.unwrap_or_default(),
            Err(e) => {
                tracing::debug!("Malformed selection payload, treating as empty: {}", e);
                SelectionEvent::default()
            }
        }
    }

    /// Distinct string `x` values of the selected points
    pub fn date_keys(&self) -> HashSet<String> {
        self.points
            .iter()
            .flatten()
            .filter_map(|point| match &point.x {
                Some(serde_json::Value::String(key)) => Some(key.clone()),
                _ => None,
            })
            .collect()
    }
}

// ============================================================================
// FILTER
// ============================================================================

/// What the transactions table shows for a selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResult {
    /// Rows to display, newest first
    pub transactions: Vec<Transaction>,

    /// Matches before truncation (all transactions for the default view)
    pub match_count: usize,

    /// True when the result came from a non-empty selection
    pub is_selection: bool,
}

impl SelectionResult {
    pub fn shown(&self) -> usize {
        self.transactions.len()
    }

    /// Table header text, as the page renders it
    pub fn header(&self) -> String {
        if self.is_selection {
            format!("Transactions ({} of {} shown)", self.shown(), self.match_count)
        } else {
            "Recent Transactions".to_string()
        }
    }
}

/// Filter `all` down to the selected days
///
/// - no keys: the default recent view (10 newest)
/// - otherwise: exact date-key matches, newest first, capped at 20
///
/// Keys that match nothing contribute nothing.
pub fn filter_selection(selected_date_keys: &HashSet<String>, all: &[Transaction]) -> SelectionResult {
    if selected_date_keys.is_empty() {
        return SelectionResult {
            transactions: recent_transactions(all, DEFAULT_RECENT_LIMIT),
            match_count: all.len(),
            is_selection: false,
        };
    }

    let mut matches: Vec<Transaction> = all
        .iter()
        .filter(|tx| selected_date_keys.contains(&tx.date_key()))
        .cloned()
        .collect();
    let match_count = matches.len();

    sort_newest_first(&mut matches);
    matches.truncate(SELECTION_DISPLAY_CAP);

    SelectionResult {
        transactions: matches,
        match_count,
        is_selection: true,
    }
}
