// Presentation - HTML for the dashboard page and its partial updates

use anyhow::{Context, Result};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;

use crate::aggregation::DEFAULT_RECENT_LIMIT;
use crate::charts::{category_pie_chart, category_time_chart, script_safe, spending_time_chart};
use crate::dataset::{CategoryView, Dataset};
use crate::entities::Category;
use crate::selection::SelectionResult;
use crate::transaction::Transaction;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

const STYLES: &str = r#"
body { font-family: 'Arial', sans-serif; background-color: #f5f5f5; }
.dashboard-grid {
    display: grid;
    grid-template-columns: repeat(2, 1fr);
    gap: 20px;
    padding: 20px;
}
.card {
    background: white;
    border-radius: 8px;
    padding: 20px;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
}
.full-width {
    grid-column: 1 / -1;
}
.total-amount {
    font-size: 2.5rem;
    font-weight: bold;
    color: #2c3e50;
}
.transactions-table {
    width: 100%;
    border-collapse: collapse;
}
.transactions-table th, .transactions-table td {
    padding: 10px;
    text-align: left;
    border-bottom: 1px solid #ddd;
}
.transactions-table th {
    background-color: #f2f2f2;
}
"#;

// Selection events are posted to the server; the response replaces the table.
const CLIENT_SCRIPT: &str = r#"
function postSelection(points) {
    fetch('/api/selection', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ points: points })
    })
        .then(function(response) { return response.json(); })
        .then(function(body) {
            if (body && body.success) {
                updateTransactionsTable(body.data);
            }
        });
}

function updateTransactionsTable(view) {
    var tbody = document.querySelector('.transactions-table tbody');
    tbody.innerHTML = '';

    view.transactions.forEach(function(row) {
        var tr = document.createElement('tr');
        [row.date, row.item, row.category, row.amount].forEach(function(text) {
            var td = document.createElement('td');
            td.textContent = text;
            tr.appendChild(td);
        });
        tbody.appendChild(tr);
    });

    var header = document.querySelector('.transactions-header');
    if (header) {
        header.textContent = view.header;
    }
}

var timeChart = document.getElementById('time-chart');
timeChart.on('plotly_selected', function(eventData) {
    var points = (eventData && eventData.points) ? eventData.points.map(function(pt) {
        return { x: pt.x };
    }) : [];
    postSelection(points);
});
timeChart.on('plotly_deselect', function() {
    postSelection([]);
});

document.getElementById('category-select').addEventListener('change', function(e) {
    var target = document.getElementById('category-detail');
    if (!e.target.value) {
        target.innerHTML = '';
        return;
    }
    fetch('/filter_by_category?category=' + encodeURIComponent(e.target.value))
        .then(function(response) { return response.text(); })
        .then(function(markup) {
            target.innerHTML = markup;
            target.querySelectorAll('script').forEach(function(old) {
                var script = document.createElement('script');
                script.textContent = old.textContent;
                old.replaceWith(script);
            });
        });
});
"#;

// ============================================================================
// FORMATTING
// ============================================================================

/// Dollar amount with 2 decimals, e.g. `$340.50`
pub fn format_currency(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    // Avoid "$-0.00"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("${:.2}", rounded)
}

/// A transactions-table row, already formatted for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub item: String,
    pub category: String,
    pub amount: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: tx.date_key(),
            item: tx.item.clone(),
            category: tx.category.to_string(),
            amount: format_currency(tx.amount),
        }
    }
}

/// Table contents after a selection event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionView {
    pub header: String,
    pub shown: usize,
    pub total: usize,
    pub transactions: Vec<TransactionRow>,
}

impl From<&SelectionResult> for SelectionView {
    fn from(result: &SelectionResult) -> Self {
        Self {
            header: result.header(),
            shown: result.shown(),
            total: result.match_count,
            transactions: result.transactions.iter().map(TransactionRow::from).collect(),
        }
    }
}

// ============================================================================
// MARKUP
// ============================================================================

fn transaction_rows(rows: &[TransactionRow]) -> Markup {
    html! {
        @for row in rows {
            tr {
                td { (row.date) }
                td { (row.item) }
                td { (row.category) }
                td { (row.amount) }
            }
        }
    }
}

/// Full dashboard page
///
/// Embeds the category pie figure, the daily time-series figure and the full
/// transaction list as script data.
pub fn dashboard_page(dataset: &Dataset) -> Result<Markup> {
    let pie_json = category_pie_chart(&dataset.category_spending())
        .to_script_json()
        .context("Failed to serialize category chart")?;
    let time_json = spending_time_chart(&dataset.daily_spending())
        .to_script_json()
        .context("Failed to serialize time chart")?;
    let transactions_json = script_safe(
        serde_json::to_string(dataset.transactions()).context("Failed to serialize transactions")?,
    );

    let recent: Vec<TransactionRow> = dataset
        .recent_transactions(DEFAULT_RECENT_LIMIT)
        .iter()
        .map(TransactionRow::from)
        .collect();

    let category_script = format!(
        "var categoryData = {};\nPlotly.newPlot('category-chart', categoryData.data, categoryData.layout);",
        pie_json
    );
    let time_script = format!(
        "var timeData = {};\nvar allTransactions = {};\nPlotly.newPlot('time-chart', timeData.data, timeData.layout);\ndocument.allTransactions = allTransactions;",
        time_json, transactions_json
    );

    Ok(html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Credit Card Dashboard" }
                script src=(PLOTLY_CDN) {}
                style { (PreEscaped(STYLES)) }
            }
            body {
                h1.dashboard-title { "Credit Card Consumption Dashboard" }
                div.dashboard-grid {
                    div.card {
                        h3 { "Total Spending" }
                        p.total-amount { (format_currency(dataset.total_spending())) }
                    }
                    div.card {
                        h3 { "Spending by Category" }
                        div #category-chart {}
                        script { (PreEscaped(category_script)) }
                    }
                    div.card.full-width {
                        h3 { "Spending Over Time" }
                        div #time-chart {}
                        script { (PreEscaped(time_script)) }
                    }
                    div.card.full-width {
                        h3 { "Category Detail" }
                        select #category-select {
                            option value="" { "All categories" }
                            @for category in Category::ALL {
                                option value=(category.as_str()) { (category.as_str()) }
                            }
                        }
                        div #category-detail {}
                    }
                    div.card.full-width {
                        h3.transactions-header { "Recent Transactions" }
                        table.transactions-table {
                            thead {
                                tr {
                                    th { "Date" }
                                    th { "Item" }
                                    th { "Category" }
                                    th { "Amount" }
                                }
                            }
                            tbody { (transaction_rows(&recent)) }
                        }
                    }
                }
                script { (PreEscaped(CLIENT_SCRIPT)) }
            }
        }
    })
}

/// Partial update for one category: its total and its own time series
pub fn category_partial(view: &CategoryView) -> Result<Markup> {
    let chart_json = category_time_chart(&view.label, &view.daily)
        .to_script_json()
        .context("Failed to serialize category time chart")?;

    let script = format!(
        "var filteredTimeData = {};\nPlotly.newPlot('filtered-time-chart', filteredTimeData.data, filteredTimeData.layout);",
        chart_json
    );

    Ok(html! {
        div.card {
            h3 { (view.label) " Total Spending" }
            p.total-amount { (format_currency(view.total)) }
        }
        div.card.full-width {
            h3 { (view.label) " Spending Over Time" }
            div #filtered-time-chart {}
            script { (PreEscaped(script)) }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::filter_selection;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn small_dataset() -> Dataset {
        Dataset::new(vec![
            Transaction::new(date(2024, 5, 1), "Farmer's Market", Category::Groceries, 20.0),
            Transaction::new(date(2024, 5, 2), "Pharmacy", Category::Healthcare, 12.35),
            Transaction::new(date(2024, 5, 3), "Tom & Jerry <Deli>", Category::Dining, 7.5),
        ])
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(340.5), "$340.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-0.0), "$0.00");
        assert_eq!(format_currency(12.345_1), "$12.35");
        assert_eq!(format_currency(1234.0), "$1234.00");
    }

    #[test]
    fn test_transaction_row() {
        let tx = Transaction::new(date(2024, 5, 1), "Bakery", Category::Groceries, 5.5);
        assert_eq!(
            TransactionRow::from(&tx),
            TransactionRow {
                date: "2024-05-01".to_string(),
                item: "Bakery".to_string(),
                category: "Groceries".to_string(),
                amount: "$5.50".to_string(),
            }
        );
    }

    #[test]
    fn test_selection_view_reports_counts() {
        let txs: Vec<Transaction> = (0..35)
            .map(|_| Transaction::new(date(2024, 5, 1), "Bar", Category::Dining, 1.0))
            .collect();
        let keys: HashSet<String> = ["2024-05-01".to_string()].into_iter().collect();

        let view = SelectionView::from(&filter_selection(&keys, &txs));
        assert_eq!(view.shown, 20);
        assert_eq!(view.total, 35);
        assert_eq!(view.transactions.len(), 20);
        assert_eq!(view.header, "Transactions (20 of 35 shown)");
    }

    #[test]
    fn test_dashboard_page_contents() {
        let page = dashboard_page(&small_dataset()).unwrap().into_string();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Credit Card Dashboard</title>"));
        assert!(page.contains("Credit Card Consumption Dashboard"));
        assert!(page.contains("$39.85"));
        assert!(page.contains("var categoryData = "));
        assert!(page.contains("var allTransactions = "));
        assert!(page.contains("\"dragmode\":\"select\""));
        assert!(page.contains("<h3 class=\"transactions-header\">Recent Transactions</h3>"));
        // Item names are escaped in table markup
        assert!(page.contains("<td>Tom &amp; Jerry &lt;Deli&gt;</td>"));
        assert!(!page.contains("<Deli>"));
        assert!(page.contains("<td>$12.35</td>"));
    }

    #[test]
    fn test_category_partial_known() {
        let dataset = small_dataset();
        let markup = category_partial(&dataset.category_view("Healthcare")).unwrap().into_string();

        assert!(markup.contains("Healthcare Total Spending"));
        assert!(markup.contains("$12.35"));
        assert!(markup.contains("Healthcare Spending Over Time"));
        assert!(markup.contains("filtered-time-chart"));
    }

    #[test]
    fn test_category_partial_escapes_label() {
        let dataset = small_dataset();
        let markup = category_partial(&dataset.category_view("<b>Pets</b>"))
            .unwrap()
            .into_string();

        assert!(markup.contains("$0.00"));
        assert!(markup.contains("&lt;b&gt;Pets&lt;/b&gt; Total Spending"));
        assert!(!markup.contains("<b>Pets</b>"));
    }

    #[test]
    fn test_category_partial_keeps_script_closable() {
        let dataset = small_dataset();
        let markup = category_partial(&dataset.category_view("<!--<script"))
            .unwrap()
            .into_string();

        assert!(!markup.contains("<!--"));
        // Only the partial's own script element opens and closes
        assert_eq!(markup.matches("<script").count(), 1);
        assert_eq!(markup.matches("</script>").count(), 1);
    }
}
