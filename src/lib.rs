// Spend Dashboard - Core Library
// Exposes all modules for use in the CLI, the web server, and tests

pub mod entities;
pub mod transaction;
pub mod generator;
pub mod dataset;
pub mod aggregation;
pub mod selection;
pub mod charts;
pub mod views;
pub mod config;
pub mod logging;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use entities::{Category, PriceRange, UnknownCategory};
pub use transaction::{round_to_cents, write_csv, Transaction};
pub use generator::{generate_transactions, DEFAULT_TRANSACTION_COUNT, DEFAULT_WINDOW_DAYS};
pub use dataset::{CategoryView, Dataset};
pub use aggregation::{
    category_spending, daily_spending, filter_by_category, recent_transactions, total_spending,
    CategorySummary, DailySummary, DEFAULT_RECENT_LIMIT,
};
pub use selection::{filter_selection, SelectionEvent, SelectionResult, SELECTION_DISPLAY_CAP};
pub use charts::{category_pie_chart, category_time_chart, spending_time_chart, Figure};
pub use views::{category_partial, dashboard_page, format_currency, SelectionView, TransactionRow};
pub use config::Config;
pub use logging::init_tracing;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
