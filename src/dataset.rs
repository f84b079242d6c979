// Dataset snapshot
//
// The generated transaction table, built once at startup and handed to every
// consumer read-only. Views over it are computed on demand.

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::aggregation::{
    category_spending, daily_spending, filter_by_category, recent_transactions, total_spending,
    CategorySummary, DailySummary,
};
use crate::config::Config;
use crate::entities::Category;
use crate::generator::generate_transactions;
use crate::selection::{filter_selection, SelectionEvent, SelectionResult};
use crate::transaction::Transaction;

#[derive(Debug, Clone)]
pub struct Dataset {
    transactions: Vec<Transaction>,
}

/// Totals restricted to a single category
///
/// `category` is `None` when the requested name is not in the catalog; the
/// view is then empty rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryView {
    pub label: String,
    pub category: Option<Category>,
    pub total: f64,
    pub daily: Vec<DailySummary>,
}

impl Dataset {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Generate the data set described by `config`, ending today
    pub fn generate(config: &Config) -> Self {
        Self::generate_until(config, Local::now().date_naive())
    }

    pub fn generate_until(config: &Config, end_date: NaiveDate) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let transactions =
            generate_transactions(&mut rng, config.transaction_count, end_date, config.window_days);

        tracing::info!(
            count = transactions.len(),
            window_days = config.window_days,
            seeded = config.seed.is_some(),
            "Generated synthetic transactions"
        );

        Self::new(transactions)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn total_spending(&self) -> f64 {
        total_spending(&self.transactions)
    }

    pub fn category_spending(&self) -> Vec<CategorySummary> {
        category_spending(&self.transactions)
    }

    pub fn daily_spending(&self) -> Vec<DailySummary> {
        daily_spending(&self.transactions)
    }

    pub fn recent_transactions(&self, limit: usize) -> Vec<Transaction> {
        recent_transactions(&self.transactions, limit)
    }

    pub fn select(&self, event: &SelectionEvent) -> SelectionResult {
        filter_selection(&event.date_keys(), &self.transactions)
    }

    pub fn category_view(&self, name: &str) -> CategoryView {
        let category = name.parse::<Category>().ok();

        let filtered = match category {
            Some(category) => filter_by_category(&self.transactions, category),
            None => Vec::new(),
        };

        CategoryView {
            label: name.to_string(),
            category,
            total: total_spending(&filtered),
            daily: daily_spending(&filtered),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded(seed: u64) -> Config {
        Config {
            seed: Some(seed),
            ..Config::default()
        }
    }

    #[test]
    fn test_generate_uses_config() {
        let config = Config {
            transaction_count: 40,
            window_days: 10,
            ..seeded(1)
        };
        let end = date(2024, 6, 30);
        let dataset = Dataset::generate_until(&config, end);

        assert_eq!(dataset.len(), 40);
        assert!(dataset.transactions().iter().all(|t| t.date >= date(2024, 6, 20)));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let end = date(2024, 6, 30);
        let a = Dataset::generate_until(&seeded(8), end);
        let b = Dataset::generate_until(&seeded(8), end);
        assert_eq!(a.transactions(), b.transactions());
    }

    #[test]
    fn test_category_view_known() {
        let d1 = date(2024, 5, 1);
        let d2 = date(2024, 5, 2);
        let dataset = Dataset::new(vec![
            Transaction::new(d1, "Pharmacy", Category::Healthcare, 100.25),
            Transaction::new(d1, "Bar", Category::Dining, 9.0),
            Transaction::new(d2, "Dental Care", Category::Healthcare, 50.0),
            Transaction::new(d2, "Vision Care", Category::Healthcare, 0.25),
        ]);

        let view = dataset.category_view("Healthcare");
        assert_eq!(view.category, Some(Category::Healthcare));
        assert!((view.total - 150.5).abs() < 1e-9);
        assert_eq!(view.daily.len(), 2);
    }

    #[test]
    fn test_category_view_unknown_is_empty() {
        let dataset = Dataset::generate_until(&seeded(2), date(2024, 6, 30));
        let view = dataset.category_view("Pets");

        assert_eq!(view.label, "Pets");
        assert_eq!(view.category, None);
        assert_eq!(view.total, 0.0);
        assert!(view.daily.is_empty());
    }

    #[test]
    fn test_select_delegates_to_filter() {
        let dataset = Dataset::generate_until(&seeded(4), date(2024, 6, 30));

        let default_view = dataset.select(&SelectionEvent::default());
        assert_eq!(default_view.transactions, dataset.recent_transactions(10));

        let first = dataset.transactions()[0].date_key();
        let payload = format!(r#"{{"points":[{{"x":"{}"}}]}}"#, first);
        let selected = dataset.select(&SelectionEvent::from_slice(payload.as_bytes()));
        assert!(selected.transactions.iter().all(|t| t.date_key() == first));
        assert!(selected.match_count >= 1);
    }
}
