// Synthetic transaction generator
//
// Fabricates a fixed-size set of credit-card transactions over a trailing
// window of days. The rng is injected so callers control reproducibility.

use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::Category;
use crate::transaction::{round_to_cents, Transaction};

/// Transactions generated for the dashboard by default
pub const DEFAULT_TRANSACTION_COUNT: usize = 150;

/// Days of history covered by the generated data set
pub const DEFAULT_WINDOW_DAYS: u32 = 90;

/// Widest window accepted from configuration (about ten years)
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Generate `count` transactions dated within `[end_date - window_days, end_date]`
///
/// Dates are drawn uniformly per transaction from the `window_days + 1` days
/// of the window; the result is sorted ascending by date. Each transaction
/// picks a category uniformly, then an item of that category, then an amount
/// uniform in the category's price range, rounded to cents.
///
/// Windows wider than [`MAX_WINDOW_DAYS`] are clamped to it.
pub fn generate_transactions<R: Rng>(
    rng: &mut R,
    count: usize,
    end_date: NaiveDate,
    window_days: u32,
) -> Vec<Transaction> {
    let window_days = u64::from(window_days.min(MAX_WINDOW_DAYS));
    let start_date = end_date
        .checked_sub_days(Days::new(window_days))
        .unwrap_or(NaiveDate::MIN);

    let mut dates: Vec<NaiveDate> = (0..count)
        .map(|_| {
            start_date
                .checked_add_days(Days::new(rng.gen_range(0..=window_days)))
                .map_or(end_date, |date| date.min(end_date))
        })
        .collect();
    dates.sort();

    dates
        .into_iter()
        .map(|date| random_transaction(rng, date))
        .collect()
}

fn random_transaction<R: Rng>(rng: &mut R, date: NaiveDate) -> Transaction {
    let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];

    // Item lists are never empty
    let item = category.items().choose(rng).copied().unwrap_or_default();

    let range = category.price_range();
    let amount = round_to_cents(rng.gen_range(range.min..=range.max));

    Transaction::new(date, item, category, amount)
}
