use anyhow::{bail, Result};
use std::env;
use std::io;

use spend_dashboard::{format_currency, init_tracing, write_csv, Config, Dataset, DEFAULT_RECENT_LIMIT};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let config = Config::from_env()?;

    match args.get(1).map(String::as_str) {
        None | Some("summary") => run_summary(&config),
        Some("export") => run_export(&config),
        Some(other) => {
            eprintln!("Usage: spend-dashboard [summary|export]");
            bail!("Unknown command: {}", other)
        }
    }
}

fn run_summary(config: &Config) -> Result<()> {
    let dataset = Dataset::generate(config);

    println!("💳 Credit Card Consumption Summary");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Transactions: {}", dataset.len());
    println!("Total spending: {}", format_currency(dataset.total_spending()));

    println!("\n📊 By category");
    for summary in dataset.category_spending() {
        println!("  {:<16} {:>12}", summary.category, format_currency(summary.total));
    }

    println!("\n🧾 Recent transactions");
    for tx in dataset.recent_transactions(DEFAULT_RECENT_LIMIT) {
        println!(
            "  {}  {:<24} {:<16} {:>10}",
            tx.date_key(),
            tx.item,
            tx.category,
            format_currency(tx.amount)
        );
    }

    Ok(())
}

fn run_export(config: &Config) -> Result<()> {
    let dataset = Dataset::generate(config);
    write_csv(io::stdout().lock(), dataset.transactions())
}
