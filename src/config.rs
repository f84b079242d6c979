use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::str::FromStr;

use crate::generator::{DEFAULT_TRANSACTION_COUNT, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5001";

/// Process configuration, read from the environment (and `.env`, if present)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub transaction_count: usize,
    pub window_days: u32,
    /// Fixed rng seed; `None` draws fresh data on every start
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 5001)),
            transaction_count: DEFAULT_TRANSACTION_COUNT,
            window_days: DEFAULT_WINDOW_DAYS,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = parse_var(&lookup, "DASHBOARD_LISTEN_ADDR")?
            .unwrap_or_else(|| Config::default().listen_addr);
        let transaction_count =
            parse_var(&lookup, "DASHBOARD_TRANSACTION_COUNT")?.unwrap_or(DEFAULT_TRANSACTION_COUNT);
        let window_days = parse_var(&lookup, "DASHBOARD_WINDOW_DAYS")?.unwrap_or(DEFAULT_WINDOW_DAYS);
        anyhow::ensure!(
            window_days <= MAX_WINDOW_DAYS,
            "Invalid DASHBOARD_WINDOW_DAYS: {} exceeds the maximum of {} days",
            window_days,
            MAX_WINDOW_DAYS
        );
        let seed = parse_var(&lookup, "DASHBOARD_SEED")?;

        Ok(Self {
            listen_addr,
            transaction_count,
            window_days,
            seed,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("Invalid {}: {:?}", key, raw))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}
