// Spend Dashboard - Web Server

use anyhow::{Context, Result};
use std::sync::Arc;

use spend_dashboard::api::app_router;
use spend_dashboard::{init_tracing, Config, Dataset};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    // Generated once; every request reads the same snapshot
    let dataset = Arc::new(Dataset::generate(&config));

    let app = app_router(dataset);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen_addr))?;

    tracing::info!("🚀 Server running on http://{}", config.listen_addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
