//! PUC Desk API Server
//!
//! Main entry point for the pollution check service.

use std::sync::Arc;

use anyhow::Context;
use chrono_tz::Tz;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use puc_api::{AppState, create_router};
use puc_core::pricing::PriceTable;
use puc_db::connect;
use puc_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "puc=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let prices = PriceTable::from_config(&config.pricing);
    let missing = prices.missing_keys();
    if missing.is_empty() {
        info!(entries = prices.len(), "Price table loaded");
    } else {
        warn!(
            missing = ?missing,
            "Price table incomplete; checks in these categories will be refused"
        );
    }

    let timezone: Tz = config
        .reporting
        .timezone
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid reporting time zone: {e}"))?;
    info!(timezone = %timezone, "Reporting time zone set");

    // Fail fast if the database is unreachable
    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    let state = AppState {
        db: Arc::new(db),
        prices: Arc::new(prices),
        timezone,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
