//! Wearable listener
//!
//! Holds the latest reading in memory and serves it over HTTP.

use anyhow::{Context, Result};
use chrono::Utc;
use medpipe_common::logging::{init_logging, LogConfig};
use medpipe_wearable::{routes, shutdown::shutdown_signal, ListenerConfig, Reading, ReadingStore};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let defaults = LogConfig::builder()
        .log_file_prefix("wearable-listener")
        .filter_directives("hyper=warn")
        .build();
    let log_config = LogConfig::from_env_or(defaults)?;
    let _guard = init_logging(&log_config)?;

    let config = ListenerConfig::from_env()?;
    info!(?config, "Starting wearable listener");

    let store = ReadingStore::new(Reading::seed(config.seed_user.clone(), Utc::now()));
    let app = routes::app(store, &config.cors);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Listener shut down gracefully");
    Ok(())
}
