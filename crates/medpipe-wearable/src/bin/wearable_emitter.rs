//! Wearable emitter
//!
//! Posts a synthetic reading to the listener on a fixed interval until
//! interrupted.

use anyhow::Result;
use medpipe_common::logging::{init_logging, LogConfig};
use medpipe_wearable::{shutdown::shutdown_signal, EmitterConfig, Emitter};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let defaults = LogConfig::builder()
        .log_file_prefix("wearable-emitter")
        .filter_directives("hyper=warn,reqwest=warn")
        .build();
    let log_config = LogConfig::from_env_or(defaults)?;
    let _guard = init_logging(&log_config)?;

    let config = EmitterConfig::from_env()?;
    info!(?config, "Starting wearable emitter");

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    let stats = Emitter::new(config)?.run(cancel).await;
    info!(sent = stats.sent, failed = stats.failed, "Emitter exited");
    Ok(())
}
