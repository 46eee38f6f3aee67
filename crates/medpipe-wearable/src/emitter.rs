//! Periodic sender of synthetic readings
//!
//! Each tick posts one [`Sample`] to the listener. A failed send is logged and
//! counted, then the loop waits for the next tick. There is no backoff.
//! Cancellation interrupts an in-flight send.

use chrono::Utc;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{config::EmitterConfig, reading::Sample};

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Listener responded with status {0}")]
    Status(StatusCode),

    #[error("Failed to reach listener: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Outcome counts of one [`Emitter::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitterStats {
    pub sent: u64,
    pub failed: u64,
}

pub struct Emitter {
    client: Client,
    config: EmitterConfig,
}

impl Emitter {
    pub fn new(config: EmitterConfig) -> Result<Self, EmitError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Generate and post a single sample
    pub async fn send_once(&self) -> Result<Sample, EmitError> {
        let sample = Sample::generate(&mut rand::rng(), &self.config.user_id, Utc::now());

        let response = self
            .client
            .post(&self.config.target_url)
            .json(&sample)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmitError::Status(status));
        }

        info!(
            status = status.as_u16(),
            heart_rate = sample.heart_rate,
            steps = sample.steps,
            sleep_hours = sample.sleep_hours,
            "Sent reading"
        );
        Ok(sample)
    }

    /// Send on every tick until `cancel` fires
    ///
    /// The first sample goes out immediately.
    pub async fn run(&self, cancel: CancellationToken) -> EmitterStats {
        let mut stats = EmitterStats::default();
        let mut ticker = time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            target_url = %self.config.target_url,
            interval_secs = self.config.interval.as_secs_f64(),
            "Emitter started"
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let result = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            info!("Cancelled while a send was in flight");
                            break;
                        },
                        result = self.send_once() => result,
                    };

                    match result {
                        Ok(_) => stats.sent += 1,
                        Err(e) => {
                            stats.failed += 1;
                            warn!(error = %e, "Failed to send reading");
                        },
                    }
                },
            }
        }

        info!(sent = stats.sent, failed = stats.failed, "Emitter stopped");
        stats
    }
}
