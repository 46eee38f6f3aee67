//! Wearable reading payloads

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The reading the listener holds for its single user
///
/// Only `user_id` and `timestamp` are fixed; every other posted field is kept
/// as-is so the listener does not constrain what a device reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub metrics: Map<String, Value>,
}

impl Reading {
    /// Reading served before the first update arrives
    pub fn seed(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        let mut metrics = Map::new();
        metrics.insert("heart_rate".to_string(), Value::from(72));
        metrics.insert("steps".to_string(), Value::from(5000));
        metrics.insert("sleep_hours".to_string(), Value::from(6.5));

        Self {
            user_id: user_id.into(),
            timestamp: now,
            metrics,
        }
    }
}

/// Body of `POST /internal/update`
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingUpdate {
    #[serde(deserialize_with = "user_id_from_json")]
    pub user_id: String,
    #[serde(flatten)]
    pub metrics: Map<String, Value>,
}

impl ReadingUpdate {
    /// Stamp the update with the listener's clock
    ///
    /// A client supplied `timestamp` is discarded.
    pub fn into_reading(mut self, now: DateTime<Utc>) -> Reading {
        self.metrics.remove("timestamp");
        Reading {
            user_id: self.user_id,
            timestamp: now,
            metrics: self.metrics,
        }
    }
}

/// Devices post ids as strings or integers; both are stored as a string
fn user_id_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Int(id) => id.to_string(),
        RawId::Uint(id) => id.to_string(),
    })
}

/// One synthetic reading as sent by the emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub heart_rate: u32,
    pub steps: u32,
    pub sleep_hours: f64,
}

impl Sample {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, user_id: &str, now: DateTime<Utc>) -> Self {
        let sleep_hours: f64 = rng.random_range(5.5..=8.5);
        Self {
            user_id: user_id.to_string(),
            timestamp: now,
            heart_rate: rng.random_range(60..=100),
            steps: rng.random_range(3000..=10000),
            sleep_hours: (sleep_hours * 10.0).round() / 10.0,
        }
    }
}
