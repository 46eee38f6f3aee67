//! Wearable demo: an emitter posting synthetic readings and a listener
//! holding the latest one
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod emitter;
pub mod error;
pub mod middleware;
pub mod reading;
pub mod routes;
pub mod shutdown;
pub mod store;

pub use config::{ConfigError, CorsConfig, EmitterConfig, ListenerConfig};
pub use emitter::{EmitError, Emitter, EmitterStats};
pub use error::AppError;
pub use reading::{Reading, ReadingUpdate, Sample};
pub use store::ReadingStore;
