//! Error types for the ingest pipeline
//!
//! Every variant is terminal for one ingest run. Nothing here is retried.

use medpipe_common::EnvError;
use std::path::PathBuf;
use thiserror::Error;

use crate::sink::DestinationKind;

pub type Result<T> = std::result::Result<T, IngestError>;

/// Top-level failure of an ingest run
#[derive(Error, Debug)]
pub enum IngestError {
    /// The FHIR server answered with a non-success status
    #[error("Failed to fetch patients: server responded with status {status}")]
    Fetch { status: u16 },

    /// The request never produced a response (DNS, TLS, connection reset, timeout)
    #[error("Request to FHIR server failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("FHIR response is not a valid Bundle: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Caller supplied an unusable destination or environment
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("The {destination} destination requires --{param}")]
    MissingParam {
        destination: DestinationKind,
        param: &'static str,
    },

    #[error("Invalid destination '{0}'. Choose from file, object-store, or kv-table")]
    UnknownDestination(String),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Writing the batch to the chosen backend failed
///
/// `Io` and `Csv` are local failures; `Remote` and `MissingKey` come from (or
/// are rejected on behalf of) a remote store.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("{backend} write failed: {message}")]
    Remote {
        backend: &'static str,
        message: String,
    },

    #[error("Record {index} has no patient_id, which the table uses as its key")]
    MissingKey { index: usize },
}

impl SinkError {
    pub fn is_remote(&self) -> bool {
        matches!(self, SinkError::Remote { .. } | SinkError::MissingKey { .. })
    }
}
