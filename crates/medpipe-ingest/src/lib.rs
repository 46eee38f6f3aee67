//! medpipe ingest library
//!
//! Fetches one page of FHIR `Patient` resources, flattens each entry and
//! writes the batch to a local CSV file, an S3 object or a DynamoDB table.
//!
//! # Example
//!
//! ```no_run
//! use medpipe_ingest::{
//!     config::IngestConfig,
//!     pipeline::{IngestRequest, Ingestor},
//!     sink::{DestinationKind, DestinationParams},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::load()?;
//!     let ingestor = Ingestor::new(&config)?;
//!     let report = ingestor
//!         .ingest(&IngestRequest {
//!             destination: DestinationKind::File,
//!             params: DestinationParams::default(),
//!         })
//!         .await?;
//!     println!("{} records written", report.records_written);
//!     Ok(())
//! }
//! ```
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod fhir;
pub mod pipeline;
pub mod sink;

pub use error::{ConfigError, IngestError, Result, SinkError};
