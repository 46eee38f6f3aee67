//! Ingest orchestration
//!
//! One run is strictly sequential: resolve destination, fetch one page,
//! normalize, write once. Nothing is kept between runs.

use tracing::{info, instrument};

use crate::config::{AwsConfig, IngestConfig};
use crate::error::Result;
use crate::fhir::{normalize_bundle, Batch, FhirClient, FlatRecord};
use crate::sink::{Destination, DestinationKind, DestinationParams, Sink};

/// Caller's choice for one run
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub destination: DestinationKind,
    pub params: DestinationParams,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub records_written: usize,
    pub destination: String,
}

pub struct Ingestor {
    client: FhirClient,
    aws: AwsConfig,
}

impl Ingestor {
    pub fn new(config: &IngestConfig) -> Result<Self> {
        Ok(Self {
            client: FhirClient::new(&config.source)?,
            aws: config.aws.clone(),
        })
    }

    /// Resolve the destination, then fetch, normalize and write
    ///
    /// Destination parameters are checked before the fetch, so a
    /// `ConfigError` never costs a network round trip.
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn ingest(&self, request: &IngestRequest) -> Result<IngestReport> {
        let destination = Destination::resolve(request.destination, &request.params)?;
        let batch = self.fetch_batch().await?;

        let sink = destination.connect(&self.aws).await;
        let records_written = self.deliver(sink.as_ref(), &batch).await?;

        Ok(IngestReport {
            records_written,
            destination: sink.describe(),
        })
    }

    /// Fetch and normalize into an already built sink
    pub async fn ingest_into(&self, sink: &dyn Sink) -> Result<usize> {
        let batch = self.fetch_batch().await?;
        self.deliver(sink, &batch).await
    }

    /// One page, normalized in page order. An empty page is an empty batch.
    pub async fn fetch_batch(&self) -> Result<Batch> {
        let bundle = self.client.fetch_patients().await?;
        Ok(normalize_bundle(&bundle))
    }

    async fn deliver(&self, sink: &dyn Sink, batch: &[FlatRecord]) -> Result<usize> {
        info!(records = batch.len(), sink = %sink.describe(), "Writing batch");
        sink.write(batch).await?;
        Ok(batch.len())
    }
}
