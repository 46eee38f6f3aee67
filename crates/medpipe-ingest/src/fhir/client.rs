//! HTTP client for the FHIR Patient endpoint

use reqwest::{header::ACCEPT, Client};
use tracing::{debug, info, instrument};

use super::models::Bundle;
use crate::config::SourceConfig;
use crate::error::{IngestError, Result};

/// Media type the FHIR server is asked to answer with
pub const FHIR_JSON: &str = "application/fhir+json";

/// Fetches one page of patients
///
/// No retries and no explicit timeout: the transport default applies.
pub struct FhirClient {
    client: Client,
    patient_url: String,
    page_size: u32,
}

impl FhirClient {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            patient_url: config.patient_url.clone(),
            page_size: config.page_size,
        })
    }

    pub fn patient_url(&self) -> &str {
        &self.patient_url
    }

    /// Issue a single `GET [url]?_count=N`
    ///
    /// A non-success status is returned as [`IngestError::Fetch`] without
    /// reading the body.
    #[instrument(skip(self), fields(url = %self.patient_url, count = self.page_size))]
    pub async fn fetch_patients(&self) -> Result<Bundle> {
        info!("Fetching FHIR patients");

        let response = self
            .client
            .get(&self.patient_url)
            .query(&[("_count", self.page_size)])
            .header(ACCEPT, FHIR_JSON)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Received FHIR response");

        let bundle: Bundle = serde_json::from_slice(&body)?;
        info!(entries = bundle.entry.len(), "Fetched FHIR page");

        Ok(bundle)
    }
}
