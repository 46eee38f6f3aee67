//! Ingest configuration
//!
//! Loaded from the environment (and `.env` when present). CLI flags override
//! individual fields after loading.

use medpipe_common::env::{parse_or, var_opt, var_or};
use reqwest::Url;

use crate::error::ConfigError;

// ============================================================================
// Ingest Configuration Constants
// ============================================================================

/// Patient search endpoint of the public HAPI FHIR R4 test server.
pub const DEFAULT_PATIENT_URL: &str = "https://hapi.fhir.org/baseR4/Patient";

/// Entries requested per fetch, also the upper bound for `FHIR_PAGE_SIZE`.
pub const MAX_PAGE_SIZE: u32 = 1000;

pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Output path of the file sink when `--path` is not given.
pub const DEFAULT_FILE_PATH: &str = "patients.csv";

#[derive(Debug, Clone, Default)]
pub struct IngestConfig {
    pub source: SourceConfig,
    pub aws: AwsConfig,
}

/// Where patients are fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub patient_url: String,
    pub page_size: u32,
}

/// Shared settings for the S3 and DynamoDB clients
///
/// With both keys unset the default AWS credential chain is used.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsConfig {
    pub region: String,
    /// Custom endpoint, e.g. MinIO or LocalStack
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub path_style: bool,
}

impl std::fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key.as_ref().map(|_| "<redacted>"))
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("path_style", &self.path_style)
            .finish()
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            patient_url: DEFAULT_PATIENT_URL.to_string(),
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_AWS_REGION.to_string(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            path_style: false,
        }
    }
}

impl IngestConfig {
    /// Load `.env` if present, then read the environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Environment variables:
    /// - `FHIR_PATIENT_URL`, `FHIR_PAGE_SIZE`
    /// - `AWS_REGION` (or `S3_REGION`), `AWS_ENDPOINT_URL`
    /// - `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `S3_PATH_STYLE`
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            source: SourceConfig {
                patient_url: var_or("FHIR_PATIENT_URL", DEFAULT_PATIENT_URL),
                page_size: parse_or("FHIR_PAGE_SIZE", MAX_PAGE_SIZE)?,
            },
            aws: AwsConfig {
                region: var_opt("AWS_REGION")
                    .or_else(|| var_opt("S3_REGION"))
                    .unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
                endpoint: var_opt("AWS_ENDPOINT_URL"),
                access_key: var_opt("AWS_ACCESS_KEY_ID"),
                secret_key: var_opt("AWS_SECRET_ACCESS_KEY"),
                path_style: parse_or("S3_PATH_STYLE", false)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.page_size == 0 || self.source.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "FHIR page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.source.page_size
            )));
        }

        Url::parse(&self.source.patient_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "FHIR patient URL '{}' is not a valid URL: {}",
                self.source.patient_url, e
            ))
        })?;

        if self.aws.access_key.is_some() != self.aws.secret_key.is_some() {
            return Err(ConfigError::Invalid(
                "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together".to_string(),
            ));
        }

        Ok(())
    }
}
