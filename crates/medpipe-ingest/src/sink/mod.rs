//! Sinks for a normalized batch
//!
//! A [`Destination`] is resolved from the caller's selector and parameters
//! before anything is fetched, then [`Destination::connect`] turns it into a
//! [`Sink`] that receives the whole batch exactly once.

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{AwsConfig, DEFAULT_FILE_PATH};
use crate::error::{ConfigError, SinkError};
use crate::fhir::FlatRecord;

pub mod aws;
pub mod csv;
pub mod file;
pub mod kv_table;
pub mod object_store;

pub use file::FileSink;
pub use kv_table::KvTableSink;
pub use object_store::ObjectStoreSink;

/// A backend that accepts one batch per run
#[async_trait]
pub trait Sink: Send + Sync {
    /// Human-readable location, used in logs and the CLI result line
    fn describe(&self) -> String;

    /// Write the batch. Called once, no retry.
    async fn write(&self, batch: &[FlatRecord]) -> Result<(), SinkError>;
}

/// The destination selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    File,
    ObjectStore,
    KvTable,
}

impl FromStr for DestinationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" | "csv" => Ok(DestinationKind::File),
            "object-store" | "s3" => Ok(DestinationKind::ObjectStore),
            "kv-table" | "dynamodb" => Ok(DestinationKind::KvTable),
            _ => Err(ConfigError::UnknownDestination(s.to_string())),
        }
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationKind::File => write!(f, "file"),
            DestinationKind::ObjectStore => write!(f, "object-store"),
            DestinationKind::KvTable => write!(f, "kv-table"),
        }
    }
}

/// Destination-specific parameters as the caller supplied them
#[derive(Debug, Clone, Default)]
pub struct DestinationParams {
    pub path: Option<PathBuf>,
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub table: Option<String>,
}

/// A fully specified destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File { path: PathBuf },
    ObjectStore { bucket: String, key: String },
    KvTable { table: String },
}

fn required(
    value: &Option<String>,
    destination: DestinationKind,
    param: &'static str,
) -> Result<String, ConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingParam { destination, param })
}

impl Destination {
    /// Check that `params` carries what `kind` needs
    ///
    /// Object store needs bucket and key, kv-table needs table, file falls
    /// back to `patients.csv`.
    pub fn resolve(kind: DestinationKind, params: &DestinationParams) -> Result<Self, ConfigError> {
        match kind {
            DestinationKind::File => Ok(Destination::File {
                path: params
                    .path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_PATH)),
            }),
            DestinationKind::ObjectStore => Ok(Destination::ObjectStore {
                bucket: required(&params.bucket, kind, "bucket")?,
                key: required(&params.key, kind, "key")?,
            }),
            DestinationKind::KvTable => Ok(Destination::KvTable {
                table: required(&params.table, kind, "table")?,
            }),
        }
    }

    pub fn kind(&self) -> DestinationKind {
        match self {
            Destination::File { .. } => DestinationKind::File,
            Destination::ObjectStore { .. } => DestinationKind::ObjectStore,
            Destination::KvTable { .. } => DestinationKind::KvTable,
        }
    }

    /// Build the sink for this destination
    pub async fn connect(&self, aws: &AwsConfig) -> Box<dyn Sink> {
        match self {
            Destination::File { path } => Box::new(FileSink::new(path.clone())),
            Destination::ObjectStore { bucket, key } => {
                let sdk_config = aws::load_sdk_config(aws).await;
                Box::new(ObjectStoreSink::from_sdk_config(
                    &sdk_config,
                    aws.path_style,
                    bucket.clone(),
                    key.clone(),
                ))
            },
            Destination::KvTable { table } => {
                let sdk_config = aws::load_sdk_config(aws).await;
                Box::new(KvTableSink::from_sdk_config(&sdk_config, table.clone()))
            },
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::File { path } => write!(f, "{}", path.display()),
            Destination::ObjectStore { bucket, key } => write!(f, "s3://{}/{}", bucket, key),
            Destination::KvTable { table } => write!(f, "dynamodb table {}", table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_accepts_aliases() {
        assert_eq!("file".parse::<DestinationKind>().unwrap(), DestinationKind::File);
        assert_eq!("CSV".parse::<DestinationKind>().unwrap(), DestinationKind::File);
        assert_eq!("s3".parse::<DestinationKind>().unwrap(), DestinationKind::ObjectStore);
        assert_eq!(
            "object-store".parse::<DestinationKind>().unwrap(),
            DestinationKind::ObjectStore
        );
        assert_eq!("dynamodb".parse::<DestinationKind>().unwrap(), DestinationKind::KvTable);
    }

    #[test]
    fn test_unknown_kind() {
        let err = "ftp".parse::<DestinationKind>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDestination(ref s) if s == "ftp"));
    }

    #[test]
    fn test_file_defaults_path() {
        let dest = Destination::resolve(DestinationKind::File, &DestinationParams::default()).unwrap();
        assert_eq!(
            dest,
            Destination::File {
                path: PathBuf::from("patients.csv")
            }
        );
    }

    #[test]
    fn test_object_store_needs_key() {
        let params = DestinationParams {
            bucket: Some("clinical".to_string()),
            ..Default::default()
        };
        let err = Destination::resolve(DestinationKind::ObjectStore, &params).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingParam {
                destination: DestinationKind::ObjectStore,
                param: "key"
            }
        ));
    }

    #[test]
    fn test_object_store_rejects_blank_bucket() {
        let params = DestinationParams {
            bucket: Some("  ".to_string()),
            key: Some("patients.csv".to_string()),
            ..Default::default()
        };
        let err = Destination::resolve(DestinationKind::ObjectStore, &params).unwrap_err();
        assert!(matches!(err, ConfigError::MissingParam { param: "bucket", .. }));
    }

    #[test]
    fn test_kv_table_needs_table() {
        let err = Destination::resolve(DestinationKind::KvTable, &DestinationParams::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingParam { param: "table", .. }));
    }

    #[test]
    fn test_display() {
        let dest = Destination::ObjectStore {
            bucket: "clinical".to_string(),
            key: "raw/patients.csv".to_string(),
        };
        assert_eq!(dest.to_string(), "s3://clinical/raw/patients.csv");
        assert_eq!(dest.kind(), DestinationKind::ObjectStore);
    }
}
