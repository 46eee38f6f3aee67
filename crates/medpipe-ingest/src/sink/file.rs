//! Local CSV file sink

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use super::{csv, Sink};
use crate::error::SinkError;
use crate::fhir::FlatRecord;

pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Sink for FileSink {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    /// Replaces whatever is at the path; never appends
    #[instrument(skip(self, batch), fields(path = %self.path.display(), records = batch.len()))]
    async fn write(&self, batch: &[FlatRecord]) -> Result<(), SinkError> {
        let body = csv::encode(batch)?;

        tokio::fs::write(&self.path, &body)
            .await
            .map_err(|source| SinkError::Io {
                path: self.path.clone(),
                source,
            })?;

        info!(bytes = body.len(), "Data saved locally");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> FlatRecord {
        FlatRecord {
            patient_id: Some(id.to_string()),
            full_name: name.to_string(),
            gender: None,
            birth_date: None,
        }
    }

    #[tokio::test]
    async fn test_second_write_replaces_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.csv");
        let sink = FileSink::new(&path);

        sink.write(&[record("1", "Ann Lee"), record("2", "Bo Diaz"), record("3", "Cy Ng")])
            .await
            .unwrap();
        sink.write(&[record("9", "Zed Ray")]).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "patient_id,full_name,gender,birth_date\n9,Zed Ray,,\n");
    }

    #[tokio::test]
    async fn test_unwritable_path_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("patients.csv");
        let sink = FileSink::new(&path);

        let err = sink.write(&[record("1", "Ann Lee")]).await.unwrap_err();
        assert!(matches!(err, SinkError::Io { .. }));
        assert!(!err.is_remote());
    }
}
