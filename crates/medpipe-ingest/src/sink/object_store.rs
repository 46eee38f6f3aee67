//! S3 object sink: the CSV body is built in memory and sent with one PutObject

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream, Client};
use tracing::{debug, info, instrument};

use super::{csv, Sink};
use crate::error::SinkError;
use crate::fhir::FlatRecord;

pub struct ObjectStoreSink {
    client: Client,
    bucket: String,
    key: String,
}

impl ObjectStoreSink {
    pub fn new(client: Client, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn from_sdk_config(
        sdk_config: &SdkConfig,
        path_style: bool,
        bucket: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(path_style)
            .build();

        Self::new(Client::from_conf(s3_config), bucket, key)
    }
}

#[async_trait]
impl Sink for ObjectStoreSink {
    fn describe(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }

    /// No cleanup is attempted if the put fails part way
    #[instrument(skip(self, batch), fields(bucket = %self.bucket, key = %self.key, records = batch.len()))]
    async fn write(&self, batch: &[FlatRecord]) -> Result<(), SinkError> {
        let body = csv::encode(batch)?;
        debug!("Uploading {} bytes to s3://{}/{}", body.len(), self.bucket, self.key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .content_type("text/csv")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| SinkError::Remote {
                backend: "s3",
                message: DisplayErrorContext(&e).to_string(),
            })?;

        info!("Data uploaded to s3://{}/{}", self.bucket, self.key);
        Ok(())
    }
}
