//! DynamoDB table sink
//!
//! One item per record keyed by `patient_id`, sent with `BatchWriteItem` in
//! chunks of [`MAX_BATCH_WRITE_ITEMS`]. Chunks already accepted stay written
//! if a later chunk fails.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::{
    error::DisplayErrorContext,
    types::{AttributeValue, PutRequest, WriteRequest},
    Client,
};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

use super::Sink;
use crate::error::SinkError;
use crate::fhir::FlatRecord;

/// `BatchWriteItem` accepts at most 25 put/delete requests per call
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

const BACKEND: &str = "dynamodb";

pub struct KvTableSink {
    client: Client,
    table: String,
}

impl KvTableSink {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig, table: impl Into<String>) -> Self {
        Self::new(Client::new(sdk_config), table)
    }

    async fn write_chunk(&self, chunk: &[&FlatRecord]) -> Result<(), SinkError> {
        let requests = chunk
            .iter()
            .map(|record| {
                let put = PutRequest::builder()
                    .set_item(Some(to_item(record)))
                    .build()
                    .map_err(|e| remote(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>, SinkError>>()?;

        let output = self
            .client
            .batch_write_item()
            .request_items(self.table.clone(), requests)
            .send()
            .await
            .map_err(|e| remote(DisplayErrorContext(&e).to_string()))?;

        let unprocessed: usize = output
            .unprocessed_items()
            .map(|items| items.values().map(Vec::len).sum())
            .unwrap_or(0);
        if unprocessed > 0 {
            return Err(remote(format!(
                "{} of {} items were left unprocessed by {}",
                unprocessed,
                chunk.len(),
                self.table
            )));
        }

        Ok(())
    }
}

fn remote(message: String) -> SinkError {
    SinkError::Remote {
        backend: BACKEND,
        message,
    }
}

/// Collapse records that share a `patient_id` so the later one wins
///
/// A single `BatchWriteItem` call rejects duplicate keys, so the collapse has
/// to happen client side. The slot of the first occurrence is kept and its
/// content replaced.
pub fn latest_by_key(batch: &[FlatRecord]) -> Result<Vec<&FlatRecord>, SinkError> {
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(batch.len());
    let mut kept: Vec<&FlatRecord> = Vec::with_capacity(batch.len());

    for (index, record) in batch.iter().enumerate() {
        let key = record
            .patient_id
            .as_deref()
            .ok_or(SinkError::MissingKey { index })?;

        match slots.get(key) {
            Some(&slot) => kept[slot] = record,
            None => {
                slots.insert(key, kept.len());
                kept.push(record);
            },
        }
    }

    Ok(kept)
}

/// Absent optional fields are left off the item
pub fn to_item(record: &FlatRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::with_capacity(4);

    if let Some(id) = &record.patient_id {
        item.insert("patient_id".to_string(), AttributeValue::S(id.clone()));
    }
    item.insert(
        "full_name".to_string(),
        AttributeValue::S(record.full_name.clone()),
    );
    if let Some(gender) = &record.gender {
        item.insert("gender".to_string(), AttributeValue::S(gender.clone()));
    }
    if let Some(birth_date) = &record.birth_date {
        item.insert("birth_date".to_string(), AttributeValue::S(birth_date.clone()));
    }

    item
}

#[async_trait]
impl Sink for KvTableSink {
    fn describe(&self) -> String {
        format!("dynamodb table {}", self.table)
    }

    #[instrument(skip(self, batch), fields(table = %self.table, records = batch.len()))]
    async fn write(&self, batch: &[FlatRecord]) -> Result<(), SinkError> {
        let items = latest_by_key(batch)?;
        debug!(items = items.len(), "Writing items");

        for chunk in items.chunks(MAX_BATCH_WRITE_ITEMS) {
            self.write_chunk(chunk).await?;
        }

        info!("Data written to DynamoDB table: {}", self.table);
        Ok(())
    }
}
