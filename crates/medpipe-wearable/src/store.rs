//! Single-slot reading store

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::reading::Reading;

/// Holds the latest reading for the lifetime of the listener process
///
/// Clones share the same slot. A replace is atomic with respect to readers.
#[derive(Debug, Clone)]
pub struct ReadingStore {
    slot: Arc<RwLock<Reading>>,
}

impl ReadingStore {
    pub fn new(initial: Reading) -> Self {
        Self {
            slot: Arc::new(RwLock::new(initial)),
        }
    }

    pub async fn current(&self) -> Reading {
        self.slot.read().await.clone()
    }

    /// The stored reading, if it belongs to `user_id`
    pub async fn find(&self, user_id: &str) -> Option<Reading> {
        let reading = self.slot.read().await;
        (reading.user_id == user_id).then(|| reading.clone())
    }

    /// Overwrite the slot and return what was stored
    pub async fn replace(&self, reading: Reading) -> Reading {
        let mut slot = self.slot.write().await;
        *slot = reading;
        slot.clone()
    }
}
