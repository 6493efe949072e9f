//! In-memory rate cache.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use converter_types::{CacheError, RateCache, RateTable};

struct Slot {
    table: RateTable,
    expires_at: Instant,
}

/// In-process rate cache holding a single table with an expiry.
///
/// Expiry is measured on the tokio clock.
pub struct MemoryRateCache {
    slot: RwLock<Option<Slot>>,
}

impl MemoryRateCache {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }
}

impl Default for MemoryRateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateCache for MemoryRateCache {
    async fn get(&self) -> Result<Option<RateTable>, CacheError> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some(entry) if entry.expires_at > Instant::now() => {
                debug!(rows = entry.table.len(), "Cache HIT");
                Ok(Some(entry.table.clone()))
            }
            Some(_) => {
                debug!("Cache entry expired");
                Ok(None)
            }
            None => {
                debug!("Cache MISS");
                Ok(None)
            }
        }
    }

    async fn put(&self, table: &RateTable, ttl: Duration) -> Result<(), CacheError> {
        let entry = Slot {
            table: table.clone(),
            expires_at: Instant::now() + ttl,
        };
        let mut slot = self.slot.write().await;
        debug!(rows = table.len(), ttl_secs = ttl.as_secs(), "Cache PUT");
        *slot = Some(entry);
        Ok(())
    }
}
