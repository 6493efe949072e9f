//! Rate cache port.
//!
//! Holds the most recent rate table under a single logical key with a TTL.
//! Implementations can be Redis, in-process memory, etc.

use std::sync::Arc;
use std::time::Duration;

use exchange_rates::RateTable;

use crate::error::CacheError;

/// Port trait for the rate table cache.
///
/// Writes replace the whole table; readers never observe a partial one.
#[async_trait::async_trait]
pub trait RateCache: Send + Sync + 'static {
    /// Returns the cached table if present and unexpired. Never fetches.
    async fn get(&self) -> Result<Option<RateTable>, CacheError>;

    /// Stores `table`, replacing any prior value, expiring after `ttl`.
    async fn put(&self, table: &RateTable, ttl: Duration) -> Result<(), CacheError>;
}

#[async_trait::async_trait]
impl<T: RateCache> RateCache for Arc<T> {
    async fn get(&self) -> Result<Option<RateTable>, CacheError> {
        (**self).get().await
    }

    async fn put(&self, table: &RateTable, ttl: Duration) -> Result<(), CacheError> {
        (**self).put(table, ttl).await
    }
}
