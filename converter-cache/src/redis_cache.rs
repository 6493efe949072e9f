//! Redis-backed rate cache.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, warn};

use converter_types::{CacheError, RateCache, RateTable};

/// Key under which the serialized rate table is stored.
pub const EXCHANGE_RATES_KEY: &str = "exchange_rates";

/// Rate cache stored as a single JSON value in Redis.
///
/// Expiry is delegated to Redis (`SET ... EX`); an expired key reads as a miss.
pub struct RedisRateCache {
    connection: ConnectionManager,
    key: String,
}

impl RedisRateCache {
    pub async fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| CacheError::Unavailable(format!("Failed to create Redis client: {}", e)))?;

        let connection = client
            .get_connection_manager()
            .await
            .map_err(|e| CacheError::Unavailable(format!("Failed to connect to Redis: {}", e)))?;

        debug!("Connected to Redis at: {}", redis_url);

        Ok(Self {
            connection,
            key: EXCHANGE_RATES_KEY.to_string(),
        })
    }

    /// Stores the table under `key` instead of the default.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

/// Redis only accepts whole seconds, and at least one.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl RateCache for RedisRateCache {
    async fn get(&self) -> Result<Option<RateTable>, CacheError> {
        let mut conn = self.connection.clone();

        let payload: Option<String> = conn
            .get(&self.key)
            .await
            .map_err(|e| CacheError::Unavailable(format!("Redis GET failed: {}", e)))?;

        let Some(payload) = payload else {
            debug!(key = %self.key, "Cache MISS");
            return Ok(None);
        };

        match serde_json::from_str::<RateTable>(&payload) {
            Ok(table) => {
                debug!(key = %self.key, rows = table.len(), "Cache HIT");
                Ok(Some(table))
            }
            Err(e) => {
                warn!(key = %self.key, "Failed to deserialize cached rate table: {}", e);
                Ok(None)
            }
        }
    }

    async fn put(&self, table: &RateTable, ttl: Duration) -> Result<(), CacheError> {
        let payload = serde_json::to_string(table)
            .map_err(|e| CacheError::Serialization(format!("Failed to serialize rates: {}", e)))?;

        let mut conn = self.connection.clone();
        let _: () = conn
            .set_ex(&self.key, payload, ttl_seconds(ttl))
            .await
            .map_err(|e| CacheError::Unavailable(format!("Redis SET failed: {}", e)))?;

        debug!(
            key = %self.key,
            rows = table.len(),
            ttl_secs = ttl_seconds(ttl),
            "Cache PUT"
        );
        Ok(())
    }
}
