//! # Converter Cache
//!
//! Concrete rate cache implementations (adapters) for the converter service.
//! This crate provides the stores that implement the `RateCache` port.

use std::time::Duration;

use async_trait::async_trait;
use converter_types::{CacheError, RateCache, RateTable};

pub mod memory;
pub mod redis_cache;

pub use memory::MemoryRateCache;
pub use redis_cache::{EXCHANGE_RATES_KEY, RedisRateCache};

/// Which store backs the rate cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    Redis { host: String, port: u16 },
    Memory,
}

impl CacheBackend {
    /// Connection URL of a Redis backend.
    pub fn redis_url(&self) -> Option<String> {
        match self {
            CacheBackend::Redis { host, port } => Some(format!("redis://{}:{}/", host, port)),
            CacheBackend::Memory => None,
        }
    }
}

/// Unified cache wrapper over the available stores.
pub enum RateStore {
    Redis(RedisRateCache),
    Memory(MemoryRateCache),
}

/// Build and initialize a rate cache for the given backend.
///
/// For Redis this opens the connection up front, so an unreachable store
/// fails startup instead of the first request.
///
/// # Examples
///
/// ```ignore
/// let cache = build_cache(&CacheBackend::Redis { host: "localhost".into(), port: 6379 }).await?;
/// let cache = build_cache(&CacheBackend::Memory).await?;
/// ```
pub async fn build_cache(backend: &CacheBackend) -> anyhow::Result<RateStore> {
    match backend {
        CacheBackend::Redis { .. } => {
            let url = backend
                .redis_url()
                .ok_or_else(|| anyhow::anyhow!("missing Redis connection settings"))?;
            let cache = RedisRateCache::new(&url).await?;
            Ok(RateStore::Redis(cache))
        }
        CacheBackend::Memory => Ok(RateStore::Memory(MemoryRateCache::new())),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement RateCache for RateStore (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateCache for RateStore {
    async fn get(&self) -> Result<Option<RateTable>, CacheError> {
        match self {
            RateStore::Redis(cache) => cache.get().await,
            RateStore::Memory(cache) => cache.get().await,
        }
    }

    async fn put(&self, table: &RateTable, ttl: Duration) -> Result<(), CacheError> {
        match self {
            RateStore::Redis(cache) => cache.put(table, ttl).await,
            RateStore::Memory(cache) => cache.put(table, ttl).await,
        }
    }
}
