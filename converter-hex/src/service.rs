//! Conversion Application Service
//!
//! Orchestrates the cache and the rate provider through their ports and runs
//! the pair resolution. Contains NO infrastructure logic.

use std::time::Duration;

use tokio::sync::Mutex;

use converter_types::{
    AppError, ConversionRequest, ConversionResult, ConvertError, CurrencyCode, RateCache,
    RateProvider, RateTable,
};

/// Application service for currency conversion.
///
/// Generic over the cache `C` and the provider `P` - both adapters are
/// injected at compile time, so tests can swap in mocks.
pub struct ConversionService<C: RateCache, P: RateProvider> {
    cache: C,
    provider: P,
    ttl: Duration,
    /// Serializes cache refills so concurrent misses share one fetch.
    refill: Mutex<()>,
}

impl<C: RateCache, P: RateProvider> ConversionService<C, P> {
    /// Creates a service that caches fetched tables for `ttl`.
    pub fn new(cache: C, provider: P, ttl: Duration) -> Self {
        Self {
            cache,
            provider,
            ttl,
            refill: Mutex::new(()),
        }
    }

    /// Returns the cached rate table, fetching and caching a fresh one on a miss.
    #[tracing::instrument(skip(self))]
    pub async fn rates(&self) -> Result<RateTable, AppError> {
        if let Some(table) = self.cache.get().await? {
            return Ok(table);
        }

        let _guard = self.refill.lock().await;

        // Another request may have refilled the cache while we waited.
        if let Some(table) = self.cache.get().await? {
            return Ok(table);
        }

        let table = self.provider.fetch().await.map_err(|e| {
            tracing::error!("Failed to fetch exchange rates: {}", e);
            ConvertError::from(e)
        })?;
        tracing::info!(rows = table.len(), "Fetched exchange rates");

        if let Err(e) = self.cache.put(&table, self.ttl).await {
            tracing::warn!("Failed to cache exchange rates: {}", e);
        }

        Ok(table)
    }

    /// Converts `req.amount` from `req.source` into `req.target`.
    #[tracing::instrument(skip(self), fields(source = %req.source, target = %req.target))]
    pub async fn convert(&self, req: ConversionRequest) -> Result<ConversionResult, AppError> {
        if !req.amount.is_finite() || req.amount <= 0.0 {
            return Err(ConvertError::InvalidAmount("Amount must be positive".into()).into());
        }

        let source: CurrencyCode = req.source.parse().map_err(ConvertError::from)?;
        let target: CurrencyCode = req.target.parse().map_err(ConvertError::from)?;

        let table = self.rates().await?;
        let converted_amount = table
            .convert(source, target, req.amount)
            .map_err(ConvertError::from)?;

        if !converted_amount.is_finite() {
            let err = ConvertError::InvalidAmount("Converted amount is out of range".into());
            return Err(err.into());
        }

        tracing::debug!(converted_amount, "Converted amount");

        Ok(ConversionResult {
            source,
            target,
            amount: req.amount,
            converted_amount,
        })
    }
}
