//! Exchange rate provider port.

use std::sync::Arc;

use exchange_rates::RateTable;

use crate::error::FetchError;

/// Port trait for the upstream rate source.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Performs one upstream call and returns the filtered rate table.
    /// Implementations do not retry.
    async fn fetch(&self) -> Result<RateTable, FetchError>;
}

#[async_trait::async_trait]
impl<T: RateProvider> RateProvider for Arc<T> {
    async fn fetch(&self) -> Result<RateTable, FetchError> {
        (**self).fetch().await
    }
}
