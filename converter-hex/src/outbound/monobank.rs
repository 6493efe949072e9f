use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use converter_types::{FetchError, RateEntry, RateProvider, RateTable};

/// Public Monobank endpoint publishing the current rate table.
pub const DEFAULT_RATES_URL: &str = "https://api.monobank.ua/bank/currency";

/// Rate provider backed by the Monobank currency endpoint.
pub struct MonobankClient {
    url: String,
    http: reqwest::Client,
}

impl MonobankClient {
    /// Creates a client for `url` whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("currency-converter/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            http,
        })
    }
}

#[async_trait]
impl RateProvider for MonobankClient {
    #[instrument(name = "RatesFetch", skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<RateTable, FetchError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let rows: Vec<RateEntry> =
            serde_json::from_str(&body).map_err(|e| FetchError::Payload(e.to_string()))?;

        let received = rows.len();
        let table = RateTable::from_rows(rows);
        debug!(received, kept = table.len(), "Parsed upstream rate table");

        Ok(table)
    }
}
