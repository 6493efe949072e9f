//! Outbound adapters.
//!
//! HTTP clients for the upstream services the application depends on.

mod monobank;

pub use monobank::{DEFAULT_RATES_URL, MonobankClient};
