//! # Converter Types
//!
//! DTOs, errors and port traits for the currency conversion service.
//! This crate has ZERO external IO dependencies - only data structures,
//! error mapping, and trait definitions.
//!
//! ## Architecture
//!
//! - `ports/` - Traits the cache and rate provider adapters implement
//! - `dto/` - Request and response bodies of the HTTP boundary
//! - `error/` - Conversion, adapter, and application error types
//!
//! Currency and rate table types live in `exchange-rates` and are
//! re-exported here.

pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use dto::*;
pub use error::{AppError, CacheError, ConvertError, FetchError};
pub use exchange_rates::{AppliedRate, CurrencyCode, RateEntry, RateTable};
pub use ports::{RateCache, RateProvider};
