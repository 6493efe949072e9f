//! # Converter Hex
//!
//! Application service layer and HTTP adapters for the converter service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (cache-or-fetch, pair resolution)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `outbound/` - Upstream rate provider client (reqwest)
//!
//! The service is generic over `C: RateCache` and `P: RateProvider`,
//! allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod outbound;
pub mod service;


pub use service::ConversionService;
