//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use converter_types::{ConversionRequest, ConversionResult, CurrencyCode};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Convert an amount between two currencies
///
/// Rates come from the cached upstream table and are refreshed once the
/// cache entry expires.
#[utoipa::path(
    post,
    path = "/currency/convert",
    tag = "currency",
    request_body = ConversionRequest,
    responses(
        (status = 200, description = "Converted amount", body = ConversionResult),
        (status = 400, description = "Invalid currency code, invalid amount, or no rate for the pair",
            body = inline(serde_json::Value),
            example = json!({"error": "Invalid currency code", "code": 400})),
        (status = 429, description = "Rate limit exceeded"),
        (status = 503, description = "Exchange rate data unavailable",
            body = inline(serde_json::Value),
            example = json!({"error": "Failed to fetch exchange rates", "code": 503}))
    )
)]
async fn convert() {}

/// OpenAPI documentation for the Converter API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Converter API",
        version = "1.0.0",
        description = "Converts amounts between currencies using cached upstream exchange rates.",
        license(name = "MIT"),
    ),
    paths(health, convert),
    components(schemas(ConversionRequest, ConversionResult, CurrencyCode)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currency", description = "Currency conversion"),
    )
)]
pub struct ApiDoc;
