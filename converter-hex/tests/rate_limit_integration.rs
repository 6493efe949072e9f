//! Integration tests for rate limiting middleware.
//!
//! These tests verify the HTTP-level behavior of rate limiting,
//! including 429 responses and proper integration with the middleware stack.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use converter_cache::MemoryRateCache;
use converter_hex::{
    ConversionService,
    inbound::{HttpServer, RateLimiterState},
};
use converter_types::{FetchError, RateEntry, RateProvider, RateTable};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Provider serving a single USD/UAH row.
struct StaticProvider;

#[async_trait]
impl RateProvider for StaticProvider {
    async fn fetch(&self) -> Result<RateTable, FetchError> {
        Ok(RateTable::from_rows(vec![RateEntry {
            currency_code_a: 840,
            currency_code_b: 980,
            rate_buy: Some(42.22),
            rate_sell: Some(42.7204),
            rate_cross: None,
            date: None,
        }]))
    }
}

fn service() -> ConversionService<MemoryRateCache, StaticProvider> {
    ConversionService::new(MemoryRateCache::new(), StaticProvider, Duration::from_secs(300))
}

/// Helper to create a test server with a very low rate limit.
fn create_test_server(requests_per_minute: u32) -> HttpServer<MemoryRateCache, StaticProvider> {
    HttpServer::with_rate_limit(service(), NonZeroU32::new(requests_per_minute).unwrap())
}

/// Helper to create a test server that keys clients by `X-Forwarded-For`.
fn create_proxied_test_server(
    requests_per_minute: u32,
) -> HttpServer<MemoryRateCache, StaticProvider> {
    let limiter = RateLimiterState::per_minute(NonZeroU32::new(requests_per_minute).unwrap())
        .trust_forwarded_for(true);
    HttpServer::with_rate_limiter(service(), limiter)
}

/// Helper to make a health check request.
fn health_request() -> Request<Body> {
    Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap()
}

/// Helper to make a conversion request from the given client address.
fn convert_request(client: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/currency/convert")
        .header("Content-Type", "application/json")
        .header("X-Forwarded-For", client)
        .body(Body::from(
            r#"{"source": "USD", "target": "UAH", "amount": 100}"#,
        ))
        .unwrap()
}

#[tokio::test]
async fn test_rate_limiting_returns_429_when_exceeded() {
    let server = create_test_server(3);
    let app = server.router();

    // Make 3 requests (uses up the quota for this client)
    for i in 1..=3 {
        let response = app
            .clone()
            .oneshot(convert_request("198.51.100.1"))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::OK,
            "Request {} should not be rate limited (quota not yet exceeded)",
            i
        );
    }

    // 4th request should be rate limited
    let response = app
        .clone()
        .oneshot(convert_request("198.51.100.1"))
        .await
        .unwrap();

    assert_eq!(
        response.status(),
        StatusCode::TOO_MANY_REQUESTS,
        "Request should be rate limited after exceeding quota"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("Rate limit exceeded")
    );
    assert_eq!(json["retry_after_seconds"], 60);
}

#[tokio::test]
async fn test_rate_limiting_health_endpoint_bypassed() {
    let server = create_test_server(1);
    let app = server.router();

    // Health endpoint bypasses rate limiting entirely
    for _ in 0..10 {
        let response = app.clone().oneshot(health_request()).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::OK,
            "Health endpoint should not be rate limited"
        );
    }
}

#[tokio::test]
async fn test_rate_limiting_per_client_isolation() {
    let server = create_proxied_test_server(1);
    let app = server.router();

    let response = app
        .clone()
        .oneshot(convert_request("198.51.100.1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(convert_request("198.51.100.1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different client has its own quota
    let response = app
        .clone()
        .oneshot(convert_request("198.51.100.2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "Client B should have its own quota");
}

#[tokio::test]
async fn test_forwarded_header_ignored_unless_trusted() {
    let server = create_test_server(1);
    let app = server.router();

    let response = app
        .clone()
        .oneshot(convert_request("198.51.100.1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Rotating the header does not yield a fresh quota
    let response = app
        .clone()
        .oneshot(convert_request("198.51.100.2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}
