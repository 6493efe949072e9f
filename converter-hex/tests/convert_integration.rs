//! Integration tests for the conversion endpoint.
//!
//! These drive the full router with the in-memory cache and a mocked
//! upstream rate endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use converter_cache::MemoryRateCache;
use converter_hex::{ConversionService, inbound::HttpServer, outbound::MonobankClient};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RATES: &str = r#"[
    {"currencyCodeA": 840, "currencyCodeB": 980, "date": 1700000000, "rateBuy": 42.22, "rateSell": 42.7204},
    {"currencyCodeA": 978, "currencyCodeB": 980, "date": 1700000000, "rateBuy": 43.22, "rateSell": 43.85},
    {"currencyCodeA": 978, "currencyCodeB": 840, "date": 1700000000, "rateBuy": 1.021, "rateSell": 1.032},
    {"currencyCodeA": 826, "currencyCodeB": 980, "date": 1700000000, "rateCross": 52.6779},
    {"currencyCodeA": 392, "currencyCodeB": 980, "date": 1700000000, "rateCross": 0.2716},
    {"currencyCodeA": 156, "currencyCodeB": 980, "date": 1700000000, "rateCross": 5.8302}
]"#;

/// Starts a mock upstream answering with `response`.
async fn mock_upstream(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bank/currency"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn create_test_server(
    upstream: &MockServer,
    ttl: Duration,
) -> HttpServer<MemoryRateCache, MonobankClient> {
    let provider = MonobankClient::new(
        format!("{}/bank/currency", upstream.uri()),
        Duration::from_millis(500),
    )
    .unwrap();
    let service = ConversionService::new(MemoryRateCache::new(), provider, ttl);
    HttpServer::new(service)
}

fn convert_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/currency/convert")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &axum::Router, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(convert_request(body)).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_convert_direct_rate() {
    let upstream = mock_upstream(ResponseTemplate::new(200).set_body_string(RATES)).await;
    let app = create_test_server(&upstream, Duration::from_secs(300)).router();

    let (status, json) = send(&app, r#"{"source": "USD", "target": "UAH", "amount": 100}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "USD");
    assert_eq!(json["target"], "UAH");
    assert_eq!(json["amount"], 100.0);
    assert_eq!(json["convertedAmount"].as_f64().unwrap(), 100.0 * 42.22);
}

#[tokio::test]
async fn test_convert_reverse_rate() {
    let upstream = mock_upstream(ResponseTemplate::new(200).set_body_string(RATES)).await;
    let app = create_test_server(&upstream, Duration::from_secs(300)).router();

    let (status, json) = send(&app, r#"{"source": "UAH", "target": "USD", "amount": 100}"#).await;

    assert_eq!(status, StatusCode::OK);
    let converted = json["convertedAmount"].as_f64().unwrap();
    assert_eq!(converted, 100.0 / 42.7204);
}

#[tokio::test]
async fn test_invalid_currency_is_bad_request() {
    let upstream = mock_upstream(ResponseTemplate::new(200).set_body_string(RATES)).await;
    let app = create_test_server(&upstream, Duration::from_secs(300)).router();

    let (status, json) = send(&app, r#"{"source": "XXX", "target": "UAH", "amount": 100}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid currency code");
    assert_eq!(json["code"], 400);
}

#[tokio::test]
async fn test_missing_rate_is_bad_request() {
    let upstream = mock_upstream(ResponseTemplate::new(200).set_body_string(RATES)).await;
    let app = create_test_server(&upstream, Duration::from_secs(300)).router();

    let (status, json) = send(&app, r#"{"source": "GBP", "target": "USD", "amount": 100}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Currency conversion rate not found");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let upstream = mock_upstream(ResponseTemplate::new(200).set_body_string(RATES)).await;
    let app = create_test_server(&upstream, Duration::from_secs(300)).router();

    let (status, json) = send(&app, r#"{"source": "USD", "amount": 100}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_upstream_failure_is_service_unavailable() {
    let upstream = mock_upstream(ResponseTemplate::new(500)).await;
    let app = create_test_server(&upstream, Duration::from_secs(300)).router();

    let (status, json) = send(&app, r#"{"source": "USD", "target": "UAH", "amount": 100}"#).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "Failed to fetch exchange rates");
    assert_eq!(json["code"], 503);
}

#[tokio::test]
async fn test_rates_are_fetched_once_per_ttl() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bank/currency"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RATES))
        .expect(2)
        .mount(&upstream)
        .await;

    let app = create_test_server(&upstream, Duration::from_secs(1)).router();
    let body = r#"{"source": "USD", "target": "UAH", "amount": 100}"#;

    for _ in 0..3 {
        let (status, _) = send(&app, body).await;
        assert_eq!(status, StatusCode::OK);
    }

    tokio::time::sleep(Duration::from_millis(1100)).await;

    for _ in 0..3 {
        let (status, _) = send(&app, body).await;
        assert_eq!(status, StatusCode::OK);
    }

    upstream.verify().await;
}

#[tokio::test]
async fn test_health_and_openapi() {
    let upstream = mock_upstream(ResponseTemplate::new(200).set_body_string(RATES)).await;
    let app = create_test_server(&upstream, Duration::from_secs(300)).router();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["paths"]["/currency/convert"].is_object());
}
