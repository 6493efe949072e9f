//! Client example demonstrating conversions against a running server.
//!
//! The server uses the in-memory cache and a local mock of the rate endpoint,
//! so neither Redis nor network access is needed.
//!
//! Run with: cargo run -p converter-app --example client_example

use std::net::SocketAddr;
use std::time::Duration;

use converter_cache::MemoryRateCache;
use converter_client::{ClientError, ConverterClient};
use converter_hex::{ConversionService, inbound::HttpServer, outbound::MonobankClient};
use converter_types::CurrencyCode;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RATES: &str = r#"[
    {"currencyCodeA": 840, "currencyCodeB": 980, "date": 1700000000, "rateBuy": 42.22, "rateSell": 42.7204},
    {"currencyCodeA": 978, "currencyCodeB": 980, "date": 1700000000, "rateBuy": 43.22, "rateSell": 43.85},
    {"currencyCodeA": 978, "currencyCodeB": 840, "date": 1700000000, "rateBuy": 1.021, "rateSell": 1.032},
    {"currencyCodeA": 826, "currencyCodeB": 980, "date": 1700000000, "rateCross": 52.6779}
]"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Mock upstream rate endpoint
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bank/currency"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RATES))
        .mount(&upstream)
        .await;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    println!("🚀 Starting server on {addr}...");
    println!("   Rates: {}/bank/currency", upstream.uri());

    let provider = MonobankClient::new(
        format!("{}/bank/currency", upstream.uri()),
        Duration::from_secs(5),
    )?;
    let service = ConversionService::new(MemoryRateCache::new(), provider, Duration::from_secs(300));
    let router = HttpServer::new(service).router();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = ConverterClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: conversions
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    // Direct rate: buy side of USD/UAH
    let result = client.convert("USD", "UAH", 100.0).await?;
    println!(
        "✅ {} {} = {:.2} {}",
        result.amount, result.source, result.converted_amount, result.target
    );

    // Reverse rate: sell side of USD/UAH
    let result = client.convert("UAH", "USD", 1000.0).await?;
    println!(
        "✅ {} {} = {:.2} {}",
        result.amount, result.source, result.converted_amount, result.target
    );

    // Cross rate for a pair only quoted against UAH
    let result = client.convert("UAH", "GBP", 1000.0).await?;
    println!(
        "✅ {} {} = {:.2} {}",
        result.amount, result.source, result.converted_amount, result.target
    );

    // Unknown symbol
    match client.convert("ABC", "UAH", 1.0).await {
        Err(ClientError::Api { status, message }) => {
            println!("✅ Rejected unknown currency: {status} {message}")
        }
        other => anyhow::bail!("expected an API error, got {other:?}"),
    }

    // Supported but unquoted pair
    match client.convert("GBP", "USD", 1.0).await {
        Err(ClientError::Api { status, message }) => {
            println!("✅ No rate for GBP/USD: {status} {message}")
        }
        other => anyhow::bail!("expected an API error, got {other:?}"),
    }

    println!("ℹ️  {} currencies supported", CurrencyCode::all().len());

    Ok(())
}
