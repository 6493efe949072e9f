//! # Converter Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the rate cache adapter
//! - Create the rate provider client and the conversion service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_cache::build_cache;
use converter_hex::{
    ConversionService,
    inbound::{HttpServer, RateLimiterState},
    outbound::MonobankClient,
};

/// Installs the OTLP span exporter when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
fn init_tracer() -> anyhow::Result<Option<(sdktrace::Tracer, sdktrace::SdkTracerProvider)>> {
    if std::env::var_os("OTEL_EXPORTER_OTLP_ENDPOINT").is_none() {
        return Ok(None);
    }

    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok(Some((provider.tracer("converter-service"), provider)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing
    let (telemetry, otel_provider) = match init_tracer()? {
        Some((tracer, provider)) => (
            Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Some(provider),
        ),
        None => (None, None),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,converter_app=debug,converter_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting converter server on port {}", config.port);
    match config.cache.redis_url() {
        Some(url) => tracing::info!("Using Redis cache: {}", url),
        None => tracing::info!("Using in-memory cache"),
    }
    tracing::info!(
        url = %config.rates_api_url,
        ttl_secs = config.cache_ttl.as_secs(),
        "Rate provider configured"
    );

    // Build the cache (connects up front for Redis)
    let cache = build_cache(&config.cache).await?;

    let provider = MonobankClient::new(config.rates_api_url.clone(), config.fetch_timeout)?;

    // Create the conversion service
    let service = ConversionService::new(cache, provider, config.cache_ttl);

    // Create and run the HTTP server
    let rate_limiter = RateLimiterState::per_minute(config.rate_limit_per_minute)
        .trust_forwarded_for(config.trust_forwarded_for);
    let server = HttpServer::with_rate_limiter(service, rate_limiter);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
