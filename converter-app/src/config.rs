//! Configuration loading from environment.

use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use converter_cache::CacheBackend;
use converter_hex::outbound::DEFAULT_RATES_URL;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CACHE_TTL_SECS: NonZeroU32 = NonZeroU32::new(300).unwrap();
const DEFAULT_FETCH_TIMEOUT_SECS: NonZeroU32 = NonZeroU32::new(10).unwrap();
const DEFAULT_RATE_LIMIT_PER_MINUTE: NonZeroU32 = NonZeroU32::new(100).unwrap();

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cache: CacheBackend,
    pub cache_ttl: Duration,
    pub rates_api_url: String,
    pub fetch_timeout: Duration,
    pub rate_limit_per_minute: NonZeroU32,
    /// Key rate limits by `X-Forwarded-For` instead of the peer address.
    pub trust_forwarded_for: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the raw value of a variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let backend = lookup("CACHE_BACKEND").unwrap_or_else(|| "redis".to_string());
        let cache = match backend.trim().to_ascii_lowercase().as_str() {
            "redis" => {
                let host = required(&lookup, "REDIS_HOST")?;
                let port = parse(&required(&lookup, "REDIS_PORT")?, "REDIS_PORT")?;
                CacheBackend::Redis { host, port }
            }
            "memory" => CacheBackend::Memory,
            other => anyhow::bail!("unknown CACHE_BACKEND {:?} (expected redis or memory)", other),
        };

        let cache_ttl = parse_or(&lookup, "CACHE_TTL", DEFAULT_CACHE_TTL_SECS)?;
        let fetch_timeout =
            parse_or(&lookup, "RATES_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?;
        let rate_limit_per_minute =
            parse_or(&lookup, "RATE_LIMIT_PER_MINUTE", DEFAULT_RATE_LIMIT_PER_MINUTE)?;
        let trust_forwarded_for = parse_or(&lookup, "TRUST_FORWARDED_FOR", false)?;

        let rates_api_url =
            lookup("RATES_API_URL").unwrap_or_else(|| DEFAULT_RATES_URL.to_string());

        Ok(Self {
            port,
            cache,
            cache_ttl: Duration::from_secs(cache_ttl.get().into()),
            rates_api_url,
            fetch_timeout: Duration::from_secs(fetch_timeout.get().into()),
            rate_limit_per_minute,
            trust_forwarded_for,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<String> {
    lookup(key).ok_or_else(|| anyhow::anyhow!("{} environment variable is required", key))
}

fn parse<T>(raw: &str, key: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid {} {:?}: {}", key, raw, e))
}

/// Parses `key` if set, otherwise returns `default`.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => parse(&raw, key),
        None => Ok(default),
    }
}
