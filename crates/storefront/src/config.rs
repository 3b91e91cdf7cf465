//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_API_URL` - Backend base URL for the storefront (falls back to `FUNSPORT_API_URL`)
//! - `FUNSPORT_API_URL` - Backend base URL (default: `http://localhost:8000`)
//! - `FUNSPORT_DATA_DIR` - Local storage directory (default: `.funsport`)
//! - `CHECKOUT_REDIRECT_URL` - Where the payment gateway returns the customer
//!   (default: `http://localhost:4200/thank-you`)
//! - `STOREFRONT_CACHE_TTL_SECS` - Response cache lifetime in seconds (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_DATA_DIR: &str = ".funsport";
pub const DEFAULT_REDIRECT_URL: &str = "http://localhost:4200/thank-you";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend base URL; every REST path is appended to it
    pub api_url: Url,
    /// Directory backing local storage
    pub data_dir: PathBuf,
    /// Redirect URL handed to the payment gateway
    pub checkout_redirect_url: String,
    /// Lifetime of cached product and category responses
    pub cache_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL or number fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let (api_key, api_url) = get_api_url("STOREFRONT_API_URL");
        let api_url = parse_url(&api_key, &api_url)?;
        let data_dir = PathBuf::from(get_env_or_default("FUNSPORT_DATA_DIR", DEFAULT_DATA_DIR));
        let checkout_redirect_url = parse_url(
            "CHECKOUT_REDIRECT_URL",
            &get_env_or_default("CHECKOUT_REDIRECT_URL", DEFAULT_REDIRECT_URL),
        )?
        .to_string();
        let cache_ttl = get_env_or_default(
            "STOREFRONT_CACHE_TTL_SECS",
            &DEFAULT_CACHE_TTL_SECS.to_string(),
        )
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_CACHE_TTL_SECS".to_string(), e.to_string())
        })?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            api_url,
            data_dir,
            checkout_redirect_url,
            cache_ttl,
            sentry_dsn,
        })
    }

    /// Configuration pointing at `api_url` with every other value defaulted.
    #[must_use]
    pub fn for_backend(api_url: Url, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_url,
            data_dir: data_dir.into(),
            checkout_redirect_url: DEFAULT_REDIRECT_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            sentry_dsn: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Resolve the backend URL: the side-specific variable, then
/// `FUNSPORT_API_URL`, then the default. Returns the variable name it came
/// from so parse errors point at the right one.
fn get_api_url(specific_key: &str) -> (String, String) {
    [specific_key, "FUNSPORT_API_URL"]
        .into_iter()
        .find_map(|key| get_optional_env(key).map(|value| (key.to_string(), value)))
        .unwrap_or_else(|| ("FUNSPORT_API_URL".to_string(), DEFAULT_API_URL.to_string()))
}

/// Parse an absolute http(s) URL.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    Ok(url)
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}
