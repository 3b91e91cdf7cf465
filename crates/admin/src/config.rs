//! Back-office configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ADMIN_API_URL` - Backend base URL for the back office (falls back to `FUNSPORT_API_URL`)
//! - `FUNSPORT_API_URL` - Backend base URL (default: `http://localhost:8000`)

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Back-office client configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Backend base URL; every `/v1/...` path is appended to it
    pub api_url: Url,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the backend URL fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let (key, value) = ["ADMIN_API_URL", "FUNSPORT_API_URL"]
            .into_iter()
            .find_map(|key| get_optional_env(key).map(|value| (key, value)))
            .unwrap_or(("FUNSPORT_API_URL", DEFAULT_API_URL.to_string()));

        Ok(Self {
            api_url: parse_url(key, &value)?,
        })
    }

    /// Configuration pointing at `api_url`.
    #[must_use]
    pub const fn for_backend(api_url: Url) -> Self {
        Self { api_url }
    }
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
