//! REST client for the back-office side of the FunSport backend.
//!
//! # Resources
//!
//! - **Products** (`/v1/products`): list, stats, create, update, delete, bulk delete
//! - **Orders** (`/v1/orders`): list, get, create, status update, lock toggle,
//!   delete, bulk delete, revenue, recent orders
//! - **Users** (`/v1/users`): list, get, stats, lock toggles, violation reports,
//!   delete, bulk delete
//! - **Categories** (`/v1/categories`): list, create, update, delete
//! - **Dashboard** (`/v1/stats`)
//!
//! Nothing is cached: every page load reads fresh data.

mod categories;
mod orders;
mod products;
mod stats;
mod users;

pub use categories::CategoryForm;
pub use products::ProductForm;
pub use users::Violation;

use std::sync::Arc;

use funsport_core::labels;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::AdminConfig;

/// Longest response body excerpt kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 500;

/// Errors that can occur when talking to the back-office endpoints.
#[derive(Debug, Error)]
pub enum AdminApiError {
    /// Transport failure: the server could not be reached or the
    /// connection dropped.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error: {status} - {body}")]
    Api {
        /// Response status.
        status: StatusCode,
        /// Response body, truncated.
        body: String,
    },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    Url(String),
}

impl AdminApiError {
    /// HTTP status of the failed call, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            Self::Parse(_) | Self::Url(_) => None,
        }
    }

    /// Localized message to show the operator.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(_) | Self::Url(_) => labels::GENERIC_ERROR.to_string(),
            Self::Http(_) | Self::Api { .. } => {
                let status = self.status();
                labels::http_error_message(
                    status.map(|s| s.as_u16()),
                    status.and_then(|s| s.canonical_reason()),
                )
            }
        }
    }
}

/// Client for the back-office REST endpoints.
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl AdminClient {
    /// Create a new back-office client.
    #[must_use]
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.clone(),
            }),
        }
    }

    /// Build `{base_url}/v1/{segments...}`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, AdminApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AdminApiError::Url(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .push("v1")
            .extend(segments);
        Ok(url)
    }

    /// Execute a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, AdminApiError> {
        let body = self.execute(self.inner.client.get(url)).await?;
        decode(&body)
    }

    /// Execute a POST request.
    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, AdminApiError> {
        let body = self.execute(self.inner.client.post(url).json(body)).await?;
        decode(&body)
    }

    /// Execute a POST request whose response body is not needed.
    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<(), AdminApiError> {
        self.execute(self.inner.client.post(url).json(body))
            .await
            .map(drop)
    }

    /// Execute a PUT request.
    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, AdminApiError> {
        let body = self.execute(self.inner.client.put(url).json(body)).await?;
        decode(&body)
    }

    /// Execute a PATCH request.
    pub(crate) async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, AdminApiError> {
        let body = self.execute(self.inner.client.patch(url).json(body)).await?;
        decode(&body)
    }

    /// Execute a DELETE request. Any success status counts, whatever the
    /// body.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), AdminApiError> {
        self.execute(self.inner.client.delete(url)).await.map(drop)
    }

    /// Send the request and return the body of a successful response.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, AdminApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let excerpt = excerpt(&body);
        tracing::warn!(status = %status, body = %excerpt, "Back-office API returned non-success status");
        Err(AdminApiError::Api {
            status,
            body: excerpt,
        })
    }
}

/// Decode a JSON body. An empty body decodes as JSON `null`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, AdminApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, body = %excerpt(body), "Failed to parse back-office response");
        AdminApiError::Parse(e)
    })
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> AdminClient {
        AdminClient::new(&AdminConfig::for_backend(Url::parse(base).unwrap()))
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let url = client("http://localhost:8000")
            .endpoint(&["orders", "toggle-lock", "DH 01"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/v1/orders/toggle-lock/DH%2001");

        let url = client("http://localhost:8000/api/").endpoint(&["stats"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/stats");
    }

    #[test]
    fn test_decode_empty_body() {
        let value: Option<serde_json::Value> = decode("  ").unwrap();
        assert!(value.is_none());
        assert!(matches!(
            decode::<Vec<u32>>("<html>"),
            Err(AdminApiError::Parse(_))
        ));
    }

    #[test]
    fn test_user_message() {
        let err = AdminApiError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert_eq!(err.user_message(), "Lỗi máy chủ nội bộ");
        assert_eq!(
            AdminApiError::Url("x".to_string()).user_message(),
            labels::GENERIC_ERROR
        );
    }
}
