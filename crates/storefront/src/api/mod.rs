//! REST client for the storefront side of the FunSport backend.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest` 0.13
//! - The backend is the source of truth; nothing is synced locally
//! - In-memory caching via `moka` for catalog reads (default 5 minute TTL)
//!
//! # Endpoints
//!
//! - `GET /v1/product`, `GET /v1/product/{id}`, related products
//! - `GET /v1/productsell` flash-sale products
//! - `GET /v1/category`, `GET /api/news`
//! - `POST /v1/account/login`, `POST /v1/account/add`
//! - `POST /payment` payment gateway hand-off

mod cache;
mod client;

pub use client::{LoginRequest, RegisterRequest, RegisterResponse, StorefrontClient};

use funsport_core::labels;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport failure: the server could not be reached or the
    /// connection dropped.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Response body, truncated.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    Url(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl BackendError {
    /// HTTP status of the failed call, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::Parse(_) | Self::Url(_) => None,
        }
    }

    /// The `message` field of a JSON error body, when the backend sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        let Self::Status { body, .. } = self else {
            return None;
        };
        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get("message")?
            .as_str()
            .map(str::to_owned)
    }

    /// Localized message to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(_) | Self::Url(_) => labels::GENERIC_ERROR.to_string(),
            _ => {
                let status = self.status();
                labels::http_error_message(
                    status.map(|s| s.as_u16()),
                    status.and_then(|s| s.canonical_reason()),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_by_status() {
        let err = BackendError::Status {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert_eq!(err.user_message(), "Không tìm thấy dữ liệu");

        let err = BackendError::Status {
            status: StatusCode::CONFLICT,
            body: String::new(),
        };
        assert_eq!(err.user_message(), "Lỗi 409: Conflict");

        let err = BackendError::NotFound("product p1".to_string());
        assert_eq!(err.user_message(), "Không tìm thấy dữ liệu");
    }

    #[test]
    fn test_server_message_from_body() {
        let err = BackendError::Status {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"message":"Email đã tồn tại"}"#.to_string(),
        };
        assert_eq!(err.server_message().as_deref(), Some("Email đã tồn tại"));

        let err = BackendError::Status {
            status: StatusCode::BAD_REQUEST,
            body: "<html>".to_string(),
        };
        assert!(err.server_message().is_none());
    }
}
