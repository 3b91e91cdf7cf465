//! Unified error handling for the storefront.
//!
//! Services return `Result<T, AppError>`. Every variant knows the Vietnamese
//! message to show the customer via [`AppError::user_message`].

use funsport_core::{EmailError, labels};
use thiserror::Error;

use crate::api::BackendError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend call failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Local storage read or write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed email address in a form.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// User input failed validation. Carries the message to show.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The payment gateway did not return a payment page.
    #[error("Payment gateway returned no payment URL")]
    MissingPayUrl,
}

impl AppError {
    /// Localized message to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend(err) => err.server_message().unwrap_or_else(|| err.user_message()),
            Self::InvalidEmail(_) => "Email không hợp lệ".to_string(),
            Self::Validation(message) => message.clone(),
            Self::MissingPayUrl => labels::notice::NO_PAYMENT_LINK.to_string(),
            Self::Storage(_) | Self::Config(_) => labels::GENERIC_ERROR.to_string(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
