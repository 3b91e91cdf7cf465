//! Unified error handling for the back office.

use funsport_core::labels;
use thiserror::Error;

use crate::api::AdminApiError;
use crate::config::ConfigError;

/// Application-level error type for the back office.
#[derive(Debug, Error)]
pub enum AppError {
    /// Back-office API call failed.
    #[error("API error: {0}")]
    Api(#[from] AdminApiError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Form input or selection failed validation. Carries the message to
    /// show.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The referenced record is not in the loaded list. Carries the message
    /// to show.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Localized message to show the operator.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Config(_) => labels::GENERIC_ERROR.to_string(),
            Self::Validation(message) | Self::NotFound(message) => message.clone(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::validation(labels::notice::SELECT_USERS);
        assert_eq!(
            err.to_string(),
            "Validation failed: Vui lòng chọn khách hàng để xóa."
        );
        assert_eq!(err.user_message(), labels::notice::SELECT_USERS);
    }

    #[test]
    fn test_not_found_message() {
        let err = AppError::not_found(labels::notice::ORDER_NOT_FOUND);
        assert_eq!(err.user_message(), "Không tìm thấy đơn hàng");
    }
}
