//! Errors surfaced by CLI commands.

use std::path::PathBuf;

use funsport_admin::AdminApiError;
use funsport_core::labels;
use funsport_storefront::BackendError;
use funsport_storefront::storage::StorageError;
use thiserror::Error;

/// Shown when a destructive command runs without `--yes`.
pub const CONFIRMATION_REQUIRED: &str = "Thao tác này không thể hoàn tác. Thêm --yes để xác nhận.";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Storefront(#[from] funsport_storefront::AppError),

    #[error(transparent)]
    Admin(#[from] funsport_admin::AppError),

    /// An admin command ran without an admin session.
    #[error("admin session required")]
    AdminRequired,

    /// A destructive command ran without `--yes`.
    #[error("confirmation required")]
    NotConfirmed,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Localized message printed to stderr.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storefront(err) => err.user_message(),
            Self::Admin(err) => err.user_message(),
            Self::AdminRequired => labels::notice::ADMIN_REQUIRED.to_string(),
            Self::NotConfirmed => CONFIRMATION_REQUIRED.to_string(),
            Self::InvalidArgument(message) => message.clone(),
            Self::Write { .. } => labels::GENERIC_ERROR.to_string(),
        }
    }
}

impl From<BackendError> for CliError {
    fn from(err: BackendError) -> Self {
        Self::Storefront(err.into())
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        Self::Storefront(err.into())
    }
}

impl From<funsport_storefront::config::ConfigError> for CliError {
    fn from(err: funsport_storefront::config::ConfigError) -> Self {
        Self::Storefront(err.into())
    }
}

impl From<AdminApiError> for CliError {
    fn from(err: AdminApiError) -> Self {
        Self::Admin(err.into())
    }
}

impl From<funsport_admin::config::ConfigError> for CliError {
    fn from(err: funsport_admin::config::ConfigError) -> Self {
        Self::Admin(err.into())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            CliError::AdminRequired.user_message(),
            "Bạn cần đăng nhập bằng tài khoản quản trị."
        );
        assert_eq!(CliError::NotConfirmed.user_message(), CONFIRMATION_REQUIRED);

        let err = CliError::from(StorageError::InvalidKey("../cart".to_string()));
        assert_eq!(err.user_message(), labels::GENERIC_ERROR);
    }
}
