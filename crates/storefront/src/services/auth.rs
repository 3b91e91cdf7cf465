//! Customer authentication.
//!
//! The backend owns accounts; this side only forwards credentials and keeps
//! the returned session blob under the `login` storage key.

use funsport_core::{Email, Session, labels};
use secrecy::{ExposeSecret, SecretString};
use tracing::{instrument, warn};

use crate::api::{LoginRequest, RegisterRequest, StorefrontClient};
use crate::error::{AppError, Result};
use crate::storage::{LOGIN_KEY, LocalStorage, StorageError};

/// Registration form as typed by the customer.
#[derive(Debug)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// Authentication service.
pub struct AuthService<'a> {
    client: &'a StorefrontClient,
    storage: &'a LocalStorage,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(client: &'a StorefrontClient, storage: &'a LocalStorage) -> Self {
        Self { client, storage }
    }

    /// The stored session, if any. An unreadable blob is logged and treated
    /// as logged out.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        match self.storage.get_json::<Session>(LOGIN_KEY) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable login session");
                None
            }
        }
    }

    /// Whether a session blob is stored.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session().is_some()
    }

    /// Whether the stored session carries the admin flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session().is_some_and(|s| s.admin)
    }

    /// Log in and store the session the backend returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the credentials or the
    /// session cannot be stored.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: SecretString) -> Result<Session> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password,
        };
        let session = self.client.login(&request).await.inspect_err(|e| {
            warn!(error = %e, "Login failed");
        })?;

        self.storage.set_json(LOGIN_KEY, &session)?;
        Ok(session)
    }

    /// Create an account. Returns the notice to show: the backend's own
    /// message when it sent one.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the passwords differ, an email error
    /// when the address is malformed, and a backend error when the backend
    /// rejects the registration. The backend is not called when local
    /// validation fails.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn register(&self, form: RegistrationForm) -> Result<String> {
        if form.password.expose_secret() != form.confirm_password.expose_secret() {
            return Err(AppError::validation(labels::notice::PASSWORD_MISMATCH));
        }
        let email = Email::parse(&form.email)?;

        let request = RegisterRequest {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: email.into_inner(),
            password: form.password,
            confirm_password: form.confirm_password,
        };
        let response = self.client.register(&request).await.inspect_err(|e| {
            warn!(error = %e, "Registration failed");
        })?;

        Ok(response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| labels::notice::REGISTERED.to_string()))
    }

    /// Forget the session. Clears the whole local storage, cart included.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be cleared.
    pub fn logout(&self) -> std::result::Result<(), StorageError> {
        self.storage.clear()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::storage::CART_KEY;

    fn fixture() -> (tempfile::TempDir, StorefrontClient, LocalStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::open(dir.path()).unwrap();
        // Port 9 (discard) is never contacted by these tests.
        let config =
            StorefrontConfig::for_backend("http://127.0.0.1:9".parse().unwrap(), dir.path());
        (dir, StorefrontClient::new(&config), storage)
    }

    fn form(password: &str, confirm: &str, email: &str) -> RegistrationForm {
        RegistrationForm {
            first_name: "An".to_string(),
            last_name: "Trần".to_string(),
            email: email.to_string(),
            password: SecretString::from(password),
            confirm_password: SecretString::from(confirm),
        }
    }

    #[test]
    fn test_session_flags() {
        let (_dir, client, storage) = fixture();
        let auth = AuthService::new(&client, &storage);
        assert!(!auth.is_logged_in());
        assert!(!auth.is_admin());

        storage.set_item(LOGIN_KEY, r#"{"admin":false,"name":"An"}"#).unwrap();
        assert!(auth.is_logged_in());
        assert!(!auth.is_admin());

        storage.set_item(LOGIN_KEY, r#"{"admin":true}"#).unwrap();
        assert!(auth.is_admin());

        storage.set_item(LOGIN_KEY, "garbage").unwrap();
        assert!(!auth.is_logged_in());
    }

    #[test]
    fn test_logout_clears_everything() {
        let (_dir, client, storage) = fixture();
        storage.set_item(LOGIN_KEY, r#"{"admin":true}"#).unwrap();
        storage.set_item(CART_KEY, "[]").unwrap();

        AuthService::new(&client, &storage).logout().unwrap();

        assert!(!storage.contains(LOGIN_KEY).unwrap());
        assert!(!storage.contains(CART_KEY).unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords_before_calling_backend() {
        let (_dir, client, storage) = fixture();
        let auth = AuthService::new(&client, &storage);

        let err = auth
            .register(form("abc123", "abc124", "an@funsport.vn"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), labels::notice::PASSWORD_MISMATCH);
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_email() {
        let (_dir, client, storage) = fixture();
        let auth = AuthService::new(&client, &storage);

        let err = auth
            .register(form("abc123", "abc123", "an.funsport.vn"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidEmail(_)));
    }
}
