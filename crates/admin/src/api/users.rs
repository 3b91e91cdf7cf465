//! Customer account management (`/v1/users`).

use std::fmt;
use std::str::FromStr;

use funsport_core::{User, UserId, UserStats};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{AdminApiError, AdminClient};

/// Kind of misconduct reported against a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Violation {
    Spam,
    /// Order cancelled after confirmation.
    Cancellation,
    /// Delivery refused or never collected.
    Ghosting,
}

impl Violation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Cancellation => "cancellation",
            Self::Ghosting => "ghosting",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Violation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spam" => Ok(Self::Spam),
            "cancellation" => Ok(Self::Cancellation),
            "ghosting" => Ok(Self::Ghosting),
            other => Err(format!(
                "unknown violation `{other}` (expected spam, cancellation or ghosting)"
            )),
        }
    }
}

impl AdminClient {
    /// Get every customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, AdminApiError> {
        let users: Option<Vec<User>> = self.get(self.endpoint(&["users"])?).await?;
        Ok(users.unwrap_or_default())
    }

    /// Get one customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: &str) -> Result<User, AdminApiError> {
        self.get(self.endpoint(&["users", id])?).await
    }

    /// Get the account breakdown computed by the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn user_stats(&self) -> Result<UserStats, AdminApiError> {
        self.get(self.endpoint(&["users", "stats"])?).await
    }

    /// Lock an account with `reason`, or unlock it (`reason` is then
    /// `None`). Returns the updated account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn toggle_user_lock(
        &self,
        id: &str,
        reason: Option<&str>,
    ) -> Result<User, AdminApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ToggleLock<'a> {
            lock_reason: Option<&'a str>,
        }

        self.post(
            self.endpoint(&["users", "toggle-lock", id])?,
            &ToggleLock { lock_reason: reason },
        )
        .await
    }

    /// Lock or unlock one of the customer's listed products. Returns the
    /// updated account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn toggle_product_lock(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> Result<User, AdminApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ToggleProductLock<'a> {
            product_id: &'a str,
        }

        self.post(
            self.endpoint(&["users", "toggle-product-lock", user_id])?,
            &ToggleProductLock { product_id },
        )
        .await
    }

    /// Record a violation against a customer. Returns the updated account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %user_id, violation = %violation))]
    pub async fn report_violation(
        &self,
        user_id: &str,
        violation: Violation,
    ) -> Result<User, AdminApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Report {
            violation_type: Violation,
        }

        self.post(
            self.endpoint(&["users", "report-violation", user_id])?,
            &Report {
                violation_type: violation,
            },
        )
        .await
    }

    /// Delete a customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &str) -> Result<(), AdminApiError> {
        self.delete(self.endpoint(&["users", id])?).await
    }

    /// Delete several customer accounts in one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn delete_users(&self, ids: &[UserId]) -> Result<(), AdminApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct BulkDelete<'a> {
            user_ids: &'a [UserId],
        }

        self.post_unit(
            self.endpoint(&["users", "bulk"])?,
            &BulkDelete { user_ids: ids },
        )
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_parse_and_wire_name() {
        assert_eq!("Ghosting".parse::<Violation>().unwrap(), Violation::Ghosting);
        assert!("fraud".parse::<Violation>().is_err());
        assert_eq!(
            serde_json::to_string(&Violation::Cancellation).unwrap(),
            "\"cancellation\""
        );
    }
}
