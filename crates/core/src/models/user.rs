//! Customer account as seen by the back office.

use serde::{Deserialize, Serialize};

use super::{Document, Product};
use crate::types::{UserId, UserStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "UserId::is_empty")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub spam_count: u32,
    pub cancellation_count: u32,
    pub ghosting_count: u32,
    pub products: Vec<Product>,
    pub lock_reason: Option<String>,
}

impl User {
    /// Sum of every recorded violation.
    #[must_use]
    pub const fn violation_total(&self) -> u32 {
        self.spam_count + self.cancellation_count + self.ghosting_count
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.status == UserStatus::Locked
    }
}

impl Document for User {
    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_missing_counters() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u1","name":"Lan","email":"lan@funsport.vn","status":"locked","spamCount":2,"lockReason":null}"#,
        )
        .unwrap();

        assert!(user.is_locked());
        assert_eq!(user.spam_count, 2);
        assert_eq!(user.ghosting_count, 0);
        assert_eq!(user.violation_total(), 2);
        assert!(user.lock_reason.is_none());
    }
}
