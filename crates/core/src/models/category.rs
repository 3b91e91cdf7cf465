//! Product category.

use serde::{Deserialize, Serialize};

use super::Document;
use crate::types::{CategoryId, CategoryStatus};

/// A product category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "CategoryId::is_empty")]
    pub id: CategoryId,
    pub code: String,
    pub name: String,
    pub status: CategoryStatus,
}

impl Category {
    /// Whether this category is identified by `key`, which may be its id,
    /// its display name or its code.
    #[must_use]
    pub fn is_identified_by(&self, key: &str) -> bool {
        self.id == *key || self.name == key || self.code == key
    }
}

impl Document for Category {
    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}
