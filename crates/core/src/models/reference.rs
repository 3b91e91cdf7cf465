//! References that the backend may or may not have populated.

use serde::{Deserialize, Serialize};

/// A backend document with a string primary key.
pub trait Document {
    /// The document's `_id`.
    fn document_id(&self) -> &str;
}

/// A reference to another document: either its bare id, or the embedded
/// document when the backend populated it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    /// Only the id was sent.
    Id(String),
    /// The full document was embedded.
    Embedded(Box<T>),
}

impl<T: Document> Ref<T> {
    /// The referenced document's id, whichever form was sent.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Embedded(doc) => doc.document_id(),
        }
    }
}

impl<T> Ref<T> {
    /// The embedded document, if the backend populated it.
    #[must_use]
    pub fn embedded(&self) -> Option<&T> {
        match self {
            Self::Id(_) => None,
            Self::Embedded(doc) => Some(doc),
        }
    }
}

impl<T> From<T> for Ref<T> {
    fn from(doc: T) -> Self {
        Self::Embedded(Box::new(doc))
    }
}
