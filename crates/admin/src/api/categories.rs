//! Category management (`/v1/categories`).

use funsport_core::{Category, CategoryId, CategoryStatus};
use serde::Serialize;
use tracing::instrument;

use super::{AdminApiError, AdminClient};

/// Body of category create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryForm {
    /// Set when editing an existing category.
    #[serde(skip)]
    pub id: Option<CategoryId>,
    pub code: String,
    pub name: String,
    pub status: CategoryStatus,
}

impl CategoryForm {
    /// Whether both required fields are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.code.trim().is_empty()
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            id: Some(category.id.clone()),
            code: category.code.clone(),
            name: category.name.clone(),
            status: category.status.clone(),
        }
    }
}

impl AdminClient {
    /// Get every category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, AdminApiError> {
        let categories: Option<Vec<Category>> =
            self.get(self.endpoint(&["categories"])?).await?;
        Ok(categories.unwrap_or_default())
    }

    /// Create a category. Returns the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, form), fields(code = %form.code))]
    pub async fn create_category(&self, form: &CategoryForm) -> Result<Category, AdminApiError> {
        self.post(self.endpoint(&["categories"])?, form).await
    }

    /// Replace a category. Returns the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, form), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: &str,
        form: &CategoryForm,
    ) -> Result<Category, AdminApiError> {
        self.put(self.endpoint(&["categories", id])?, form).await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: &str) -> Result<(), AdminApiError> {
        self.delete(self.endpoint(&["categories", id])?).await
    }
}
