//! Category management page.

use funsport_core::labels::notice;
use funsport_core::listing::{contains_ignore_case, matches_choice};
use funsport_core::{Category, CategoryStatus};
use tracing::{info, instrument};

use crate::api::{AdminApiError, AdminClient, CategoryForm};
use crate::error::{AppError, Result};
use crate::export;

/// Category counts over the filtered table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

/// Category table state.
#[derive(Debug, Clone, Default)]
pub struct CategoriesView {
    categories: Vec<Category>,
    search: String,
    status: Option<String>,
    filtered: Vec<Category>,
}

impl CategoriesView {
    /// # Errors
    ///
    /// Returns an error if the categories cannot be loaded.
    #[instrument(skip(client))]
    pub async fn load(client: &AdminClient) -> std::result::Result<Self, AdminApiError> {
        Ok(Self::new(client.list_categories().await?))
    }

    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        let mut view = Self {
            categories,
            ..Self::default()
        };
        view.refresh();
        view
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Categories left after filtering.
    #[must_use]
    pub fn filtered(&self) -> &[Category] {
        &self.filtered
    }

    /// Keep categories whose name or code contains `search`.
    pub fn set_search(&mut self, search: &str) {
        search.clone_into(&mut self.search);
        self.refresh();
    }

    /// Keep categories with status `status`; `all` or blank keeps every
    /// status.
    pub fn set_status(&mut self, status: Option<&str>) {
        self.status = status.map(str::to_string);
        self.refresh();
    }

    #[must_use]
    pub fn stats(&self) -> CategoryStats {
        let count = |status: CategoryStatus| {
            self.filtered
                .iter()
                .filter(|c| c.status == status)
                .count()
        };
        CategoryStats {
            total: self.filtered.len(),
            active: count(CategoryStatus::Active),
            inactive: count(CategoryStatus::Inactive),
        }
    }

    /// Create the category, or update it when the form carries an id.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name or code is missing, a
    /// not-found error for an unknown id, or the API error.
    #[instrument(skip(self, client, form), fields(code = %form.code))]
    pub async fn save(&mut self, client: &AdminClient, form: &CategoryForm) -> Result<String> {
        if !form.is_complete() {
            return Err(AppError::validation(notice::CATEGORY_FORM_INCOMPLETE));
        }

        match form.id.as_ref() {
            Some(id) => {
                let index = self.position(id.as_str())?;
                let updated = client.update_category(id.as_str(), form).await?;
                if let Some(slot) = self.categories.get_mut(index) {
                    *slot = updated;
                }
                self.refresh();
                Ok(notice::CATEGORY_UPDATED.to_string())
            }
            None => {
                let created = client.create_category(form).await?;
                info!(category_id = %created.id, "Category created");
                self.categories.push(created);
                self.refresh();
                Ok(notice::CATEGORY_ADDED.to_string())
            }
        }
    }

    /// Delete category `id`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id, or the API error.
    #[instrument(skip(self, client), fields(category_id = %id))]
    pub async fn delete(&mut self, client: &AdminClient, id: &str) -> Result<String> {
        let index = self.position(id)?;
        client.delete_category(id).await?;
        self.categories.remove(index);
        self.refresh();
        Ok(notice::CATEGORY_DELETED.to_string())
    }

    /// CSV of the filtered categories.
    #[must_use]
    pub fn export_csv(&self) -> String {
        export::categories_csv(&self.filtered)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(notice::CATEGORY_NOT_FOUND))
    }

    fn refresh(&mut self) {
        self.filtered = self
            .categories
            .iter()
            .filter(|c| {
                (contains_ignore_case(&c.name, &self.search)
                    || contains_ignore_case(&c.code, &self.search))
                    && matches_choice(c.status.as_str(), self.status.as_deref())
            })
            .cloned()
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, code: &str, name: &str, status: CategoryStatus) -> Category {
        Category {
            id: id.into(),
            code: code.to_string(),
            name: name.to_string(),
            status,
        }
    }

    fn sample() -> CategoriesView {
        CategoriesView::new(vec![
            category("c1", "CL", "Cầu lông", CategoryStatus::Active),
            category("c2", "BD", "Bóng đá", CategoryStatus::Active),
            category("c3", "BR", "Bóng rổ", CategoryStatus::Inactive),
        ])
    }

    #[test]
    fn test_search_by_name_or_code() {
        let mut view = sample();
        view.set_search("bóng");
        assert_eq!(view.filtered().len(), 2);
        view.set_search("cl");
        assert_eq!(view.filtered().len(), 1);
        assert_eq!(
            view.stats(),
            CategoryStats {
                total: 1,
                active: 1,
                inactive: 0
            }
        );
    }

    #[test]
    fn test_status_filter_and_export() {
        let mut view = sample();
        view.set_status(Some("inactive"));
        assert_eq!(view.stats().total, 1);
        assert_eq!(
            view.export_csv(),
            "Code,Name,Status\n\"BR\",\"Bóng rổ\",\"Không hoạt động\""
        );

        view.set_status(Some("all"));
        assert_eq!(
            view.stats(),
            CategoryStats {
                total: 3,
                active: 2,
                inactive: 1
            }
        );
    }
}
