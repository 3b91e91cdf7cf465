//! Product management page.

use std::fmt::Write;

use funsport_core::labels::{self, notice};
use funsport_core::listing::{Page, contains_ignore_case, is_any, matches_choice, paginate};
use funsport_core::{NOT_AVAILABLE, Product, ProductId, ProductStats};
use tracing::{info, instrument};

use super::{ADMIN_PAGE_SIZE, Selection};
use crate::api::{AdminApiError, AdminClient, ProductForm};
use crate::error::{AppError, Result};
use crate::export;

/// Filters of the product table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Name substring, case-insensitive.
    pub search: String,
    /// Category id, name or code; `all` or blank for every category.
    pub category: Option<String>,
    /// Stock status (`instock`, `lowstock`, `outofstock`); `all` or blank for
    /// every status.
    pub status: Option<String>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        let category = self.category.as_deref();
        contains_ignore_case(&product.name, &self.search)
            && (is_any(category) || category.is_some_and(|key| product.in_category(key)))
            && matches_choice(product.stock_status().as_str(), self.status.as_deref())
    }
}

/// Product table state.
#[derive(Debug, Clone, Default)]
pub struct ProductsView {
    products: Vec<Product>,
    stats: ProductStats,
    filter: ProductFilter,
    filtered: Vec<Product>,
    page: usize,
    selection: Selection,
}

impl ProductsView {
    /// Load products and their stock breakdown. Either failure fails the
    /// page.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    #[instrument(skip(client))]
    pub async fn load(client: &AdminClient) -> std::result::Result<Self, AdminApiError> {
        let (products, stats) = tokio::try_join!(client.list_products(), client.product_stats())?;
        Ok(Self::new(products, stats))
    }

    /// Build the page over already loaded data, unfiltered, on page 1.
    #[must_use]
    pub fn new(products: Vec<Product>, stats: ProductStats) -> Self {
        let mut view = Self {
            products,
            stats,
            page: 1,
            ..Self::default()
        };
        view.refresh();
        view
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn stats(&self) -> &ProductStats {
        &self.stats
    }

    #[must_use]
    pub const fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Products left after filtering, across all pages.
    #[must_use]
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    /// Replace the filters and go back to page 1.
    pub fn set_filter(&mut self, filter: ProductFilter) {
        self.filter = filter;
        self.page = 1;
        self.refresh();
    }

    pub fn go_to_page(&mut self, page: usize) {
        let last = self.current_page().total_pages.max(1);
        self.page = page.clamp(1, last);
    }

    #[must_use]
    pub fn current_page(&self) -> Page<'_, Product> {
        paginate(&self.filtered, self.page, ADMIN_PAGE_SIZE)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Flip the checkbox of one product.
    pub fn toggle_selected(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Check or clear every product on the current page.
    pub fn select_page(&mut self, selected: bool) {
        let page = paginate(&self.filtered, self.page, ADMIN_PAGE_SIZE);
        self.selection
            .set_all(page.items.iter().map(|p| p.id.as_str()), selected);
    }

    /// Whether every product on the current page is checked.
    #[must_use]
    pub fn page_selected(&self) -> bool {
        self.selection
            .all_selected(self.current_page().items.iter().map(|p| p.id.as_str()))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a product from `form`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an incomplete form, or the API error.
    #[instrument(skip(self, client, form), fields(name = %form.name))]
    pub async fn add(&mut self, client: &AdminClient, form: &ProductForm) -> Result<String> {
        validate(form)?;
        let created = client.create_product(form).await?;
        info!(product_id = %created.id, "Product created");
        self.products.push(created);
        self.after_change();
        Ok(notice::PRODUCT_ADDED.to_string())
    }

    /// Replace product `id` with `form`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an incomplete form or an unknown id, or
    /// the API error.
    #[instrument(skip(self, client, form), fields(product_id = %id))]
    pub async fn update(
        &mut self,
        client: &AdminClient,
        id: &str,
        form: &ProductForm,
    ) -> Result<String> {
        validate(form)?;
        let index = self.position(id)?;
        let updated = client.update_product(id, form).await?;
        if let Some(slot) = self.products.get_mut(index) {
            *slot = updated;
        }
        self.after_change();
        Ok(notice::PRODUCT_UPDATED.to_string())
    }

    /// Delete product `id`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id, or the API error.
    #[instrument(skip(self, client), fields(product_id = %id))]
    pub async fn delete(&mut self, client: &AdminClient, id: &str) -> Result<String> {
        let index = self.position(id)?;
        client.delete_product(id).await?;
        self.products.remove(index);
        self.selection.set(id, false);
        self.after_change();
        Ok(notice::PRODUCT_DELETED.to_string())
    }

    /// Delete every checked product in one request.
    ///
    /// # Errors
    ///
    /// Returns a validation error when nothing is checked, or the API error.
    #[instrument(skip(self, client))]
    pub async fn delete_selected(&mut self, client: &AdminClient) -> Result<String> {
        let ids: Vec<ProductId> = self
            .products
            .iter()
            .filter(|p| self.selection.is_selected(p.id.as_str()))
            .map(|p| p.id.clone())
            .collect();
        if ids.is_empty() {
            return Err(AppError::validation(notice::SELECT_PRODUCTS));
        }

        client.delete_products(&ids).await?;
        info!(count = ids.len(), "Products deleted");
        self.products.retain(|p| !ids.contains(&p.id));
        self.selection.clear();
        self.after_change();
        Ok(notice::PRODUCT_DELETED.to_string())
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// CSV of every product, ignoring filters.
    #[must_use]
    pub fn export_csv(&self) -> String {
        export::products_csv(&self.products)
    }

    /// Multi-line summary of product `id`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id.
    pub fn details(&self, id: &str) -> Result<String> {
        let product = self
            .products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(notice::PRODUCT_MISSING))?;

        let mut text = String::new();
        let _ = writeln!(text, "Tên: {}", product.name);
        let _ = writeln!(
            text,
            "Danh mục: {}",
            product.category_label().unwrap_or(NOT_AVAILABLE)
        );
        let _ = writeln!(text, "Giá: {}", product.price);
        let _ = writeln!(text, "Số lượng: {}", product.quantity.unwrap_or_default());
        let _ = writeln!(
            text,
            "Tồn kho: {}",
            labels::stock_status(product.stock_status())
        );
        if !product.colors.is_empty() {
            let _ = writeln!(text, "Màu sắc: {}", product.colors.as_slice().join(", "));
        }
        if let Some(desc) = product.desc.as_deref().filter(|d| !d.trim().is_empty()) {
            let _ = writeln!(text, "Mô tả: {desc}");
        }
        Ok(text.trim_end().to_string())
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(notice::PRODUCT_MISSING))
    }

    fn after_change(&mut self) {
        self.stats = ProductStats::from_products(&self.products);
        self.refresh();
        self.go_to_page(self.page);
    }

    fn refresh(&mut self) {
        self.filtered = self
            .products
            .iter()
            .filter(|p| self.filter.matches(p))
            .cloned()
            .collect();
    }
}

fn validate(form: &ProductForm) -> Result<()> {
    if form.name.trim().is_empty() || !form.price.is_positive() || form.quantity.is_none() {
        return Err(AppError::validation(notice::PRODUCT_FORM_INCOMPLETE));
    }
    Ok(())
}
