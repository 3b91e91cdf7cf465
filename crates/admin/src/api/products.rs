//! Product management (`/v1/products`).

use funsport_core::{Price, Product, ProductId, ProductStats};
use serde::Serialize;
use tracing::instrument;

use super::{AdminApiError, AdminClient};

/// Category preselected in a new product form.
pub const DEFAULT_FORM_CATEGORY: &str = "badminton";

/// Minimum stock preselected in a new product form.
pub const DEFAULT_MIN_STOCK: i64 = 5;

/// Body of product create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: Price,
    /// `None` until the operator fills it in.
    pub quantity: Option<i64>,
    pub min_stock: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub describe: Option<String>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: DEFAULT_FORM_CATEGORY.to_string(),
            price: Price::ZERO,
            quantity: Some(0),
            min_stock: DEFAULT_MIN_STOCK,
            images: Vec::new(),
            desc: None,
            color: None,
            tab: None,
            describe: None,
        }
    }
}

impl From<&Product> for ProductForm {
    /// Prefill an edit form from an existing product.
    fn from(product: &Product) -> Self {
        let colors = product.colors.as_slice();
        Self {
            name: product.name.clone(),
            category: product.category_id().unwrap_or_default().to_string(),
            price: product.price,
            quantity: product.quantity,
            min_stock: product.min_stock.unwrap_or_default(),
            images: product.gallery().into_iter().map(str::to_string).collect(),
            desc: product.desc.clone(),
            color: (!colors.is_empty()).then(|| colors.join(", ")),
            tab: product.tab.clone(),
            describe: product.describe.clone(),
        }
    }
}

impl AdminClient {
    /// Get every product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, AdminApiError> {
        let products: Option<Vec<Product>> = self.get(self.endpoint(&["products"])?).await?;
        Ok(products.unwrap_or_default())
    }

    /// Get the stock breakdown computed by the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn product_stats(&self) -> Result<ProductStats, AdminApiError> {
        self.get(self.endpoint(&["products", "stats"])?).await
    }

    /// Create a product. Returns the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, AdminApiError> {
        self.post(self.endpoint(&["products"])?, form).await
    }

    /// Replace a product. Returns the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, form), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &str,
        form: &ProductForm,
    ) -> Result<Product, AdminApiError> {
        self.put(self.endpoint(&["products", id])?, form).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &str) -> Result<(), AdminApiError> {
        self.delete(self.endpoint(&["products", id])?).await
    }

    /// Delete several products in one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn delete_products(&self, ids: &[ProductId]) -> Result<(), AdminApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct BulkDelete<'a> {
            product_ids: &'a [ProductId],
        }

        self.post_unit(
            self.endpoint(&["products", "bulk"])?,
            &BulkDelete { product_ids: ids },
        )
        .await
    }
}
