//! Product page with variant selection and related products.

use funsport_core::{Product, labels};
use tracing::{instrument, warn};

use crate::api::{BackendError, StorefrontClient};
use crate::error::{AppError, Result};
use crate::services::CartService;

/// Related products shown under the product.
pub const RELATED_LIMIT: u32 = 4;

/// Product page state.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    product: Product,
    related: Vec<Product>,
    selected_color: Option<String>,
    selected_size: Option<String>,
    quantity: u32,
}

impl ProductDetailView {
    /// Load the product, then its related products.
    ///
    /// Related products are optional: a failure is logged and the section
    /// stays empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the product itself cannot be loaded.
    #[instrument(skip(client))]
    pub async fn load(
        client: &StorefrontClient,
        id: &str,
    ) -> std::result::Result<Self, BackendError> {
        let product = client.get_product(id).await?;

        let related = client
            .related_products(&product, RELATED_LIMIT)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, product_id = %product.id, "Failed to load related products");
                Vec::new()
            });

        Ok(Self::new(product, related))
    }

    #[must_use]
    pub fn new(product: Product, related: Vec<Product>) -> Self {
        Self {
            product,
            related,
            selected_color: None,
            selected_size: None,
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub fn related(&self) -> &[Product] {
        &self.related
    }

    #[must_use]
    pub fn colors(&self) -> &[String] {
        self.product.colors.as_slice()
    }

    #[must_use]
    pub fn sizes(&self) -> &[String] {
        self.product.sizes.as_slice()
    }

    pub fn select_color(&mut self, color: &str) {
        self.selected_color = Some(color.to_string());
    }

    pub fn select_size(&mut self, size: &str) {
        self.selected_size = Some(size.to_string());
    }

    /// Set the quantity to add; anything below 1 becomes 1.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Put the selected variant in the cart. Returns the notice to show.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the color or the size has not been
    /// chosen, and a storage error when the cart cannot be saved.
    pub fn add_to_cart(&self, cart: &mut CartService) -> Result<String> {
        let (Some(color), Some(size)) = (&self.selected_color, &self.selected_size) else {
            return Err(AppError::validation(labels::notice::PICK_VARIANT));
        };

        cart.add_to_cart(&self.product, self.quantity, Some(size), Some(color))?;

        Ok(labels::notice::added_variant_to_cart(
            &self.product.name,
            size,
            color,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use funsport_core::{FlexList, Price};

    use super::*;
    use crate::storage::LocalStorage;

    fn shoe() -> Product {
        Product {
            id: "p1".into(),
            name: "Giày chạy bộ".to_string(),
            price: Price::from_dong(1_200_000),
            colors: FlexList::parse("Đen, Trắng"),
            sizes: FlexList::parse(r#"["40","41","42"]"#),
            ..Product::default()
        }
    }

    #[test]
    fn test_variants_come_from_product() {
        let view = ProductDetailView::new(shoe(), Vec::new());
        assert_eq!(view.colors(), ["Đen", "Trắng"]);
        assert_eq!(view.sizes(), ["40", "41", "42"]);
        assert_eq!(view.quantity(), 1);
    }

    #[test]
    fn test_add_requires_color_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = CartService::new(LocalStorage::open(dir.path()).unwrap());
        let mut view = ProductDetailView::new(shoe(), Vec::new());

        view.select_color("Đen");
        let err = view.add_to_cart(&mut cart).unwrap_err();
        assert_eq!(err.user_message(), labels::notice::PICK_VARIANT);
        assert!(cart.is_empty());

        view.select_size("41");
        view.set_quantity(0);
        let notice = view.add_to_cart(&mut cart).unwrap();

        assert_eq!(notice, "Đã thêm \"Giày chạy bộ\" (Size: 41, Màu: Đen) vào giỏ hàng!");
        assert_eq!(cart.count(), 1);
        let line = cart.items().first().unwrap();
        assert_eq!(line.selected_size.as_deref(), Some("41"));
        assert_eq!(line.selected_color.as_deref(), Some("Đen"));
    }
}
