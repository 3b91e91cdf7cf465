//! Inventory overview: stock figures, recent orders and stock adjustments.

use chrono::NaiveDate;
use funsport_core::labels::notice;
use funsport_core::{Order, Price, Product};
use tracing::{error, info, instrument};

use crate::api::{AdminClient, ProductForm};
use crate::error::{AppError, Result};

/// Orders listed in the "recent orders" panel.
pub const RECENT_ORDERS: usize = 10;

/// A stock change applied to one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdjustment {
    /// Receive units.
    Add(u32),
    /// Ship units; stock never goes below zero.
    Remove(u32),
    /// Overwrite the count after a stocktake.
    Set(u32),
}

impl StockAdjustment {
    /// Stock after applying this change to `current`.
    #[must_use]
    pub fn apply(self, current: i64) -> i64 {
        match self {
            Self::Add(units) => current.saturating_add(i64::from(units)),
            Self::Remove(units) => current.saturating_sub(i64::from(units)).max(0),
            Self::Set(units) => i64::from(units),
        }
    }
}

/// Inventory page state.
///
/// Products and orders load independently; a failure on one side leaves
/// that side empty and is reported through [`InventoryView::errors`].
#[derive(Debug, Clone, Default)]
pub struct InventoryView {
    products: Vec<Product>,
    orders: Vec<Order>,
    errors: Vec<String>,
}

impl InventoryView {
    #[instrument(skip(client))]
    pub async fn load(client: &AdminClient) -> Self {
        let mut view = Self::default();
        view.reload(client).await;
        view
    }

    #[must_use]
    pub const fn new(products: Vec<Product>, orders: Vec<Order>) -> Self {
        Self {
            products,
            orders,
            errors: Vec::new(),
        }
    }

    /// Fetch products and orders again.
    pub async fn reload(&mut self, client: &AdminClient) {
        let (products, orders) = tokio::join!(client.list_products(), client.list_orders());
        self.errors.clear();

        match products {
            Ok(products) => self.products = products,
            Err(e) => {
                error!(error = %e, "Failed to load products for inventory");
                self.errors.push(e.user_message());
            }
        }
        match orders {
            Ok(orders) => self.orders = orders,
            Err(e) => {
                error!(error = %e, "Failed to load orders for inventory");
                self.errors.push(e.user_message());
            }
        }
    }

    /// Messages of the loads that failed during the last reload.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn total_products(&self) -> usize {
        self.products.len()
    }

    /// Sum of price times quantity over every product.
    #[must_use]
    pub fn total_value(&self) -> Price {
        self.products.iter().map(Product::stock_value).sum()
    }

    /// Products with a recorded quantity of zero or less.
    #[must_use]
    pub fn out_of_stock(&self) -> usize {
        self.products
            .iter()
            .filter(|p| p.quantity.is_some_and(|q| q <= 0))
            .count()
    }

    /// Orders created on `today`.
    #[must_use]
    pub fn orders_today(&self, today: NaiveDate) -> usize {
        self.orders
            .iter()
            .filter(|o| o.created_on() == Some(today))
            .count()
    }

    /// The first [`RECENT_ORDERS`] orders, in backend order.
    #[must_use]
    pub fn recent_orders(&self) -> &[Order] {
        self.orders
            .get(..RECENT_ORDERS)
            .unwrap_or(&self.orders)
    }

    /// Create a product from the stock entry form.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name or category is blank or a
    /// number is negative, or the API error.
    #[instrument(skip(self, client, form), fields(name = %form.name))]
    pub async fn add_product(&mut self, client: &AdminClient, form: &ProductForm) -> Result<String> {
        let numbers_ok = !form.price.amount().is_sign_negative()
            && form.quantity.is_some_and(|q| q >= 0)
            && form.min_stock >= 0;
        if form.name.trim().is_empty() || form.category.trim().is_empty() || !numbers_ok {
            return Err(AppError::validation(notice::STOCK_ENTRY_INVALID));
        }

        let created = client.create_product(form).await?;
        info!(product_id = %created.id, "Product added from inventory");
        self.products.push(created);
        Ok(notice::STOCK_PRODUCT_ADDED.to_string())
    }

    /// Apply `adjustment` to product `product_id` and store the new count.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank id, a not-found error for an
    /// unknown product, or the API error.
    #[instrument(skip(self, client), fields(product_id = %product_id))]
    pub async fn adjust_stock(
        &mut self,
        client: &AdminClient,
        product_id: &str,
        adjustment: StockAdjustment,
    ) -> Result<String> {
        if product_id.trim().is_empty() {
            return Err(AppError::validation(notice::STOCK_TARGET_MISSING));
        }
        let (index, product) = self
            .products
            .iter()
            .enumerate()
            .find(|(_, p)| p.id == product_id)
            .ok_or_else(|| AppError::not_found(notice::PRODUCT_MISSING))?;

        let quantity = adjustment.apply(product.quantity.unwrap_or(0));
        let form = ProductForm {
            quantity: Some(quantity),
            ..ProductForm::from(product)
        };

        let updated = client.update_product(product_id, &form).await?;
        info!(quantity, "Stock adjusted");
        if let Some(slot) = self.products.get_mut(index) {
            *slot = updated;
        }
        Ok(notice::STOCK_UPDATED.to_string())
    }

    /// Delete order `order_id`, then reload the page.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank order number, or the API
    /// error.
    #[instrument(skip(self, client), fields(order_id = %order_id))]
    pub async fn delete_order(&mut self, client: &AdminClient, order_id: &str) -> Result<String> {
        if order_id.trim().is_empty() {
            return Err(AppError::validation(notice::ORDER_MISSING));
        }
        client.delete_order(order_id).await?;
        self.reload(client).await;
        Ok(notice::ORDER_DELETED.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn product(id: &str, price: i64, quantity: Option<i64>) -> Product {
        Product {
            id: id.into(),
            price: Price::from_dong(price),
            quantity,
            ..Product::default()
        }
    }

    fn order(id: usize, day: u32) -> Order {
        Order {
            order_id: format!("DH{id:03}").into(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 6, day, 8, 30, 0).unwrap()),
            ..Order::default()
        }
    }

    #[test]
    fn test_stock_adjustment() {
        assert_eq!(StockAdjustment::Add(5).apply(3), 8);
        assert_eq!(StockAdjustment::Remove(5).apply(3), 0);
        assert_eq!(StockAdjustment::Remove(2).apply(3), 1);
        assert_eq!(StockAdjustment::Set(7).apply(3), 7);
    }

    #[test]
    fn test_figures() {
        let view = InventoryView::new(
            vec![
                product("p1", 100_000, Some(3)),
                product("p2", 250_000, Some(0)),
                product("p3", 50_000, None),
                product("p4", 10_000, Some(-1)),
            ],
            (1..=12).map(|i| order(i, if i % 4 == 0 { 2 } else { 1 })).collect(),
        );

        assert_eq!(view.total_products(), 4);
        assert_eq!(view.total_value(), Price::from_dong(290_000));
        assert_eq!(view.out_of_stock(), 2);
        assert_eq!(
            view.orders_today(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
            3
        );
        assert_eq!(view.recent_orders().len(), RECENT_ORDERS);
        assert_eq!(view.recent_orders().first().unwrap().order_id, "DH001");
    }

    #[test]
    fn test_recent_orders_with_few_orders() {
        let view = InventoryView::new(Vec::new(), vec![order(1, 1)]);
        assert_eq!(view.recent_orders().len(), 1);
        assert_eq!(view.total_value(), Price::ZERO);
    }
}
