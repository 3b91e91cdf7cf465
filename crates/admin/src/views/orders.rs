//! Order management page.

use funsport_core::labels::notice;
use funsport_core::listing::{DateRange, contains_ignore_case};
use funsport_core::{Order, OrderStatus};
use tracing::{info, instrument};

use super::Selection;
use crate::api::{AdminApiError, AdminClient};
use crate::error::{AppError, Result};
use crate::export;

/// Filters of the order table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Substring of the order number, product name or customer name.
    pub search: String,
    pub status: Option<OrderStatus>,
    /// Creation date window, both ends inclusive.
    pub dates: DateRange,
}

impl OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        let search_ok = self.search.trim().is_empty()
            || [
                order.order_id.as_str(),
                order.product_display_name(),
                order.user_display_name(),
            ]
            .into_iter()
            .any(|field| contains_ignore_case(field, &self.search));
        let status_ok = self.status.as_ref().is_none_or(|s| *s == order.status);
        search_ok && status_ok && self.dates.contains(order.created_at)
    }
}

/// Order counts over the filtered table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    pub in_progress: usize,
    pub delivered: usize,
    pub returned: usize,
}

impl OrderStats {
    fn of(orders: &[Order]) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
        Self {
            total: orders.len(),
            in_progress: count(OrderStatus::InProgress),
            delivered: count(OrderStatus::Delivered),
            returned: count(OrderStatus::Return),
        }
    }
}

/// Order table state.
#[derive(Debug, Clone, Default)]
pub struct OrdersView {
    orders: Vec<Order>,
    filter: OrderFilter,
    filtered: Vec<Order>,
    stats: OrderStats,
    selection: Selection,
}

impl OrdersView {
    /// # Errors
    ///
    /// Returns an error if the orders cannot be loaded.
    #[instrument(skip(client))]
    pub async fn load(client: &AdminClient) -> std::result::Result<Self, AdminApiError> {
        Ok(Self::new(client.list_orders().await?))
    }

    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        let mut view = Self {
            orders,
            ..Self::default()
        };
        view.refresh();
        view
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders left after filtering.
    #[must_use]
    pub fn filtered(&self) -> &[Order] {
        &self.filtered
    }

    #[must_use]
    pub const fn filter(&self) -> &OrderFilter {
        &self.filter
    }

    #[must_use]
    pub const fn stats(&self) -> OrderStats {
        self.stats
    }

    pub fn set_filter(&mut self, filter: OrderFilter) {
        self.filter = filter;
        self.refresh();
    }

    /// Drop every filter and uncheck every order.
    pub fn reset_filter(&mut self) {
        self.selection.clear();
        self.set_filter(OrderFilter::default());
    }

    // =========================================================================
    // Selection
    // =========================================================================

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle_selected(&mut self, order_id: &str) -> bool {
        self.selection.toggle(order_id)
    }

    /// Check or clear every order that passes the filters.
    pub fn select_all(&mut self, selected: bool) {
        self.selection
            .set_all(self.filtered.iter().map(|o| o.order_id.as_str()), selected);
    }

    #[must_use]
    pub fn all_selected(&self) -> bool {
        self.selection
            .all_selected(self.filtered.iter().map(|o| o.order_id.as_str()))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Lock order `order_id`, or unlock it when already locked.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank or unknown order number, or the API
    /// error.
    #[instrument(skip(self, client), fields(order_id = %order_id))]
    pub async fn toggle_lock(&mut self, client: &AdminClient, order_id: &str) -> Result<String> {
        let index = self.position(order_id)?;
        let updated = client.toggle_order_lock(order_id).await?;
        let locked = updated.is_locked();
        if let Some(order) = self.orders.get_mut(index) {
            order.status = updated.status;
        }
        self.refresh();
        Ok(notice::order_lock(order_id, locked))
    }

    /// Delete order `order_id`.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank or unknown order number, or the API
    /// error.
    #[instrument(skip(self, client), fields(order_id = %order_id))]
    pub async fn delete(&mut self, client: &AdminClient, order_id: &str) -> Result<String> {
        let index = self.position(order_id)?;
        client.delete_order(order_id).await?;
        info!("Order deleted");
        self.orders.remove(index);
        self.selection.set(order_id, false);
        self.refresh();
        Ok(notice::ORDER_DELETED.to_string())
    }

    /// Move order `order_id` to `status`.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank or unknown order number, or the API
    /// error.
    #[instrument(skip(self, client), fields(order_id = %order_id, status = %status))]
    pub async fn update_status(
        &mut self,
        client: &AdminClient,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<String> {
        let index = self.position(order_id)?;
        let updated = client.update_order_status(order_id, &status).await?;
        if let Some(order) = self.orders.get_mut(index) {
            order.status = updated.status;
            order.updated_at = updated.updated_at.or(order.updated_at);
        }
        self.refresh();
        Ok(notice::ORDER_STATUS_UPDATED.to_string())
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// CSV of the checked orders that pass the filters.
    ///
    /// # Errors
    ///
    /// Returns a validation error when no visible order is checked.
    pub fn export_selected_csv(&self) -> Result<String> {
        let selected: Vec<&Order> = self
            .filtered
            .iter()
            .filter(|o| self.selection.is_selected(o.order_id.as_str()))
            .collect();
        if selected.is_empty() {
            return Err(AppError::validation(notice::SELECT_ORDERS_TO_EXPORT));
        }
        Ok(export::orders_csv(selected))
    }

    fn position(&self, order_id: &str) -> Result<usize> {
        if order_id.trim().is_empty() {
            return Err(AppError::validation(notice::ORDER_MISSING));
        }
        self.orders
            .iter()
            .position(|o| o.order_id == order_id)
            .ok_or_else(|| AppError::not_found(notice::ORDER_NOT_FOUND))
    }

    fn refresh(&mut self) {
        self.filtered = self
            .orders
            .iter()
            .filter(|o| self.filter.matches(o))
            .cloned()
            .collect();
        self.stats = OrderStats::of(&self.filtered);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use funsport_core::{Price, Product, Ref, User};

    use super::*;

    fn order(id: &str, status: OrderStatus, day: u32, customer: Option<&str>) -> Order {
        Order {
            order_id: id.into(),
            status,
            total_amount: Price::from_dong(200_000),
            created_at: Some(Utc.with_ymd_and_hms(2024, 6, day, 10, 0, 0).unwrap()),
            product: Some(Ref::Embedded(Box::new(Product {
                name: "Bóng rổ".to_string(),
                ..Product::default()
            }))),
            user: customer.map(|name| {
                Ref::Embedded(Box::new(User {
                    name: name.to_string(),
                    ..User::default()
                }))
            }),
            ..Order::default()
        }
    }

    fn sample() -> OrdersView {
        OrdersView::new(vec![
            order("DH001", OrderStatus::InProgress, 1, Some("Minh")),
            order("DH002", OrderStatus::Delivered, 5, Some("Hà")),
            order("DH003", OrderStatus::Return, 9, None),
            order("DH004", OrderStatus::Delivered, 9, Some("Minh Anh")),
        ])
    }

    #[test]
    fn test_stats_follow_filters() {
        let mut view = sample();
        assert_eq!(
            view.stats(),
            OrderStats {
                total: 4,
                in_progress: 1,
                delivered: 2,
                returned: 1
            }
        );

        view.set_filter(OrderFilter {
            search: "minh".to_string(),
            ..OrderFilter::default()
        });
        assert_eq!(view.stats().total, 2);
        assert_eq!(view.stats().returned, 0);
    }

    #[test]
    fn test_search_covers_order_product_and_customer() {
        let mut view = sample();
        for (needle, expected) in [("dh003", 1), ("bóng", 4), ("hà", 1), ("n/a", 1)] {
            view.set_filter(OrderFilter {
                search: needle.to_string(),
                ..OrderFilter::default()
            });
            assert_eq!(view.filtered().len(), expected, "search {needle}");
        }
    }

    #[test]
    fn test_status_and_inclusive_date_window() {
        let mut view = sample();
        view.set_filter(OrderFilter {
            status: Some(OrderStatus::Delivered),
            dates: DateRange::parse(Some("2024-06-05"), Some("2024-06-09")).unwrap(),
            ..OrderFilter::default()
        });
        assert_eq!(view.filtered().len(), 2);

        view.set_filter(OrderFilter {
            dates: DateRange::parse(Some("2024-06-02"), None).unwrap(),
            ..OrderFilter::default()
        });
        assert_eq!(view.filtered().len(), 3);
    }

    #[test]
    fn test_export_requires_selection() {
        let mut view = sample();
        assert_eq!(
            view.export_selected_csv().unwrap_err().user_message(),
            notice::SELECT_ORDERS_TO_EXPORT
        );

        view.toggle_selected("DH002");
        let csv = view.export_selected_csv().unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("\"DH002\""));
    }

    #[test]
    fn test_export_skips_hidden_orders() {
        let mut view = sample();
        view.toggle_selected("DH002");
        view.toggle_selected("DH003");
        view.set_filter(OrderFilter {
            status: Some(OrderStatus::Delivered),
            ..OrderFilter::default()
        });

        let csv = view.export_selected_csv().unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("\"DH002\""));
        assert!(!csv.contains("DH003"));

        view.set_filter(OrderFilter {
            status: Some(OrderStatus::Return),
            ..OrderFilter::default()
        });
        view.toggle_selected("DH003");
        assert_eq!(
            view.export_selected_csv().unwrap_err().user_message(),
            notice::SELECT_ORDERS_TO_EXPORT
        );
    }

    #[test]
    fn test_select_all_and_reset() {
        let mut view = sample();
        view.set_filter(OrderFilter {
            status: Some(OrderStatus::Delivered),
            ..OrderFilter::default()
        });
        view.select_all(true);
        assert!(view.all_selected());
        assert_eq!(view.selection().len(), 2);

        view.reset_filter();
        assert!(view.selection().is_empty());
        assert_eq!(view.filtered().len(), 4);
    }

    #[test]
    fn test_position_errors() {
        let view = sample();
        assert_eq!(
            view.position(" ").unwrap_err().user_message(),
            notice::ORDER_MISSING
        );
        assert_eq!(
            view.position("DH999").unwrap_err().user_message(),
            notice::ORDER_NOT_FOUND
        );
        assert_eq!(view.position("DH003").unwrap(), 2);
    }
}
