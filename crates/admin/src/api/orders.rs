//! Order management (`/v1/orders`).

use chrono::NaiveDate;
use funsport_core::{Order, OrderId, OrderStatus, RevenueReport};
use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use super::{AdminApiError, AdminClient};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl AdminClient {
    /// Get every order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, AdminApiError> {
        let orders: Option<Vec<Order>> = self.get(self.endpoint(&["orders"])?).await?;
        Ok(orders.unwrap_or_default())
    }

    /// Get one order by its order number.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: &str) -> Result<Order, AdminApiError> {
        self.get(self.endpoint(&["orders", order_id])?).await
    }

    /// Create an order. Returns the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn create_order(&self, order: &Order) -> Result<Order, AdminApiError> {
        self.post(self.endpoint(&["orders"])?, order).await
    }

    /// Change the status of an order. Returns the updated order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(order_id = %order_id, status = %status))]
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: &OrderStatus,
    ) -> Result<Order, AdminApiError> {
        self.patch(
            self.endpoint(&["orders", order_id])?,
            &json!({ "status": status }),
        )
        .await
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn delete_order(&self, order_id: &str) -> Result<(), AdminApiError> {
        self.delete(self.endpoint(&["orders", order_id])?).await
    }

    /// Delete several orders in one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, order_ids), fields(count = order_ids.len()))]
    pub async fn delete_orders(&self, order_ids: &[OrderId]) -> Result<(), AdminApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct BulkDelete<'a> {
            order_ids: &'a [OrderId],
        }

        self.post_unit(
            self.endpoint(&["orders", "bulk-delete"])?,
            &BulkDelete { order_ids },
        )
        .await
    }

    /// Lock an order, or unlock it when already locked. Returns the updated
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn toggle_order_lock(&self, order_id: &str) -> Result<Order, AdminApiError> {
        self.post(
            self.endpoint(&["orders", "toggle-lock", order_id])?,
            &json!({}),
        )
        .await
    }

    /// Revenue totals, overall and per category.
    ///
    /// The date bounds are only sent when both are given.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn revenue(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<RevenueReport, AdminApiError> {
        let mut url = self.endpoint(&["orders", "revenue"])?;
        if let (Some(start), Some(end)) = (start, end) {
            url.query_pairs_mut()
                .append_pair("startDate", &start.format(DATE_FORMAT).to_string())
                .append_pair("endDate", &end.format(DATE_FORMAT).to_string());
        }

        self.get(url).await
    }

    /// Most recent orders, as chosen by the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn recent_orders(&self) -> Result<Vec<Order>, AdminApiError> {
        let orders: Option<Vec<Order>> = self.get(self.endpoint(&["orders", "recent"])?).await?;
        Ok(orders.unwrap_or_default())
    }
}
