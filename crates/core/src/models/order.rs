//! Customer order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{NOT_AVAILABLE, Product, Ref, User};
use crate::types::{OrderId, OrderStatus, Price};

/// An order as returned by `/v1/orders`.
///
/// `productId` and `userId` arrive either as bare ids or populated with the
/// referenced documents. Either may be `null` when the referenced document
/// was deleted; the accessors below render those as `N/A`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Order {
    /// Database key, distinct from the human-facing `order_id`.
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    pub order_id: OrderId,
    #[serde(rename = "productId", skip_serializing_if = "Option::is_none")]
    pub product: Option<Ref<Product>>,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user: Option<Ref<User>>,
    #[serde(alias = "price")]
    pub total_amount: Price,
    pub payment: String,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Flat product name some endpoints send instead of a populated product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

impl Order {
    /// Key used by the `/v1/orders/{id}` routes: the database key when
    /// present, otherwise the order number.
    #[must_use]
    pub fn key(&self) -> &str {
        self.record_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.order_id.as_str())
    }

    /// Name of the ordered product, or `N/A`.
    #[must_use]
    pub fn product_display_name(&self) -> &str {
        self.product
            .as_ref()
            .and_then(Ref::embedded)
            .map(|p| p.name.as_str())
            .or(self.product_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Unit price of the ordered product, zero when unknown.
    #[must_use]
    pub fn product_price(&self) -> Price {
        self.product
            .as_ref()
            .and_then(Ref::embedded)
            .map_or(Price::ZERO, |p| p.price)
    }

    /// Name of the customer, or `N/A`.
    #[must_use]
    pub fn user_display_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(Ref::embedded)
            .map(|u| u.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Email of the customer, or `N/A`.
    #[must_use]
    pub fn user_email(&self) -> &str {
        self.user
            .as_ref()
            .and_then(Ref::embedded)
            .map(|u| u.email.as_str())
            .filter(|email| !email.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Calendar day the order was created on (UTC).
    #[must_use]
    pub fn created_on(&self) -> Option<NaiveDate> {
        self.created_at.map(|ts| ts.date_naive())
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.status == OrderStatus::Locked
    }
}
