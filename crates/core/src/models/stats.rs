//! Aggregates returned by the back-office statistics endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Product, User};
use crate::types::{Price, StockStatus, UserStatus};

/// `GET /v1/products/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: u64,
    pub in_stock_products: u64,
    pub low_stock_products: u64,
    pub out_of_stock_products: u64,
}

impl ProductStats {
    /// Compute the same figures locally from a product list.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(
            Self {
                total_products: products.len() as u64,
                ..Self::default()
            },
            |mut stats, product| {
                match product.stock_status() {
                    StockStatus::InStock => stats.in_stock_products += 1,
                    StockStatus::LowStock => stats.low_stock_products += 1,
                    StockStatus::OutOfStock => stats.out_of_stock_products += 1,
                }
                stats
            },
        )
    }
}

/// `GET /v1/users/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: u64,
    pub active_users: u64,
    pub locked_users: u64,
    pub pending_users: u64,
    pub total_violations: u64,
}

impl UserStats {
    /// Sum of every user's violation counters.
    #[must_use]
    pub fn violations_of(users: &[User]) -> u64 {
        users.iter().map(|u| u64::from(u.violation_total())).sum()
    }

    /// Compute the same figures locally from a user list.
    #[must_use]
    pub fn from_users(users: &[User]) -> Self {
        let count = |status: UserStatus| users.iter().filter(|u| u.status == status).count() as u64;
        Self {
            total_users: users.len() as u64,
            active_users: count(UserStatus::Active),
            locked_users: count(UserStatus::Locked),
            pending_users: count(UserStatus::Pending),
            total_violations: Self::violations_of(users),
        }
    }
}

/// `GET /v1/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: Price,
    /// Percent change against the previous period.
    pub revenue_growth: f64,
    pub total_inventory: i64,
    pub order_growth: f64,
    pub percentage_sold: f64,
    /// Chart series, passed through as sent.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

/// `GET /v1/orders/revenue`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevenueReport {
    pub total_revenue: Price,
    pub revenue_by_category: Vec<CategoryRevenue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryRevenue {
    pub category_name: String,
    pub total_revenue: Price,
    pub total_orders: u64,
}
