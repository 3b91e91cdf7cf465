//! Back-office landing page.

use funsport_core::listing::DateRange;
use funsport_core::{CategoryRevenue, DashboardStats, Order, RevenueReport};
use tracing::instrument;

use crate::api::{AdminApiError, AdminClient};

/// Headline figures, latest orders and revenue breakdown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub recent_orders: Vec<Order>,
    pub revenue: RevenueReport,
}

impl DashboardView {
    /// Load the three panels concurrently. Any failure fails the page.
    ///
    /// The revenue window is only applied when both ends are set.
    ///
    /// # Errors
    ///
    /// Returns an error if any request fails.
    #[instrument(skip(client))]
    pub async fn load(client: &AdminClient, range: DateRange) -> Result<Self, AdminApiError> {
        let (stats, recent_orders, revenue) = tokio::try_join!(
            client.dashboard_stats(),
            client.recent_orders(),
            client.revenue(range.start, range.end),
        )?;
        Ok(Self {
            stats,
            recent_orders,
            revenue,
        })
    }

    /// Category with the highest revenue, if any sold.
    #[must_use]
    pub fn top_category(&self) -> Option<&CategoryRevenue> {
        self.revenue
            .revenue_by_category
            .iter()
            .filter(|c| c.total_revenue.is_positive())
            .max_by_key(|c| c.total_revenue)
    }
}
