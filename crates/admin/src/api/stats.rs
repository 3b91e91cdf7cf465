//! Dashboard statistics (`/v1/stats`).

use funsport_core::DashboardStats;
use tracing::instrument;

use super::{AdminApiError, AdminClient};

impl AdminClient {
    /// Revenue, inventory and growth figures plus the chart series.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AdminApiError> {
        self.get(self.endpoint(&["stats"])?).await
    }
}
