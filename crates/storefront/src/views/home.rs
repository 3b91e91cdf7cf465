//! Landing page: tabbed product grid, flash sale and promotion countdown.

use chrono::{DateTime, TimeDelta, Utc};
use funsport_core::Product;
use tracing::{instrument, warn};

use crate::api::{BackendError, StorefrontClient};

/// Tab that shows every product.
pub const ALL_TAB: &str = "all";

/// Days a promotion runs from the moment the page opens.
pub const PROMOTION_DAYS: i64 = 2;

/// Landing page state.
#[derive(Debug, Clone)]
pub struct HomeView {
    products: Vec<Product>,
    flash_sale: Vec<Product>,
    selected_tab: String,
}

impl HomeView {
    /// Load all products and the flash sale concurrently.
    ///
    /// A failing flash sale leaves that section empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list cannot be loaded.
    #[instrument(skip(client))]
    pub async fn load(client: &StorefrontClient) -> Result<Self, BackendError> {
        let (products, flash_sale) =
            tokio::join!(client.get_products(), client.flash_sale_products());

        let flash_sale = flash_sale.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load flash sale products");
            Vec::new()
        });

        Ok(Self::new(products?, flash_sale))
    }

    #[must_use]
    pub fn new(products: Vec<Product>, flash_sale: Vec<Product>) -> Self {
        Self {
            products,
            flash_sale,
            selected_tab: ALL_TAB.to_string(),
        }
    }

    /// Switch the product grid to `tab`, compared case-insensitively.
    pub fn select_tab(&mut self, tab: &str) {
        self.selected_tab = tab.trim().to_lowercase();
    }

    #[must_use]
    pub fn selected_tab(&self) -> &str {
        &self.selected_tab
    }

    /// Products on the selected tab.
    #[must_use]
    pub fn tab_products(&self) -> Vec<&Product> {
        if self.selected_tab == ALL_TAB {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| {
                p.tab
                    .as_deref()
                    .is_some_and(|tab| tab.to_lowercase() == self.selected_tab)
            })
            .collect()
    }

    /// Every product split into three display columns of `ceil(len / 3)`
    /// items; the last columns may be shorter or empty.
    #[must_use]
    pub fn columns(&self) -> [&[Product]; 3] {
        let chunk = self.products.len().div_ceil(3).max(1);
        let mut chunks = self.products.chunks(chunk);
        [
            chunks.next().unwrap_or_default(),
            chunks.next().unwrap_or_default(),
            chunks.next().unwrap_or_default(),
        ]
    }

    #[must_use]
    pub fn flash_sale(&self) -> &[Product] {
        &self.flash_sale
    }
}

/// Countdown to the end of a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    deadline: DateTime<Utc>,
}

/// Remaining time, each part zero-padded to two digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDisplay {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Countdown {
    #[must_use]
    pub const fn until(deadline: DateTime<Utc>) -> Self {
        Self { deadline }
    }

    /// A promotion that ends [`PROMOTION_DAYS`] after `now`.
    #[must_use]
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self::until(now + TimeDelta::days(PROMOTION_DAYS))
    }

    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Time left at `now`; every part reads `00` once the deadline passed.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> CountdownDisplay {
        let left = (self.deadline - now).max(TimeDelta::zero());
        let secs = left.num_seconds();

        CountdownDisplay {
            days: pad(secs / 86_400),
            hours: pad(secs % 86_400 / 3_600),
            minutes: pad(secs % 3_600 / 60),
            seconds: pad(secs % 60),
        }
    }
}

impl std::fmt::Display for CountdownDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ngày {}:{}:{}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

fn pad(value: i64) -> String {
    format!("{value:02}")
}
