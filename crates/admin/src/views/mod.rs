//! Page state for the back-office screens.
//!
//! Each view owns the loaded rows plus filter, paging and selection state.
//! Mutations call the API first and touch local rows only on success.

mod categories;
mod dashboard;
mod inventory;
mod orders;
mod products;
mod selection;
mod users;

pub use categories::{CategoriesView, CategoryStats};
pub use dashboard::DashboardView;
pub use inventory::{InventoryView, RECENT_ORDERS, StockAdjustment};
pub use orders::{OrderFilter, OrderStats, OrdersView};
pub use products::{ProductFilter, ProductsView};
pub use selection::Selection;
pub use users::{MANUAL_LOCK_REASON, UsersView};

/// Rows per page of the paged back-office tables.
pub const ADMIN_PAGE_SIZE: usize = 10;
