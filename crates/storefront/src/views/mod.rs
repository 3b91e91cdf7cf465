//! Page state for the storefront screens.
//!
//! Each view loads what its page needs from the backend and keeps the
//! client-side filtering, pagination and selection state.

pub mod catalog;
pub mod header;
pub mod home;
pub mod product_detail;

pub use catalog::{CATALOG_PAGE_SIZE, CatalogFilter, CatalogQuery, CatalogView};
pub use header::{HeaderBadges, search};
pub use home::{ALL_TAB, Countdown, CountdownDisplay, HomeView};
pub use product_detail::ProductDetailView;
