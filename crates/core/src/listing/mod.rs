//! In-memory filtering and pagination shared by every list page.
//!
//! Pages hold the whole result set returned by the backend and narrow it down
//! locally; nothing here performs I/O.

mod filter;
mod pagination;

pub use filter::{DateRange, DateRangeError, PriceRange, PriceRangeError, contains_ignore_case, is_any, matches_choice};
pub use pagination::{Page, paginate, total_pages};
