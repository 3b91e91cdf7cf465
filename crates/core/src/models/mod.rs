//! DTOs mirroring the backend JSON shapes.
//!
//! Every model deserializes leniently: missing fields take their defaults so
//! a partially populated document (for example an order whose product was
//! deleted) still loads.

pub mod cart;
pub mod category;
pub mod list;
pub mod news;
pub mod order;
pub mod payment;
pub mod product;
pub mod reference;
pub mod session;
pub mod stats;
pub mod user;

pub use cart::CartItem;
pub use category::Category;
pub use list::FlexList;
pub use news::NewsArticle;
pub use order::Order;
pub use payment::{PaymentRequest, PaymentResponse};
pub use product::Product;
pub use reference::{Document, Ref};
pub use session::Session;
pub use stats::{CategoryRevenue, DashboardStats, ProductStats, RevenueReport, UserStats};
pub use user::User;

/// Placeholder shown when a referenced document is missing.
pub const NOT_AVAILABLE: &str = "N/A";
