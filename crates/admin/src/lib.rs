//! FunSport back-office library.
//!
//! Administrator side of the shop: a REST client for the `/v1` management
//! endpoints, CSV exports, and the state behind each back-office page
//! (products, orders, customers, categories, inventory and the dashboard).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod views;

pub use api::{AdminApiError, AdminClient};
pub use config::AdminConfig;
pub use error::AppError;
