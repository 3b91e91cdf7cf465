//! FunSport storefront library.
//!
//! Customer-facing side of the shop: a REST client for the catalog, the
//! locally stored cart and login session, checkout through the payment
//! gateway, and the state behind each storefront page.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod storage;
pub mod views;

pub use api::{BackendError, StorefrontClient};
pub use config::StorefrontConfig;
pub use error::AppError;
pub use storage::LocalStorage;
