//! FunSport Core - Shared types library.
//!
//! This crate provides common types used across all FunSport components:
//! - `storefront` - Customer-facing catalog, cart, favorites and checkout
//! - `admin` - Back office for products, orders, users and categories
//! - `cli` - The `funsport` command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no local storage. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`models`] - DTOs mirroring the backend JSON shapes
//! - [`listing`] - In-memory filtering and pagination helpers
//! - [`labels`] - Vietnamese display labels and error messages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod labels;
pub mod listing;
pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
