//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart` - Cart lines mirrored to local storage
//! - `favorites` - Session-only favorites list
//! - `auth` - Login, registration and the stored session
//! - `checkout` - Payment gateway hand-off

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod favorites;

pub use auth::{AuthService, RegistrationForm};
pub use cart::CartService;
pub use checkout::CheckoutService;
pub use favorites::FavoritesService;
