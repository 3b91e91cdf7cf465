//! CLI command implementations.
//!
//! Each command returns the text to print on success.

pub mod admin;
pub mod shop;
