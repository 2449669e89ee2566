//! Core types for SolarHub.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod id;
pub mod item;
pub mod price;

pub use id::CartItemId;
pub use item::CartItem;
pub use price::{format_price, parse_price};
