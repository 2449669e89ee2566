//! SolarHub Core - Shared cart types.
//!
//! This crate provides the types shared by every SolarHub component:
//! - `cart` - Cart state, persistence and toast engine
//! - `cli` - Command-line driver for the cart engine
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no timers,
//! no storage. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Cart item identity, cart items, and BRL price parsing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
