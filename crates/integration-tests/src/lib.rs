//! Integration tests for SolarHub.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p solarhub-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_lifecycle` - Reload, corrupt slot and dedup behaviour against a
//!   real file slot
//! - `toast_timing` - Toast replacement under paused Tokio time
//! - `cart_properties` - Derived totals and slot round trips over generated
//!   carts (proptest)
//!
//! This crate also exposes the fixtures those tests share.

use std::path::Path;

use solarhub_cart::{CartConfig, CartStore, FileBackend};
use solarhub_core::{CartItem, CartItemId};

/// The monthly ESP plan used throughout the scenarios.
#[must_use]
pub fn esp_monthly() -> CartItem {
    CartItem::new(
        CartItemId::new("v-esp-mensal"),
        "VALORANT ESP",
        "Mensal",
        "30 dias",
        "R$120",
    )
    .with_accent_color("red")
}

/// A plan with a derived id.
#[must_use]
pub fn plan(product: &str, plan: &str, price: &str) -> CartItem {
    CartItem::new(
        CartItemId::for_plan(product, "Plano", plan),
        product,
        plan,
        "30 dias",
        price,
    )
}

/// Open a cart over the file slot in `dir`, as a fresh process would.
pub async fn open_in(dir: &Path) -> CartStore<FileBackend> {
    CartStore::open(FileBackend::in_dir(dir), CartConfig::default()).await
}
