//! Read-only views of the cart.

use solarhub_cart::surfaces::{badge_label, subtotal_label};
use solarhub_cart::{CartStore, SlotBackend};
use tracing::info;

/// Log every item followed by the badge and subtotal.
pub fn list<B: SlotBackend>(cart: &CartStore<B>, badge_cap: usize) {
    if cart.item_count() == 0 {
        info!("Carrinho vazio");
        return;
    }

    for item in cart.items() {
        info!(
            "  {}  {} — {} ({})  {}",
            item.id, item.product_name, item.plan_name, item.period, item.price
        );
    }
    total(cart, badge_cap);
}

/// Log the badge and subtotal.
pub fn total<B: SlotBackend>(cart: &CartStore<B>, badge_cap: usize) {
    let badge = badge_label(cart.item_count(), badge_cap).unwrap_or_else(|| "0".to_string());
    info!("Itens: {badge}");
    info!("Subtotal: {}", subtotal_label(cart.total()));
}
