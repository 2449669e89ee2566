//! Integration tests for toast timing driven by cart mutations.
//!
//! Tokio time is paused, so sleeps advance the clock instantly and the
//! dismiss timers fire deterministically.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use solarhub_cart::{CartConfig, CartStore, MemoryBackend, NotificationKind};
use solarhub_integration_tests::{esp_monthly, plan};

async fn cart_with_window(window: Duration) -> CartStore<MemoryBackend> {
    CartStore::open(
        MemoryBackend::new(),
        CartConfig::default().with_toast_duration(window),
    )
    .await
}

#[tokio::test(start_paused = true)]
async fn test_toast_hides_after_default_window() {
    let mut cart = cart_with_window(CartConfig::default().toast_duration).await;
    cart.add_item(esp_monthly()).await;

    tokio::time::sleep(Duration::from_millis(2499)).await;
    assert!(cart.toast().visible);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(!cart.toast().visible);
}

#[tokio::test(start_paused = true)]
async fn test_second_add_inside_window_replaces_first() {
    let mut cart = cart_with_window(Duration::from_secs(2)).await;
    let mut toasts = cart.subscribe_toast();

    cart.add_item(esp_monthly()).await;
    tokio::time::sleep(Duration::from_millis(1500)).await;
    cart.add_item(plan("Painel Solar", "Anual", "R$900")).await;

    let shown = toasts.borrow_and_update().clone();
    assert_eq!(shown.message, "Painel Solar — Anual adicionado");
    assert_eq!(shown.kind, NotificationKind::Added);

    // The first add's timer would fire here.
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(cart.toast().visible);
    assert_eq!(cart.toast().message, "Painel Solar — Anual adicionado");

    // Just past the second add's own deadline.
    tokio::time::sleep(Duration::from_millis(1001)).await;
    let toast = cart.toast();
    assert!(!toast.visible);
    assert_eq!(toast.message, "Painel Solar — Anual adicionado");
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_add_notifies_every_time() {
    let mut cart = cart_with_window(Duration::from_secs(1)).await;

    cart.add_item(esp_monthly()).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!cart.toast().visible);

    cart.add_item(esp_monthly()).await;
    assert!(cart.toast().visible);
    assert_eq!(cart.toast().kind, NotificationKind::AlreadyInCart);
    assert_eq!(cart.item_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_removal_leaves_toast_alone() {
    let mut cart = cart_with_window(Duration::from_secs(1)).await;
    cart.add_item(esp_monthly()).await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    cart.remove_item(&esp_monthly().id).await;
    cart.clear_cart().await;

    assert!(!cart.toast().visible);
}
