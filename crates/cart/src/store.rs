//! The cart store.
//!
//! [`CartStore`] is the only owner of the cart items. Surfaces read from it
//! (or from a [`CartSnapshot`] subscription) and call its mutation methods;
//! none of them keep cart state of their own.
//!
//! Each mutation runs in a fixed order before it returns:
//!
//! 1. the item list changes (or deliberately does not),
//! 2. the notification subscriber reacts to the [`CartChange`],
//! 3. the persistence subscriber rewrites the slot,
//! 4. a fresh snapshot is published.

use rust_decimal::Decimal;
use solarhub_core::{CartItem, CartItemId};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::config::CartConfig;
use crate::notification::{Notification, NotificationKind, NotificationQueue};
use crate::persistence::PersistentStore;
use crate::storage::SlotBackend;

/// Toast shown when a plan that is already in the cart is added again.
pub const ALREADY_IN_CART_MESSAGE: &str = "Este plano já está no carrinho";

/// Result of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// The item was appended.
    Added(CartItemId),
    /// An item with this id was already present; the list is unchanged.
    AlreadyPresent(CartItemId),
    /// The item was removed.
    Removed(CartItemId),
    /// No item had this id; the list is unchanged.
    NotInCart(CartItemId),
    /// The cart was emptied.
    Cleared {
        /// How many items were dropped.
        removed: usize,
    },
}

impl CartChange {
    /// Whether the slot is rewritten after this change.
    ///
    /// Every mutation except a duplicate add rewrites it, even when the list
    /// did not change.
    #[must_use]
    pub const fn persists(&self) -> bool {
        !matches!(self, Self::AlreadyPresent(_))
    }
}

/// Read view of the cart, published after every change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartSnapshot {
    /// Items in insertion order.
    pub items: Vec<CartItem>,
    /// Always `items.len()`.
    pub item_count: usize,
    /// Sum of every item's `price_value`.
    pub total: Decimal,
    /// Whether the drawer is open.
    pub is_open: bool,
}

/// Process-wide cart state and its persistence.
#[derive(Debug)]
pub struct CartStore<B> {
    items: Vec<CartItem>,
    is_open: bool,
    storage: PersistentStore<B>,
    toast: NotificationQueue,
    snapshot: watch::Sender<CartSnapshot>,
}

impl<B: SlotBackend> CartStore<B> {
    /// Create an empty, unhydrated store.
    ///
    /// Writes stay disabled until [`hydrate`](Self::hydrate) has read the
    /// slot. Prefer [`open`](Self::open) unless something must render before
    /// the slot is read.
    #[must_use]
    pub fn new(backend: B, config: CartConfig) -> Self {
        let (snapshot, _) = watch::channel(CartSnapshot::default());
        Self {
            items: Vec::new(),
            is_open: false,
            storage: PersistentStore::new(backend),
            toast: NotificationQueue::new(config.toast_duration),
            snapshot,
        }
    }

    /// Create a store and hydrate it from the slot.
    pub async fn open(backend: B, config: CartConfig) -> Self {
        let mut store = Self::new(backend, config);
        store.hydrate().await;
        store
    }

    /// Replace the in-memory items with the slot contents.
    ///
    /// Runs at most once per store; later calls return `false` and change
    /// nothing. Anything added before hydration is discarded here, since it
    /// was never persisted.
    pub async fn hydrate(&mut self) -> bool {
        if self.storage.is_hydrated() {
            return false;
        }

        if !self.items.is_empty() {
            debug!(
                discarded = self.items.len(),
                "Items added before hydration replaced by saved cart"
            );
        }
        self.items = self.storage.load().await;
        self.publish();
        true
    }

    /// Whether the slot has been read.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.storage.is_hydrated()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a plan to the cart.
    ///
    /// A plan whose id is already present is not added a second time, but the
    /// user is still told so through the toast.
    ///
    /// # Panics
    ///
    /// Panics if polled outside a Tokio runtime, since the toast arms its
    /// dismiss timer with [`tokio::spawn`].
    #[instrument(skip_all, fields(id = %item.id))]
    pub async fn add_item(&mut self, item: CartItem) -> CartChange {
        let change = if self.contains(&item.id) {
            CartChange::AlreadyPresent(item.id)
        } else {
            let id = item.id.clone();
            self.items.push(item);
            CartChange::Added(id)
        };
        self.commit(change).await
    }

    /// Remove the item with `id`. Removing an absent id is a no-op.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn remove_item(&mut self, id: &CartItemId) -> CartChange {
        let before = self.items.len();
        self.items.retain(|item| item.id != *id);

        let change = if self.items.len() < before {
            CartChange::Removed(id.clone())
        } else {
            CartChange::NotInCart(id.clone())
        };
        self.commit(change).await
    }

    /// Empty the cart.
    #[instrument(skip_all)]
    pub async fn clear_cart(&mut self) -> CartChange {
        let removed = self.items.len();
        self.items.clear();
        info!(removed, "Cart cleared");
        self.commit(CartChange::Cleared { removed }).await
    }

    /// Show the drawer.
    pub fn open_cart(&mut self) {
        self.set_open(true);
    }

    /// Hide the drawer.
    pub fn close_cart(&mut self) {
        self.set_open(false);
    }

    /// Flip drawer visibility.
    pub fn toggle_cart(&mut self) {
        self.set_open(!self.is_open);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of every item's `price_value`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.price_value).sum()
    }

    /// Whether the drawer is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether an item with `id` is in the cart.
    #[must_use]
    pub fn contains(&self, id: &CartItemId) -> bool {
        self.items.iter().any(|item| item.id == *id)
    }

    /// The toast as it is right now.
    #[must_use]
    pub fn toast(&self) -> Notification {
        self.toast.current()
    }

    /// Hide the toast early.
    pub fn dismiss_toast(&mut self) {
        self.toast.dismiss();
    }

    /// Current state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            item_count: self.item_count(),
            total: self.total(),
            is_open: self.is_open,
        }
    }

    /// Watch cart snapshots.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshot.subscribe()
    }

    /// Watch the toast slot.
    #[must_use]
    pub fn subscribe_toast(&self) -> watch::Receiver<Notification> {
        self.toast.subscribe()
    }

    /// The durable slot backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        self.storage.backend()
    }

    // =========================================================================
    // Subscribers
    // =========================================================================

    async fn commit(&mut self, change: CartChange) -> CartChange {
        debug!(?change, items = self.items.len(), "Cart changed");

        self.announce(&change);
        if change.persists() {
            self.persist().await;
        }
        self.publish();
        change
    }

    fn announce(&mut self, change: &CartChange) {
        match change {
            CartChange::Added(id) => {
                if let Some(item) = self.items.iter().find(|item| item.id == *id) {
                    let message = format!("{} — {} adicionado", item.product_name, item.plan_name);
                    self.toast.notify(NotificationKind::Added, message);
                }
            }
            CartChange::AlreadyPresent(_) => {
                self.toast
                    .notify(NotificationKind::AlreadyInCart, ALREADY_IN_CART_MESSAGE);
            }
            CartChange::Removed(_) | CartChange::NotInCart(_) | CartChange::Cleared { .. } => {}
        }
    }

    async fn persist(&self) {
        if let Err(e) = self.storage.save(&self.items).await {
            warn!(error = %e, "Failed to persist cart");
        }
    }

    fn set_open(&mut self, is_open: bool) {
        if self.is_open != is_open {
            self.is_open = is_open;
            self.publish();
        }
    }

    fn publish(&self) {
        self.snapshot.send_replace(self.snapshot());
    }
}
