//! Hydration-guarded persistence of the cart slot.
//!
//! The slot is read once at startup and rewritten in full after every change.
//! Until the first read completes, every write is refused: the in-memory cart
//! is still the empty default at that point, and writing it would erase the
//! cart the user saved last time.

use std::collections::HashSet;

use solarhub_core::CartItem;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::storage::SlotBackend;

/// What [`PersistentStore::save`] did with the items it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The slot now holds the items.
    Written,
    /// The slot has not been read yet, so nothing was written.
    SkippedBeforeHydration,
}

/// Load/save of the cart items over a [`SlotBackend`].
#[derive(Debug)]
pub struct PersistentStore<B> {
    backend: B,
    hydrated: bool,
}

impl<B: SlotBackend> PersistentStore<B> {
    /// Wrap a backend. The store starts unhydrated.
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            hydrated: false,
        }
    }

    /// Whether [`load`](Self::load) has completed at least once.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// The wrapped backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the items from the slot and mark the store hydrated.
    ///
    /// An absent, blank, unreadable or unparsable slot yields an empty cart.
    /// Items repeating an earlier id are dropped.
    pub async fn load(&mut self) -> Vec<CartItem> {
        let items = match self.backend.read().await {
            Ok(Some(raw)) if !raw.trim().is_empty() => {
                match serde_json::from_str::<Vec<CartItem>>(&raw) {
                    Ok(items) => dedup_by_id(items),
                    Err(e) => {
                        warn!(error = %e, "Discarding unreadable cart slot");
                        Vec::new()
                    }
                }
            }
            Ok(_) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read cart slot");
                Vec::new()
            }
        };

        self.hydrated = true;
        info!(items = items.len(), "Cart hydrated");
        items
    }

    /// Replace the slot with `items`.
    ///
    /// # Errors
    ///
    /// Returns an error if the items cannot be serialized or the backend
    /// write fails.
    pub async fn save(&self, items: &[CartItem]) -> Result<SaveOutcome, StorageError> {
        if !self.hydrated {
            debug!(items = items.len(), "Cart slot not read yet, write skipped");
            return Ok(SaveOutcome::SkippedBeforeHydration);
        }

        let raw = serde_json::to_string(items)?;
        self.backend.write(&raw).await?;
        Ok(SaveOutcome::Written)
    }
}

fn dedup_by_id(items: Vec<CartItem>) -> Vec<CartItem> {
    let before = items.len();
    let mut seen = HashSet::with_capacity(before);
    let unique: Vec<CartItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    if unique.len() < before {
        warn!(
            dropped = before - unique.len(),
            "Cart slot held repeated ids, keeping first occurrences"
        );
    }
    unique
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use solarhub_core::CartItemId;

    use super::*;
    use crate::storage::MemoryBackend;

    fn item(id: &str, price: &str) -> CartItem {
        CartItem::new(CartItemId::new(id), "Painel Solar", "Mensal", "30 dias", price)
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let backend = MemoryBackend::new();
        let mut store = PersistentStore::new(backend.clone());
        assert!(store.load().await.is_empty());

        let items = vec![
            item("a", "R$25").with_accent_color("blue"),
            item("b", "R$1.234,50").with_image("https://cdn.example.com/b.png"),
        ];
        assert_eq!(store.save(&items).await.unwrap(), SaveOutcome::Written);

        let mut reloaded = PersistentStore::new(backend);
        assert_eq!(reloaded.load().await, items);
    }

    #[tokio::test]
    async fn test_round_trip_keeps_exact_amounts() {
        let backend = MemoryBackend::new();
        let mut store = PersistentStore::new(backend.clone());
        store.load().await;

        let items = vec![
            item("a", "R$12345678901234567"),
            item("b", "R$99.999.999.999.999,99"),
            item("c", "R$1,123456789012345678"),
        ];
        store.save(&items).await.unwrap();

        let loaded = PersistentStore::new(backend).load().await;
        assert_eq!(loaded, items);
        assert_eq!(loaded[0].price_value, Decimal::from(12_345_678_901_234_567_i64));
        assert_eq!(loaded[2].price_value.to_string(), "1.123456789012345678");
    }

    #[tokio::test]
    async fn test_load_missing_slot_is_empty() {
        let mut store = PersistentStore::new(MemoryBackend::new());
        assert!(store.load().await.is_empty());
        assert!(store.is_hydrated());
    }

    #[tokio::test]
    async fn test_load_blank_slot_is_empty() {
        let mut store = PersistentStore::new(MemoryBackend::with_contents("   "));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_slot_is_empty() {
        for raw in ["{not json", "null", "{\"id\":\"a\"}", "[{\"id\":\"a\"}]", "42"] {
            let mut store = PersistentStore::new(MemoryBackend::with_contents(raw));
            assert!(store.load().await.is_empty(), "slot {raw:?} should load empty");
            assert!(store.is_hydrated());
        }
    }

    #[tokio::test]
    async fn test_load_drops_repeated_ids() {
        let items = vec![item("a", "R$10"), item("b", "R$20"), item("a", "R$99")];
        let raw = serde_json::to_string(&items).unwrap();
        let mut store = PersistentStore::new(MemoryBackend::with_contents(raw));

        let loaded = store.load().await;

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].price_value, Decimal::from(10));
        assert_eq!(loaded[1].id.as_str(), "b");
    }

    #[tokio::test]
    async fn test_save_before_load_is_skipped() {
        let saved = serde_json::to_string(&vec![item("a", "R$10")]).unwrap();
        let backend = MemoryBackend::with_contents(saved.clone());
        let store = PersistentStore::new(backend.clone());

        let outcome = store.save(&[]).await.unwrap();

        assert_eq!(outcome, SaveOutcome::SkippedBeforeHydration);
        assert_eq!(backend.write_count(), 0);
        assert_eq!(backend.contents(), Some(saved));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_write_while_slow_load_is_pending() {
        let saved = serde_json::to_string(&vec![item("a", "R$10")]).unwrap();
        let backend = MemoryBackend::with_contents(saved).with_read_delay(Duration::from_secs(5));
        let watcher = backend.clone();

        let loading = tokio::spawn(async move {
            let mut store = PersistentStore::new(backend);
            let items = store.load().await;
            (store, items)
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(watcher.write_count(), 0);

        let (store, items) = loading.await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(watcher.write_count(), 0);

        store.save(&items).await.unwrap();
        assert_eq!(watcher.write_count(), 1);
    }
}
