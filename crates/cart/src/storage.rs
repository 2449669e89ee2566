//! Durable slot backends.
//!
//! The cart is persisted to exactly one slot holding a JSON array of items.
//! A [`SlotBackend`] only moves raw text in and out of that slot; parsing and
//! the hydration guard live in [`crate::persistence`].

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::error::StorageError;

/// Fixed, versionless identifier of the cart slot.
pub const STORAGE_KEY: &str = "solarhub-cart";

/// A single durable key-value slot.
pub trait SlotBackend: Send + Sync {
    /// Read the raw slot contents. `Ok(None)` means the slot was never written.
    fn read(&self) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the slot contents.
    fn write(&self, raw: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

// ============================================================================
// File Backend
// ============================================================================

/// Slot stored as a JSON file on the local disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Use an explicit file as the slot.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `<dir>/solarhub-cart.json` as the slot.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    /// Path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SlotBackend for FileBackend {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Cart slot not found");
                Ok(None)
            }
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }

    async fn write(&self, raw: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::io(parent, e))?;
            }
        }

        // Write beside the slot and rename over it so a crash mid-write never
        // leaves a truncated array behind.
        let staging = self.staging_path();
        tokio::fs::write(&staging, raw)
            .await
            .map_err(|e| StorageError::io(&staging, e))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| StorageError::io(&self.path, e))?;

        debug!(path = %self.path.display(), bytes = raw.len(), "Cart slot written");
        Ok(())
    }
}

// ============================================================================
// Memory Backend
// ============================================================================

/// Slot held in memory.
///
/// Clones share the same slot, so a test can keep one handle and inspect every
/// write the store made through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    contents: Option<String>,
    writes: Vec<String>,
    read_delay: Option<Duration>,
}

impl MemoryBackend {
    /// An empty, never-written slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `raw`.
    #[must_use]
    pub fn with_contents(raw: impl Into<String>) -> Self {
        let backend = Self::new();
        backend.slot().contents = Some(raw.into());
        backend
    }

    /// Make every read wait `delay` before answering.
    #[must_use]
    pub fn with_read_delay(self, delay: Duration) -> Self {
        self.slot().read_delay = Some(delay);
        self
    }

    /// Current slot contents.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.slot().contents.clone()
    }

    /// Every write made so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.slot().writes.clone()
    }

    /// Number of writes made so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.slot().writes.len()
    }

    fn slot(&self) -> MutexGuard<'_, MemorySlot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotBackend for MemoryBackend {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        let delay = self.slot().read_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.contents())
    }

    async fn write(&self, raw: &str) -> Result<(), StorageError> {
        let mut slot = self.slot();
        slot.contents = Some(raw.to_owned());
        slot.writes.push(raw.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_file_read_missing_slot_is_none() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::in_dir(dir.path());
        assert!(backend.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_slot_name() {
        let backend = FileBackend::in_dir("/var/lib/solarhub");
        assert_eq!(
            backend.path(),
            Path::new("/var/lib/solarhub/solarhub-cart.json")
        );
    }

    #[tokio::test]
    async fn test_file_write_creates_directory_and_replaces() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::in_dir(dir.path().join("nested").join("data"));

        backend.write("[1]").await.unwrap();
        backend.write("[]").await.unwrap();

        assert_eq!(backend.read().await.unwrap().as_deref(), Some("[]"));
        assert!(!backend.staging_path().exists());
    }

    #[tokio::test]
    async fn test_file_read_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());
        assert!(matches!(
            backend.read().await,
            Err(StorageError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_memory_clones_share_slot() {
        let backend = MemoryBackend::new();
        let handle = backend.clone();

        backend.write("[]").await.unwrap();

        assert_eq!(handle.contents().as_deref(), Some("[]"));
        assert_eq!(handle.write_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_read_delay() {
        let backend = MemoryBackend::with_contents("[]").with_read_delay(Duration::from_secs(3));
        let started = tokio::time::Instant::now();

        assert_eq!(backend.read().await.unwrap().as_deref(), Some("[]"));
        assert!(started.elapsed() >= Duration::from_secs(3));
    }
}
