//! Single-slot auto-dismissing toast.
//!
//! There is never more than one toast. A new one replaces the current one at
//! once and restarts the display timer; earlier messages are dropped, not
//! queued.
//!
//! The display timer is a Tokio task whose handle is kept next to the slot.
//! Every `notify` aborts the previous task before arming its own, and each task
//! only hides the toast if it still belongs to the latest `notify`. Without
//! both, a timer armed for an older toast could hide a newer one early.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// What a toast is about. The toast surface picks its icon from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationKind {
    /// Nothing has been shown yet, or a neutral message.
    #[default]
    Info,
    /// A plan was added to the cart.
    Added,
    /// The plan was already in the cart; nothing changed.
    AlreadyInCart,
}

/// Toast contents.
///
/// `message` outlives `visible`: after the toast hides, the text stays until
/// the next notification so a fade-out can still render it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notification {
    /// Text of the latest toast.
    pub message: String,
    /// Whether the toast is on screen.
    pub visible: bool,
    /// What the latest toast is about.
    pub kind: NotificationKind,
}

/// Owner of the toast slot and its dismiss timer.
#[derive(Debug)]
pub struct NotificationQueue {
    duration: Duration,
    slot: Arc<watch::Sender<Notification>>,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl NotificationQueue {
    /// Create an empty, hidden toast slot.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        let (slot, _) = watch::channel(Notification::default());
        Self {
            duration,
            slot: Arc::new(slot),
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    /// Show `message`, replacing whatever is showing, and arm the dismiss
    /// timer.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.cancel_pending();

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let message = message.into();
        debug!(?kind, %message, "Toast shown");
        self.slot.send_replace(Notification {
            message,
            visible: true,
            kind,
        });

        let slot = Arc::clone(&self.slot);
        let latest = Arc::clone(&self.generation);
        let duration = self.duration;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if latest.load(Ordering::SeqCst) == generation {
                slot.send_if_modified(|toast| std::mem::replace(&mut toast.visible, false));
            }
        }));
    }

    /// Hide the toast now and cancel its timer.
    pub fn dismiss(&mut self) {
        self.cancel_pending();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.slot
            .send_if_modified(|toast| std::mem::replace(&mut toast.visible, false));
    }

    /// The toast as it is right now.
    #[must_use]
    pub fn current(&self) -> Notification {
        self.slot.borrow().clone()
    }

    /// Watch the toast slot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Notification> {
        self.slot.subscribe()
    }

    /// Whether a dismiss timer is armed and has not fired yet.
    #[must_use]
    pub fn has_pending_dismiss(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Display time of each toast.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for NotificationQueue {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
