//! SolarHub Cart - Cart state and persistence engine.
//!
//! The engine owns the cart contents, keeps the derived count and total
//! consistent, persists the contents to a single durable slot, and drives the
//! toast shown after each addition.
//!
//! # Architecture
//!
//! - [`CartStore`] is constructed once at the application root and handed to
//!   every surface that needs it. There is no global instance.
//! - Every mutation returns a [`CartChange`]; the store feeds it to the
//!   notification subscriber, then the persistence subscriber, then publishes
//!   a fresh [`CartSnapshot`].
//! - [`PersistentStore`] refuses to write until it has read the slot once, so
//!   the empty cart that exists before hydration can never overwrite a saved
//!   one.
//! - [`NotificationQueue`] holds a single toast and an abortable dismiss task.
//!
//! # Modules
//!
//! - [`config`] - Engine tuning
//! - [`error`] - Storage errors
//! - [`storage`] - Durable slot backends (file, memory)
//! - [`persistence`] - Hydration-guarded load/save of the cart slot
//! - [`notification`] - Single-slot auto-dismissing toast
//! - [`store`] - The cart store
//! - [`surfaces`] - Helpers for the badge, drawer and toast surfaces

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod notification;
pub mod persistence;
pub mod storage;
pub mod store;
pub mod surfaces;

pub use config::CartConfig;
pub use error::StorageError;
pub use notification::{Notification, NotificationKind, NotificationQueue};
pub use persistence::{PersistentStore, SaveOutcome};
pub use storage::{FileBackend, MemoryBackend, STORAGE_KEY, SlotBackend};
pub use store::{CartChange, CartSnapshot, CartStore};
