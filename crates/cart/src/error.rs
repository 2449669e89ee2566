//! Storage error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a durable slot backend.
///
/// These never reach callers of the cart store: the persistence layer logs
/// them and degrades to an empty cart (on read) or a skipped write.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the slot file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path of the slot file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The cart could not be serialized or the slot could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
