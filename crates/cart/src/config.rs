//! Engine tuning.

use std::time::Duration;

/// How long a toast stays visible unless a newer one replaces it.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Cart engine configuration.
///
/// Binaries build this from their own environment; the engine itself reads no
/// environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartConfig {
    /// Display time of each toast before it auto-dismisses.
    pub toast_duration: Duration,
}

impl CartConfig {
    /// Override the toast display time.
    #[must_use]
    pub const fn with_toast_duration(mut self, toast_duration: Duration) -> Self {
        self.toast_duration = toast_duration;
        self
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            toast_duration: DEFAULT_TOAST_DURATION,
        }
    }
}
