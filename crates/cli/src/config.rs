//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SOLARHUB_CART_DIR` - Directory holding the cart slot (default: .solarhub)
//! - `SOLARHUB_TOAST_MS` - Toast display time in milliseconds (default: 2500)
//! - `SOLARHUB_BADGE_CAP` - Largest exact badge count (default: 9)
//! - `SOLARHUB_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `RUST_LOG` - Tracing filter (default: `solarhub_cli=info,solarhub_cart=info`)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}` (expected pretty or json)")),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding `solarhub-cart.json`
    pub cart_dir: PathBuf,
    /// Toast display time
    pub toast_duration: Duration,
    /// Largest count the badge shows exactly
    pub badge_cap: usize,
    /// Log output format
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let cart_dir = PathBuf::from(get_or_default(&lookup, "SOLARHUB_CART_DIR", ".solarhub"));
        let toast_ms: u64 = parse_var(&lookup, "SOLARHUB_TOAST_MS", "2500")?;
        let badge_cap = parse_var(&lookup, "SOLARHUB_BADGE_CAP", "9")?;
        let log_format = parse_var(&lookup, "SOLARHUB_LOG_FORMAT", "pretty")?;

        Ok(Self {
            cart_dir,
            toast_duration: Duration::from_millis(toast_ms),
            badge_cap,
            log_format,
        })
    }
}

fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_or_default(lookup, key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.cart_dir, PathBuf::from(".solarhub"));
        assert_eq!(config.toast_duration, Duration::from_millis(2500));
        assert_eq!(config.badge_cap, 9);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SOLARHUB_CART_DIR", "/tmp/cart"),
            ("SOLARHUB_TOAST_MS", "1000"),
            ("SOLARHUB_BADGE_CAP", "99"),
            ("SOLARHUB_LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.cart_dir, PathBuf::from("/tmp/cart"));
        assert_eq!(config.toast_duration, Duration::from_secs(1));
        assert_eq!(config.badge_cap, 99);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = load(&[("SOLARHUB_TOAST_MS", "  ")]).unwrap();
        assert_eq!(config.toast_duration, Duration::from_millis(2500));
    }

    #[test]
    fn test_invalid_number() {
        let err = load(&[("SOLARHUB_TOAST_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SOLARHUB_TOAST_MS"));
    }

    #[test]
    fn test_invalid_log_format() {
        let err = load(&[("SOLARHUB_LOG_FORMAT", "xml")]).unwrap_err();
        assert!(err.to_string().contains("SOLARHUB_LOG_FORMAT"));
    }
}
