//! Cart item identity.
//!
//! A [`CartItemId`] is the dedup key of the cart. Producers derive it from the
//! product, category and plan being bought, so picking the same plan twice
//! resolves to the same id instead of creating a second row.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a cart line.
///
/// # Example
///
/// ```rust
/// # use solarhub_core::CartItemId;
/// let a = CartItemId::for_plan("Painel Solar", "Monitor", "Mensal");
/// let b = CartItemId::for_plan("painel solar", " monitor ", "MENSAL");
///
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "painel-solar-monitor-mensal");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(String);

impl CartItemId {
    /// Wrap an id chosen by the caller verbatim.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the id for a plan of a product within a category.
    ///
    /// Each part is trimmed and lowercased, and every run of characters that
    /// are not alphanumeric becomes a single `-`. Empty parts are skipped.
    #[must_use]
    pub fn for_plan(product: &str, category: &str, plan: &str) -> Self {
        let id = [product, category, plan]
            .into_iter()
            .map(slug)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        Self(id)
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn slug(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    for c in part.trim().chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

impl fmt::Display for CartItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CartItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CartItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for CartItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
