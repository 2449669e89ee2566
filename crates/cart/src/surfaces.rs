//! Helpers for the badge, drawer and toast surfaces.
//!
//! Surfaces only render store state and call store methods. The only state
//! they own lives in [`Drawer`]: the closing flag and the id of the line being
//! removed, which let exit animations play before the store changes.

use std::time::Duration;

use rust_decimal::Decimal;
use solarhub_core::format_price;

use solarhub_core::CartItemId;

use crate::notification::{Notification, NotificationKind};
use crate::storage::SlotBackend;
use crate::store::{CartChange, CartStore};

/// Counts above this show as `"9+"` on the badge.
pub const DEFAULT_BADGE_CAP: usize = 9;

/// Length of the drawer exit animation.
pub const DRAWER_EXIT: Duration = Duration::from_millis(250);

/// Length of a single line's exit animation before it leaves the cart.
pub const DRAWER_ITEM_EXIT: Duration = Duration::from_millis(200);

/// Text of the cart button badge, or `None` when the badge is hidden.
///
/// ```rust
/// # use solarhub_cart::surfaces::badge_label;
/// assert_eq!(badge_label(0, 9), None);
/// assert_eq!(badge_label(3, 9).as_deref(), Some("3"));
/// assert_eq!(badge_label(12, 9).as_deref(), Some("9+"));
/// ```
#[must_use]
pub fn badge_label(count: usize, cap: usize) -> Option<String> {
    match count {
        0 => None,
        n if n > cap => Some(format!("{cap}+")),
        n => Some(n.to_string()),
    }
}

/// Subtotal line of the drawer.
#[must_use]
pub fn subtotal_label(total: Decimal) -> String {
    format_price(total)
}

/// Icon the toast shows next to its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastIcon {
    Check,
    Cart,
}

impl ToastIcon {
    /// Pick the icon for a toast.
    #[must_use]
    pub const fn for_notification(toast: &Notification) -> Self {
        match toast.kind {
            NotificationKind::AlreadyInCart => Self::Cart,
            NotificationKind::Added | NotificationKind::Info => Self::Check,
        }
    }
}

/// What the drawer is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerPhase {
    /// Not rendered.
    Hidden,
    /// Fully shown.
    Visible,
    /// Playing the exit animation; still rendered.
    Closing,
}

/// UI-local drawer state.
///
/// Neither field is persisted or shared; the store stays the only owner of
/// the items.
#[derive(Debug, Clone, Default)]
pub struct Drawer {
    closing: bool,
    removing: Option<CartItemId>,
}

impl Drawer {
    /// Create a drawer that is not closing and not removing anything.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            closing: false,
            removing: None,
        }
    }

    /// Start the exit animation. Call [`finish_close`](Self::finish_close)
    /// once [`DRAWER_EXIT`] has elapsed.
    pub fn request_close(&mut self) {
        self.closing = true;
    }

    /// End the exit animation and close the cart.
    pub fn finish_close<B: SlotBackend>(&mut self, cart: &mut CartStore<B>) {
        cart.close_cart();
        self.closing = false;
    }

    /// Start the exit animation of the line with `id`. Call
    /// [`finish_remove`](Self::finish_remove) once [`DRAWER_ITEM_EXIT`] has
    /// elapsed.
    ///
    /// Only one line animates at a time; a second request replaces the first.
    pub fn request_remove(&mut self, id: CartItemId) {
        self.removing = Some(id);
    }

    /// End the line exit animation and remove that line from the cart.
    ///
    /// Returns `None` when no removal was requested.
    pub async fn finish_remove<B: SlotBackend>(
        &mut self,
        cart: &mut CartStore<B>,
    ) -> Option<CartChange> {
        let id = self.removing.take()?;
        Some(cart.remove_item(&id).await)
    }

    /// Id of the line playing its exit animation.
    #[must_use]
    pub const fn removing(&self) -> Option<&CartItemId> {
        self.removing.as_ref()
    }

    /// Whether the line with `id` is playing its exit animation.
    #[must_use]
    pub fn is_removing(&self, id: &CartItemId) -> bool {
        self.removing.as_ref() == Some(id)
    }

    /// Phase for the given store visibility.
    #[must_use]
    pub const fn phase(&self, cart_is_open: bool) -> DrawerPhase {
        match (cart_is_open, self.closing) {
            (false, _) => DrawerPhase::Hidden,
            (true, true) => DrawerPhase::Closing,
            (true, false) => DrawerPhase::Visible,
        }
    }
}
