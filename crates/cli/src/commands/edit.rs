//! Cart mutations.

use clap::Args;
use solarhub_cart::{CartChange, CartStore, SlotBackend};
use solarhub_core::{CartItem, CartItemId};
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised by the editing commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot derive an item id: product, category and plan are all empty")]
    EmptyId,
}

/// Plan to add to the cart.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Product display name
    #[arg(long)]
    pub product: String,

    /// Product category, part of the derived id
    #[arg(long, default_value = "")]
    pub category: String,

    /// Plan display name
    #[arg(long)]
    pub plan: String,

    /// Billing period label
    #[arg(long)]
    pub period: String,

    /// Display price, e.g. "R$1.234,50"
    #[arg(long)]
    pub price: String,

    /// Accent tag
    #[arg(long, default_value = "")]
    pub accent: String,

    /// Illustration URL
    #[arg(long)]
    pub image: Option<String>,

    /// Explicit id instead of one derived from product, category and plan
    #[arg(long)]
    pub id: Option<String>,
}

impl AddArgs {
    fn into_item(self) -> Result<CartItem, CommandError> {
        let id = self.id.map_or_else(
            || CartItemId::for_plan(&self.product, &self.category, &self.plan),
            CartItemId::from,
        );
        if id.as_str().trim().is_empty() {
            return Err(CommandError::EmptyId);
        }

        let item = CartItem::new(id, self.product, self.plan, self.period, self.price)
            .with_accent_color(self.accent);
        Ok(match self.image {
            Some(image) => item.with_image(image),
            None => item,
        })
    }
}

/// Add a plan and log the toast it produced.
///
/// # Errors
///
/// Returns an error if no id can be derived for the plan.
pub async fn add<B: SlotBackend>(
    cart: &mut CartStore<B>,
    args: AddArgs,
) -> Result<CartChange, CommandError> {
    let item = args.into_item()?;
    let change = cart.add_item(item).await;
    let toast = cart.toast();

    match &change {
        CartChange::AlreadyPresent(id) => warn!(%id, "{}", toast.message),
        _ => info!("{}", toast.message),
    }
    Ok(change)
}

/// Remove an item by id.
pub async fn remove<B: SlotBackend>(cart: &mut CartStore<B>, id: &str) -> CartChange {
    let change = cart.remove_item(&CartItemId::new(id)).await;
    match &change {
        CartChange::Removed(id) => info!(%id, "Item removido"),
        CartChange::NotInCart(id) => warn!(%id, "Item não está no carrinho"),
        _ => {}
    }
    change
}

/// Empty the cart.
pub async fn clear<B: SlotBackend>(cart: &mut CartStore<B>) -> CartChange {
    cart.clear_cart().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use solarhub_cart::{CartConfig, MemoryBackend};

    use super::*;

    fn args() -> AddArgs {
        AddArgs {
            product: "Painel Solar".to_string(),
            category: "Monitor".to_string(),
            plan: "Mensal".to_string(),
            period: "30 dias".to_string(),
            price: "R$1.234,50".to_string(),
            accent: "amber".to_string(),
            image: None,
            id: None,
        }
    }

    #[test]
    fn test_into_item_derives_id() {
        let item = args().into_item().unwrap();
        assert_eq!(item.id.as_str(), "painel-solar-monitor-mensal");
        assert_eq!(item.price_value, Decimal::new(123_450, 2));
        assert_eq!(item.accent_color, "amber");
    }

    #[test]
    fn test_into_item_explicit_id() {
        let item = AddArgs {
            id: Some("v-esp-mensal".to_string()),
            image: Some("https://cdn.example.com/p.png".to_string()),
            ..args()
        }
        .into_item()
        .unwrap();
        assert_eq!(item.id.as_str(), "v-esp-mensal");
        assert!(item.image.is_some());
    }

    #[test]
    fn test_into_item_rejects_empty_id() {
        let result = AddArgs {
            product: " ".to_string(),
            category: String::new(),
            plan: "--".to_string(),
            ..args()
        }
        .into_item();
        assert!(matches!(result, Err(CommandError::EmptyId)));
    }

    #[tokio::test]
    async fn test_add_twice_then_remove() {
        let mut cart = CartStore::open(MemoryBackend::new(), CartConfig::default()).await;

        assert!(matches!(add(&mut cart, args()).await.unwrap(), CartChange::Added(_)));
        assert!(matches!(
            add(&mut cart, args()).await.unwrap(),
            CartChange::AlreadyPresent(_)
        ));
        assert_eq!(cart.item_count(), 1);

        let change = remove(&mut cart, "painel-solar-monitor-mensal").await;
        assert!(matches!(change, CartChange::Removed(_)));
        assert!(matches!(remove(&mut cart, "nope").await, CartChange::NotInCart(_)));
    }
}
