//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::CartItemId;
use super::price::parse_price;

/// One purchasable plan in the cart.
///
/// The catalog models one unit per plan, so an item has no quantity. The
/// persisted JSON uses camelCase field names and stores `priceValue` as an
/// exact number, digit for digit:
///
/// ```json
/// {
///   "id": "v-esp-mensal",
///   "productName": "VALORANT ESP",
///   "planName": "Mensal",
///   "period": "30 dias",
///   "price": "R$120",
///   "priceValue": 120,
///   "accentColor": "red",
///   "image": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Dedup key, derived by the producer from product, category and plan.
    pub id: CartItemId,
    /// Product display name.
    pub product_name: String,
    /// Plan display name (e.g. "Mensal").
    pub plan_name: String,
    /// Billing period label (e.g. "30 dias").
    pub period: String,
    /// Price exactly as the catalog displays it.
    pub price: String,
    /// Amount parsed from `price` when the item was created.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price_value: Decimal,
    /// Free-form accent tag used by the surfaces.
    pub accent_color: String,
    /// Optional illustration URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl CartItem {
    /// Create an item, deriving `price_value` from the display `price`.
    ///
    /// The amount is fixed here and carried verbatim afterwards, including
    /// through persistence, so later changes to the parsing rules never move
    /// the total of a cart that was already filled.
    #[must_use]
    pub fn new(
        id: CartItemId,
        product_name: impl Into<String>,
        plan_name: impl Into<String>,
        period: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        let price = price.into();
        let price_value = parse_price(&price);
        Self {
            id,
            product_name: product_name.into(),
            plan_name: plan_name.into(),
            period: period.into(),
            price,
            price_value,
            accent_color: String::new(),
            image: None,
        }
    }

    /// Set the accent tag.
    #[must_use]
    pub fn with_accent_color(mut self, accent_color: impl Into<String>) -> Self {
        self.accent_color = accent_color.into();
        self
    }

    /// Set the illustration URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
