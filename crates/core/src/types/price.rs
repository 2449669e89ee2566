//! Brazilian real price strings.
//!
//! Catalog prices arrive as display strings such as `"R$25"` or
//! `"R$1.234,56"`: `.` groups thousands and `,` separates the cents. The cart
//! keeps the display string for the UI and does all arithmetic on the
//! [`Decimal`] returned by [`parse_price`].

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency prefix used when rendering amounts.
pub const CURRENCY_PREFIX: &str = "R$";

/// Parse a localized price string into an amount.
///
/// Every character that is not an ASCII digit or a comma is dropped, so the
/// currency symbol and the thousands separators go away together. The first
/// remaining comma is the decimal separator.
///
/// Input that leaves no readable number behind (no digits, a second comma, or
/// more digits than a [`Decimal`] holds) parses as zero. This never panics.
///
/// ```rust
/// # use rust_decimal::Decimal;
/// # use solarhub_core::parse_price;
/// assert_eq!(parse_price("R$1.234,50"), Decimal::new(123_450, 2));
/// assert_eq!(parse_price("R$120"), Decimal::from(120));
/// assert_eq!(parse_price("grátis"), Decimal::ZERO);
/// ```
#[must_use]
pub fn parse_price(display: &str) -> Decimal {
    let cleaned: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();

    let (whole, fraction) = cleaned.split_once(',').unwrap_or((&cleaned, ""));
    if fraction.contains(',') || (whole.is_empty() && fraction.is_empty()) {
        return Decimal::ZERO;
    }

    let Ok(scale) = u32::try_from(fraction.len()) else {
        return Decimal::ZERO;
    };
    let Ok(mantissa) = format!("{whole}{fraction}").parse::<i128>() else {
        return Decimal::ZERO;
    };

    Decimal::try_from_i128_with_scale(mantissa, scale).unwrap_or(Decimal::ZERO)
}

/// Render an amount the way the cart drawer shows subtotals.
///
/// Two decimals, comma separator, no thousands grouping: `1234.5` becomes
/// `"R$1234,50"`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{rounded:.2}");
    format!("{CURRENCY_PREFIX}{}", plain.replace('.', ","))
}
