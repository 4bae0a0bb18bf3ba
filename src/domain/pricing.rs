//! Stock and profit gates.
//!
//! Pure decision functions deciding whether a product may be listed:
//! - stock: the supplier must report at least one unit
//! - profit: the marked-up sale price must strictly exceed total cost
//!
//! Formula: sale_price = (base_price + shipping) * (1 + margin)
//!
//! Exposes the Decimal API used by the pipeline and an f64 helper
//! for config-level sanity checks.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::product::{Product, ShippingQuote};

/// Decimal places listing prices are rounded to.
pub const PRICE_SCALE: u32 = 2;

/// True iff the supplier reported a positive stock quantity.
///
/// A missing quantity counts as out of stock.
pub fn has_stock(product: &Product) -> bool {
    product.quantity.unwrap_or(0) > 0
}

/// Base price plus shipping.
pub fn total_cost(product: &Product, shipping: &ShippingQuote) -> Decimal {
    product.base_price + shipping.cost
}

/// Unrounded sale price for a product at the given margin.
pub fn sale_price(product: &Product, shipping: &ShippingQuote, margin: Decimal) -> Decimal {
    total_cost(product, shipping) * (Decimal::ONE + margin)
}

/// Sale price rounded for display on a storefront.
pub fn listing_price(product: &Product, shipping: &ShippingQuote, margin: Decimal) -> Decimal {
    let mut price = sale_price(product, shipping, margin)
        .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    price.rescale(PRICE_SCALE);
    price
}

/// Profitable iff the sale price strictly exceeds base price plus shipping.
pub fn is_profitable(product: &Product, shipping: &ShippingQuote, margin: Decimal) -> bool {
    sale_price(product, shipping, margin) > total_cost(product, shipping)
}

/// Convert a configured f64 margin into a Decimal.
///
/// Returns `None` for NaN or infinite input.
pub fn margin_from_f64(margin: f64) -> Option<Decimal> {
    Decimal::from_f64(margin).map(|m| m.normalize())
}
