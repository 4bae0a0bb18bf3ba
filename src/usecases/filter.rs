//! Product Filter - Stock and Profit Gates
//!
//! Runs the checks in a fixed order so that no shipping quote is ever
//! requested for a product that is out of stock:
//! 1. `has_stock` (pure)
//! 2. shipping quote (network, through the `ShippingRates` port)
//! 3. `is_profitable` (pure)

use std::sync::Arc;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::domain::pricing::{has_stock, is_profitable, sale_price};
use crate::domain::product::{Product, ShippingQuote};
use crate::ports::shipping::ShippingRates;

/// Outcome of filtering one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
  /// Supplier reported no stock; shipping was not quoted.
  OutOfStock,
  /// Marked-up price does not exceed total cost.
  Unprofitable(ShippingQuote),
  /// Ready for normalization with this quote.
  Accepted(ShippingQuote),
}

/// Stock/profit filter bound to a shipping provider and margin.
pub struct ProductFilter {
  shipping: Arc<dyn ShippingRates>,
  margin: Decimal,
}

impl ProductFilter {
  pub fn new(shipping: Arc<dyn ShippingRates>, margin: Decimal) -> Self {
    Self { shipping, margin }
  }

  /// Configured markup.
  pub const fn margin(&self) -> Decimal {
    self.margin
  }

  /// Decide whether `product` may be listed.
  ///
  /// # Errors
  /// Returns error only when the shipping quote cannot be obtained.
  #[instrument(skip(self, product), fields(product_id = %product.id, supplier = %product.supplier))]
  pub async fn evaluate(&self, product: &Product) -> Result<FilterDecision> {
    if !has_stock(product) {
      debug!(quantity = ?product.quantity, "Out of stock");
      return Ok(FilterDecision::OutOfStock);
    }

    let quote = self
      .shipping
      .quote(product)
      .await
      .with_context(|| format!("Shipping quote failed for product {}", product.id))?;

    if !is_profitable(product, &quote, self.margin) {
      debug!(
        base_price = %product.base_price,
        shipping = %quote.cost,
        sale_price = %sale_price(product, &quote, self.margin),
        "Not profitable"
      );
      return Ok(FilterDecision::Unprofitable(quote));
    }

    Ok(FilterDecision::Accepted(quote))
  }
}
