//! Shipping Rates Port - Per-product Shipping Cost

use async_trait::async_trait;

use crate::domain::product::{Product, ShippingQuote};

/// Trait for shipping-cost providers.
#[async_trait]
pub trait ShippingRates: Send + Sync {
  /// Quote the cost of shipping one unit of `product`.
  async fn quote(&self, product: &Product) -> anyhow::Result<ShippingQuote>;
}
