//! Supplier Gateway Port - Top Product Discovery
//!
//! Defines the trait every upstream catalog implements. A gateway
//! issues its requests through the shared retry client, parses the
//! candidates, and reduces them to one product with its ranking rule.

use async_trait::async_trait;

use crate::domain::product::{Product, SupplierKind};

/// Trait for supplier catalog integrations.
///
/// `Ok(None)` means the catalog returned no candidates; that is a
/// normal outcome, not a failure. `Err` is reserved for exhausted
/// retries and malformed responses.
#[async_trait]
pub trait SupplierGateway: Send + Sync {
  /// Which supplier this gateway talks to.
  fn kind(&self) -> SupplierKind;

  /// Fetch the supplier's current top product.
  async fn fetch_top_product(&self) -> anyhow::Result<Option<Product>>;
}
