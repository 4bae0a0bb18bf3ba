//! Pipeline - One Pass Over Every Supplier
//!
//! For each supplier in order:
//! 1. Fetch the top product (failure is logged and counted, never fatal)
//! 2. Filter on stock, then shipping-inclusive profit
//! 3. Normalize into a `ListingPayload`
//! 4. Publish to every storefront (failures isolated per storefront)
//! 5. Notify once per successful listing (best effort)
//!
//! Suppliers are processed strictly one after another.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::domain::normalize::normalize_with_type;
use crate::domain::product::{ListingPayload, Product, PublishedListing};
use crate::ports::notifier::Notifier;
use crate::ports::publisher::PlatformPublisher;
use crate::ports::supplier::SupplierGateway;

use super::filter::{FilterDecision, ProductFilter};

/// Counters for one pipeline pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
  pub run_id: Uuid,
  pub started_at: DateTime<Utc>,
  pub dry_run: bool,
  pub suppliers: usize,
  /// Supplier fetches that failed (transport, decode, exhausted retries).
  pub supplier_failures: usize,
  /// No candidate, out of stock, unprofitable, or no shipping quote.
  pub skipped: usize,
  /// Products that passed every gate.
  pub accepted: usize,
  pub published: usize,
  pub publish_failures: usize,
}

/// Run-level options.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
  /// Storefront product type for every listing.
  pub product_type: String,
  /// Log payloads instead of publishing.
  pub dry_run: bool,
}

/// Supplier-to-storefront orchestrator.
pub struct Pipeline {
  suppliers: Vec<Arc<dyn SupplierGateway>>,
  publishers: Vec<Arc<dyn PlatformPublisher>>,
  filter: ProductFilter,
  notifier: Arc<dyn Notifier>,
  options: PipelineOptions,
}

impl Pipeline {
  pub fn new(
    suppliers: Vec<Arc<dyn SupplierGateway>>,
    publishers: Vec<Arc<dyn PlatformPublisher>>,
    filter: ProductFilter,
    notifier: Arc<dyn Notifier>,
    options: PipelineOptions,
  ) -> Self {
    Self {
      suppliers,
      publishers,
      filter,
      notifier,
      options,
    }
  }

  /// Execute one pass. Never fails: every error is logged and counted.
  pub async fn run(&self) -> RunSummary {
    let mut summary = RunSummary {
      run_id: Uuid::new_v4(),
      started_at: Utc::now(),
      dry_run: self.options.dry_run,
      suppliers: 0,
      supplier_failures: 0,
      skipped: 0,
      accepted: 0,
      published: 0,
      publish_failures: 0,
    };
    let span = info_span!("pipeline_run", run_id = %summary.run_id);

    async {
      info!(
        suppliers = self.suppliers.len(),
        publishers = self.publishers.len(),
        margin = %self.filter.margin(),
        dry_run = self.options.dry_run,
        "Pipeline run started"
      );

      for supplier in &self.suppliers {
        self.process_supplier(supplier.as_ref(), &mut summary).await;
      }

      info!(
        published = summary.published,
        publish_failures = summary.publish_failures,
        supplier_failures = summary.supplier_failures,
        "Pipeline run finished"
      );
    }
    .instrument(span)
    .await;

    summary
  }

  async fn process_supplier(&self, supplier: &dyn SupplierGateway, summary: &mut RunSummary) {
    let kind = supplier.kind();
    summary.suppliers += 1;

    let product = match supplier.fetch_top_product().await {
      Ok(Some(product)) => product,
      Ok(None) => {
        info!(supplier = %kind, "No candidate products");
        summary.skipped += 1;
        return;
      }
      Err(e) => {
        error!(supplier = %kind, error = %format!("{e:#}"), "Supplier fetch failed");
        summary.supplier_failures += 1;
        return;
      }
    };

    let quote = match self.filter.evaluate(&product).await {
      Ok(FilterDecision::Accepted(quote)) => quote,
      Ok(decision) => {
        info!(supplier = %kind, product_id = %product.id, ?decision, "Skipping product");
        summary.skipped += 1;
        return;
      }
      Err(e) => {
        warn!(supplier = %kind, product_id = %product.id, error = %format!("{e:#}"), "Skipping: no shipping quote");
        summary.skipped += 1;
        return;
      }
    };

    summary.accepted += 1;
    let payload = normalize_with_type(
      &product,
      &quote,
      self.filter.margin(),
      &self.options.product_type,
    );

    if self.options.dry_run {
      info!(supplier = %kind, ?payload, "Dry run: listing not published");
      return;
    }

    self.publish_everywhere(&product, &payload, summary).await;
  }

  async fn publish_everywhere(
    &self,
    product: &Product,
    payload: &ListingPayload,
    summary: &mut RunSummary,
  ) {
    for publisher in &self.publishers {
      let platform = publisher.platform();

      match publisher.publish(payload.clone()).await {
        Ok(listing) => {
          info!(
            platform = %platform,
            product_id = %product.id,
            remote_id = ?listing.remote_id,
            "Listing published"
          );
          summary.published += 1;
          self.announce(payload, &listing).await;
        }
        Err(e) => {
          error!(
            platform = %platform,
            product_id = %product.id,
            error = %format!("{e:#}"),
            "Publish failed"
          );
          summary.publish_failures += 1;
        }
      }
    }
  }

  async fn announce(&self, payload: &ListingPayload, listing: &PublishedListing) {
    let subject = listing_subject(&payload.title);
    let body = listing_body(payload, listing);

    if let Err(e) = self.notifier.notify(&subject, &body).await {
      warn!(platform = %listing.platform, error = %format!("{e:#}"), "Notification failed");
    }
  }
}

/// Notification subject for a new listing.
pub fn listing_subject(title: &str) -> String {
  format!("Product {title} has been listed!")
}

fn listing_body(payload: &ListingPayload, listing: &PublishedListing) -> String {
  let price = payload
    .price()
    .map_or_else(|| "unknown".to_string(), |p| p.to_string());
  let remote = listing.remote_id.as_deref().unwrap_or("unknown");
  format!(
    "'{}' from {} is now listed on {} at {} (id {}).",
    payload.title, payload.vendor, listing.platform, price, remote
  )
}
