//! Platform Publisher Port - Storefront Listing Creation

use async_trait::async_trait;

use crate::domain::product::{ListingPayload, PlatformKind, PublishedListing};

/// Trait for storefront integrations.
///
/// Each publisher receives its own copy of the payload. Publishers are
/// independent: the orchestrator isolates a failure in one from the rest.
#[async_trait]
pub trait PlatformPublisher: Send + Sync {
  /// Which storefront this publisher writes to.
  fn platform(&self) -> PlatformKind;

  /// Create a listing and return the platform's created resource.
  ///
  /// # Errors
  /// Returns error when the create call is rejected or retries run out.
  async fn publish(&self, payload: ListingPayload) -> anyhow::Result<PublishedListing>;
}
