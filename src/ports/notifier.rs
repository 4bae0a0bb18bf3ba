//! Notifier Port - Out-of-band User Notifications
//!
//! Delivery is best effort: callers log failures and carry on.

use async_trait::async_trait;

/// Trait for notification channels (log, mail relay).
#[async_trait]
pub trait Notifier: Send + Sync {
  /// Deliver one message.
  async fn notify(&self, subject: &str, body: &str) -> anyhow::Result<()>;
}
