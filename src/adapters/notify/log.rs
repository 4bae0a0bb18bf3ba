//! Log Notifier - Notifications as Structured Log Events

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::ports::notifier::Notifier;

/// Emits each notification as an `info` event on the `notify` target.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        info!(target: "notify", subject, body, "Notification");
        Ok(())
    }
}
