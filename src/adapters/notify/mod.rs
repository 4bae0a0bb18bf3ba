//! Notification Adapters - `Notifier` Implementations

pub mod email_relay;
pub mod log;

use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::config::credentials::{self, ConfigError, Credentials};
use crate::config::{NotificationChannel, NotificationConfig};
use crate::ports::notifier::Notifier;

pub use self::email_relay::EmailRelayNotifier;
pub use self::log::LogNotifier;

/// Build the configured notification channel.
pub fn build_notifier(
    config: &NotificationConfig,
    creds: &Credentials,
    client: &Arc<ApiClient>,
) -> Result<Arc<dyn Notifier>, ConfigError> {
    Ok(match config.channel {
        NotificationChannel::Log => Arc::new(LogNotifier),
        NotificationChannel::EmailRelay => Arc::new(EmailRelayNotifier::new(
            Arc::clone(client),
            config,
            creds.get(credentials::NOTIFY_RELAY_TOKEN)?,
        )),
    })
}
