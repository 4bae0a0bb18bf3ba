//! Email Relay Notifier - Mail Through an HTTP Relay
//!
//! POSTs `{from, to, subject, text}` to a transactional mail relay with
//! a bearer token. Delivery goes through the shared retry executor.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::adapters::http::ApiClient;
use crate::config::NotificationConfig;
use crate::ports::notifier::Notifier;

/// Relay message body.
#[derive(Debug, Clone, Serialize)]
pub struct RelayMessage<'a> {
    pub from: &'a str,
    pub to: &'a [String],
    pub subject: &'a str,
    pub text: &'a str,
}

pub struct EmailRelayNotifier {
    client: Arc<ApiClient>,
    relay_url: String,
    token: String,
    from: String,
    to: Vec<String>,
}

impl EmailRelayNotifier {
    pub fn new(client: Arc<ApiClient>, config: &NotificationConfig, token: &str) -> Self {
        Self {
            client,
            relay_url: config.relay_url.clone(),
            token: token.to_string(),
            from: config.from.clone(),
            to: config.to.clone(),
        }
    }

    pub fn message<'a>(&'a self, subject: &'a str, body: &'a str) -> RelayMessage<'a> {
        RelayMessage {
            from: &self.from,
            to: &self.to,
            subject,
            text: body,
        }
    }
}

#[async_trait]
impl Notifier for EmailRelayNotifier {
    #[instrument(skip(self, body), fields(recipients = self.to.len()))]
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        let request = self
            .client
            .http()
            .post(&self.relay_url)
            .bearer_auth(&self.token)
            .json(&self.message(subject, body));

        self.client
            .send_json("notify.email_relay", request)
            .await
            .context("Email relay delivery failed")?;

        debug!("Notification relayed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::{ApiClientConfig, RetryPolicy};
    use std::time::Duration;

    fn notifier(relay_url: &str) -> EmailRelayNotifier {
        let client = ApiClient::new(ApiClientConfig {
            timeout: Duration::from_millis(500),
            retry: RetryPolicy::no_retry(),
            ..ApiClientConfig::default()
        })
        .unwrap();
        let config = NotificationConfig {
            relay_url: relay_url.to_string(),
            from: "bot@example.com".to_string(),
            to: vec!["owner@example.com".to_string()],
            ..NotificationConfig::default()
        };
        EmailRelayNotifier::new(Arc::new(client), &config, "token")
    }

    #[test]
    fn test_message_body() {
        let n = notifier("https://relay.example.com/send");
        let value = serde_json::to_value(n.message("Product Tee has been listed!", "details")).unwrap();

        assert_eq!(value["from"], "bot@example.com");
        assert_eq!(value["to"][0], "owner@example.com");
        assert_eq!(value["subject"], "Product Tee has been listed!");
        assert_eq!(value["text"], "details");
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_error() {
        let n = notifier("http://127.0.0.1:9/send");
        assert!(n.notify("s", "b").await.is_err());
    }
}
