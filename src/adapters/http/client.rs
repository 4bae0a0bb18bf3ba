//! Shared HTTP client - reqwest + retry executor
//!
//! All supplier, platform, shipping and notification adapters hold an
//! `Arc<ApiClient>` and send their requests through [`ApiClient::send_json`],
//! which routes every attempt through the retry executor. No adapter
//! builds its own reqwest client.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use super::error::CallError;
use super::retry::{self, RetryPolicy};

/// Error bodies longer than this are cut before logging.
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the shared HTTP client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
  /// Whole-request timeout applied by reqwest.
  pub timeout: Duration,
  /// Retry policy applied to every call.
  pub retry: RetryPolicy,
  /// User-Agent header.
  pub user_agent: String,
}

impl Default for ApiClientConfig {
  fn default() -> Self {
    Self {
      timeout: Duration::from_secs(30),
      retry: RetryPolicy::default(),
      user_agent: concat!("dropship-automation/", env!("CARGO_PKG_VERSION")).to_string(),
    }
  }
}

/// HTTP client whose calls all go through the retry executor.
pub struct ApiClient {
  /// Underlying HTTP client.
  http: Client,
  /// Retry policy for every call.
  retry: RetryPolicy,
}

impl ApiClient {
  /// Create a new client.
  pub fn new(config: ApiClientConfig) -> Result<Self> {
    config.retry.validate().context("Invalid retry policy")?;

    let http = Client::builder()
      .timeout(config.timeout)
      .user_agent(config.user_agent)
      .pool_max_idle_per_host(5)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      http,
      retry: config.retry,
    })
  }

  /// Request builder factory for adapters.
  pub fn http(&self) -> &Client {
    &self.http
  }

  /// Send `request` with retries and decode a JSON body.
  ///
  /// Transport failures and non-2xx responses count as failed attempts.
  /// The body of the first 2xx response is decoded once, outside the
  /// retry loop: an undecodable body fails the call without another
  /// request. An empty success body decodes to `Value::Null`.
  pub async fn send_json(
    &self,
    operation: &str,
    request: RequestBuilder,
  ) -> Result<Value, CallError> {
    if request.try_clone().is_none() {
      return Err(CallError::Request(format!(
        "{operation}: streaming bodies cannot be retried"
      )));
    }

    let bytes = retry::execute(operation, &self.retry, || {
      let attempt = request.try_clone();
      async move {
        let req = attempt.ok_or_else(|| CallError::Request("request not cloneable".to_string()))?;
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
          let body = response.text().await.unwrap_or_default();
          return Err(CallError::Status {
            status: status.as_u16(),
            body: truncate(&body),
          });
        }

        let bytes = response.bytes().await?;
        debug!(operation, status = status.as_u16(), bytes = bytes.len(), "Response received");
        Ok(bytes)
      }
    })
    .await?;

    decode_body(&bytes)
  }
}

/// Decode a success body; blank bodies become `Value::Null`.
fn decode_body(bytes: &[u8]) -> Result<Value, CallError> {
  if bytes.iter().all(u8::is_ascii_whitespace) {
    return Ok(Value::Null);
  }
  serde_json::from_slice(bytes).map_err(|e| CallError::Decode(e.to_string()))
}

/// Shorten an error body for log output.
fn truncate(body: &str) -> String {
  if body.len() <= MAX_ERROR_BODY {
    return body.to_string();
  }
  let mut end = MAX_ERROR_BODY;
  while !body.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}…", &body[..end])
}
