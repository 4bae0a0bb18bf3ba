//! Resilient Call Executor - Bounded Retry with Exponential Backoff
//!
//! Every outbound request in the pipeline runs through [`execute`].
//! A failed attempt (transport error, non-2xx status, attempt timeout)
//! is logged and retried after
//! `min(base_delay * multiplier^(attempt-1), max_delay)` until the
//! policy's attempt budget is spent.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{debug, error, warn};

use super::error::CallError;

/// Retry and backoff parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
  /// Total attempts including the first one (>= 1).
  pub max_attempts: u32,
  /// Delay after the first failed attempt.
  pub base_delay: Duration,
  /// Upper bound for any single delay.
  pub max_delay: Duration,
  /// Growth factor between consecutive delays (>= 1.0).
  pub multiplier: f64,
  /// Optional time limit for a single attempt.
  pub attempt_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: 5,
      base_delay: Duration::from_secs(4),
      max_delay: Duration::from_secs(10),
      multiplier: 2.0,
      attempt_timeout: None,
    }
  }
}

impl RetryPolicy {
  /// Policy that never retries.
  pub fn no_retry() -> Self {
    Self {
      max_attempts: 1,
      ..Self::default()
    }
  }

  /// Delay to wait after the given failed attempt (1-based).
  ///
  /// Rounded to whole milliseconds and capped at `max_delay`.
  pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
    let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
    let base_ms = self.base_delay.as_secs_f64() * 1_000.0;
    let max_ms = self.max_delay.as_secs_f64() * 1_000.0;
    let scaled = base_ms * self.multiplier.powi(exponent);

    if !scaled.is_finite() || scaled >= max_ms {
      return self.max_delay;
    }
    Duration::from_millis(scaled.round().max(0.0) as u64).min(self.max_delay)
  }

  /// Sum of all delays slept when every attempt fails.
  pub fn total_backoff(&self) -> Duration {
    (1..self.max_attempts.max(1))
      .map(|attempt| self.delay_for_attempt(attempt))
      .sum()
  }

  /// Check the policy invariants.
  pub fn validate(&self) -> anyhow::Result<()> {
    anyhow::ensure!(self.max_attempts >= 1, "max_attempts must be >= 1");
    anyhow::ensure!(
      self.multiplier.is_finite() && self.multiplier >= 1.0,
      "backoff multiplier must be >= 1.0, got {}",
      self.multiplier
    );
    if let Some(limit) = self.attempt_timeout {
      anyhow::ensure!(!limit.is_zero(), "attempt_timeout must be positive");
    }
    Ok(())
  }
}

/// Run `call` under `policy`, retrying every failure.
///
/// Returns the first success. When all attempts fail the last error
/// is returned wrapped in [`CallError::Exhausted`].
pub async fn execute<T, F, Fut>(
  operation: &str,
  policy: &RetryPolicy,
  mut call: F,
) -> Result<T, CallError>
where
  F: FnMut() -> Fut,
  Fut: Future<Output = Result<T, CallError>>,
{
  let max_attempts = policy.max_attempts.max(1);
  let mut attempt = 0;

  loop {
    attempt += 1;

    let outcome = match policy.attempt_timeout {
      Some(limit) => match timeout(limit, call()).await {
        Ok(result) => result,
        Err(_) => Err(CallError::Timeout(limit)),
      },
      None => call().await,
    };

    match outcome {
      Ok(value) => {
        if attempt > 1 {
          debug!(operation, attempt, "Call succeeded after retry");
        }
        return Ok(value);
      }
      Err(e) if attempt < max_attempts => {
        let delay = policy.delay_for_attempt(attempt);
        warn!(
          operation,
          attempt,
          max_attempts,
          delay_ms = delay.as_millis() as u64,
          error = %e,
          "Call failed, backing off"
        );
        sleep(delay).await;
      }
      Err(e) => {
        error!(
          operation,
          attempts = attempt,
          error = %e,
          "Call failed, retries exhausted"
        );
        return Err(CallError::Exhausted {
          operation: operation.to_string(),
          attempts: attempt,
          last: Box::new(e),
        });
      }
    }
  }
}
