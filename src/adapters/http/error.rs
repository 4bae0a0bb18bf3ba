//! Outbound call errors.

use std::time::Duration;

use thiserror::Error;

/// Failure of an outbound HTTP call.
///
/// Every variant except `Exhausted` describes a single attempt; the
/// retry executor wraps the last one in `Exhausted` once the policy
/// runs out of attempts.
#[derive(Debug, Error)]
pub enum CallError {
  /// Connection, TLS, or body-read failure.
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  /// Server answered with a non-2xx status.
  #[error("HTTP {status}: {body}")]
  Status { status: u16, body: String },

  /// Attempt exceeded the per-attempt time limit.
  #[error("attempt timed out after {0:?}")]
  Timeout(Duration),

  /// Response body was not the JSON we expected.
  #[error("invalid response body: {0}")]
  Decode(String),

  /// Request could not be built or replayed.
  #[error("invalid request: {0}")]
  Request(String),

  /// All attempts failed.
  #[error("{operation} failed after {attempts} attempt(s)")]
  Exhausted {
    operation: String,
    attempts: u32,
    #[source]
    last: Box<CallError>,
  },
}

impl CallError {
  /// Number of attempts made before giving up, if this is terminal.
  pub const fn attempts(&self) -> Option<u32> {
    match self {
      Self::Exhausted { attempts, .. } => Some(*attempts),
      _ => None,
    }
  }

  /// HTTP status of the (last) failed attempt, if the server answered.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      Self::Exhausted { last, .. } => last.status(),
      _ => None,
    }
  }
}
