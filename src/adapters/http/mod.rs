//! HTTP Plumbing - Shared Client and Resilient Call Executor
//!
//! Sub-modules:
//! - `client`: reqwest wrapper that sends every call through `retry`
//! - `error`: typed outbound call failures
//! - `retry`: bounded retry with capped exponential backoff

pub mod client;
pub mod error;
pub mod retry;
#[cfg(test)]
pub(crate) mod stub;

pub use client::{ApiClient, ApiClientConfig};
pub use error::CallError;
pub use retry::{RetryPolicy, execute};
