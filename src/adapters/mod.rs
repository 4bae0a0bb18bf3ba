//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` against real
//! HTTP APIs. Every adapter shares one `http::ApiClient`, so all
//! outbound calls go through the same retry executor.
//!
//! Adapter categories:
//! - `http`: shared reqwest client, call errors and retry/backoff
//! - `suppliers`: AliExpress, Printify, Printful, TeeSpring, Modalyst catalogs
//! - `platforms`: Shopify and WooCommerce publishers
//! - `shipping`: ShipStation and flat-rate quotes
//! - `notify`: log and email-relay notifications

pub mod http;
pub mod notify;
pub mod platforms;
pub mod shipping;
pub mod suppliers;
