//! Platform Adapters - Storefront Publishers
//!
//! One `PlatformPublisher` per storefront. Each maps the canonical
//! `ListingPayload` into its platform's product body and submits it
//! through the shared retrying `ApiClient`.

pub mod shopify;
pub mod woocommerce;

use std::sync::Arc;

use serde_json::Value;

use crate::adapters::http::ApiClient;
use crate::config::PlatformsConfig;
use crate::config::credentials::{self, ConfigError, Credentials};
use crate::ports::publisher::PlatformPublisher;

pub use shopify::ShopifyPublisher;
pub use woocommerce::WooCommercePublisher;

/// Read an `id` field (number or string) from a created resource.
pub(crate) fn remote_id(resource: &Value) -> Option<String> {
    match resource.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Build a publisher for every enabled storefront.
pub fn build_publishers(
    config: &PlatformsConfig,
    creds: &Credentials,
    client: &Arc<ApiClient>,
) -> Result<Vec<Arc<dyn PlatformPublisher>>, ConfigError> {
    let mut publishers: Vec<Arc<dyn PlatformPublisher>> = Vec::new();

    if config.shopify.enabled {
        publishers.push(Arc::new(ShopifyPublisher::new(
            Arc::clone(client),
            &config.shopify,
            creds.get(credentials::SHOPIFY_ACCESS_TOKEN)?,
        )));
    }
    if config.woocommerce.enabled {
        publishers.push(Arc::new(WooCommercePublisher::new(
            Arc::clone(client),
            &config.woocommerce,
            creds.get(credentials::WOOCOMMERCE_API_KEY)?,
            creds.get(credentials::WOOCOMMERCE_SECRET)?,
        )));
    }

    Ok(publishers)
}
