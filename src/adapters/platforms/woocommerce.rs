//! WooCommerce Publisher - REST v3 Product Creation
//!
//! POSTs a simple product to `{store_url}/wp-json/wc/v3/products`
//! using HTTP basic auth with the consumer key and secret.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use super::remote_id;
use crate::adapters::http::ApiClient;
use crate::config::WooCommerceConfig;
use crate::domain::product::{ListingPayload, PlatformKind, PublishedListing};
use crate::ports::publisher::PlatformPublisher;

/// WooCommerce product body.
#[derive(Debug, Serialize)]
pub struct WooProduct<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'a str,
    pub regular_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<&'a str>,
    pub manage_stock: bool,
    pub stock_quantity: u64,
    pub categories: Vec<WooCategory<'a>>,
}

/// Category reference by name.
#[derive(Debug, Serialize)]
pub struct WooCategory<'a> {
    pub name: &'a str,
}

impl<'a> From<&'a ListingPayload> for WooProduct<'a> {
    fn from(payload: &'a ListingPayload) -> Self {
        let variant = payload.variants.first();
        Self {
            name: &payload.title,
            kind: "simple",
            description: &payload.description,
            regular_price: variant.map(|v| v.price.to_string()).unwrap_or_default(),
            sku: variant.and_then(|v| v.sku.as_deref()),
            manage_stock: true,
            stock_quantity: variant.map_or(0, |v| v.inventory_quantity),
            categories: vec![WooCategory {
                name: &payload.product_type,
            }],
        }
    }
}

/// Publisher for a single WooCommerce store.
pub struct WooCommercePublisher {
    client: Arc<ApiClient>,
    consumer_key: String,
    consumer_secret: String,
    endpoint: String,
}

impl WooCommercePublisher {
    pub fn new(
        client: Arc<ApiClient>,
        config: &WooCommerceConfig,
        consumer_key: &str,
        consumer_secret: &str,
    ) -> Self {
        Self {
            client,
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
            endpoint: format!(
                "{}/wp-json/wc/v3/products",
                config.store_url.trim_end_matches('/')
            ),
        }
    }

    fn request(&self, payload: &ListingPayload) -> RequestBuilder {
        self.client
            .http()
            .post(&self.endpoint)
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .json(&WooProduct::from(payload))
    }
}

/// Build the published listing from a create response.
pub fn parse_created(body: Value) -> PublishedListing {
    PublishedListing {
        platform: PlatformKind::WooCommerce,
        remote_id: remote_id(&body),
        raw: body,
    }
}

#[async_trait]
impl PlatformPublisher for WooCommercePublisher {
    fn platform(&self) -> PlatformKind {
        PlatformKind::WooCommerce
    }

    #[instrument(skip(self, payload), fields(platform = "woocommerce", title = %payload.title))]
    async fn publish(&self, payload: ListingPayload) -> Result<PublishedListing> {
        let body = self
            .client
            .send_json("woocommerce.create_product", self.request(&payload))
            .await
            .context("WooCommerce product creation failed")?;

        let listing = parse_created(body);
        info!(remote_id = ?listing.remote_id, "WooCommerce listing created");
        Ok(listing)
    }
}
