//! Shopify Publisher - Admin REST Product Creation
//!
//! POSTs `{ "product": { ... } }` to
//! `https://{store}.myshopify.com/admin/api/{version}/products.json`
//! with the `X-Shopify-Access-Token` header.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use super::remote_id;
use crate::adapters::http::ApiClient;
use crate::config::ShopifyConfig;
use crate::domain::product::{ListingPayload, PlatformKind, PublishedListing};
use crate::ports::publisher::PlatformPublisher;

/// Request envelope for product creation.
#[derive(Debug, Serialize)]
pub struct CreateProductRequest<'a> {
    pub product: ShopifyProduct<'a>,
}

/// Shopify product body.
#[derive(Debug, Serialize)]
pub struct ShopifyProduct<'a> {
    pub title: &'a str,
    pub body_html: &'a str,
    pub vendor: &'a str,
    pub product_type: &'a str,
    pub variants: Vec<ShopifyVariant<'a>>,
}

/// Shopify variant body. Prices are sent as decimal strings.
#[derive(Debug, Serialize)]
pub struct ShopifyVariant<'a> {
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<&'a str>,
    pub inventory_quantity: u64,
}

impl<'a> From<&'a ListingPayload> for CreateProductRequest<'a> {
    fn from(payload: &'a ListingPayload) -> Self {
        Self {
            product: ShopifyProduct {
                title: &payload.title,
                body_html: &payload.description,
                vendor: &payload.vendor,
                product_type: &payload.product_type,
                variants: payload
                    .variants
                    .iter()
                    .map(|v| ShopifyVariant {
                        price: v.price.to_string(),
                        sku: v.sku.as_deref(),
                        inventory_quantity: v.inventory_quantity,
                    })
                    .collect(),
            },
        }
    }
}

/// Publisher for a single Shopify store.
pub struct ShopifyPublisher {
    client: Arc<ApiClient>,
    access_token: String,
    endpoint: String,
}

impl ShopifyPublisher {
    pub fn new(client: Arc<ApiClient>, config: &ShopifyConfig, access_token: &str) -> Self {
        let base = config.base_url.as_deref().map_or_else(
            || format!("https://{}.myshopify.com", config.store_name.trim()),
            |url| url.trim_end_matches('/').to_string(),
        );
        Self {
            client,
            access_token: access_token.to_string(),
            endpoint: format!("{base}/admin/api/{}/products.json", config.api_version),
        }
    }

    fn request(&self, payload: &ListingPayload) -> RequestBuilder {
        self.client
            .http()
            .post(&self.endpoint)
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&CreateProductRequest::from(payload))
    }
}

/// Build the published listing from a create response.
pub fn parse_created(body: Value) -> PublishedListing {
    PublishedListing {
        platform: PlatformKind::Shopify,
        remote_id: body.get("product").and_then(remote_id),
        raw: body,
    }
}

#[async_trait]
impl PlatformPublisher for ShopifyPublisher {
    fn platform(&self) -> PlatformKind {
        PlatformKind::Shopify
    }

    #[instrument(skip(self, payload), fields(platform = "shopify", title = %payload.title))]
    async fn publish(&self, payload: ListingPayload) -> Result<PublishedListing> {
        let body = self
            .client
            .send_json("shopify.create_product", self.request(&payload))
            .await
            .context("Shopify product creation failed")?;

        let listing = parse_created(body);
        info!(remote_id = ?listing.remote_id, "Shopify listing created");
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::ApiClientConfig;
    use crate::domain::product::ListingVariant;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn payload() -> ListingPayload {
        ListingPayload {
            title: "Desk Lamp".to_string(),
            description: "<p>Bright</p>".to_string(),
            vendor: "AliExpress".to_string(),
            product_type: "Dropship".to_string(),
            variants: vec![ListingVariant {
                price: dec!(18.00),
                sku: None,
                inventory_quantity: 12,
            }],
        }
    }

    #[test]
    fn test_request_body_shape() {
        let p = payload();
        let body = serde_json::to_value(CreateProductRequest::from(&p)).unwrap();

        assert_eq!(body["product"]["title"], "Desk Lamp");
        assert_eq!(body["product"]["body_html"], "<p>Bright</p>");
        assert_eq!(body["product"]["product_type"], "Dropship");
        assert_eq!(body["product"]["variants"][0]["price"], "18.00");
        assert_eq!(body["product"]["variants"][0]["inventory_quantity"], 12);
        assert!(body["product"]["variants"][0].get("sku").is_none());
    }

    #[test]
    fn test_endpoint_and_token_header() {
        let client = Arc::new(ApiClient::new(ApiClientConfig::default()).unwrap());
        let config = ShopifyConfig {
            enabled: true,
            store_name: "acme".to_string(),
            ..ShopifyConfig::default()
        };
        let publisher = ShopifyPublisher::new(client, &config, "shpat_x");

        let request = publisher.request(&payload()).build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://acme.myshopify.com/admin/api/2023-04/products.json"
        );
        assert_eq!(request.headers()["x-shopify-access-token"], "shpat_x");
        assert_eq!(request.method(), reqwest::Method::POST);
    }

    #[test]
    fn test_parse_created_reads_product_id() {
        let listing = parse_created(json!({"product": {"id": 632910392, "title": "Desk Lamp"}}));
        assert_eq!(listing.remote_id.as_deref(), Some("632910392"));
        assert_eq!(listing.platform, PlatformKind::Shopify);
    }
}
