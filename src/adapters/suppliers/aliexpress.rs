//! AliExpress Gateway (RapidAPI DataHub)
//!
//! Searches a category sorted by order count; the API returns the
//! best seller first so the head of `data.products` is selected.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::{debug, instrument};

use super::catalog;
use super::resolve_base_url;
use crate::adapters::http::ApiClient;
use crate::config::SupplierConfig;
use crate::domain::product::{Product, SupplierKind};
use crate::domain::ranking::RankingRule;
use crate::ports::supplier::SupplierGateway;

pub const DEFAULT_BASE_URL: &str = "https://aliexpress-datahub.p.rapidapi.com";
/// Value of the `X-RapidAPI-Host` header.
pub const RAPIDAPI_HOST: &str = "aliexpress-datahub.p.rapidapi.com";
/// Category searched when none is configured.
pub const DEFAULT_CATEGORY_ID: &str = "100005434";

/// Gateway for AliExpress top sellers.
pub struct AliExpressGateway {
    client: Arc<ApiClient>,
    api_key: String,
    base_url: String,
    category_id: String,
}

impl AliExpressGateway {
    pub fn new(client: Arc<ApiClient>, config: &SupplierConfig, api_key: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: resolve_base_url(config, DEFAULT_BASE_URL),
            category_id: config
                .category_id
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY_ID.to_string()),
        }
    }

    /// GET /item_search?category_id=..&sort=orders
    fn request(&self) -> RequestBuilder {
        self.client
            .http()
            .get(format!("{}/item_search", self.base_url))
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .query(&[("category_id", self.category_id.as_str()), ("sort", "orders")])
    }
}

/// Take the first product of a `{ "data": { "products": [...] } }` body.
pub fn select_top(body: &Value) -> Result<Option<Product>> {
    let items =
        catalog::items_at(body, &["data", "products"]).context("Malformed AliExpress response")?;
    let candidates = catalog::parse_items(items, SupplierKind::AliExpress, None);
    Ok(RankingRule::ResponseOrder.select(candidates))
}

#[async_trait]
impl SupplierGateway for AliExpressGateway {
    fn kind(&self) -> SupplierKind {
        SupplierKind::AliExpress
    }

    #[instrument(skip(self), fields(supplier = "aliexpress", category = %self.category_id))]
    async fn fetch_top_product(&self) -> Result<Option<Product>> {
        let body = self
            .client
            .send_json("aliexpress.item_search", self.request())
            .await
            .context("AliExpress item search failed")?;

        let top = select_top(&body)?;
        debug!(found = top.is_some(), "AliExpress search ranked");
        Ok(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::ApiClientConfig;
    use serde_json::json;

    #[test]
    fn test_select_top_takes_response_order() {
        let body = json!({"data": {"products": [
            {"product_id": "A1", "product_title": "Phone Case", "app_sale_price": "2.10", "popularity_metric": 1},
            {"product_id": "A2", "product_title": "Cable", "app_sale_price": "1.50", "popularity_metric": 99}
        ]}});
        let top = select_top(&body).unwrap().unwrap();
        assert_eq!(top.id, "A1");
    }

    #[test]
    fn test_empty_search_is_none() {
        assert!(select_top(&json!({"data": {"products": []}})).unwrap().is_none());
        assert!(select_top(&json!({})).unwrap().is_none());
    }

    #[test]
    fn test_request_carries_rapidapi_headers_and_sort() {
        let client = Arc::new(ApiClient::new(ApiClientConfig::default()).unwrap());
        let gateway = AliExpressGateway::new(client, &SupplierConfig::default(), "rk");

        let request = gateway.request().build().unwrap();
        assert_eq!(request.url().path(), "/item_search");
        assert_eq!(
            request.url().query(),
            Some("category_id=100005434&sort=orders")
        );
        assert_eq!(request.headers()["x-rapidapi-key"], "rk");
        assert_eq!(request.headers()["x-rapidapi-host"], RAPIDAPI_HOST);
    }
}
