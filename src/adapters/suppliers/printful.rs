//! Printful Store Gateway
//!
//! Reads store products from Printful (`result` array) and ranks them
//! by an explicit popularity field.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::{debug, instrument};

use super::catalog::{self, DEFAULT_RANKING_FIELD};
use super::resolve_base_url;
use crate::adapters::http::ApiClient;
use crate::config::SupplierConfig;
use crate::domain::product::{Product, SupplierKind};
use crate::domain::ranking::RankingRule;
use crate::ports::supplier::SupplierGateway;

pub const DEFAULT_BASE_URL: &str = "https://api.printful.com";

/// Gateway for Printful store products.
pub struct PrintfulGateway {
    client: Arc<ApiClient>,
    api_key: String,
    base_url: String,
    ranking_field: String,
}

impl PrintfulGateway {
    pub fn new(client: Arc<ApiClient>, config: &SupplierConfig, api_key: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: resolve_base_url(config, DEFAULT_BASE_URL),
            ranking_field: config
                .ranking_field
                .clone()
                .unwrap_or_else(|| DEFAULT_RANKING_FIELD.to_string()),
        }
    }

    fn request(&self) -> RequestBuilder {
        self.client
            .http()
            .get(format!("{}/store/products", self.base_url))
            .bearer_auth(&self.api_key)
    }
}

/// Pick the most popular product from a `{ "result": [...] }` body.
pub fn select_top(body: &Value, ranking_field: &str) -> Result<Option<Product>> {
    let items = catalog::items_at(body, &["result"]).context("Malformed Printful response")?;
    let candidates = catalog::parse_items(items, SupplierKind::Printful, Some(ranking_field));
    Ok(RankingRule::ByMetric.select(candidates))
}

#[async_trait]
impl SupplierGateway for PrintfulGateway {
    fn kind(&self) -> SupplierKind {
        SupplierKind::Printful
    }

    #[instrument(skip(self), fields(supplier = "printful"))]
    async fn fetch_top_product(&self) -> Result<Option<Product>> {
        let body = self
            .client
            .send_json("printful.store_products", self.request())
            .await
            .context("Printful store products request failed")?;

        let top = select_top(&body, &self.ranking_field)?;
        debug!(found = top.is_some(), "Printful products ranked");
        Ok(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_top_by_configured_field() {
        let body = json!({"code": 200, "result": [
            {"id": 10, "name": "Poster", "retail_price": "14.00", "synced": 9},
            {"id": 11, "name": "Mug", "retail_price": "11.00", "synced": 12}
        ]});
        let top = select_top(&body, "synced").unwrap().unwrap();
        assert_eq!(top.id, "11");
        assert_eq!(top.title, "Mug");
    }

    #[test]
    fn test_missing_result_is_empty_catalog() {
        assert!(select_top(&json!({"code": 200}), DEFAULT_RANKING_FIELD).unwrap().is_none());
    }
}
