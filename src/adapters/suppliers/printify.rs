//! Printify Catalog Gateway
//!
//! Reads the Printify catalog and ranks items by their popularity
//! field (`popularity_metric` unless configured otherwise).

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

/// Printify public API root.
pub const DEFAULT_BASE_URL: &str = "https://api.printify.com";

/// Gateway for the Printify catalog.
pub struct PrintifyGateway {
    client: Arc<ApiClient>,
    api_key: String,
    base_url: String,
    ranking_field: String,
}

impl PrintifyGateway {
    /// Create a gateway from its config section and API key.
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

    /// GET /v1/catalog/products.json
    fn request(&self) -> RequestBuilder {
        self.client
            .http()
            .get(format!("{}/v1/catalog/products.json", self.base_url))
            .bearer_auth(&self.api_key)
    }
}

/// Pick the most popular product from a catalog response (top-level array).
pub fn select_top(body: &Value, ranking_field: &str) -> Result<Option<Product>> {
    let items = catalog::items_at(body, &[]).context("Malformed Printify catalog")?;
    let candidates = catalog::parse_items(items, SupplierKind::Printify, Some(ranking_field));
    Ok(RankingRule::ByMetric.select(candidates))
}

#[async_trait]
impl SupplierGateway for PrintifyGateway {
    fn kind(&self) -> SupplierKind {
        SupplierKind::Printify
    }

    #[instrument(skip(self), fields(supplier = "printify"))]
    async fn fetch_top_product(&self) -> Result<Option<Product>> {
        let body = self
            .client
            .send_json("printify.catalog", self.request())
            .await
            .context("Printify catalog request failed")?;

        let top = select_top(&body, &self.ranking_field)?;
        debug!(found = top.is_some(), "Printify catalog ranked");
        Ok(top)
    }
}
