//! Modalyst Gateway
//!
//! Requests trending products and takes the first one.

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

pub const DEFAULT_BASE_URL: &str = "https://api.modalyst.co";

/// Gateway for Modalyst products.
pub struct ModalystGateway {
    client: Arc<ApiClient>,
    api_key: String,
    base_url: String,
}

impl ModalystGateway {
    pub fn new(client: Arc<ApiClient>, config: &SupplierConfig, api_key: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: resolve_base_url(config, DEFAULT_BASE_URL),
        }
    }

    fn request(&self) -> RequestBuilder {
        self.client
            .http()
            .get(format!("{}/v1/products", self.base_url))
            .bearer_auth(&self.api_key)
            .query(&[("sort", "trending")])
    }
}

/// Take the first product of a `{ "products": [...] }` body.
pub fn select_top(body: &Value) -> Result<Option<Product>> {
    let items = catalog::items_at(body, &["products"]).context("Malformed Modalyst response")?;
    let candidates = catalog::parse_items(items, SupplierKind::Modalyst, None);
    Ok(RankingRule::ResponseOrder.select(candidates))
}

#[async_trait]
impl SupplierGateway for ModalystGateway {
    fn kind(&self) -> SupplierKind {
        SupplierKind::Modalyst
    }

    #[instrument(skip(self), fields(supplier = "modalyst"))]
    async fn fetch_top_product(&self) -> Result<Option<Product>> {
        let body = self
            .client
            .send_json("modalyst.products", self.request())
            .await
            .context("Modalyst products request failed")?;

        let top = select_top(&body)?;
        debug!(found = top.is_some(), "Modalyst products ranked");
        Ok(top)
    }
}
