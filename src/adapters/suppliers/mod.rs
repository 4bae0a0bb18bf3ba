//! Supplier Adapters - Catalog Gateways
//!
//! One `SupplierGateway` implementation per upstream catalog. All of
//! them share the retrying `ApiClient` and the item parser in
//! `catalog`.
//!
//! Ranking:
//! - by explicit metric: Printify, Printful
//! - by response order: AliExpress, TeeSpring, Modalyst

pub mod aliexpress;
pub mod catalog;
pub mod modalyst;
pub mod printful;
pub mod printify;
pub mod teespring;

use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::config::credentials::{self, ConfigError, Credentials};
use crate::config::{SupplierConfig, SuppliersConfig};
use crate::ports::supplier::SupplierGateway;

pub use aliexpress::AliExpressGateway;
pub use modalyst::ModalystGateway;
pub use printful::PrintfulGateway;
pub use printify::PrintifyGateway;
pub use teespring::TeeSpringGateway;

/// Configured base URL without a trailing slash, or the default.
pub(crate) fn resolve_base_url(config: &SupplierConfig, default: &str) -> String {
    config
        .base_url
        .as_deref()
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}

/// Build a gateway for every enabled supplier, in a fixed order.
pub fn build_gateways(
    config: &SuppliersConfig,
    creds: &Credentials,
    client: &Arc<ApiClient>,
) -> Result<Vec<Arc<dyn SupplierGateway>>, ConfigError> {
    let mut gateways: Vec<Arc<dyn SupplierGateway>> = Vec::new();

    if config.aliexpress.enabled {
        gateways.push(Arc::new(AliExpressGateway::new(
            Arc::clone(client),
            &config.aliexpress,
            creds.get(credentials::ALIEXPRESS_RAPIDAPI_KEY)?,
        )));
    }
    if config.printify.enabled {
        gateways.push(Arc::new(PrintifyGateway::new(
            Arc::clone(client),
            &config.printify,
            creds.get(credentials::PRINTIFY_API_KEY)?,
        )));
    }
    if config.printful.enabled {
        gateways.push(Arc::new(PrintfulGateway::new(
            Arc::clone(client),
            &config.printful,
            creds.get(credentials::PRINTFUL_API_KEY)?,
        )));
    }
    if config.teespring.enabled {
        gateways.push(Arc::new(TeeSpringGateway::new(
            Arc::clone(client),
            &config.teespring,
            creds.get(credentials::TEESPRING_API_KEY)?,
        )));
    }
    if config.modalyst.enabled {
        gateways.push(Arc::new(ModalystGateway::new(
            Arc::clone(client),
            &config.modalyst,
            creds.get(credentials::MODALYST_API_KEY)?,
        )));
    }

    Ok(gateways)
}
