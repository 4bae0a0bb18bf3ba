//! Shipping Adapters - `ShippingRates` Implementations
//!
//! - `ShipStationRates`: live carrier rates through the retry client
//! - `FlatRateShipping`: fixed configured cost

pub mod flat;
pub mod shipstation;

use std::sync::Arc;

use anyhow::Result;

use crate::adapters::http::ApiClient;
use crate::config::credentials::{self, Credentials};
use crate::config::{ShippingConfig, ShippingProvider};
use crate::ports::shipping::ShippingRates;

pub use flat::FlatRateShipping;
pub use shipstation::ShipStationRates;

/// Build the configured shipping-rate provider.
pub fn build_shipping(
    config: &ShippingConfig,
    creds: &Credentials,
    client: &Arc<ApiClient>,
) -> Result<Arc<dyn ShippingRates>> {
    Ok(match config.provider {
        ShippingProvider::ShipStation => Arc::new(ShipStationRates::new(
            Arc::clone(client),
            config,
            creds.get(credentials::SHIPSTATION_API_KEY)?,
            creds.get(credentials::SHIPSTATION_API_SECRET)?,
        )),
        ShippingProvider::Flat => Arc::new(FlatRateShipping::from_config(config)?),
    })
}
