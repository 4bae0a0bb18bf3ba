//! ShipStation Rates - Live Shipping Quotes
//!
//! POSTs a rate request for the configured origin/package profile to
//! `/shipments/getrates` and keeps the cheapest service.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::adapters::http::ApiClient;
use crate::config::ShippingConfig;
use crate::domain::product::{Product, ShippingQuote};
use crate::ports::shipping::ShippingRates;

/// Rate request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub carrier_code: String,
    pub from_postal_code: String,
    pub to_country: String,
    pub to_postal_code: String,
    pub weight: Weight,
    pub dimensions: Dimensions,
    pub confirmation: &'static str,
    pub residential: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Weight {
    pub value: f64,
    pub units: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dimensions {
    pub units: &'static str,
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// One service rate in the response array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRate {
    pub service_name: String,
    pub service_code: Option<String>,
    pub shipment_cost: f64,
    #[serde(default)]
    pub other_cost: f64,
}

impl ServiceRate {
    fn total(&self) -> Option<Decimal> {
        let cost = Decimal::from_f64(self.shipment_cost)?;
        let other = Decimal::from_f64(self.other_cost)?;
        Some(cost + other)
    }
}

/// ShipStation-backed shipping quotes.
pub struct ShipStationRates {
    client: Arc<ApiClient>,
    api_key: String,
    api_secret: String,
    endpoint: String,
    profile: ShippingConfig,
}

impl ShipStationRates {
    pub fn new(
        client: Arc<ApiClient>,
        config: &ShippingConfig,
        api_key: &str,
        api_secret: &str,
    ) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            endpoint: format!(
                "{}/shipments/getrates",
                config.base_url.trim_end_matches('/')
            ),
            profile: config.clone(),
        }
    }

    /// Rate request for a product; falls back to the default destination.
    pub fn rate_request(&self, product: &Product) -> RateRequest {
        let destination = product
            .destination_postal_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .unwrap_or(&self.profile.default_destination_postal_code);

        RateRequest {
            carrier_code: self.profile.carrier_code.clone(),
            from_postal_code: self.profile.from_postal_code.clone(),
            to_country: self.profile.to_country.clone(),
            to_postal_code: destination.to_string(),
            weight: Weight {
                value: self.profile.weight_oz,
                units: "ounces",
            },
            dimensions: Dimensions {
                units: "inches",
                length: self.profile.length_in,
                width: self.profile.width_in,
                height: self.profile.height_in,
            },
            confirmation: "none",
            residential: true,
        }
    }

    fn request(&self, body: &RateRequest) -> RequestBuilder {
        self.client
            .http()
            .post(&self.endpoint)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(body)
    }
}

/// Cheapest rate in a ShipStation response array.
pub fn cheapest_quote(body: Value) -> Result<ShippingQuote> {
    let rates: Vec<ServiceRate> =
        serde_json::from_value(body).context("Malformed ShipStation rates response")?;

    let best = rates
        .iter()
        .filter_map(|rate| rate.total().map(|total| (total, rate)))
        .min_by(|a, b| a.0.cmp(&b.0));

    match best {
        Some((cost, rate)) => Ok(ShippingQuote {
            cost,
            service: Some(rate.service_name.clone()),
        }),
        None => bail!("ShipStation returned no usable rates"),
    }
}

#[async_trait]
impl ShippingRates for ShipStationRates {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn quote(&self, product: &Product) -> Result<ShippingQuote> {
        let body = self.rate_request(product);
        let response = self
            .client
            .send_json("shipstation.get_rates", self.request(&body))
            .await
            .context("ShipStation rate request failed")?;

        let quote = cheapest_quote(response)?;
        debug!(
            to = %body.to_postal_code,
            cost = %quote.cost,
            service = ?quote.service,
            "Shipping quoted"
        );
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::ApiClientConfig;
    use crate::domain::product::SupplierKind;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn product(postal: Option<&str>) -> Product {
        Product {
            id: "p".to_string(),
            supplier: SupplierKind::AliExpress,
            title: "Lamp".to_string(),
            description: None,
            base_price: dec!(10),
            quantity: Some(1),
            sku: None,
            popularity: None,
            destination_postal_code: postal.map(str::to_string),
        }
    }

    fn rates() -> ShipStationRates {
        let client = Arc::new(ApiClient::new(ApiClientConfig::default()).unwrap());
        let config = ShippingConfig {
            from_postal_code: "78703".to_string(),
            default_destination_postal_code: "10001".to_string(),
            ..ShippingConfig::default()
        };
        ShipStationRates::new(client, &config, "key", "secret")
    }

    #[test]
    fn test_cheapest_quote_sums_costs() {
        let body = json!([
            {"serviceName": "Priority", "serviceCode": "usps_priority", "shipmentCost": 7.5, "otherCost": 0.0},
            {"serviceName": "First Class", "serviceCode": "usps_first", "shipmentCost": 3.25, "otherCost": 0.5},
            {"serviceName": "Media", "serviceCode": "usps_media", "shipmentCost": 3.5, "otherCost": 0.5}
        ]);
        let quote = cheapest_quote(body).unwrap();
        assert_eq!(quote.cost, dec!(3.75));
        assert_eq!(quote.service.as_deref(), Some("First Class"));
    }

    #[test]
    fn test_no_rates_is_error() {
        assert!(cheapest_quote(json!([])).is_err());
        assert!(cheapest_quote(json!({"message": "bad"})).is_err());
    }

    #[test]
    fn test_rate_request_destination_fallback() {
        let rates = rates();
        assert_eq!(rates.rate_request(&product(Some("94105"))).to_postal_code, "94105");
        assert_eq!(rates.rate_request(&product(None)).to_postal_code, "10001");
        assert_eq!(rates.rate_request(&product(Some(" "))).to_postal_code, "10001");
    }

    #[test]
    fn test_rate_request_wire_names() {
        let body = serde_json::to_value(rates().rate_request(&product(None))).unwrap();
        assert_eq!(body["fromPostalCode"], "78703");
        assert_eq!(body["carrierCode"], "stamps_com");
        assert_eq!(body["weight"]["units"], "ounces");
    }
}
