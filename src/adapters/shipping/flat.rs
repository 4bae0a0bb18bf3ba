//! Flat Shipping - Fixed Cost Per Product

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::config::ShippingConfig;
use crate::domain::product::{Product, ShippingQuote};
use crate::ports::shipping::ShippingRates;

/// Quotes the same configured cost for every product.
#[derive(Debug, Clone)]
pub struct FlatRateShipping {
    cost: Decimal,
}

impl FlatRateShipping {
    pub const fn new(cost: Decimal) -> Self {
        Self { cost }
    }

    pub fn from_config(config: &ShippingConfig) -> Result<Self> {
        let cost = Decimal::from_f64(config.flat_rate)
            .with_context(|| format!("shipping.flat_rate is not a number: {}", config.flat_rate))?;
        Ok(Self::new(cost.normalize()))
    }
}

#[async_trait]
impl ShippingRates for FlatRateShipping {
    async fn quote(&self, _product: &Product) -> Result<ShippingQuote> {
        Ok(ShippingQuote::flat(self.cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::SupplierKind;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_flat_rate_quote() {
        let flat = FlatRateShipping::from_config(&ShippingConfig::default()).unwrap();
        let product = Product {
            id: "p".to_string(),
            supplier: SupplierKind::Modalyst,
            title: "Mug".to_string(),
            description: None,
            base_price: dec!(7),
            quantity: Some(3),
            sku: None,
            popularity: None,
            destination_postal_code: None,
        };

        let quote = flat.quote(&product).await.unwrap();
        assert_eq!(quote.cost, dec!(5));
        assert_eq!(quote.service, None);
    }

    #[test]
    fn test_nan_rate_rejected() {
        let config = ShippingConfig {
            flat_rate: f64::NAN,
            ..ShippingConfig::default()
        };
        assert!(FlatRateShipping::from_config(&config).is_err());
    }
}
