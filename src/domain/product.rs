//! Product, shipping quote and listing payload types.
//!
//! These are the values flowing through a single pipeline pass:
//! a supplier parse creates a `Product`, the filter attaches a
//! `ShippingQuote`, and the normalizer produces a `ListingPayload`.
//! Nothing here is mutated after construction.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upstream catalog a product was sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplierKind {
    AliExpress,
    Printify,
    Printful,
    TeeSpring,
    Modalyst,
}

impl SupplierKind {
    /// Human-readable name, also used as the listing vendor.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AliExpress => "AliExpress",
            Self::Printify => "Printify",
            Self::Printful => "Printful",
            Self::TeeSpring => "TeeSpring",
            Self::Modalyst => "Modalyst",
        }
    }
}

impl fmt::Display for SupplierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Storefront a listing is published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Shopify,
    WooCommerce,
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shopify => f.write_str("Shopify"),
            Self::WooCommerce => f.write_str("WooCommerce"),
        }
    }
}

/// A candidate product as reported by a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Supplier-assigned identifier.
    pub id: String,
    /// Supplier that returned this product.
    pub supplier: SupplierKind,
    pub title: String,
    pub description: Option<String>,
    /// Supplier base price in store currency.
    pub base_price: Decimal,
    /// Units in stock. `None` when the supplier did not report stock.
    pub quantity: Option<u64>,
    pub sku: Option<String>,
    /// Supplier-defined ranking score, if any.
    pub popularity: Option<f64>,
    /// Postal code the rate quote should ship to.
    pub destination_postal_code: Option<String>,
}

/// Shipping cost for a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub cost: Decimal,
    /// Carrier service the cost belongs to, when known.
    pub service: Option<String>,
}

impl ShippingQuote {
    /// Quote with a fixed cost and no service name.
    pub const fn flat(cost: Decimal) -> Self {
        Self {
            cost,
            service: None,
        }
    }
}

/// One sellable variant of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingVariant {
    pub price: Decimal,
    pub sku: Option<String>,
    pub inventory_quantity: u64,
}

/// Canonical listing body handed to every platform publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPayload {
    pub title: String,
    pub description: String,
    pub vendor: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub variants: Vec<ListingVariant>,
}

impl ListingPayload {
    /// Price of the first variant.
    pub fn price(&self) -> Option<Decimal> {
        self.variants.first().map(|v| v.price)
    }
}

/// Created-resource representation returned by a platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedListing {
    pub platform: PlatformKind,
    /// Platform-side resource id, when the response carried one.
    pub remote_id: Option<String>,
    /// Raw response body.
    pub raw: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payload_serializes_canonical_shape() {
        let payload = ListingPayload {
            title: "Mug".to_string(),
            description: String::new(),
            vendor: "Printify".to_string(),
            product_type: "Dropship".to_string(),
            variants: vec![ListingVariant {
                price: dec!(18.00),
                sku: None,
                inventory_quantity: 3,
            }],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "Dropship");
        assert_eq!(json["variants"][0]["inventory_quantity"], 3);
        assert!(json["variants"][0]["sku"].is_null());
        assert_eq!(payload.price(), Some(dec!(18.00)));
    }

    #[test]
    fn test_supplier_display_names() {
        assert_eq!(SupplierKind::TeeSpring.to_string(), "TeeSpring");
        assert_eq!(SupplierKind::AliExpress.display_name(), "AliExpress");
        assert_eq!(PlatformKind::WooCommerce.to_string(), "WooCommerce");
    }
}
