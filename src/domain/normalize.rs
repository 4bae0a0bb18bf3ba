//! Product normalization into the canonical listing payload.

use rust_decimal::Decimal;

use super::pricing::listing_price;
use super::product::{ListingPayload, ListingVariant, Product, ShippingQuote};

/// Product type used when none is configured.
pub const DEFAULT_PRODUCT_TYPE: &str = "Dropship";

/// Build the listing payload for a product that passed the filter.
///
/// Every optional product field has a default: empty description,
/// no SKU, zero inventory.
pub fn normalize(product: &Product, shipping: &ShippingQuote, margin: Decimal) -> ListingPayload {
    normalize_with_type(product, shipping, margin, DEFAULT_PRODUCT_TYPE)
}

/// Same as [`normalize`] with an explicit storefront product type.
pub fn normalize_with_type(
    product: &Product,
    shipping: &ShippingQuote,
    margin: Decimal,
    product_type: &str,
) -> ListingPayload {
    ListingPayload {
        title: product.title.clone(),
        description: product.description.clone().unwrap_or_default(),
        vendor: product.supplier.display_name().to_string(),
        product_type: product_type.to_string(),
        variants: vec![ListingVariant {
            price: listing_price(product, shipping, margin),
            sku: product.sku.clone(),
            inventory_quantity: product.quantity.unwrap_or(0),
        }],
    }
}
