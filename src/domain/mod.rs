//! Domain layer - Product model and listing decision rules.
//!
//! Pure logic only: no I/O, no HTTP, no async. Everything here is
//! testable in isolation and shared by every supplier and platform.

pub mod normalize;
pub mod pricing;
pub mod product;
pub mod ranking;

// Re-export core types for convenience
pub use normalize::normalize;
pub use pricing::{has_stock, is_profitable, sale_price};
pub use product::{
    ListingPayload, ListingVariant, PlatformKind, Product, PublishedListing, ShippingQuote,
    SupplierKind,
};
pub use ranking::RankingRule;
