//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `SupplierGateway`: top-product discovery per supplier
//! - `PlatformPublisher`: listing creation per storefront
//! - `ShippingRates`: shipping cost quotes
//! - `Notifier`: user-facing notifications

pub mod notifier;
pub mod publisher;
pub mod shipping;
pub mod supplier;

pub use notifier::Notifier;
pub use publisher::PlatformPublisher;
pub use shipping::ShippingRates;
pub use supplier::SupplierGateway;
