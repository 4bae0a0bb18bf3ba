//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces.
//!
//! Use cases:
//! - `ProductFilter`: stock gate, shipping quote, profit gate
//! - `Pipeline`: one pass from supplier catalogs to storefront listings

pub mod filter;
pub mod pipeline;

pub use filter::{FilterDecision, ProductFilter};
pub use pipeline::{Pipeline, PipelineOptions, RunSummary};
