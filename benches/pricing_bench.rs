//! Pricing Benchmarks - Catalog-to-Listing Hot Path
//!
//! Benchmarks the pure work done per candidate: parsing a raw catalog
//! page, ranking it, the profit gate and normalization.
//!
//! Run with: cargo bench --bench pricing_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use dropship_automation::adapters::suppliers::catalog::parse_items;
use dropship_automation::domain::normalize::normalize;
use dropship_automation::domain::pricing::is_profitable;
use dropship_automation::domain::product::{Product, ShippingQuote, SupplierKind};
use dropship_automation::domain::ranking::RankingRule;

fn catalog_page(len: usize) -> Vec<Value> {
    (0..len)
        .map(|i| {
            json!({
                "id": format!("item-{i}"),
                "title": format!("Product {i}"),
                "price": format!("{}.{:02}", 5 + i % 40, i % 100),
                "quantity": i % 7,
                "popularity_metric": (i * 37) % 1000,
            })
        })
        .collect()
}

fn sample_product() -> Product {
    Product {
        id: "bench".to_string(),
        supplier: SupplierKind::Printful,
        title: "Bench Tee".to_string(),
        description: Some("Soft cotton".to_string()),
        base_price: dec!(12.49),
        quantity: Some(25),
        sku: Some("BT-1".to_string()),
        popularity: Some(120.0),
        destination_postal_code: None,
    }
}

/// Parse and rank a 100-item catalog page.
fn bench_parse_and_rank(c: &mut Criterion) {
    let page = catalog_page(100);

    c.bench_function("parse_rank_100_items", |b| {
        b.iter(|| {
            let products = parse_items(black_box(&page), SupplierKind::Printful, None);
            let _top = RankingRule::ByMetric.select(products);
        });
    });
}

/// Profit gate for one product.
fn bench_profit_gate(c: &mut Criterion) {
    let product = sample_product();
    let ship = ShippingQuote::flat(dec!(5));

    c.bench_function("profit_gate", |b| {
        b.iter(|| is_profitable(black_box(&product), black_box(&ship), black_box(dec!(0.2))));
    });
}

/// Normalize one accepted product into a listing payload.
fn bench_normalize(c: &mut Criterion) {
    let product = sample_product();
    let ship = ShippingQuote::flat(dec!(5));

    c.bench_function("normalize_listing", |b| {
        b.iter(|| normalize(black_box(&product), black_box(&ship), black_box(dec!(0.2))));
    });
}

criterion_group!(benches, bench_parse_and_rank, bench_profit_gate, bench_normalize);
criterion_main!(benches);
