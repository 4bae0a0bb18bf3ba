//! Catalog Response Parsing - Raw Items to Products
//!
//! Supplier APIs disagree on field names, and prices arrive either as
//! JSON numbers or strings. Each concept is looked up under a list of
//! known keys; items without an id, title, or parseable price are
//! skipped.

use std::str::FromStr;

use anyhow::{Result, bail};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use crate::domain::product::{Product, SupplierKind};

/// Popularity field used by metric-ranked suppliers unless overridden.
pub const DEFAULT_RANKING_FIELD: &str = "popularity_metric";

const ID_KEYS: &[&str] = &["id", "product_id", "item_id", "itemId"];
const TITLE_KEYS: &[&str] = &["title", "name", "product_title"];
const DESCRIPTION_KEYS: &[&str] = &["description", "body_html", "product_description"];
const PRICE_KEYS: &[&str] = &[
    "price",
    "app_sale_price",
    "sale_price",
    "target_sale_price",
    "retail_price",
];
const QUANTITY_KEYS: &[&str] = &[
    "quantity",
    "stock",
    "stock_quantity",
    "inventory_quantity",
    "available",
];
const SKU_KEYS: &[&str] = &["sku", "sku_id"];
const POSTAL_KEYS: &[&str] = &["destination_postal_code", "postal_code", "zip"];

/// Locate the candidate array at `path` inside a response body.
///
/// A missing path yields an empty slice (empty catalog); a present
/// value that is not an array is a malformed response.
pub fn items_at<'a>(body: &'a Value, path: &[&str]) -> Result<&'a [Value]> {
    let mut node = body;
    for key in path {
        match node.get(key) {
            Some(next) => node = next,
            None => return Ok(&[]),
        }
    }

    match node {
        Value::Array(items) => Ok(items.as_slice()),
        Value::Null => Ok(&[]),
        other => bail!(
            "expected an array at '{}', found {}",
            path.join("."),
            type_name(other)
        ),
    }
}

/// Parse every usable item, preserving response order.
pub fn parse_items(
    items: &[Value],
    supplier: SupplierKind,
    ranking_field: Option<&str>,
) -> Vec<Product> {
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            let parsed = parse_item(item, supplier, ranking_field);
            if parsed.is_none() {
                warn!(supplier = %supplier, index = idx, "Skipping catalog item without id, title or price");
            }
            parsed
        })
        .collect()
}

/// Parse one catalog item.
pub fn parse_item(item: &Value, supplier: SupplierKind, ranking_field: Option<&str>) -> Option<Product> {
    let id = first(item, ID_KEYS).and_then(as_text)?;
    let title = first(item, TITLE_KEYS).and_then(as_text)?;
    let base_price = first(item, PRICE_KEYS)
        .and_then(as_decimal)
        .filter(|p| !p.is_sign_negative())?;

    Some(Product {
        id,
        supplier,
        title,
        description: first(item, DESCRIPTION_KEYS).and_then(as_text),
        base_price,
        quantity: first(item, QUANTITY_KEYS).and_then(as_quantity),
        sku: first(item, SKU_KEYS).and_then(as_text),
        popularity: item
            .get(ranking_field.unwrap_or(DEFAULT_RANKING_FIELD))
            .and_then(as_score),
        destination_postal_code: first(item, POSTAL_KEYS).and_then(as_text),
    })
}

fn first<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| item.get(*k))
        .find(|v| !v.is_null())
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().trim_start_matches('$').to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn as_quantity(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|q| q.max(0).unsigned_abs()))
            .or_else(|| n.as_f64().filter(|q| q.is_finite()).map(|q| q.max(0.0).floor() as u64)),
        Value::String(s) => s.trim().parse::<i64>().ok().map(|q| q.max(0).unsigned_abs()),
        Value::Bool(in_stock) => Some(u64::from(*in_stock)),
        _ => None,
    }
}

fn as_score(value: &Value) -> Option<f64> {
    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    score.filter(|s| !s.is_nan())
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_items_at_nested_path() {
        let body = json!({"data": {"products": [{"id": 1}]}});
        assert_eq!(items_at(&body, &["data", "products"]).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_path_is_empty_catalog() {
        let body = json!({"data": {}});
        assert!(items_at(&body, &["data", "products"]).unwrap().is_empty());
        assert!(items_at(&json!({"products": null}), &["products"]).unwrap().is_empty());
    }

    #[test]
    fn test_non_array_is_malformed() {
        let body = json!({"products": "oops"});
        let err = items_at(&body, &["products"]).unwrap_err();
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn test_parse_item_field_fallbacks() {
        let item = json!({
            "product_id": 1005001,
            "product_title": "LED Strip",
            "app_sale_price": "12.49",
            "stock": "8",
            "popularity_metric": 42
        });

        let p = parse_item(&item, SupplierKind::AliExpress, None).unwrap();
        assert_eq!(p.id, "1005001");
        assert_eq!(p.title, "LED Strip");
        assert_eq!(p.base_price, dec!(12.49));
        assert_eq!(p.quantity, Some(8));
        assert_eq!(p.popularity, Some(42.0));
        assert_eq!(p.description, None);
        assert_eq!(p.sku, None);
    }

    #[test]
    fn test_parse_item_custom_ranking_field() {
        let item = json!({"id": "a", "name": "Tee", "price": 9.5, "sales_rank": "17.5"});
        let p = parse_item(&item, SupplierKind::Printful, Some("sales_rank")).unwrap();
        assert_eq!(p.popularity, Some(17.5));
        assert_eq!(p.base_price, dec!(9.5));
        assert_eq!(p.quantity, None);
    }

    #[test]
    fn test_negative_stock_clamps_to_zero() {
        let item = json!({"id": "a", "title": "Tee", "price": 1, "quantity": -3});
        let p = parse_item(&item, SupplierKind::TeeSpring, None).unwrap();
        assert_eq!(p.quantity, Some(0));
    }

    #[test]
    fn test_items_without_price_are_skipped() {
        let items = vec![
            json!({"id": "a", "title": "No price"}),
            json!({"id": "b", "title": "Priced", "price": "$4.00"}),
            json!({"id": "c", "title": "Negative", "price": -1}),
        ];
        let products = parse_items(&items, SupplierKind::Modalyst, None);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "b");
        assert_eq!(products[0].base_price, dec!(4.00));
    }
}
