//! Property-Based Tests - Pricing, Ranking and Backoff Invariants
//!
//! Uses `proptest` to check the profit gate, metric ranking and the
//! retry delay series across random inputs.

use std::time::Duration;

use proptest::prelude::*;
use rust_decimal::Decimal;

use dropship_automation::adapters::http::RetryPolicy;
use dropship_automation::domain::pricing::{is_profitable, listing_price, sale_price, total_cost};
use dropship_automation::domain::product::{Product, ShippingQuote, SupplierKind};
use dropship_automation::domain::ranking::top_index_by_metric;

fn product(cents: i64) -> Product {
    Product {
        id: "p".to_string(),
        supplier: SupplierKind::TeeSpring,
        title: "Tee".to_string(),
        description: None,
        base_price: Decimal::new(cents, 2),
        quantity: Some(1),
        sku: None,
        popularity: None,
        destination_postal_code: None,
    }
}

// ── Profit Gate ─────────────────────────────────────────────

proptest! {
    /// Any positive margin over a positive cost is profitable.
    #[test]
    fn positive_margin_is_profitable(
        price_cents in 1i64..1_000_000,
        ship_cents in 0i64..50_000,
        margin_bp in 1i64..10_000,
    ) {
        let p = product(price_cents);
        let ship = ShippingQuote::flat(Decimal::new(ship_cents, 2));
        let margin = Decimal::new(margin_bp, 4);

        prop_assert!(is_profitable(&p, &ship, margin));
        prop_assert!(sale_price(&p, &ship, margin) > total_cost(&p, &ship));
    }

    /// Zero or negative margin is never profitable.
    #[test]
    fn non_positive_margin_is_unprofitable(
        price_cents in 1i64..1_000_000,
        ship_cents in 0i64..50_000,
        margin_bp in -9_999i64..=0,
    ) {
        let p = product(price_cents);
        let ship = ShippingQuote::flat(Decimal::new(ship_cents, 2));
        prop_assert!(!is_profitable(&p, &ship, Decimal::new(margin_bp, 4)));
    }

    /// Listing prices always carry exactly two decimal places.
    #[test]
    fn listing_price_has_cents_scale(
        price_cents in 1i64..1_000_000,
        margin_bp in 1i64..10_000,
    ) {
        let p = product(price_cents);
        let ship = ShippingQuote::flat(Decimal::new(500, 2));
        let price = listing_price(&p, &ship, Decimal::new(margin_bp, 4));
        prop_assert_eq!(price.scale(), 2);
    }
}

// ── Ranking ─────────────────────────────────────────────────

proptest! {
    /// The winner holds the maximum score and no earlier item ties it.
    #[test]
    fn metric_ranking_picks_first_max(scores in prop::collection::vec(0.0f64..1000.0, 1..50)) {
        let wrapped: Vec<Option<f64>> = scores.iter().copied().map(Some).collect();
        let idx = top_index_by_metric(&wrapped).unwrap();
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!((scores[idx] - max).abs() < f64::EPSILON);
        prop_assert!(scores[..idx].iter().all(|s| *s < max));
    }
}

// ── Backoff Series ──────────────────────────────────────────

proptest! {
    /// Delays never decrease and never exceed the cap.
    #[test]
    fn backoff_non_decreasing_and_capped(
        base_ms in 1u64..5_000,
        cap_ms in 5_000u64..60_000,
        multiplier in 1.0f64..4.0,
        attempts in 2u32..12,
    ) {
        let policy = RetryPolicy {
            max_attempts: attempts,
            base_delay: Duration::from_millis(base_ms),
            max_delay: Duration::from_millis(cap_ms),
            multiplier,
            attempt_timeout: None,
        };

        let delays: Vec<Duration> = (1..attempts).map(|a| policy.delay_for_attempt(a)).collect();
        for pair in delays.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
        prop_assert!(delays.iter().all(|d| *d <= policy.max_delay));
        prop_assert_eq!(delays.iter().sum::<Duration>(), policy.total_backoff());
    }
}
