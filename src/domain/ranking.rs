//! Top-product selection rules.
//!
//! Suppliers either rank by an explicit popularity score in each item
//! or return results already sorted by the requested criterion.

use serde::{Deserialize, Serialize};

use super::product::Product;

/// How a supplier's candidate list is reduced to a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingRule {
    /// Highest `popularity` wins; first candidate wins ties.
    ByMetric,
    /// The API sorted the list; take the head.
    ResponseOrder,
}

impl RankingRule {
    /// Apply this rule to a candidate list.
    pub fn select(self, candidates: Vec<Product>) -> Option<Product> {
        match self {
            Self::ByMetric => select_by_metric(candidates),
            Self::ResponseOrder => candidates.into_iter().next(),
        }
    }
}

/// Index of the first candidate with the maximum score.
///
/// Missing scores rank below every present score.
pub fn top_index_by_metric(scores: &[Option<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, score) in scores.iter().enumerate() {
        let score = score.filter(|s| !s.is_nan()).unwrap_or(f64::NEG_INFINITY);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Select the most popular candidate.
pub fn select_by_metric(mut candidates: Vec<Product>) -> Option<Product> {
    let scores: Vec<Option<f64>> = candidates.iter().map(|p| p.popularity).collect();
    let idx = top_index_by_metric(&scores)?;
    Some(candidates.swap_remove(idx))
}
