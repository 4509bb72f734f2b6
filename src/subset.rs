//! Candidate subset extraction
//!
//! Two independent policies turn transformed scores into a ranked subset:
//!
//! - **positive**: every node with a score strictly above zero;
//! - **scan statistic**: the prefix of the descending ranking maximising
//!   `S(r) = (x_1 + ... + x_r) / sqrt(r)`.
//!
//! Both may be followed by the connectivity filter. Neither fails when no
//! node qualifies; the result is simply empty.
//!
//! Subsets are ordered by descending score, ties broken by ascending node
//! identifier.

use crate::connectivity::restrict_optional;
use crate::NodeScoreMap;
use std::cmp::Ordering;

/// Outcome of the scan-statistic search
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    /// Selected prefix length r*, 0 when the maximum is not positive
    pub size: usize,
    /// S(r*), or the largest S(r) seen when nothing was selected
    pub statistic: f64,
}

/// Nodes ordered by descending score, ties by ascending identifier
pub fn rank_nodes(scores: &NodeScoreMap) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = scores.iter().map(|(n, &s)| (n.as_str(), s)).collect();
    ranked.sort_by(descending);
    ranked
}

fn descending(a: &(&str, f64), b: &(&str, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Sort `nodes` into subset order using `scores`
///
/// Nodes without a score sort last.
pub fn order_subset(mut nodes: Vec<String>, scores: &NodeScoreMap) -> Vec<String> {
    nodes.sort_by(|a, b| {
        let sa = scores.get(a).copied().unwrap_or(f64::NEG_INFINITY);
        let sb = scores.get(b).copied().unwrap_or(f64::NEG_INFINITY);
        sb.total_cmp(&sa).then_with(|| a.cmp(b))
    });
    nodes
}

/// Every node scoring strictly above zero, optionally restricted to
/// non-singleton components of `edges`
pub fn positive_subset(scores: &NodeScoreMap, edges: Option<&[(String, String)]>) -> Vec<String> {
    let positive: Vec<String> = rank_nodes(scores)
        .into_iter()
        .take_while(|&(_, score)| score > 0.0)
        .map(|(node, _)| node.to_string())
        .collect();

    restrict_optional(positive, edges)
}

/// Maximise `S(r) = cumsum(r) / sqrt(r)` over a descending ranking
///
/// The first maximising prefix wins. When `max S(r) <= 0` nothing is
/// selected.
pub fn scan_statistic(ranked_scores: &[f64]) -> ScanResult {
    let mut best = ScanResult {
        size: 0,
        statistic: f64::NEG_INFINITY,
    };
    let mut cumulative = 0.0;

    for (i, score) in ranked_scores.iter().enumerate() {
        cumulative += score;
        let r = i + 1;
        let statistic = cumulative / (r as f64).sqrt();
        if statistic > best.statistic {
            best = ScanResult { size: r, statistic };
        }
    }

    if best.statistic.is_nan() || best.statistic <= 0.0 {
        best.size = 0;
    }
    best
}

/// Top-r* nodes of the scan-statistic search, optionally restricted to
/// non-singleton components of `edges`
pub fn scan_statistic_subset(
    scores: &NodeScoreMap,
    edges: Option<&[(String, String)]>,
) -> Vec<String> {
    let ranked = rank_nodes(scores);
    let values: Vec<f64> = ranked.iter().map(|&(_, score)| score).collect();
    let scan = scan_statistic(&values);
    tracing::debug!(size = scan.size, statistic = scan.statistic, "scan statistic");

    let selected: Vec<String> = ranked[..scan.size]
        .iter()
        .map(|&(node, _)| node.to_string())
        .collect();

    restrict_optional(selected, edges)
}
