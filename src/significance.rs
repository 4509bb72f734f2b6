//! Permutation significance of an altered subnetwork
//!
//! The observed subnetwork score (sum of observed scores over the observed
//! subset) is compared with the same aggregate computed on randomized
//! replicates, each with its own scores and its own subset. The empirical
//! p-value is the fraction of replicates scoring at least as high as the
//! observation.

use crate::progress::Reporter;
use crate::NodeScoreMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for significance evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignificanceError {
    #[error("Need at least one permuted replicate to compute a p-value")]
    InsufficientReplicates,

    #[error("Subset node {node} has no score in {sample}")]
    MissingScore { node: String, sample: String },
}

pub type Result<T> = std::result::Result<T, SignificanceError>;

/// One (scores, subset) pair, observed or permuted
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    pub scores: &'a NodeScoreMap,
    pub subset: &'a [String],
}

impl<'a> Sample<'a> {
    pub fn new(scores: &'a NodeScoreMap, subset: &'a [String]) -> Self {
        Self { scores, subset }
    }

    /// Sum of the sample's scores over its own subset
    ///
    /// A missing node is reported against `label`.
    pub fn aggregate_score(&self, label: &str) -> Result<f64> {
        self.subset.iter().try_fold(0.0, |total, node| {
            self.scores
                .get(node)
                .map(|score| total + score)
                .ok_or_else(|| SignificanceError::MissingScore {
                    node: node.clone(),
                    sample: label.to_string(),
                })
        })
    }
}

/// Result of a permutation test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificanceReport {
    /// Aggregate score of the observed subset
    pub observed_score: f64,
    /// Mean aggregate score over the permuted replicates
    pub expected_score: f64,
    /// Fraction of replicates with aggregate score >= observed
    pub p_value: f64,
    /// Number of permuted replicates
    pub num_replicates: usize,
}

impl SignificanceReport {
    /// Plain-text report, one field per line
    pub fn to_report_string(&self) -> String {
        format!(
            "Observed subnetwork score: {}\nExpected subnetwork score: {}\np-value: {}",
            self.observed_score, self.expected_score, self.p_value
        )
    }
}

/// Compare an observed subset with permuted replicates
///
/// All replicates are scored before any aggregate is formed; the p-value
/// denominator is always the full replicate count.
pub fn evaluate(
    observed: Sample<'_>,
    permuted: &[Sample<'_>],
    reporter: &mut dyn Reporter,
) -> Result<SignificanceReport> {
    if permuted.is_empty() {
        return Err(SignificanceError::InsufficientReplicates);
    }

    let observed_score = observed.aggregate_score("observed scores")?;

    let mut permuted_scores = Vec::with_capacity(permuted.len());
    for (i, sample) in permuted.iter().enumerate() {
        let score = sample.aggregate_score(&format!("permuted replicate {}", i + 1))?;
        permuted_scores.push(score);
        reporter.report(&format!(
            "Scored permuted replicate {}/{}",
            i + 1,
            permuted.len()
        ));
    }

    Ok(summarize(observed_score, &permuted_scores))
}

/// Empirical p-value and mean from precomputed aggregate scores
///
/// `permuted_scores` must be non-empty.
pub fn summarize(observed_score: f64, permuted_scores: &[f64]) -> SignificanceReport {
    let num_replicates = permuted_scores.len();
    let expected_score = permuted_scores.iter().sum::<f64>() / num_replicates as f64;
    let extreme = permuted_scores
        .iter()
        .filter(|&&score| score >= observed_score)
        .count();

    SignificanceReport {
        observed_score,
        expected_score,
        p_value: extreme as f64 / num_replicates as f64,
        num_replicates,
    }
}
