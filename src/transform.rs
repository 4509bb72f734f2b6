//! Score transformation and thresholding
//!
//! Turns raw scores into responsibilities, log-likelihood ratios or plain
//! z-scores under a fitted [`MixtureModel`], then shifts them so that the
//! decision boundary sits at zero.
//!
//! # Outliers
//!
//! Nodes excluded from the mixture fit as outliers are still transformed.
//! They count toward `n` and are assumed to lie on the alternative side, so the
//! mixing-proportion threshold index is `outliers + round(alpha * non_outliers)`.

use crate::distribution::isf;
use crate::mixture::MixtureModel;
use crate::NodeScoreMap;
use clap::ValueEnum;
use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

/// Errors for score transformation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Unknown score choice: {0}")]
    UnknownScoreChoice(String),

    #[error("Unknown threshold choice: {0}")]
    UnknownThresholdPolicy(String),

    #[error("Outlier node {0} has no score")]
    UnknownOutlier(String),

    #[error("Node {node} has p-value {value}; p-values must lie strictly between 0 and 1")]
    InvalidPValue { node: String, value: f64 },

    #[error(
        "{choice:?} score of node {node} is not finite under alpha = {alpha}; \
         choose another score or threshold"
    )]
    DegenerateModel {
        choice: ScoreChoice,
        node: String,
        alpha: f64,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;

/// Which per-node score to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScoreChoice {
    /// Posterior probability of the alternative component
    #[value(name = "responsibility", aliases = ["r", "responsibilities"])]
    Responsibility,
    /// ln(alternative mass) - ln(null mass)
    #[value(
        name = "llr",
        aliases = ["log_likelihood_ratio", "log_likelihood_ratios"]
    )]
    LogLikelihoodRatio,
    /// The input score unchanged
    #[value(name = "z", aliases = ["z-score", "z-scores", "z_score", "z_scores"])]
    ZScore,
}

impl ScoreChoice {
    /// Score of a single raw value
    pub fn apply(self, model: &MixtureModel, x: f64) -> f64 {
        match self {
            ScoreChoice::Responsibility => model.responsibility(x),
            ScoreChoice::LogLikelihoodRatio => model.log_likelihood_ratio(x),
            ScoreChoice::ZScore => x,
        }
    }

    /// Score value at which the two components are equally likely
    pub fn natural_boundary(self) -> f64 {
        match self {
            ScoreChoice::Responsibility => 0.5,
            ScoreChoice::LogLikelihoodRatio | ScoreChoice::ZScore => 0.0,
        }
    }
}

impl FromStr for ScoreChoice {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(s, false)
            .map_err(|_| TransformError::UnknownScoreChoice(s.to_string()))
    }
}

/// Where to put the decision boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThresholdPolicy {
    /// Midpoint between the k-th and (k+1)-th highest scores, k from alpha
    #[value(name = "mixing_proportion", alias = "mixing_proportions")]
    MixingProportion,
    /// 0.5 for responsibilities, 0 otherwise
    #[value(name = "natural")]
    Natural,
    /// Leave scores unshifted
    #[value(name = "none")]
    NoShift,
}

impl FromStr for ThresholdPolicy {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(s, false)
            .map_err(|_| TransformError::UnknownThresholdPolicy(s.to_string()))
    }
}

/// Order-statistic index for the mixing-proportion threshold
///
/// `excluded_count + round(alpha * included_count)`, clamped to
/// `[0, excluded_count + included_count]`.
pub fn compute_threshold_index(excluded_count: usize, alpha: f64, included_count: usize) -> usize {
    let total = excluded_count + included_count;
    let expected = (alpha.clamp(0.0, 1.0) * included_count as f64).round() as usize;
    (excluded_count + expected).min(total)
}

/// Midpoint of the k-th and (k+1)-th largest values (1-based), clamped to the
/// valid index range
pub fn order_statistic_threshold(values: &[f64], k: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    let n = sorted.len();
    0.5 * (sorted[k.saturating_sub(1).min(n - 1)] + sorted[k.min(n - 1)])
}

/// Transform every score under `model`
///
/// Equivalent to [`transform_with_outliers`] with no outliers.
pub fn transform(
    scores: &NodeScoreMap,
    model: &MixtureModel,
    choice: ScoreChoice,
    policy: ThresholdPolicy,
) -> Result<NodeScoreMap> {
    shift_scores(scores, model, choice, policy, 0)
}

/// Transform every score under a model fitted without `outliers`
///
/// Fails if an outlier is not a scored node; the threshold index arithmetic
/// depends on every outlier being part of `scores`.
pub fn transform_with_outliers(
    scores: &NodeScoreMap,
    model: &MixtureModel,
    choice: ScoreChoice,
    policy: ThresholdPolicy,
    outliers: &BTreeSet<String>,
) -> Result<NodeScoreMap> {
    if let Some(missing) = outliers.iter().find(|node| !scores.contains_key(*node)) {
        return Err(TransformError::UnknownOutlier(missing.clone()));
    }
    shift_scores(scores, model, choice, policy, outliers.len())
}

fn shift_scores(
    scores: &NodeScoreMap,
    model: &MixtureModel,
    choice: ScoreChoice,
    policy: ThresholdPolicy,
    excluded_count: usize,
) -> Result<NodeScoreMap> {
    let transformed: NodeScoreMap = scores
        .iter()
        .map(|(node, &x)| (node.clone(), choice.apply(model, x)))
        .collect();

    let shift = match policy {
        ThresholdPolicy::MixingProportion => {
            let values: Vec<f64> = transformed.values().copied().collect();
            let included_count = values.len() - excluded_count;
            let k = compute_threshold_index(excluded_count, model.alpha, included_count);
            let threshold = order_statistic_threshold(&values, k);
            tracing::debug!(k, threshold, "mixing-proportion threshold");
            threshold
        }
        ThresholdPolicy::Natural => choice.natural_boundary(),
        ThresholdPolicy::NoShift => 0.0,
    };

    let shifted: NodeScoreMap = transformed
        .into_iter()
        .map(|(node, score)| (node, shift_score(score, shift)))
        .collect();

    // alpha of exactly 0 or 1 sends every log-likelihood ratio to -inf or +inf
    if let Some((node, _)) = shifted.iter().find(|(_, score)| !score.is_finite()) {
        return Err(TransformError::DegenerateModel {
            choice,
            node: node.clone(),
            alpha: model.alpha,
        });
    }
    Ok(shifted)
}

/// `score - shift`, with equal infinities meeting at the boundary
fn shift_score(score: f64, shift: f64) -> f64 {
    if score.is_infinite() && score == shift {
        0.0
    } else {
        score - shift
    }
}

/// Convert p-values to z-scores, z = Phi^{-1}(1 - p)
pub fn pvalues_to_zscores(pvalues: &NodeScoreMap) -> Result<NodeScoreMap> {
    pvalues
        .iter()
        .map(|(node, &p)| {
            let z = isf(p);
            if z.is_finite() {
                Ok((node.clone(), z))
            } else {
                Err(TransformError::InvalidPValue {
                    node: node.clone(),
                    value: p,
                })
            }
        })
        .collect()
}

/// Expected size of the altered subnetwork, floor(n * alpha)
pub fn expected_subgraph_size(num_nodes: usize, alpha: f64) -> usize {
    (num_nodes as f64 * alpha.clamp(0.0, 1.0)).floor() as usize
}
