// Fitted mixture parameters and the per-score quantities derived from them

use crate::distribution::log_pdf;
use serde::{Deserialize, Serialize};

/// Mixture of N(0, 1) with weight `1 - alpha` and N(mu, 1) with weight `alpha`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixtureModel {
    /// Mean of the alternative component
    pub mu: f64,
    /// Weight of the alternative component, in [0, 1]
    pub alpha: f64,
}

impl MixtureModel {
    pub fn new(mu: f64, alpha: f64) -> Self {
        Self { mu, alpha }
    }

    /// ln(alpha * N(x; mu, 1))
    fn log_alternative(&self, x: f64) -> f64 {
        self.alpha.ln() + log_pdf(x, self.mu)
    }

    /// ln((1 - alpha) * N(x; 0, 1))
    fn log_null(&self, x: f64) -> f64 {
        (1.0 - self.alpha).ln() + log_pdf(x, 0.0)
    }

    /// ln(a) - ln(b) for the alternative mass `a` and null mass `b`
    ///
    /// `+inf` when alpha is 1, `-inf` when alpha is 0.
    pub fn log_likelihood_ratio(&self, x: f64) -> f64 {
        self.log_alternative(x) - self.log_null(x)
    }

    /// Posterior probability a / (a + b) that `x` came from the alternative
    ///
    /// Evaluated as the logistic of the log-likelihood ratio, so the result
    /// stays in [0, 1] even when both masses underflow.
    pub fn responsibility(&self, x: f64) -> f64 {
        let llr = self.log_likelihood_ratio(x);
        if llr >= 0.0 {
            1.0 / (1.0 + (-llr).exp())
        } else {
            let e = llr.exp();
            e / (1.0 + e)
        }
    }

    /// Total log-likelihood sum(ln(a + b)) of a sample
    ///
    /// Terms with `a + b = 0` contribute nothing.
    pub fn log_likelihood(&self, scores: &[f64]) -> f64 {
        scores
            .iter()
            .map(|&x| log_add_exp(self.log_alternative(x), self.log_null(x)))
            .filter(|term| term.is_finite())
            .sum()
    }
}

/// ln(e^p + e^q) without overflow
fn log_add_exp(p: f64, q: f64) -> f64 {
    let hi = p.max(q);
    if hi == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    hi + ((p - hi).exp() + (q - hi).exp()).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::pdf;

    #[test]
    fn test_responsibility_matches_direct_formula() {
        let model = MixtureModel::new(2.0, 0.3);
        for &x in &[-2.0, 0.0, 1.0, 2.5, 4.0] {
            let a = 0.3 * pdf(x, 2.0);
            let b = 0.7 * pdf(x, 0.0);
            assert!((model.responsibility(x) - a / (a + b)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_responsibility_extreme_scores_do_not_underflow_to_nan() {
        let model = MixtureModel::new(3.0, 0.2);
        assert_eq!(model.responsibility(1e4), 1.0);
        assert_eq!(model.responsibility(-1e4), 0.0);
    }

    #[test]
    fn test_responsibility_degenerate_weights() {
        assert_eq!(MixtureModel::new(1.0, 1.0).responsibility(0.0), 1.0);
        assert_eq!(MixtureModel::new(1.0, 0.0).responsibility(0.0), 0.0);
    }

    #[test]
    fn test_log_likelihood_ratio_limits() {
        assert_eq!(
            MixtureModel::new(1.0, 1.0).log_likelihood_ratio(0.5),
            f64::INFINITY
        );
        assert_eq!(
            MixtureModel::new(1.0, 0.0).log_likelihood_ratio(0.5),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_log_likelihood_ratio_closed_form() {
        // ln(alpha / (1 - alpha)) + mu * x - mu^2 / 2
        let model = MixtureModel::new(2.0, 0.5);
        assert!((model.log_likelihood_ratio(1.0) - 0.0).abs() < 1e-12);
        assert!((model.log_likelihood_ratio(3.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_likelihood_matches_direct_sum() {
        let model = MixtureModel::new(1.5, 0.4);
        let scores = [-1.0, 0.2, 1.7, 3.1];
        let direct: f64 = scores
            .iter()
            .map(|&x| (0.4 * pdf(x, 1.5) + 0.6 * pdf(x, 0.0)).ln())
            .sum();
        assert!((model.log_likelihood(&scores) - direct).abs() < 1e-9);
    }

    #[test]
    fn test_log_likelihood_of_empty_sample_is_zero() {
        assert_eq!(MixtureModel::new(0.0, 0.5).log_likelihood(&[]), 0.0);
    }

    #[test]
    fn test_log_add_exp() {
        assert!((log_add_exp(0.0, 0.0) - 2f64.ln()).abs() < 1e-12);
        assert_eq!(log_add_exp(f64::NEG_INFINITY, 1.5), 1.5);
        assert_eq!(
            log_add_exp(f64::NEG_INFINITY, f64::NEG_INFINITY),
            f64::NEG_INFINITY
        );
    }
}
