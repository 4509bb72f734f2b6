// Expectation-Maximization with a grid of restarts
//
// single_em refines one starting point until the relative log-likelihood
// improvement drops below the configured tolerance. fit runs one refinement
// per grid point and keeps the best-likelihood result, lowest restart index
// first on ties.

use super::{EmConfig, MixtureError, MixtureModel, Result};
use crate::progress::Reporter;
use crate::NodeScoreMap;
use std::collections::BTreeSet;

/// Result of a multi-restart fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOutcome {
    /// Fitted parameters of the winning restart
    pub model: MixtureModel,
    /// Log-likelihood of the sample under `model`
    pub log_likelihood: f64,
    /// Index of the winning restart
    pub restart: usize,
}

/// Refine one starting point with EM
///
/// Returns the parameters of the iteration at which the improvement fell
/// below `config.tolerance`, or of the last iteration when
/// `config.max_iterations` is reached first.
pub fn single_em(scores: &[f64], initial: MixtureModel, config: &EmConfig) -> MixtureModel {
    let n = scores.len() as f64;
    let mut model = initial;
    let mut previous = model.log_likelihood(scores);
    let mut gamma = vec![0.0; scores.len()];

    for iteration in 0..config.max_iterations {
        // E step
        for (g, &x) in gamma.iter_mut().zip(scores) {
            *g = model.responsibility(x);
        }

        // M step
        let sum_gamma: f64 = gamma.iter().sum();
        if sum_gamma.is_nan() || sum_gamma <= 0.0 {
            // Alternative component vanished; mu is no longer identifiable.
            tracing::trace!(iteration, "alternative component vanished");
            return MixtureModel::new(model.mu, 0.0);
        }
        let weighted: f64 = gamma.iter().zip(scores).map(|(g, x)| g * x).sum();
        model = MixtureModel::new(weighted / sum_gamma, sum_gamma / n);

        let current = model.log_likelihood(scores);
        if has_converged(previous, current, config.tolerance) {
            tracing::trace!(iteration, log_likelihood = current, "EM converged");
            break;
        }
        previous = current;
    }

    model
}

/// Relative-improvement stopping rule
fn has_converged(previous: f64, current: f64, tolerance: f64) -> bool {
    if previous == f64::NEG_INFINITY {
        return !current.is_finite();
    }
    !(current - previous > tolerance * previous.abs())
}

/// Starting point of restart `restart` out of `num_restarts`
///
/// `sorted_desc` must be sorted in descending order. The initial weight is
/// `(restart + 0.5) / num_restarts`; the initial mean is the mean of the
/// `round(alpha * n)` highest scores, or 0 when that count is 0.
pub fn restart_initialization(
    sorted_desc: &[f64],
    restart: usize,
    num_restarts: usize,
) -> MixtureModel {
    let alpha = (restart as f64 + 0.5) / num_restarts as f64;
    let k = ((alpha * sorted_desc.len() as f64).round() as usize).min(sorted_desc.len());
    let mu = if k > 0 {
        sorted_desc[..k].iter().sum::<f64>() / k as f64
    } else {
        0.0
    };
    MixtureModel::new(mu, alpha)
}

/// Fit the mixture to `scores` with multiple restarts
///
/// Fails with [`MixtureError::EmptySample`] for an empty sample and
/// [`MixtureError::NonFinite`] if any score is NaN or infinite.
pub fn fit(scores: &[f64], config: &EmConfig, reporter: &mut dyn Reporter) -> Result<FitOutcome> {
    config.validate()?;
    if scores.is_empty() {
        return Err(MixtureError::EmptySample);
    }
    if let Some((index, &value)) = scores.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(MixtureError::NonFinite { index, value });
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let outcomes: Vec<FitOutcome> = if config.parallel {
        let outcomes = run_restarts_parallel(&sorted, config)?;
        for outcome in &outcomes {
            report_restart(reporter, outcome, config.num_restarts);
        }
        outcomes
    } else {
        (0..config.num_restarts)
            .map(|restart| {
                let outcome = run_restart(&sorted, restart, config);
                report_restart(reporter, &outcome, config.num_restarts);
                outcome
            })
            .collect()
    };

    let best = select_best(&outcomes).ok_or(MixtureError::EmptySample)?;
    tracing::debug!(
        restart = best.restart,
        mu = best.model.mu,
        alpha = best.model.alpha,
        log_likelihood = best.log_likelihood,
        "selected EM restart"
    );
    Ok(best)
}

/// Fit the mixture to every node except `outliers`
///
/// Outliers are assumed to belong to the alternative component and are left
/// out of the fit. Each outlier must be a scored node.
pub fn fit_excluding(
    scores: &NodeScoreMap,
    outliers: &BTreeSet<String>,
    config: &EmConfig,
    reporter: &mut dyn Reporter,
) -> Result<FitOutcome> {
    if let Some(missing) = outliers.iter().find(|node| !scores.contains_key(*node)) {
        return Err(MixtureError::UnknownOutlier(missing.clone()));
    }

    let included: Vec<f64> = scores
        .iter()
        .filter(|(node, _)| !outliers.contains(*node))
        .map(|(_, &score)| score)
        .collect();

    fit(&included, config, reporter)
}

fn report_restart(reporter: &mut dyn Reporter, outcome: &FitOutcome, num_restarts: usize) {
    reporter.report(&format!(
        "EM restart {}/{}: mu={:.4}, alpha={:.4}, log-likelihood={:.4}",
        outcome.restart + 1,
        num_restarts,
        outcome.model.mu,
        outcome.model.alpha,
        outcome.log_likelihood
    ));
}

fn run_restart(sorted: &[f64], restart: usize, config: &EmConfig) -> FitOutcome {
    let initial = restart_initialization(sorted, restart, config.num_restarts);
    let model = single_em(sorted, initial, config);
    FitOutcome {
        model,
        log_likelihood: model.log_likelihood(sorted),
        restart,
    }
}

/// Run every restart on its own scoped thread, returned in restart order
fn run_restarts_parallel(sorted: &[f64], config: &EmConfig) -> Result<Vec<FitOutcome>> {
    crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = (0..config.num_restarts)
            .map(|restart| scope.spawn(move |_| run_restart(sorted, restart, config)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| MixtureError::RestartPanicked))
            .collect::<Result<Vec<_>>>()
    })
    .map_err(|_| MixtureError::RestartPanicked)?
}

/// Highest log-likelihood, lowest restart index on ties; NaN never wins
fn select_best(outcomes: &[FitOutcome]) -> Option<FitOutcome> {
    let (first, rest) = outcomes.split_first()?;
    let mut best = *first;
    for outcome in rest {
        if outcome.log_likelihood > best.log_likelihood
            || (best.log_likelihood.is_nan() && !outcome.log_likelihood.is_nan())
        {
            best = *outcome;
        }
    }
    Some(best)
}
