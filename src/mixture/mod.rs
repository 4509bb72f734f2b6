// Two-component Gaussian mixture estimation
//
// Scores are modelled as a mixture of a null component N(0, 1) with weight
// (1 - alpha) and an alternative component N(mu, 1) with weight alpha. The
// parameters are fitted by Expectation-Maximization started from a grid of
// initial weights; the restart with the highest log-likelihood wins.
//
// Both components have unit variance. Callers are responsible for scaling
// their scores accordingly; the estimator does not check it.

mod config;
mod em;
mod model;

pub use config::EmConfig;
pub use em::{fit, fit_excluding, restart_initialization, single_em, FitOutcome};
pub use model::MixtureModel;

use thiserror::Error;

/// Errors for mixture estimation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MixtureError {
    #[error("Cannot fit a mixture model to an empty sample")]
    EmptySample,

    #[error("Score at position {index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },

    #[error("Invalid EM configuration: {0}")]
    InvalidConfig(String),

    #[error("Outlier node {0} has no score")]
    UnknownOutlier(String),

    #[error("EM restart worker panicked")]
    RestartPanicked,
}

pub type Result<T> = std::result::Result<T, MixtureError>;
