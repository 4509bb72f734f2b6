//! Netmix - altered-subnetwork discovery on scored networks
//!
//! Node scores are modelled as a two-component Gaussian mixture (a null
//! N(0, 1) component and an alternative N(mu, 1) component). The fitted
//! model turns raw scores into responsibilities, log-likelihood ratios or
//! z-scores shifted by a decision threshold, from which candidate altered
//! subnetworks are extracted either as all positive nodes or as the
//! scan-statistic prefix, optionally restricted to connected components of
//! an interaction network. A permutation test scores the result against
//! randomized replicates.

pub mod cli;
pub mod commands;
pub mod connectivity;
pub mod distribution;
pub mod heinz;
pub mod metrics;
pub mod mixture;
pub mod node_io;
pub mod progress;
pub mod significance;
pub mod subset;
pub mod transform;

/// Scores keyed by node identifier, iterated in identifier order
pub type NodeScoreMap = std::collections::BTreeMap<String, f64>;
