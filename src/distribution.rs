//! Unit-variance normal distribution functions
//!
//! Density, log-density, CDF, survival function and inverse survival function
//! for N(mu, 1). The tail functions go through `statrs`' complementary error
//! function so that p-values far out in the tail keep full precision.

use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::SQRT_2;

/// ln(sqrt(2 * pi))
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// Density of N(mu, 1) at `x`
pub fn pdf(x: f64, mu: f64) -> f64 {
    log_pdf(x, mu).exp()
}

/// Log-density of N(mu, 1) at `x`
pub fn log_pdf(x: f64, mu: f64) -> f64 {
    let d = x - mu;
    -0.5 * d * d - LN_SQRT_2PI
}

/// Cumulative distribution function of N(mu, 1)
pub fn cdf(x: f64, mu: f64) -> f64 {
    0.5 * erfc(-(x - mu) / SQRT_2)
}

/// Survival function `1 - cdf(x)` of N(mu, 1)
pub fn sf(x: f64, mu: f64) -> f64 {
    0.5 * erfc((x - mu) / SQRT_2)
}

/// Inverse survival function of the standard normal
///
/// Maps a p-value to the z-score `Phi^{-1}(1 - p)`. Returns `+inf` for
/// `p <= 0` and `-inf` for `p >= 1`; callers that need finite scores must
/// reject those.
pub fn isf(p: f64) -> f64 {
    SQRT_2 * erfc_inv(2.0 * p)
}
