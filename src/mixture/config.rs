// Configuration for mixture estimation
//
// Passed explicitly into every fit; there are no process-wide iteration
// counters or defaults hidden in the estimator.

use super::{MixtureError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for multi-restart EM
///
/// # Example
/// ```
/// use netmix::mixture::EmConfig;
///
/// let config = EmConfig::default();
/// assert_eq!(config.num_restarts, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmConfig {
    /// Relative log-likelihood improvement below which a restart stops
    ///
    /// A restart stops once `L_new - L_prev <= tolerance * |L_prev|`.
    pub tolerance: f64,

    /// Upper bound on EM iterations per restart
    ///
    /// Guarantees termination even when the tolerance is never reached.
    pub max_iterations: usize,

    /// Number of restarts; restart `i` starts from alpha = (i + 0.5) / num_restarts
    pub num_restarts: usize,

    /// Run restarts on separate threads
    ///
    /// The selected restart is the same either way.
    pub parallel: bool,
}

impl Default for EmConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 1000,
            num_restarts: 10,
            parallel: false,
        }
    }
}

impl EmConfig {
    /// Fewer, shorter restarts for large exploratory runs
    pub fn quick() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 200,
            num_restarts: 5,
            parallel: false,
        }
    }

    /// Dense restart grid with a tight tolerance
    pub fn thorough() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 10_000,
            num_restarts: 25,
            parallel: true,
        }
    }

    /// Parse a TOML document; missing keys take their default values
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| MixtureError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            MixtureError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MixtureError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }

        if self.max_iterations == 0 {
            return Err(MixtureError::InvalidConfig(
                "max_iterations must be >= 1".to_string(),
            ));
        }

        if self.num_restarts == 0 {
            return Err(MixtureError::InvalidConfig(
                "num_restarts must be >= 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmConfig::default();
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.num_restarts, 10);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(EmConfig::quick().validate().is_ok());
        assert!(EmConfig::thorough().validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_tolerance() {
        let mut config = EmConfig::default();
        config.tolerance = 0.0;
        assert!(config.validate().is_err());
        config.tolerance = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_counts() {
        let mut config = EmConfig::default();
        config.max_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = EmConfig::default();
        config.num_restarts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial_document() {
        let config = EmConfig::from_toml("num_restarts = 4\nparallel = true\n").unwrap();
        assert_eq!(config.num_restarts, 4);
        assert!(config.parallel);
        assert_eq!(config.max_iterations, 1000);
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        let err = EmConfig::from_toml("num_restarts = 0").unwrap_err();
        assert!(matches!(err, MixtureError::InvalidConfig(_)));

        let err = EmConfig::from_toml("tolerance = \"tight\"").unwrap_err();
        assert!(matches!(err, MixtureError::InvalidConfig(_)));
    }
}
