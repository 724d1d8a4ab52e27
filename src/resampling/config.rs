// Configuration for bootstrap resampling

use serde::{Deserialize, Serialize};

/// Configuration for bootstrap resampling
///
/// # Example
/// ```
/// use semdrift::resampling::BootstrapConfig;
///
/// let config = BootstrapConfig::default();
/// assert_eq!(config.resamples, 10_000);
/// assert_eq!(config.confidence_level, 0.95);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of bootstrap resamples B
    ///
    /// Monte Carlo error of the bootstrap mean shrinks as 1/B.
    /// Default: 10 000
    pub resamples: usize,

    /// Coverage of the percentile interval
    ///
    /// - 0.95 (default): 2.5 / 97.5 percentiles
    /// - 0.99: 0.5 / 99.5 percentiles
    pub confidence_level: f64,

    /// Seed for the resampling generator
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            resamples: 10_000,
            confidence_level: 0.95,
            seed: 42,
        }
    }
}

impl BootstrapConfig {
    /// Few resamples, for interactive use
    pub fn quick() -> Self {
        Self {
            resamples: 1_000,
            ..Self::default()
        }
    }

    /// Many resamples and a 99% interval
    pub fn thorough() -> Self {
        Self {
            resamples: 100_000,
            confidence_level: 0.99,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.resamples < 2 {
            return Err(format!(
                "resamples must be >= 2 to estimate a standard error, got {}",
                self.resamples
            ));
        }

        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            ));
        }

        Ok(())
    }
}
