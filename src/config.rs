//! semdrift.toml configuration
//!
//! ```toml
//! [vectorizer]
//! lowercase = true
//! ngram_range = [1, 3]
//!
//! [noise]
//! alphabet = "abcdefghijklmnopqrstuvwxyz"
//! preserve_whitespace = true
//! seed = 7
//!
//! [bootstrap]
//! resamples = 10000
//! confidence_level = 0.95
//! seed = 42
//! ```
//!
//! Every section and key is optional; missing values take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DriftError, Result};
use crate::noise::{Alphabet, NoiseInjector};
use crate::resampling::BootstrapConfig;
use crate::vectorizer::VectorizerConfig;

/// Noise injector settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Replacement symbols (duplicates ignored, at least 2 distinct)
    pub alphabet: String,

    /// Leave whitespace untouched
    pub preserve_whitespace: bool,

    /// Seed for the per-character generator
    pub seed: u64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            alphabet: ('a'..='z').collect(),
            preserve_whitespace: false,
            seed: 42,
        }
    }
}

impl NoiseConfig {
    /// Build the injector these settings describe
    pub fn injector(&self) -> Result<NoiseInjector> {
        let alphabet = Alphabet::new(self.alphabet.chars())?;
        Ok(NoiseInjector::new(alphabet).preserve_whitespace(self.preserve_whitespace))
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub vectorizer: VectorizerConfig,
    pub noise: NoiseConfig,
    pub bootstrap: BootstrapConfig,
}

impl DriftConfig {
    /// Fewer bootstrap resamples, for interactive use
    pub fn quick() -> Self {
        Self {
            bootstrap: BootstrapConfig::quick(),
            ..Self::default()
        }
    }

    /// More bootstrap resamples and a 99% interval
    pub fn thorough() -> Self {
        Self {
            bootstrap: BootstrapConfig::thorough(),
            ..Self::default()
        }
    }

    /// Parse and validate TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DriftConfig = toml::from_str(content).map_err(|e| DriftError::Config(e.to_string()))?;
        config.validate().map_err(DriftError::Config)?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DriftError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.vectorizer
            .validate()
            .map_err(|e| format!("[vectorizer] {}", e))?;
        self.bootstrap
            .validate()
            .map_err(|e| format!("[bootstrap] {}", e))?;
        self.noise
            .injector()
            .map(|_| ())
            .map_err(|e| format!("[noise] {}", e))
    }
}
