//! JSON output format for `--format json`
//!
//! Every subcommand prints one envelope carrying the format version, the
//! subcommand name and its result record.

use serde::{Deserialize, Serialize};

use crate::analysis::DriftReport;
use crate::noise::NoisyText;
use crate::resampling::{AnovaResult, BootstrapResult, EffectMagnitude};
use crate::vectorizer::{Embedding, TfIdfModel};

/// Cosine comparison of two vectors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDistance {
    pub similarity: f64,
    pub distance: f64,
}

/// One non-zero term of an embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTermWeight {
    pub term: String,
    pub weight: f64,
}

/// TF-IDF embedding of a text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEmbedding {
    /// Vocabulary size
    pub dimension: usize,
    /// Non-zero weights, largest first
    pub terms: Vec<JsonTermWeight>,
}

impl JsonEmbedding {
    /// Resolve term names through the model that produced the embedding
    pub fn from_embedding(model: &TfIdfModel, embedding: &Embedding) -> Self {
        let mut terms: Vec<JsonTermWeight> = embedding
            .iter()
            .filter_map(|(index, weight)| {
                model.vocabulary().term(index).map(|term| JsonTermWeight {
                    term: term.to_string(),
                    weight,
                })
            })
            .collect();
        terms.sort_by(|a, b| b.weight.total_cmp(&a.weight).then_with(|| a.term.cmp(&b.term)));

        Self {
            dimension: embedding.dimension(),
            terms,
        }
    }
}

/// Noise injection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonNoise {
    pub original: String,
    pub noisy: String,
    pub epsilon: f64,
    pub seed: u64,
    /// Number of corrupted characters
    pub changes: usize,
    pub changed_positions: Vec<usize>,
}

impl JsonNoise {
    pub fn new(original: &str, noisy: NoisyText, epsilon: f64, seed: u64) -> Self {
        Self {
            original: original.to_string(),
            changes: noisy.changes(),
            noisy: noisy.text,
            epsilon,
            seed,
            changed_positions: noisy.changed_positions,
        }
    }
}

/// Effect size of group2 relative to group1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEffectSize {
    pub cohens_d: f64,
    pub magnitude: EffectMagnitude,
    pub cliffs_delta: f64,
    pub cliffs_magnitude: EffectMagnitude,
}

/// Result record of a subcommand
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonResult {
    Distance(JsonDistance),
    Embedding(JsonEmbedding),
    Noise(Vec<JsonNoise>),
    Bootstrap(BootstrapResult),
    Anova(AnovaResult),
    EffectSize(JsonEffectSize),
    Drift(Box<DriftReport>),
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Subcommand that produced the result
    pub command: String,
    pub result: JsonResult,
}

impl JsonOutput {
    /// Wrap a result record
    pub fn new(command: &str, result: JsonResult) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "semdrift-json-v1".to_string(),
            command: command.to_string(),
            result,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
