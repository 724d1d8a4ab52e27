//! Drift analysis across noise levels
//!
//! Takes the clean original sentence and the final output of a translation
//! chain at each noise level, and reports how far each output drifted:
//!
//! - cosine distance between TF-IDF embeddings (fit on original + outputs)
//! - character-level text similarity (Ratcliff/Obershelp)
//! - word overlap (Jaccard)
//!
//! plus per-metric summaries, the noise/distance correlation and a
//! bootstrap interval for the mean distance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::DriftConfig;
use crate::distance::{text_similarity, word_overlap};
use crate::error::{DriftError, Result};
use crate::resampling::{bootstrap_mean, mean, median, pearson_correlation, population_std, BootstrapResult};
use crate::vectorizer::TfIdfModel;

/// Noise levels (percent) of a standard sweep
pub const NOISE_LEVELS: [u8; 7] = [0, 10, 20, 25, 30, 40, 50];

/// Clean sentence the reference experiment translated
pub const ORIGINAL_CLEAN: &str = "The artificial intelligence system can efficiently process natural language and understand complex semantic relationships within textual data.";

/// Input of a drift analysis
///
/// ```json
/// { "original": "...", "outputs": { "0": "...", "25": "..." } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftInput {
    pub original: String,

    /// Final output keyed by noise level in percent
    pub outputs: BTreeMap<u32, String>,
}

/// Measurements for one noise level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelMeasurement {
    pub noise_percent: u32,

    /// `None` when either embedding is all-zero
    pub cosine_distance: Option<f64>,

    pub text_similarity: f64,
    pub word_overlap: f64,
    pub output: String,
}

/// Summary of one metric across levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: f64,
    pub median: f64,

    /// Population standard deviation
    pub std: f64,

    pub min: f64,
    pub min_level: u32,
    pub max: f64,
    pub max_level: u32,
}

impl MetricSummary {
    /// Summarize `(level, value)` pairs; `None` when there are none
    pub fn from_levels(values: &[(u32, f64)]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;
        // Ties keep the lowest level
        let (min_level, min) = rest
            .iter()
            .fold(first, |best, &entry| if entry.1 < best.1 { entry } else { best });
        let (max_level, max) = rest
            .iter()
            .fold(first, |best, &entry| if entry.1 > best.1 { entry } else { best });
        let raw: Vec<f64> = values.iter().map(|&(_, v)| v).collect();

        Some(Self {
            mean: mean(&raw),
            median: median(&raw),
            std: population_std(&raw),
            min,
            min_level,
            max,
            max_level,
        })
    }
}

/// Complete drift report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub original: String,

    /// Vocabulary size of the fitted TF-IDF model
    pub embedding_dimension: usize,

    pub measurements: Vec<LevelMeasurement>,

    pub cosine_distance: Option<MetricSummary>,
    pub text_similarity: MetricSummary,
    pub word_overlap: MetricSummary,

    /// Pearson r between noise level and cosine distance
    pub noise_distance_correlation: Option<f64>,

    /// Bootstrap interval of the mean cosine distance
    pub mean_distance_interval: Option<BootstrapResult>,
}

impl DriftReport {
    /// Measurement at a given level, if present
    pub fn level(&self, noise_percent: u32) -> Option<&LevelMeasurement> {
        self.measurements.iter().find(|m| m.noise_percent == noise_percent)
    }

    /// Defined cosine distances with their levels
    pub fn distances(&self) -> Vec<(u32, f64)> {
        self.measurements
            .iter()
            .filter_map(|m| m.cosine_distance.map(|d| (m.noise_percent, d)))
            .collect()
    }
}

/// Measure drift of each output against the original
pub fn analyze_drift(input: &DriftInput, config: &DriftConfig) -> Result<DriftReport> {
    if input.outputs.is_empty() {
        return Err(DriftError::insufficient_data(
            "analyze_drift",
            "no outputs to compare against the original",
        ));
    }

    // BTreeMap iteration is already sorted by level
    let mut corpus = Vec::with_capacity(input.outputs.len() + 1);
    corpus.push(input.original.as_str());
    corpus.extend(input.outputs.values().map(String::as_str));

    let model = TfIdfModel::fit(&corpus, &config.vectorizer)?;
    let original_embedding = model.embed(&input.original);

    let mut measurements = Vec::with_capacity(input.outputs.len());
    for (&level, output) in &input.outputs {
        let output_embedding = model.embed(output);
        let cosine_distance = match original_embedding.cosine_distance(&output_embedding) {
            Ok(d) => Some(d),
            Err(DriftError::UndefinedDistance { which, .. }) => {
                warn!(
                    noise_percent = level,
                    which, "Cosine distance undefined for zero embedding"
                );
                None
            }
            Err(e) => return Err(e),
        };

        measurements.push(LevelMeasurement {
            noise_percent: level,
            cosine_distance,
            text_similarity: text_similarity(&input.original, output),
            word_overlap: word_overlap(&input.original, output),
            output: output.clone(),
        });
    }

    let distances: Vec<(u32, f64)> = measurements
        .iter()
        .filter_map(|m| m.cosine_distance.map(|d| (m.noise_percent, d)))
        .collect();
    let similarities: Vec<(u32, f64)> = measurements
        .iter()
        .map(|m| (m.noise_percent, m.text_similarity))
        .collect();
    let overlaps: Vec<(u32, f64)> = measurements
        .iter()
        .map(|m| (m.noise_percent, m.word_overlap))
        .collect();

    let noise_distance_correlation = if distances.len() >= 2 {
        let levels: Vec<f64> = distances.iter().map(|&(l, _)| f64::from(l)).collect();
        let values: Vec<f64> = distances.iter().map(|&(_, d)| d).collect();
        pearson_correlation(&levels, &values)
    } else {
        None
    };

    let mean_distance_interval = if distances.is_empty() {
        None
    } else {
        let values: Vec<f64> = distances.iter().map(|&(_, d)| d).collect();
        Some(bootstrap_mean(&values, &config.bootstrap)?)
    };

    let cosine_summary = MetricSummary::from_levels(&distances);
    let (text_similarity, word_overlap) = match (
        MetricSummary::from_levels(&similarities),
        MetricSummary::from_levels(&overlaps),
    ) {
        (Some(s), Some(o)) => (s, o),
        _ => {
            return Err(DriftError::insufficient_data(
                "analyze_drift",
                "no measurements recorded",
            ))
        }
    };

    info!(
        levels = measurements.len(),
        dimension = model.vocabulary().len(),
        correlation = ?noise_distance_correlation,
        "Drift analysis complete"
    );

    Ok(DriftReport {
        original: input.original.clone(),
        embedding_dimension: model.vocabulary().len(),
        measurements,
        cosine_distance: cosine_summary,
        text_similarity,
        word_overlap,
        noise_distance_correlation,
        mean_distance_interval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep() -> DriftInput {
        let mut outputs = BTreeMap::new();
        outputs.insert(0, ORIGINAL_CLEAN.to_string());
        outputs.insert(
            25,
            "The artificial intelligence system can process natural language and understand complex relationships in text data."
                .to_string(),
        );
        outputs.insert(
            50,
            "The intelligent system processes language and understands relations within data."
                .to_string(),
        );
        DriftInput {
            original: ORIGINAL_CLEAN.to_string(),
            outputs,
        }
    }

    #[test]
    fn test_identical_output_has_zero_drift() {
        let report = analyze_drift(&sweep(), &DriftConfig::quick()).unwrap();
        let clean = report.level(0).unwrap();
        assert!(clean.cosine_distance.unwrap().abs() < 1e-12);
        assert_eq!(clean.text_similarity, 1.0);
        assert_eq!(clean.word_overlap, 1.0);
    }

    #[test]
    fn test_drift_grows_with_noise() {
        let report = analyze_drift(&sweep(), &DriftConfig::quick()).unwrap();
        let d25 = report.level(25).unwrap().cosine_distance.unwrap();
        let d50 = report.level(50).unwrap().cosine_distance.unwrap();
        assert!(d25 > 0.0);
        assert!(d50 > d25);

        let summary = report.cosine_distance.as_ref().unwrap();
        assert_eq!(summary.min_level, 0);
        assert_eq!(summary.max_level, 50);
        assert!(report.noise_distance_correlation.unwrap() > 0.9);
        assert_eq!(report.word_overlap.max_level, 0);
    }

    #[test]
    fn test_measurements_sorted_by_level() {
        let report = analyze_drift(&sweep(), &DriftConfig::quick()).unwrap();
        let levels: Vec<u32> = report.measurements.iter().map(|m| m.noise_percent).collect();
        assert_eq!(levels, vec![0, 25, 50]);
        assert_eq!(report.distances().len(), 3);
    }

    #[test]
    fn test_mean_distance_interval() {
        let report = analyze_drift(&sweep(), &DriftConfig::quick()).unwrap();
        let interval = report.mean_distance_interval.unwrap();
        assert_eq!(interval.resamples, 1_000);
        assert!(interval.ci_lower <= interval.observed);
        assert!(interval.observed <= interval.ci_upper);
    }

    #[test]
    fn test_output_without_words_has_undefined_distance() {
        let mut input = sweep();
        input.outputs.insert(40, "?!".to_string());
        let report = analyze_drift(&input, &DriftConfig::quick()).unwrap();
        let garbled = report.level(40).unwrap();
        assert!(garbled.cosine_distance.is_none());
        assert_eq!(garbled.word_overlap, 0.0);
        assert_eq!(report.distances().len(), 3);
    }

    #[test]
    fn test_empty_outputs_rejected() {
        let input = DriftInput {
            original: ORIGINAL_CLEAN.to_string(),
            outputs: BTreeMap::new(),
        };
        assert!(matches!(
            analyze_drift(&input, &DriftConfig::default()),
            Err(DriftError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_input_json_format() {
        let input: DriftInput =
            serde_json::from_str(r#"{"original": "a b", "outputs": {"0": "a b", "25": "a c"}}"#)
                .unwrap();
        assert_eq!(input.outputs.len(), 2);
        assert_eq!(input.outputs[&25], "a c");
    }

    #[test]
    fn test_metric_summary() {
        let summary = MetricSummary::from_levels(&[(0, 0.1), (25, 0.3), (50, 0.2)]).unwrap();
        assert!((summary.mean - 0.2).abs() < 1e-12);
        assert_eq!(summary.median, 0.2);
        assert_eq!(summary.max_level, 25);
        assert_eq!(summary.min_level, 0);
        assert!(MetricSummary::from_levels(&[]).is_none());
    }

    #[test]
    fn test_metric_summary_ties_report_first_level() {
        let summary = MetricSummary::from_levels(&[(0, 1.0), (25, 1.0), (50, 0.5)]).unwrap();
        assert_eq!(summary.max_level, 0);
        assert_eq!(summary.min_level, 50);

        let flat = MetricSummary::from_levels(&[(10, 0.4), (20, 0.4), (30, 0.4)]).unwrap();
        assert_eq!(flat.min_level, 10);
        assert_eq!(flat.max_level, 10);
    }

    #[test]
    fn test_repeated_clean_output_keeps_lowest_level() {
        let mut input = sweep();
        input.outputs.insert(25, ORIGINAL_CLEAN.to_string());

        let report = analyze_drift(&input, &DriftConfig::quick()).unwrap();
        assert_eq!(report.word_overlap.max_level, 0);
        assert_eq!(report.text_similarity.max_level, 0);
        assert_eq!(report.cosine_distance.as_ref().unwrap().min_level, 0);
    }
}
