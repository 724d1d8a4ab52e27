// Parametric comparison of two distance distributions using aprender
//
// This module wraps aprender's hypothesis testing and trueno's vector
// primitives to compare drift measurements between two conditions (e.g.
// two noise levels):
// - Welch's t-test (unequal variances) via aprender::stats::hypothesis
// - Medians via aprender's DescriptiveStats (R-7 quantiles)
// - Variances via trueno::Vector (population variance, SIMD)
// - Bonferroni, Holm or Benjamini-Hochberg adjustment of pairwise families
//
// aprender and trueno operate on f32; inputs are narrowed and results
// widened back to f64.

use aprender::stats::DescriptiveStats;
use serde::{Deserialize, Serialize};
use trueno::Vector;

use super::descriptive::require_finite;
use super::effect_size::cliffs_delta;
use crate::error::{DriftError, Result};

/// Result of comparing two distributions with Welch's t-test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionComparison {
    /// t-statistic value
    pub statistic: f64,

    /// Two-tailed p-value
    /// - p < 0.05: statistically significant
    /// - p >= 0.05: not significant
    pub pvalue: f64,

    /// Welch-Satterthwaite degrees of freedom
    pub df: f64,

    pub first_median: f64,
    pub second_median: f64,

    /// Population variances (ddof = 0)
    pub first_variance: f64,
    pub second_variance: f64,

    /// Cliff's delta of first vs second
    pub cliffs_delta: f64,
}

/// Compare two distributions using Welch's independent t-test
///
/// # Example
/// ```ignore
/// use semdrift::resampling::compare_distributions;
///
/// let clean = vec![0.10, 0.12, 0.11, 0.13, 0.10];
/// let noisy = vec![0.45, 0.47, 0.46, 0.48, 0.45];
///
/// let result = compare_distributions(&clean, &noisy).unwrap();
/// assert!(result.pvalue < 0.05);
/// ```
pub fn compare_distributions(first: &[f64], second: &[f64]) -> Result<DistributionComparison> {
    require_finite("compare_distributions", first)?;
    require_finite("compare_distributions", second)?;

    if first.len() < 2 || second.len() < 2 {
        return Err(DriftError::insufficient_data(
            "compare_distributions",
            "need at least 2 samples per distribution for t-test",
        ));
    }

    let first_f32: Vec<f32> = first.iter().map(|&v| v as f32).collect();
    let second_f32: Vec<f32> = second.iter().map(|&v| v as f32).collect();

    let ttest = aprender::stats::hypothesis::ttest_ind(&first_f32, &second_f32, false)
        .map_err(|e| DriftError::invalid_input("compare_distributions", format!("t-test failed: {}", e)))?;

    let first_vec = Vector::from_slice(&first_f32);
    let second_vec = Vector::from_slice(&second_f32);

    let first_variance = first_vec
        .variance()
        .map_err(|e| DriftError::invalid_input("compare_distributions", format!("variance failed: {}", e)))?;
    let second_variance = second_vec
        .variance()
        .map_err(|e| DriftError::invalid_input("compare_distributions", format!("variance failed: {}", e)))?;

    Ok(DistributionComparison {
        statistic: f64::from(ttest.statistic),
        pvalue: f64::from(ttest.pvalue),
        df: f64::from(ttest.df),
        first_median: f64::from(median(&first_vec)?),
        second_median: f64::from(median(&second_vec)?),
        first_variance: f64::from(first_variance),
        second_variance: f64::from(second_variance),
        cliffs_delta: cliffs_delta(first, second)?,
    })
}

/// Median using aprender's DescriptiveStats (quantile 0.5)
pub fn median(vector: &Vector<f32>) -> Result<f32> {
    let stats = DescriptiveStats::new(vector);
    stats
        .quantile(0.5)
        .map_err(|e| DriftError::invalid_input("median", format!("failed to compute median: {}", e)))
}

/// Multiple-comparison correction for a family of p-values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correction {
    /// p * m
    Bonferroni,
    /// Step-down: sorted p_(i) * (m - i), made non-decreasing
    #[default]
    Holm,
    /// FDR control: sorted p_(i) * m / (i + 1), made non-increasing from the top
    BenjaminiHochberg,
    None,
}

/// Adjust p-values for multiple comparisons, keeping input order
///
/// Adjusted values are capped at 1.
pub fn adjust_pvalues(pvalues: &[f64], correction: Correction) -> Vec<f64> {
    let m = pvalues.len();
    if m == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| pvalues[a].total_cmp(&pvalues[b]));

    let mut sorted: Vec<f64> = match correction {
        Correction::None => return pvalues.to_vec(),
        Correction::Bonferroni => {
            return pvalues.iter().map(|p| (p * m as f64).min(1.0)).collect();
        }
        Correction::Holm => order
            .iter()
            .enumerate()
            .map(|(rank, &i)| (pvalues[i] * (m - rank) as f64).min(1.0))
            .collect(),
        Correction::BenjaminiHochberg => order
            .iter()
            .enumerate()
            .map(|(rank, &i)| (pvalues[i] * m as f64 / (rank + 1) as f64).min(1.0))
            .collect(),
    };

    if correction == Correction::Holm {
        for rank in 1..m {
            sorted[rank] = sorted[rank].max(sorted[rank - 1]);
        }
    } else {
        for rank in (0..m - 1).rev() {
            sorted[rank] = sorted[rank].min(sorted[rank + 1]);
        }
    }

    let mut adjusted = vec![0.0; m];
    for (rank, &i) in order.iter().enumerate() {
        adjusted[i] = sorted[rank];
    }
    adjusted
}

/// One comparison in a pairwise family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseComparison {
    pub first: String,
    pub second: String,
    pub comparison: DistributionComparison,

    /// p-value after the family-wide correction
    pub adjusted_pvalue: f64,
}

/// Compare every pair of labelled groups, correcting the p-values as a family
pub fn pairwise_comparisons(
    groups: &[(String, Vec<f64>)],
    correction: Correction,
) -> Result<Vec<PairwiseComparison>> {
    if groups.len() < 2 {
        return Err(DriftError::insufficient_data(
            "pairwise_comparisons",
            format!("need at least 2 groups, got {}", groups.len()),
        ));
    }

    let mut pairs = Vec::with_capacity(groups.len() * (groups.len() - 1) / 2);
    for i in 0..groups.len() {
        for j in (i + 1)..groups.len() {
            pairs.push((i, j, compare_distributions(&groups[i].1, &groups[j].1)?));
        }
    }

    let raw: Vec<f64> = pairs.iter().map(|(_, _, c)| c.pvalue).collect();
    let adjusted = adjust_pvalues(&raw, correction);

    Ok(pairs
        .into_iter()
        .zip(adjusted)
        .map(|((i, j, comparison), adjusted_pvalue)| PairwiseComparison {
            first: groups[i].0.clone(),
            second: groups[j].0.clone(),
            comparison,
            adjusted_pvalue,
        })
        .collect())
}
