// Effect sizes: Cohen's d (parametric) and Cliff's delta (non-parametric)

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::descriptive::{is_constant, mean, require_finite, sample_variance};
use crate::error::{DriftError, Result};

/// Conventional size labels for an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectMagnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectMagnitude {
    /// Cohen's thresholds: |d| of 0.2 / 0.5 / 0.8
    pub fn from_cohens_d(d: f64) -> Self {
        Self::classify(d.abs(), [0.2, 0.5, 0.8])
    }

    /// Romano et al. thresholds: |delta| of 0.147 / 0.330 / 0.474
    pub fn from_cliffs_delta(delta: f64) -> Self {
        Self::classify(delta.abs(), [0.147, 0.330, 0.474])
    }

    fn classify(value: f64, [small, medium, large]: [f64; 3]) -> Self {
        if value >= large {
            EffectMagnitude::Large
        } else if value >= medium {
            EffectMagnitude::Medium
        } else if value >= small {
            EffectMagnitude::Small
        } else {
            EffectMagnitude::Negligible
        }
    }
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EffectMagnitude::Negligible => "negligible",
            EffectMagnitude::Small => "small",
            EffectMagnitude::Medium => "medium",
            EffectMagnitude::Large => "large",
        };
        f.write_str(label)
    }
}

/// Pooled standard deviation of two groups
///
/// sqrt(((n1 - 1) s1^2 + (n2 - 1) s2^2) / (n1 + n2 - 2))
pub fn pooled_std(group1: &[f64], group2: &[f64]) -> Result<f64> {
    if group1.is_empty() || group2.is_empty() {
        return Err(DriftError::insufficient_data(
            "pooled_std",
            "both groups must be non-empty",
        ));
    }
    let n1 = group1.len();
    let n2 = group2.len();
    if n1 + n2 <= 2 {
        return Err(DriftError::insufficient_data(
            "pooled_std",
            format!("need more than 2 observations in total, got {}", n1 + n2),
        ));
    }

    let pooled_variance = ((n1 - 1) as f64 * sample_variance(group1)
        + (n2 - 1) as f64 * sample_variance(group2))
        / (n1 + n2 - 2) as f64;
    Ok(pooled_variance.sqrt())
}

/// Cohen's d = (mean2 - mean1) / pooled_std
///
/// Positive when group2 has the larger mean. Fails with `DegenerateVariance`
/// when both groups are constant.
pub fn cohens_d(group1: &[f64], group2: &[f64]) -> Result<f64> {
    if group1.is_empty() || group2.is_empty() {
        return Err(DriftError::insufficient_data(
            "cohens_d",
            "both groups must be non-empty",
        ));
    }
    require_finite("cohens_d", group1)?;
    require_finite("cohens_d", group2)?;

    let pooled = pooled_std(group1, group2).map_err(|err| match err {
        DriftError::InsufficientData { reason, .. } => DriftError::InsufficientData {
            operation: "cohens_d",
            reason,
        },
        other => other,
    })?;

    if pooled == 0.0 || (is_constant(group1) && is_constant(group2)) {
        return Err(DriftError::DegenerateVariance { operation: "cohens_d" });
    }

    let d = (mean(group2) - mean(group1)) / pooled;
    debug!(d, pooled_std = pooled, "Calculated Cohen's d");
    Ok(d)
}

/// Cliff's delta = P(x > y) - P(x < y) over all cross pairs, in [-1, 1]
pub fn cliffs_delta(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.is_empty() || y.is_empty() {
        return Err(DriftError::insufficient_data(
            "cliffs_delta",
            "both groups must be non-empty",
        ));
    }
    require_finite("cliffs_delta", x)?;
    require_finite("cliffs_delta", y)?;

    let mut greater = 0i64;
    let mut less = 0i64;
    for xi in x {
        for yj in y {
            if xi > yj {
                greater += 1;
            } else if xi < yj {
                less += 1;
            }
        }
    }

    Ok((greater - less) as f64 / (x.len() * y.len()) as f64)
}
