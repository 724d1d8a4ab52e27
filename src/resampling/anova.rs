// One-way analysis of variance
//
// Tests H0: every group has the same mean. Total variance decomposes as
//
//   SS_total = SS_between + SS_within
//   F = (SS_between / (k - 1)) / (SS_within / (N - k))
//   eta^2 = SS_between / SS_total
//
// The p-value is the upper tail of F(k - 1, N - k).

use serde::{Deserialize, Serialize};
use tracing::info;

use super::descriptive::{is_constant, mean, require_finite, sum_of_squares};
use super::special::f_distribution_sf;
use crate::error::{DriftError, Result};

/// Result of a one-way ANOVA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaResult {
    /// F statistic (may be +inf when every group is internally constant)
    #[serde(with = "extended_float")]
    pub f_statistic: f64,

    /// Degrees of freedom between groups (k - 1)
    pub df_between: usize,

    /// Degrees of freedom within groups (N - k)
    pub df_within: usize,

    /// P(F(df_between, df_within) > f_statistic)
    pub p_value: f64,

    /// Share of total variance explained by group membership
    pub eta_squared: f64,

    pub ss_between: f64,
    pub ss_within: f64,
}

impl AnovaResult {
    /// Whether the null hypothesis is rejected at `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// Human-readable summary, e.g. "F(2, 12) = 4.21, p = 0.0410, eta^2 = 0.41 (large)"
    pub fn interpretation(&self) -> String {
        let magnitude = if self.eta_squared >= 0.14 {
            "large"
        } else if self.eta_squared >= 0.06 {
            "medium"
        } else {
            "small"
        };
        format!(
            "F({}, {}) = {:.4}, p = {:.4}, eta^2 = {:.4} ({})",
            self.df_between, self.df_within, self.f_statistic, self.p_value, self.eta_squared, magnitude
        )
    }
}

/// JSON has no infinity: non-finite values travel as "inf", "-inf" or "nan"
mod extended_float {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("nan")
        } else if *value == f64::INFINITY {
            serializer.serialize_str("inf")
        } else if *value == f64::NEG_INFINITY {
            serializer.serialize_str("-inf")
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(D::Error::custom(format!("invalid float {:?}", other))),
            },
        }
    }
}

/// One-way ANOVA F test over `groups`
///
/// Requires at least two groups, every group non-empty, and N > k so the
/// within-group degrees of freedom are positive.
pub fn anova_f<G: AsRef<[f64]>>(groups: &[G]) -> Result<AnovaResult> {
    let k = groups.len();
    if k < 2 {
        return Err(DriftError::insufficient_data(
            "anova_f",
            format!("need at least 2 groups, got {}", k),
        ));
    }

    for (i, group) in groups.iter().enumerate() {
        let group = group.as_ref();
        if group.is_empty() {
            return Err(DriftError::insufficient_data(
                "anova_f",
                format!("group {} is empty", i),
            ));
        }
        require_finite("anova_f", group)?;
    }

    let all: Vec<f64> = groups.iter().flat_map(|g| g.as_ref().iter().copied()).collect();
    let n = all.len();
    if n <= k {
        return Err(DriftError::insufficient_data(
            "anova_f",
            format!("need more observations ({}) than groups ({})", n, k),
        ));
    }

    let grand_mean = mean(&all);
    let ss_total = sum_of_squares(&all);
    let ss_between: f64 = groups
        .iter()
        .map(|g| {
            let g = g.as_ref();
            g.len() as f64 * (mean(g) - grand_mean).powi(2)
        })
        .sum();
    let ss_within: f64 = groups.iter().map(|g| sum_of_squares(g.as_ref())).sum();

    if is_constant(&all) {
        return Err(DriftError::DegenerateVariance { operation: "anova_f" });
    }

    let df_between = k - 1;
    let df_within = n - k;

    let within_constant = groups.iter().all(|g| is_constant(g.as_ref()));
    let (f_statistic, p_value) = if within_constant {
        (f64::INFINITY, 0.0)
    } else {
        let f = (ss_between / df_between as f64) / (ss_within / df_within as f64);
        (f, f_distribution_sf(f, df_between as f64, df_within as f64))
    };

    let result = AnovaResult {
        f_statistic,
        df_between,
        df_within,
        p_value,
        eta_squared: ss_between / ss_total,
        ss_between,
        ss_within,
    };

    info!("ANOVA: {}", result.interpretation());

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textbook_example() {
        // Group means 2, 4, 6; SS_between = 3*(4+0+4) = 24, SS_within = 6
        let groups = vec![vec![1.0, 2.0, 3.0], vec![3.0, 4.0, 5.0], vec![5.0, 6.0, 7.0]];
        let result = anova_f(&groups).unwrap();

        assert_eq!(result.df_between, 2);
        assert_eq!(result.df_within, 6);
        assert!((result.ss_between - 24.0).abs() < 1e-12);
        assert!((result.ss_within - 6.0).abs() < 1e-12);
        assert!((result.f_statistic - 12.0).abs() < 1e-12);
        assert!((result.eta_squared - 0.8).abs() < 1e-12);
        // P(F(2, 6) > 12) = 0.00800
        assert!((result.p_value - 0.008).abs() < 1e-4);
        assert!(result.is_significant(0.05));
    }

    #[test]
    fn test_identical_groups_not_significant() {
        let groups = [[1.0, 2.0, 3.0], [1.0, 2.0, 3.0]];
        let result = anova_f(&groups).unwrap();
        assert_eq!(result.f_statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
        assert!(!result.is_significant(0.05));
    }

    #[test]
    fn test_single_group_is_insufficient() {
        let err = anova_f(&[vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, DriftError::InsufficientData { operation: "anova_f", .. }));
    }

    #[test]
    fn test_empty_group_is_insufficient() {
        let groups: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![]];
        assert!(matches!(
            anova_f(&groups),
            Err(DriftError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_one_observation_per_group_is_insufficient() {
        let groups = [[1.0], [2.0], [3.0]];
        assert!(matches!(
            anova_f(&groups),
            Err(DriftError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_constant_groups_with_different_means() {
        let groups = [[1.0, 1.0], [2.0, 2.0]];
        let result = anova_f(&groups).unwrap();
        assert!(result.f_statistic.is_infinite());
        assert_eq!(result.p_value, 0.0);
        assert_eq!(result.eta_squared, 1.0);
    }

    #[test]
    fn test_all_values_identical_is_degenerate() {
        let groups = [[3.0, 3.0], [3.0, 3.0]];
        assert_eq!(
            anova_f(&groups).unwrap_err(),
            DriftError::DegenerateVariance { operation: "anova_f" }
        );
    }

    #[test]
    fn test_interpretation_mentions_degrees_of_freedom() {
        let groups = vec![vec![1.0, 2.0, 3.0], vec![3.0, 4.0, 5.0], vec![5.0, 6.0, 7.0]];
        let text = anova_f(&groups).unwrap().interpretation();
        assert!(text.starts_with("F(2, 6)"));
        assert!(text.contains("large"));
    }

    #[test]
    fn test_infinite_f_survives_json() {
        let result = anova_f(&[[1.0, 1.0], [2.0, 2.0]]).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["f_statistic"], "inf");

        let back: AnovaResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_finite_f_stays_numeric_in_json() {
        let groups = vec![vec![1.0, 2.0, 3.0], vec![3.0, 4.0, 5.0]];
        let result = anova_f(&groups).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"f_statistic\":6.0"));
        assert_eq!(serde_json::from_str::<AnovaResult>(&json).unwrap(), result);

        let bad = json.replace("\"f_statistic\":6.0", "\"f_statistic\":\"huge\"");
        assert!(serde_json::from_str::<AnovaResult>(&bad).is_err());
    }

    #[test]
    fn test_inexact_constant_is_degenerate() {
        let groups = [vec![0.1, 0.1, 0.1], vec![0.1, 0.1]];
        assert!(matches!(
            anova_f(&groups),
            Err(DriftError::DegenerateVariance { .. })
        ));
    }
}
