// Descriptive statistics over f64 sample sets
//
// Sample variance uses ddof = 1; percentiles interpolate linearly between
// closest ranks (numpy's default), so results line up with the numbers the
// drift experiments were reported with.

use crate::error::{DriftError, Result};

/// Arithmetic mean (0.0 for an empty slice)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// True when every value equals the first (vacuously true for empty input)
///
/// Exact comparison: a constant sample whose mean is not representable would
/// otherwise show a tiny non-zero spread.
pub(crate) fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Sum of squared deviations from the mean
pub fn sum_of_squares(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum()
}

/// Sample variance (ddof = 1); 0.0 for fewer than two values
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    sum_of_squares(values) / (values.len() - 1) as f64
}

/// Sample standard deviation (ddof = 1)
pub fn sample_std(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Population standard deviation (ddof = 0)
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (sum_of_squares(values) / values.len() as f64).sqrt()
}

/// Percentile `q` in [0, 100] of already sorted values, linear interpolation
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Percentile `q` in [0, 100] of unsorted values
pub fn percentile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    percentile_sorted(&sorted, q)
}

/// Median (50th percentile)
pub fn median(values: &[f64]) -> f64 {
    percentile(values, 50.0)
}

/// Pearson correlation coefficient; `None` when either side is constant
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = mean(x);
    let my = mean(y);
    let cov: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let sx = sum_of_squares(x).sqrt();
    let sy = sum_of_squares(y).sqrt();
    if sx == 0.0 || sy == 0.0 {
        return None;
    }
    Some((cov / (sx * sy)).clamp(-1.0, 1.0))
}

/// Reject empty or non-finite sample sets
pub(crate) fn require_finite(operation: &'static str, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(DriftError::invalid_input(operation, "sample set is empty"));
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(DriftError::invalid_input(
            operation,
            format!("non-finite observation {} at index {}", values[pos], pos),
        ));
    }
    Ok(())
}
