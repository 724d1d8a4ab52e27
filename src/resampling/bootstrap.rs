// Bootstrap resampling with percentile confidence intervals
//
// Given a sample set of size n, draw B resamples of size n with replacement,
// evaluate the statistic on each, and summarize the resulting empirical
// distribution:
//
//   bias = mean(theta*) - theta_hat
//   SE   = std(theta*, ddof = 1)
//   CI   = [theta*(alpha/2), theta*(1 - alpha/2)]   (percentile method)
//
// The Monte Carlo error of the B-sample bootstrap mean shrinks as 1/B, so a
// caller that needs a tighter estimate asks for more resamples.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::BootstrapConfig;
use super::descriptive::{mean, percentile_sorted, require_finite, sample_std};
use crate::error::{DriftError, Result};

/// Default confidence level for `bootstrap`
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Summary of a bootstrap run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapResult {
    /// Statistic evaluated on the original sample set
    pub observed: f64,

    /// Mean of the resample statistics
    pub mean: f64,

    /// Standard error: sample standard deviation of the resample statistics
    pub std_error: f64,

    /// Lower percentile bound
    pub ci_lower: f64,

    /// Upper percentile bound
    pub ci_upper: f64,

    /// mean - observed
    pub bias: f64,

    /// Number of resamples B
    pub resamples: usize,

    /// Interval coverage, e.g. 0.95
    pub confidence_level: f64,
}

impl BootstrapResult {
    /// Width of the confidence interval
    pub fn interval_width(&self) -> f64 {
        self.ci_upper - self.ci_lower
    }

    /// Whether a value falls inside the interval
    pub fn contains(&self, value: f64) -> bool {
        (self.ci_lower..=self.ci_upper).contains(&value)
    }
}

/// Bootstrap `statistic` over `samples` with a 95% percentile interval
pub fn bootstrap<F, R>(samples: &[f64], resamples: usize, statistic: F, rng: &mut R) -> Result<BootstrapResult>
where
    F: Fn(&[f64]) -> f64,
    R: Rng + ?Sized,
{
    bootstrap_with_confidence(samples, resamples, DEFAULT_CONFIDENCE_LEVEL, statistic, rng)
}

/// Bootstrap `statistic` over `samples` at an explicit confidence level
pub fn bootstrap_with_confidence<F, R>(
    samples: &[f64],
    resamples: usize,
    confidence_level: f64,
    statistic: F,
    rng: &mut R,
) -> Result<BootstrapResult>
where
    F: Fn(&[f64]) -> f64,
    R: Rng + ?Sized,
{
    require_finite("bootstrap", samples)?;

    if resamples < 2 {
        return Err(DriftError::invalid_input(
            "bootstrap",
            format!("need at least 2 resamples, got {}", resamples),
        ));
    }

    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(DriftError::invalid_input(
            "bootstrap",
            format!("confidence level must be in (0, 1), got {}", confidence_level),
        ));
    }

    let n = samples.len();
    let observed = statistic(samples);

    let mut resample = vec![0.0; n];
    let mut statistics = Vec::with_capacity(resamples);
    for _ in 0..resamples {
        for slot in resample.iter_mut() {
            *slot = samples[rng.gen_range(0..n)];
        }
        statistics.push(statistic(&resample));
    }

    let boot_mean = mean(&statistics);
    let std_error = sample_std(&statistics);

    statistics.sort_by(|a, b| a.total_cmp(b));
    let alpha = 1.0 - confidence_level;
    let ci_lower = percentile_sorted(&statistics, 100.0 * alpha / 2.0);
    let ci_upper = percentile_sorted(&statistics, 100.0 * (1.0 - alpha / 2.0));

    debug!(
        samples = n,
        resamples,
        observed,
        std_error,
        "Bootstrap resampling finished"
    );

    Ok(BootstrapResult {
        observed,
        mean: boot_mean,
        std_error,
        ci_lower,
        ci_upper,
        bias: boot_mean - observed,
        resamples,
        confidence_level,
    })
}

/// Bootstrap with the resample count, confidence and seed of a config
pub fn bootstrap_with_config<F>(samples: &[f64], config: &BootstrapConfig, statistic: F) -> Result<BootstrapResult>
where
    F: Fn(&[f64]) -> f64,
{
    config
        .validate()
        .map_err(|reason| DriftError::invalid_input("bootstrap", reason))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let result = bootstrap_with_confidence(
        samples,
        config.resamples,
        config.confidence_level,
        statistic,
        &mut rng,
    )?;

    info!(
        observed = result.observed,
        ci_lower = result.ci_lower,
        ci_upper = result.ci_upper,
        bias = result.bias,
        "Bootstrap: {:.0}% CI computed from {} resamples",
        config.confidence_level * 100.0,
        config.resamples
    );

    Ok(result)
}

/// Bootstrap the sample mean
pub fn bootstrap_mean(samples: &[f64], config: &BootstrapConfig) -> Result<BootstrapResult> {
    bootstrap_with_config(samples, config, mean)
}
