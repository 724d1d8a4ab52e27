// Resampling estimator: bootstrap, ANOVA and effect sizes
//
// Every operation is a single stateless pass over caller-supplied samples.
// Randomness (bootstrap only) comes from a caller-owned generator or an
// explicit seed, so concurrent callers never share generator state.
//
// Scientific Foundation:
// [1] Efron, B. & Tibshirani, R. (1993). An Introduction to the Bootstrap.
//     Percentile intervals; Monte Carlo error of the bootstrap mean is O(1/B).
// [2] Cohen, J. (1988). Statistical Power Analysis for the Behavioral
//     Sciences. Standardized mean difference d with 0.2 / 0.5 / 0.8 bands.
// [3] Romano, J. et al. (2006). Cliff's delta thresholds 0.147 / 0.33 / 0.474.

mod anova;
mod bootstrap;
mod config;
mod descriptive;
mod effect_size;
mod special;
mod statistics;

pub use anova::{anova_f, AnovaResult};
pub use bootstrap::{
    bootstrap, bootstrap_mean, bootstrap_with_confidence, bootstrap_with_config, BootstrapResult,
    DEFAULT_CONFIDENCE_LEVEL,
};
pub use config::BootstrapConfig;
pub use descriptive::{
    mean, median, pearson_correlation, percentile, population_std, sample_std, sample_variance,
};
pub use effect_size::{cliffs_delta, cohens_d, pooled_std, EffectMagnitude};
pub use special::f_distribution_sf;
pub use statistics::{
    adjust_pvalues, compare_distributions, pairwise_comparisons, Correction, DistributionComparison,
    PairwiseComparison,
};
