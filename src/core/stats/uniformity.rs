//! Acceptance checks for samples that should be uniform over a known range.

use thiserror::Error;

use crate::moments::RunningStats;
use crate::quantile::{sort_samples, sorted_quantile};

/// Number of evenly spaced quantile points checked, tau = 0.0, 0.1, .., 1.0.
pub const QUANTILE_POINTS: usize = 11;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UniformityError {
    #[error("no samples to test")]
    EmptySample,

    #[error("invalid bounds [{lower}, {upper})")]
    InvalidBounds { lower: f64, upper: f64 },

    #[error("skewness {observed:.6} exceeds {limit}")]
    Skewness { observed: f64, limit: f64 },

    #[error("mean {observed:.3} is more than {limit:.3} from {expected:.3}")]
    Mean {
        observed: f64,
        expected: f64,
        limit: f64,
    },

    #[error("quantile {tau:.1} is {observed:.3}, more than {limit:.3} from {expected:.3}")]
    Quantile {
        tau: f64,
        observed: f64,
        expected: f64,
        limit: f64,
    },

    #[error("byte {value} occurred {count} times, more than {limit:.0} from {expected:.1}")]
    Bucket {
        value: u8,
        count: u64,
        expected: f64,
        limit: f64,
    },

    #[error("{true_count} true vs {false_count} false exceeds imbalance limit {limit:.0}")]
    Imbalance {
        true_count: u64,
        false_count: u64,
        limit: f64,
    },
}

/// Acceptance limits. Fractions are relative to the range width or to the
/// sample count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Maximum absolute sample skewness.
    pub skewness: f64,
    /// Maximum mean and quantile error, as a fraction of the range width.
    pub relative_error: f64,
    /// Maximum per-bucket count error, as a fraction of the sample count.
    pub bucket_fraction: f64,
    /// Maximum |true - false|, as a fraction of the sample count.
    pub balance_fraction: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            skewness: 0.01,
            relative_error: 1.0 / 1000.0,
            bucket_fraction: 1.0 / 10_000.0,
            balance_fraction: 1.0 / 25.0,
        }
    }
}

/// Observed figures from a passing [`uniform_distribution_test`].
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSummary {
    pub count: u64,
    pub mean: f64,
    pub skewness: f64,
    /// Largest quantile error as a fraction of the range width.
    pub worst_quantile_error: f64,
}

/// Check that `samples` look uniform over `[lower, upper)`.
///
/// Sorts `samples` in place, then checks skewness, the mean against the
/// midpoint and each of the [`QUANTILE_POINTS`] empirical quantiles against
/// `lower + tau * (upper - lower)`.
pub fn uniform_distribution_test(
    samples: &mut [f64],
    lower: f64,
    upper: f64,
    tol: &Tolerance,
) -> Result<UniformSummary, UniformityError> {
    if samples.is_empty() {
        return Err(UniformityError::EmptySample);
    }
    if lower.is_nan() || upper.is_nan() || upper <= lower {
        return Err(UniformityError::InvalidBounds { lower, upper });
    }

    sort_samples(samples);
    let stats = RunningStats::from_slice(samples);

    let skewness = stats.skewness();
    if skewness.is_nan() || skewness.abs() > tol.skewness {
        return Err(UniformityError::Skewness {
            observed: skewness,
            limit: tol.skewness,
        });
    }

    let range = upper - lower;
    let limit = range * tol.relative_error;

    let expected = lower + range / 2.0;
    let mean = stats.mean();
    if mean.is_nan() || (expected - mean).abs() > limit {
        return Err(UniformityError::Mean {
            observed: mean,
            expected,
            limit,
        });
    }

    let mut worst = 0.0f64;
    for i in 0..QUANTILE_POINTS {
        let tau = i as f64 / (QUANTILE_POINTS - 1) as f64;
        let observed = sorted_quantile(samples, tau);
        let expected = lower + tau * range;
        let err = (expected - observed).abs();
        if err.is_nan() || err > limit {
            return Err(UniformityError::Quantile {
                tau,
                observed,
                expected,
                limit,
            });
        }
        worst = worst.max(err / range);
    }

    Ok(UniformSummary {
        count: stats.count(),
        mean,
        skewness,
        worst_quantile_error: worst,
    })
}

/// Count occurrences of each byte value.
pub fn byte_histogram(bytes: &[u8]) -> [u64; 256] {
    let mut counts = [0u64; 256];
    for &b in bytes {
        counts[b as usize] += 1;
    }
    counts
}

/// Check that every byte value occurs within `bucket_fraction * n` of `n / 256`.
///
/// Returns the largest observed deviation from the expected count.
pub fn byte_histogram_test(bytes: &[u8], tol: &Tolerance) -> Result<f64, UniformityError> {
    if bytes.is_empty() {
        return Err(UniformityError::EmptySample);
    }

    let n = bytes.len() as f64;
    let expected = n / 256.0;
    let limit = n * tol.bucket_fraction;

    let mut worst = 0.0f64;
    for (value, &count) in byte_histogram(bytes).iter().enumerate() {
        let err = (count as f64 - expected).abs();
        if err > limit {
            return Err(UniformityError::Bucket {
                value: value as u8,
                count,
                expected,
                limit,
            });
        }
        worst = worst.max(err);
    }
    Ok(worst)
}

/// Check that true and false counts differ by at most `balance_fraction * n`.
pub fn bool_balance_test(
    true_count: u64,
    false_count: u64,
    tol: &Tolerance,
) -> Result<u64, UniformityError> {
    let n = true_count + false_count;
    if n == 0 {
        return Err(UniformityError::EmptySample);
    }

    let limit = n as f64 * tol.balance_fraction;
    let diff = true_count.abs_diff(false_count);
    if diff as f64 > limit {
        return Err(UniformityError::Imbalance {
            true_count,
            false_count,
            limit,
        });
    }
    Ok(diff)
}
