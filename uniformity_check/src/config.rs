//! Configuration structures for a uniformity run.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use xorand::stats::Tolerance;

use crate::checks::CheckKind;

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub ranges: RangeConfig,

    #[serde(default)]
    pub tolerance: ToleranceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Generator seed. A clock-derived seed is used when absent.
    pub seed: Option<u64>,

    /// Draws per check
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Checks to run, in order
    #[serde(default = "default_checks")]
    pub checks: Vec<CheckKind>,
}

/// Bounds used by the bounded integer checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    /// Exclusive upper bound for `next_below`
    #[serde(default = "default_upper")]
    pub upper: i32,

    /// Inclusive lower bound for `next_range`
    #[serde(default = "default_lower")]
    pub lower: i32,

    /// Exclusive upper bound for `next_range`
    #[serde(default = "default_upper")]
    pub upper_pair: i32,

    /// The long-range check uses +/-(i32::MAX / 2 + pad)
    #[serde(default = "default_pad")]
    pub wide_half_span_pad: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceConfig {
    #[serde(default = "default_skewness")]
    pub skewness: f64,

    /// Fraction of the range width
    #[serde(default = "default_relative_error")]
    pub relative_error: f64,

    /// Fraction of the sample count
    #[serde(default = "default_bucket_fraction")]
    pub bucket_fraction: f64,

    /// Fraction of the sample count
    #[serde(default = "default_balance_fraction")]
    pub balance_fraction: f64,
}

// Default value functions
fn default_sample_count() -> usize { 10_000_000 }
fn default_checks() -> Vec<CheckKind> { CheckKind::ALL.to_vec() }
fn default_upper() -> i32 { 1_234_567 }
fn default_lower() -> i32 { 1_000_000 }
fn default_pad() -> i32 { 10_000 }
fn default_skewness() -> f64 { Tolerance::default().skewness }
fn default_relative_error() -> f64 { Tolerance::default().relative_error }
fn default_bucket_fraction() -> f64 { Tolerance::default().bucket_fraction }
fn default_balance_fraction() -> f64 { Tolerance::default().balance_fraction }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            sample_count: default_sample_count(),
            checks: default_checks(),
        }
    }
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            upper: default_upper(),
            lower: default_lower(),
            upper_pair: default_upper(),
            wide_half_span_pad: default_pad(),
        }
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            skewness: default_skewness(),
            relative_error: default_relative_error(),
            bucket_fraction: default_bucket_fraction(),
            balance_fraction: default_balance_fraction(),
        }
    }
}

impl From<&ToleranceConfig> for Tolerance {
    fn from(t: &ToleranceConfig) -> Self {
        Tolerance {
            skewness: t.skewness,
            relative_error: t.relative_error,
            bucket_fraction: t.bucket_fraction,
            balance_fraction: t.balance_fraction,
        }
    }
}

impl RangeConfig {
    /// Bounds for the long-range check.
    pub fn wide_bounds(&self) -> Option<(i32, i32)> {
        let half = (i32::MAX / 2).checked_add(self.wide_half_span_pad)?;
        let lower = half.checked_neg()?;
        Some((lower, half))
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config '{}'", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("cannot parse config '{}'", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("cannot write config '{}'", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.run.sample_count == 0 {
            bail!("sample_count must be positive");
        }
        if self.run.checks.is_empty() {
            bail!("no checks selected");
        }
        if self.ranges.upper <= 0 {
            bail!("ranges.upper must be positive, got {}", self.ranges.upper);
        }
        if self.ranges.upper_pair <= self.ranges.lower {
            bail!(
                "ranges.upper_pair ({}) must exceed ranges.lower ({})",
                self.ranges.upper_pair,
                self.ranges.lower
            );
        }
        if self.ranges.wide_half_span_pad < 0 || self.ranges.wide_bounds().is_none() {
            bail!(
                "ranges.wide_half_span_pad {} is out of range",
                self.ranges.wide_half_span_pad
            );
        }

        let t = &self.tolerance;
        for (name, value) in [
            ("skewness", t.skewness),
            ("relative_error", t.relative_error),
            ("bucket_fraction", t.bucket_fraction),
            ("balance_fraction", t.balance_fraction),
        ] {
            if value.is_nan() || value < 0.0 {
                bail!("tolerance.{name} must be non-negative, got {value}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.run.seed, None);
        assert_eq!(config.run.sample_count, 10_000_000);
        assert_eq!(config.run.checks.len(), CheckKind::ALL.len());
        assert_eq!(config.ranges.upper, 1_234_567);
        assert_eq!(config.ranges.lower, 1_000_000);
        assert_eq!(Tolerance::from(&config.tolerance), Tolerance::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [run]
            seed = 42
            checks = ["next_bool", "next_range"]

            [tolerance]
            skewness = 0.02
            "#,
        )
        .unwrap();

        assert_eq!(config.run.seed, Some(42));
        assert_eq!(config.run.sample_count, 10_000_000);
        assert_eq!(config.run.checks, vec![CheckKind::NextBool, CheckKind::NextRange]);
        assert_eq!(config.tolerance.skewness, 0.02);
        assert_eq!(config.tolerance.relative_error, 0.001);
        assert_eq!(config.ranges, RangeConfig::default());
    }

    #[test]
    fn test_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_wide_bounds() {
        let ranges = RangeConfig::default();
        assert_eq!(ranges.wide_bounds(), Some((-1_073_751_823, 1_073_751_823)));

        let ranges = RangeConfig {
            wide_half_span_pad: i32::MAX,
            ..RangeConfig::default()
        };
        assert_eq!(ranges.wide_bounds(), None);
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = Config::default();
        config.run.sample_count = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ranges.upper = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ranges.upper_pair = config.ranges.lower;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ranges.wide_half_span_pad = -1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tolerance.bucket_fraction = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tolerance.skewness = -0.01;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.run.checks.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("check.toml");

        let mut config = Config::default();
        config.run.seed = Some(7);
        config.run.sample_count = 1234;
        config.run.checks = vec![CheckKind::NextBytes];
        config.to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("cannot read config"));
    }
}
