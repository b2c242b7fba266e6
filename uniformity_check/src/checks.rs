//! Sampling and testing for each generator output method.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use xorand::stats::{
    Tolerance, UniformityError, bool_balance_test, byte_histogram_test, uniform_distribution_test,
};
use xorand::xorshift::{ClockSeedSource, SeedSource, XorShiftRandom};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum CheckKind {
    Next,
    NextBelow,
    NextRange,
    LongRange,
    NextUint,
    NextInt,
    NextDouble,
    NextDoubleNonZero,
    NextFloat,
    NextBool,
    NextByte,
    NextBytes,
}

impl CheckKind {
    pub const ALL: [CheckKind; 12] = [
        CheckKind::Next,
        CheckKind::NextBelow,
        CheckKind::NextRange,
        CheckKind::LongRange,
        CheckKind::NextUint,
        CheckKind::NextInt,
        CheckKind::NextDouble,
        CheckKind::NextDoubleNonZero,
        CheckKind::NextFloat,
        CheckKind::NextBool,
        CheckKind::NextByte,
        CheckKind::NextBytes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CheckKind::Next => "next",
            CheckKind::NextBelow => "next_below",
            CheckKind::NextRange => "next_range",
            CheckKind::LongRange => "long_range",
            CheckKind::NextUint => "next_uint",
            CheckKind::NextInt => "next_int",
            CheckKind::NextDouble => "next_double",
            CheckKind::NextDoubleNonZero => "next_double_non_zero",
            CheckKind::NextFloat => "next_float",
            CheckKind::NextBool => "next_bool",
            CheckKind::NextByte => "next_byte",
            CheckKind::NextBytes => "next_bytes",
        }
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub kind: CheckKind,
    pub passed: bool,
    pub detail: String,
}

impl CheckOutcome {
    fn from_result<T, F>(kind: CheckKind, result: Result<T, UniformityError>, describe: F) -> Self
    where
        F: FnOnce(T) -> String,
    {
        match result {
            Ok(v) => CheckOutcome {
                kind,
                passed: true,
                detail: describe(v),
            },
            Err(e) => CheckOutcome {
                kind,
                passed: false,
                detail: e.to_string(),
            },
        }
    }
}

fn draw<F>(rng: &mut XorShiftRandom, n: usize, mut f: F) -> Result<Vec<f64>>
where
    F: FnMut(&mut XorShiftRandom) -> Result<f64>,
{
    let mut samples = Vec::with_capacity(n);
    for _ in 0..n {
        samples.push(f(rng)?);
    }
    Ok(samples)
}

fn uniform(
    kind: CheckKind,
    mut samples: Vec<f64>,
    lower: f64,
    upper: f64,
    tol: &Tolerance,
) -> CheckOutcome {
    let result = uniform_distribution_test(&mut samples, lower, upper, tol);
    CheckOutcome::from_result(kind, result, |s| {
        format!(
            "n={} mean={:.4} skew={:+.5} worst quantile err={:.2e}",
            s.count, s.mean, s.skewness, s.worst_quantile_error
        )
    })
}

/// Draw `config.run.sample_count` values for `kind` from `rng` and test them.
pub fn run_check(kind: CheckKind, rng: &mut XorShiftRandom, config: &Config) -> Result<CheckOutcome> {
    let n = config.run.sample_count;
    let tol = Tolerance::from(&config.tolerance);
    let ranges = &config.ranges;

    let outcome = match kind {
        CheckKind::Next => {
            let samples = draw(rng, n, |r| Ok(r.next() as f64))?;
            uniform(kind, samples, 0.0, i32::MAX as f64, &tol)
        }
        CheckKind::NextBelow => {
            let upper = ranges.upper;
            let samples = draw(rng, n, |r| Ok(r.next_below(upper)? as f64))?;
            uniform(kind, samples, 0.0, upper as f64, &tol)
        }
        CheckKind::NextRange => {
            let (lower, upper) = (ranges.lower, ranges.upper_pair);
            let samples = draw(rng, n, |r| Ok(r.next_range(lower, upper)? as f64))?;
            uniform(kind, samples, lower as f64, upper as f64, &tol)
        }
        CheckKind::LongRange => {
            let (lower, upper) = ranges
                .wide_bounds()
                .context("wide_half_span_pad overflows i32")?;
            let mut out_of_bounds = 0usize;
            let samples = draw(rng, n, |r| {
                let v = r.next_range(lower, upper)?;
                if v < lower || v >= upper {
                    out_of_bounds += 1;
                }
                Ok(v as f64)
            })?;
            if out_of_bounds > 0 {
                CheckOutcome {
                    kind,
                    passed: false,
                    detail: format!("{out_of_bounds} samples outside [{lower}, {upper})"),
                }
            } else {
                uniform(kind, samples, lower as f64, upper as f64, &tol)
            }
        }
        CheckKind::NextUint => {
            let samples = draw(rng, n, |r| Ok(r.next_uint() as f64))?;
            uniform(kind, samples, 0.0, u32::MAX as f64, &tol)
        }
        CheckKind::NextInt => {
            let samples = draw(rng, n, |r| Ok(r.next_int() as f64))?;
            uniform(kind, samples, 0.0, i32::MAX as f64 + 1.0, &tol)
        }
        CheckKind::NextDouble => {
            let samples = draw(rng, n, |r| Ok(r.next_double()))?;
            uniform(kind, samples, 0.0, 1.0, &tol)
        }
        CheckKind::NextDoubleNonZero => {
            let samples = draw(rng, n, |r| Ok(r.next_double_non_zero()))?;
            if samples.iter().any(|&d| d == 0.0) {
                CheckOutcome {
                    kind,
                    passed: false,
                    detail: "drew an exact zero".to_string(),
                }
            } else {
                uniform(kind, samples, 0.0, 1.0, &tol)
            }
        }
        CheckKind::NextFloat => {
            let samples = draw(rng, n, |r| Ok(r.next_float() as f64))?;
            uniform(kind, samples, 0.0, 1.0, &tol)
        }
        CheckKind::NextBool => {
            let true_count = (0..n).filter(|_| rng.next_bool()).count() as u64;
            let false_count = n as u64 - true_count;
            let result = bool_balance_test(true_count, false_count, &tol);
            CheckOutcome::from_result(kind, result, |diff| {
                format!("true={true_count} false={false_count} diff={diff}")
            })
        }
        CheckKind::NextByte => {
            let bytes: Vec<u8> = (0..n).map(|_| rng.next_byte()).collect();
            let result = byte_histogram_test(&bytes, &tol);
            CheckOutcome::from_result(kind, result, |worst| {
                format!("n={n} worst bucket deviation={worst:.1}")
            })
        }
        CheckKind::NextBytes => {
            let mut bytes = vec![0u8; n];
            rng.next_bytes(&mut bytes);
            let result = byte_histogram_test(&bytes, &tol);
            CheckOutcome::from_result(kind, result, |worst| {
                format!("n={n} worst bucket deviation={worst:.1}")
            })
        }
    };

    if outcome.passed {
        info!(check = kind.name(), detail = %outcome.detail, "passed");
    } else {
        warn!(check = kind.name(), detail = %outcome.detail, "failed");
    }
    Ok(outcome)
}

/// Run every configured check in order against one generator.
///
/// Returns the seed used alongside the outcomes, so a clock-seeded run can be
/// repeated.
pub fn run_all(config: &Config) -> Result<(u64, Vec<CheckOutcome>)> {
    let seed = match config.run.seed {
        Some(seed) => seed,
        None => ClockSeedSource::new().next_seed(),
    };
    info!(
        seed,
        samples = config.run.sample_count,
        checks = config.run.checks.len(),
        "starting uniformity run"
    );

    let mut rng = XorShiftRandom::with_seed(seed);
    let mut outcomes = Vec::with_capacity(config.run.checks.len());
    for &kind in &config.run.checks {
        outcomes.push(run_check(kind, &mut rng, config)?);
    }
    Ok((seed, outcomes))
}

pub fn print_report(seed: u64, outcomes: &[CheckOutcome]) {
    println!("\n=== UNIFORMITY REPORT (seed {seed}) ===");
    for o in outcomes {
        let status = if o.passed { "PASS" } else { "FAIL" };
        println!("{:<22} {}  {}", o.kind.name(), status, o.detail);
    }
    let passed = outcomes.iter().filter(|o| o.passed).count();
    println!("{passed}/{} checks passed", outcomes.len());
}
