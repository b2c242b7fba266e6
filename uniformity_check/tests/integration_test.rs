//! End-to-end runs of the check pipeline at a reduced sample count.

use std::io::Write;

use uniformity_check::{CheckKind, Config, run_all};

// 200k draws per check; limits sit many standard errors above the noise.
fn relaxed_config(seed: u64) -> Config {
    let mut config = Config::default();
    config.run.seed = Some(seed);
    config.run.sample_count = 200_000;
    config.tolerance.skewness = 0.05;
    config.tolerance.relative_error = 0.01;
    config.tolerance.bucket_fraction = 0.001;
    config
}

#[test]
fn test_every_check_passes() {
    let config = relaxed_config(2024);
    let (seed, outcomes) = run_all(&config).unwrap();

    assert_eq!(seed, 2024);
    assert_eq!(outcomes.len(), CheckKind::ALL.len());
    for outcome in &outcomes {
        assert!(outcome.passed, "{}: {}", outcome.kind.name(), outcome.detail);
    }
}

#[test]
fn test_clock_seeded_run() {
    let mut config = relaxed_config(0);
    config.run.seed = None;
    config.run.checks = vec![CheckKind::NextDouble];

    let (_, outcomes) = run_all(&config).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].passed, "{}", outcomes[0].detail);
}

#[test]
fn test_config_file_drives_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[run]
seed = 99
sample_count = 50000
checks = ["next_range", "long_range", "next_bytes"]

[ranges]
lower = -500
upper_pair = 500

[tolerance]
skewness = 0.1
relative_error = 0.02
bucket_fraction = 0.002
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    config.validate().unwrap();
    assert_eq!(config.ranges.lower, -500);
    assert_eq!(config.ranges.upper, 1_234_567);

    let (_, outcomes) = run_all(&config).unwrap();
    let kinds: Vec<CheckKind> = outcomes.iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        vec![CheckKind::NextRange, CheckKind::LongRange, CheckKind::NextBytes]
    );
    for outcome in &outcomes {
        assert!(outcome.passed, "{}: {}", outcome.kind.name(), outcome.detail);
    }
}
