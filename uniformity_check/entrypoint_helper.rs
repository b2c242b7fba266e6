use clap::Parser;
use std::path::PathBuf;

use uniformity_check::{CheckKind, Config};

/// Statistical uniformity checks for the xorshift generator
#[derive(Parser, Debug)]
#[command(name = "uniformity_check")]
#[command(about = "Draw samples from every output method and test them for uniformity", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Generator seed (overrides the config file)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Draws per check (overrides the config file)
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,

    /// Run only these checks; repeat to select several
    #[arg(long = "check", value_enum)]
    pub checks: Vec<CheckKind>,

    /// Write the effective configuration to this file
    #[arg(long)]
    pub write_config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.run.seed = Some(seed);
        }
        if let Some(samples) = self.samples {
            config.run.sample_count = samples;
        }
        if !self.checks.is_empty() {
            config.run.checks = self.checks.clone();
        }
    }
}
