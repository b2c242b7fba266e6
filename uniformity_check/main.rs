use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;

use uniformity_check::{Config, init_logger, print_report, run_all};

#[path = "entrypoint_helper.rs"]
mod entrypoint_helper;

use entrypoint_helper::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    cli.apply(&mut config);
    config.validate()?;

    if let Some(path) = &cli.write_config {
        config.to_file(path)?;
        info!(path = %path.display(), "wrote effective config");
    }

    let (seed, outcomes) = run_all(&config)?;
    print_report(seed, &outcomes);

    let failed = outcomes.iter().filter(|o| !o.passed).count();
    if failed > 0 {
        bail!("{failed} of {} checks failed", outcomes.len());
    }
    Ok(())
}
