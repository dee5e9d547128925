//! `relclock`: reproduces the relational-clock figures.
//!
//! ```bash
//! # Published phase portrait (Van der Pol, μ = 1.2, Euler–Cromer)
//! relclock portrait
//!
//! # Same trajectory with RK4, fitted axes, as SVG
//! relclock portrait --method rk4 --auto-limits --out figs/portrait.svg
//!
//! # Time series of the relational phase
//! relclock timeseries
//!
//! # Overrides from a file, debug logging
//! relclock -v --config relclock.toml portrait
//! ```
//!
//! Settings resolve as command-line flag, then `--config` file, then the
//! defaults of the published figures. Any failure exits with status 1.

mod args;
mod config;
mod run;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    args::{Cli, Command},
    config::{PortraitSettings, RunConfig, SeriesSettings},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let progress = !cli.no_progress;

    match &cli.command {
        Command::Portrait(args) => {
            let settings = PortraitSettings::resolve(args, &file.portrait);
            tracing::debug!(?settings, "resolved portrait settings");

            let (figure, _trajectory, _transient) = run::portrait(&settings, progress)?;
            println!("Saved figure to: {}", figure.path().display());

            #[cfg(feature = "viewer")]
            if args.show {
                run::show(&_trajectory, _transient, "Phase portrait")?;
            }
        }
        Command::Timeseries(args) => {
            let settings = SeriesSettings::resolve(args, &file.timeseries);
            tracing::debug!(?settings, "resolved time-series settings");

            let (figure, _trajectory) = run::timeseries(&settings, progress)?;
            println!("Saved figure to: {}", figure.path().display());

            #[cfg(feature = "viewer")]
            if args.show {
                run::show(&_trajectory, 0, "Relational phase")?;
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
