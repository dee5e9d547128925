use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

/// Reproduce the relational-clock figures: a Van der Pol phase portrait and
/// the time series of the relational phase.
#[derive(Debug, Parser)]
#[command(name = "relclock", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file with `[portrait]` and `[timeseries]` overrides.
    /// Command-line flags take precedence over it.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable progress logging during integration.
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Phase portrait of emergent time via a Van der Pol limit cycle.
    ///
    /// Integrates from (x0, v0), draws the transient thin and the cycle thick,
    /// and annotates the published figure.
    Portrait(PortraitArgs),

    /// Time series Δφ(τ) of the relational phase oscillator.
    Timeseries(TimeSeriesArgs),
}

/// Integration scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Semi-implicit Euler, as used for the published figures.
    EulerCromer,
    /// Explicit forward Euler.
    Euler,
    /// Classic fourth-order Runge–Kutta.
    Rk4,
    /// Adaptive Dormand–Prince 5(4).
    Dopri5,
}

#[derive(Debug, Default, Args)]
pub struct PortraitArgs {
    /// Van der Pol nonlinearity μ [default: 1.2]
    #[arg(long)]
    pub mu: Option<f64>,

    /// Integration step in the relational parameter τ [default: 0.01]
    #[arg(long)]
    pub dt: Option<f64>,

    /// Number of integration steps [default: 20000]
    #[arg(long)]
    pub steps: Option<usize>,

    /// Initial Δφ [default: 0.1]
    #[arg(long, allow_negative_numbers = true)]
    pub x0: Option<f64>,

    /// Initial dΔφ/dτ [default: 0.0]
    #[arg(long, allow_negative_numbers = true)]
    pub v0: Option<f64>,

    /// Step after which the trajectory is drawn as the limit cycle [default: 12000]
    #[arg(long)]
    pub transient: Option<usize>,

    /// Output path; `.svg` writes vector output [default: figs/figs_phase_portrait_emergent_time.png]
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Output resolution [default: 300]
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Integration scheme [default: euler-cromer]
    #[arg(long, value_enum)]
    pub method: Option<Method>,

    /// Fit the axes to the trajectory instead of the fixed [-3.5, 3.5] window.
    #[arg(long)]
    pub auto_limits: bool,

    /// Open the trajectory in an interactive window after saving.
    #[cfg(feature = "viewer")]
    #[arg(long)]
    pub show: bool,
}

#[derive(Debug, Default, Args)]
pub struct TimeSeriesArgs {
    /// Nonlinear damping ε [default: 0.3]
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Natural frequency ω0 [default: 1.0]
    #[arg(long)]
    pub omega0: Option<f64>,

    /// Integration step in the relational parameter τ [default: 0.01]
    #[arg(long)]
    pub dt: Option<f64>,

    /// Number of integration steps [default: 20000]
    #[arg(long)]
    pub steps: Option<usize>,

    /// Initial Δφ [default: 0.1]
    #[arg(long, allow_negative_numbers = true)]
    pub phi0: Option<f64>,

    /// Initial dΔφ/dτ [default: 0.0]
    #[arg(long, allow_negative_numbers = true)]
    pub phidot0: Option<f64>,

    /// Output path; `.svg` writes vector output [default: figs/delta_phi_limit_cycle.png]
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Output resolution [default: 200]
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Integration scheme [default: euler-cromer]
    #[arg(long, value_enum)]
    pub method: Option<Method>,

    /// Open the time series in an interactive window after saving.
    #[cfg(feature = "viewer")]
    #[arg(long)]
    pub show: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn portrait_flags_parse() {
        let cli = Cli::try_parse_from([
            "relclock", "portrait", "--mu", "2.5", "--x0", "-0.5", "--method", "rk4", "--no-progress",
        ])
        .unwrap();

        assert!(cli.no_progress);
        let Command::Portrait(args) = cli.command else {
            panic!("expected portrait");
        };
        assert_eq!(args.mu, Some(2.5));
        assert_eq!(args.x0, Some(-0.5));
        assert_eq!(args.method, Some(Method::Rk4));
        assert_eq!(args.steps, None);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["relclock", "timeseries", "-vv", "--config", "run.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("run.toml")));
        assert!(matches!(cli.command, Command::Timeseries(_)));
    }

    #[test]
    fn unknown_method_is_rejected() {
        assert!(Cli::try_parse_from(["relclock", "portrait", "--method", "leapfrog"]).is_err());
    }
}
