use anyhow::{Context, Result};
use relclock_observers::ProgressObserver;
use relclock_oscillator::{
    FixedMethod, RelationalPhase, StateVector, StepPolicy, TimeSpan, Trajectory, VanDerPol,
    integrate,
};
use relclock_plot::{
    AxisLimits, Figure, PortraitStyle, SeriesStyle, render_phase_portrait, render_time_series,
};
use relclock_solvers::transient::dopri5;

use crate::{
    args::Method,
    config::{PortraitSettings, SeriesSettings},
};

/// Integrates the Van der Pol oscillator and saves the phase portrait.
pub fn portrait(settings: &PortraitSettings, progress: bool) -> Result<(Figure, Trajectory<2>, usize)> {
    let vdp = VanDerPol::new(settings.mu).context("invalid --mu")?;
    let span = TimeSpan::from_steps(settings.dt, settings.steps).context("invalid --dt/--steps")?;
    let policy = step_policy(settings.method, settings.steps)?;

    let mut observer = progress_observer("portrait", progress);
    let trajectory = integrate(
        &vdp,
        StateVector([settings.x0, settings.v0]),
        span,
        &policy,
        &mut observer,
    )
    .context("integration of the Van der Pol oscillator failed")?;

    let transient = cycle_start(&trajectory, &policy, settings.dt, settings.transient);
    let mut style = PortraitStyle::paper(settings.dpi).context("invalid --dpi")?;
    style.transient = transient;
    if settings.auto_limits {
        style.limits = AxisLimits::Auto { padding: 0.05 };
    }

    let figure = render_phase_portrait(&trajectory, &style, &settings.out)?;
    Ok((figure, trajectory, transient))
}

/// Integrates the relational phase oscillator and saves `Δφ(τ)`.
pub fn timeseries(settings: &SeriesSettings, progress: bool) -> Result<(Figure, Trajectory<2>)> {
    let field = RelationalPhase::new(settings.epsilon, settings.omega0)
        .context("invalid --epsilon/--omega0")?;
    let span = TimeSpan::from_steps(settings.dt, settings.steps).context("invalid --dt/--steps")?;
    let policy = step_policy(settings.method, settings.steps)?;

    let mut observer = progress_observer("timeseries", progress);
    let trajectory = integrate(
        &field,
        StateVector([settings.phi0, settings.phidot0]),
        span,
        &policy,
        &mut observer,
    )
    .context("integration of the relational phase oscillator failed")?;

    let style = SeriesStyle::paper(settings.dpi).context("invalid --dpi")?;
    let figure = render_time_series(&trajectory, &style, &settings.out)?;
    Ok((figure, trajectory))
}

fn step_policy(method: Method, steps: usize) -> Result<StepPolicy> {
    let fixed = match method {
        Method::Dopri5 => return Ok(StepPolicy::adaptive(dopri5::Config::default())),
        Method::Euler => FixedMethod::Euler,
        Method::EulerCromer => FixedMethod::EulerCromer,
        Method::Rk4 => FixedMethod::Rk4,
    };
    let policy = StepPolicy::fixed(fixed, steps.saturating_add(1)).context("invalid --steps")?;
    Ok(policy)
}

fn progress_observer(label: &str, enabled: bool) -> ProgressObserver {
    if enabled {
        ProgressObserver::new(label)
    } else {
        ProgressObserver::disabled()
    }
}

/// Sample index where the cycle segment begins.
///
/// Fixed-step runs count samples directly. Adaptive runs have no fixed grid,
/// so the split is placed at the first sample at or after `transient * dt`.
fn cycle_start(trajectory: &Trajectory<2>, policy: &StepPolicy, dt: f64, transient: usize) -> usize {
    match policy {
        StepPolicy::Fixed { .. } => transient,
        StepPolicy::Adaptive { .. } => {
            #[allow(clippy::cast_precision_loss)]
            let tau = trajectory.times().first().copied().unwrap_or(0.0) + dt * transient as f64;
            trajectory.times().partition_point(|&t| t < tau)
        }
    }
}

#[cfg(feature = "viewer")]
pub fn show(trajectory: &Trajectory<2>, transient: usize, title: &str) -> Result<()> {
    use relclock_observers::{PlotWindow, ShowConfig};

    let (before, cycle) = trajectory.split_at(transient);
    let mut plot = PlotWindow::new(["transient", "limit cycle"]);
    plot.extend(0, before.points(0, 1).into_iter().map(|(x, y)| [x, y]));
    plot.extend(1, cycle.points(0, 1).into_iter().map(|(x, y)| [x, y]));

    plot.show(
        ShowConfig::new()
            .title(title)
            .labels("Δφ", "dΔφ/dτ")
            .legend()
            .square()
            .axes(),
    )
    .map_err(|e| anyhow::anyhow!("failed to open viewer: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use crate::{
        args::{PortraitArgs, TimeSeriesArgs},
        config::{PortraitConfig, TimeSeriesConfig},
    };

    fn small_portrait(out: PathBuf, method: Method) -> PortraitSettings {
        PortraitSettings {
            steps: 2000,
            transient: 1200,
            dpi: 30,
            out,
            method,
            ..PortraitSettings::resolve(&PortraitArgs::default(), &PortraitConfig::default())
        }
    }

    #[test]
    fn portrait_writes_figure() {
        let dir = tempfile::tempdir().unwrap();
        let settings = small_portrait(dir.path().join("p.png"), Method::EulerCromer);

        let (figure, trajectory, transient) = portrait(&settings, false).unwrap();
        assert!(figure.path().exists());
        assert_eq!(trajectory.len(), 2001);
        assert_eq!(transient, 1200);
    }

    #[test]
    fn adaptive_split_follows_time() {
        let dir = tempfile::tempdir().unwrap();
        let settings = small_portrait(dir.path().join("p.png"), Method::Dopri5);

        let (_, trajectory, transient) = portrait(&settings, false).unwrap();
        let times = trajectory.times();
        assert!(times[transient] >= 12.0);
        assert!(times[transient - 1] < 12.0);
    }

    #[test]
    fn negative_mu_fails() {
        let dir = tempfile::tempdir().unwrap();
        let settings = PortraitSettings {
            mu: -1.0,
            ..small_portrait(dir.path().join("p.png"), Method::EulerCromer)
        };
        let err = portrait(&settings, false).unwrap_err();
        assert!(format!("{err:#}").contains("mu must be non-negative"));
    }

    #[test]
    fn timeseries_writes_figure() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SeriesSettings {
            steps: 1000,
            dpi: 30,
            out: dir.path().join("nested").join("s.svg"),
            ..SeriesSettings::resolve(&TimeSeriesArgs::default(), &TimeSeriesConfig::default())
        };

        let (figure, trajectory) = timeseries(&settings, false).unwrap();
        assert!(figure.path().exists());
        assert_eq!(trajectory.len(), 1001);
    }
}
