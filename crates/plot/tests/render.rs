//! Rendering figures to disk.

use std::fs;

use approx::assert_relative_eq;
use relclock_oscillator::{
    FixedMethod, StateVector, StepPolicy, TimeSpan, Trajectory, VanDerPol, integrate,
};
use relclock_plot::{
    AxisLimits, FigureSize, PortraitStyle, RenderError, SeriesStyle, render_phase_portrait,
    render_time_series,
};

fn trajectory() -> Trajectory<2> {
    let span = TimeSpan::from_steps(0.01, 3000).unwrap();
    let policy = StepPolicy::fixed(FixedMethod::EulerCromer, 3001).unwrap();
    integrate(&VanDerPol::default(), StateVector([0.1, 0.0]), span, &policy, ()).unwrap()
}

fn small_portrait() -> PortraitStyle {
    PortraitStyle {
        transient: 1800,
        ..PortraitStyle::paper(40).unwrap()
    }
}

#[test]
fn portrait_png_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("figs").join("portrait.png");

    let figure = render_phase_portrait(&trajectory(), &small_portrait(), &path).unwrap();

    assert_eq!(figure.path(), path);
    assert_eq!(figure.pixels(), (300, 300));
    assert_eq!(figure.limits().x_min, -3.5);
    assert_eq!(figure.limits().y_max, 3.5);

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn portrait_svg_carries_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portrait.svg");

    render_phase_portrait(&trajectory(), &small_portrait(), &path).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Phase Portrait of Emergent Time via Limit Cycle"));
    assert!(svg.contains("Timeless Vacuum / Platonia"));
    assert!(svg.contains("Arrow of Time"));
}

#[test]
fn auto_limits_match_trajectory_range() {
    let dir = tempfile::tempdir().unwrap();
    let traj = trajectory();
    let data = traj.bounds(0, 1).unwrap();

    let style = PortraitStyle {
        limits: AxisLimits::Auto { padding: 0.05 },
        annotate: false,
        ..small_portrait()
    };
    let figure = render_phase_portrait(&traj, &style, dir.path().join("auto.png")).unwrap();
    let limits = figure.limits();

    let (sx, sy) = (data.x_max - data.x_min, data.y_max - data.y_min);
    assert_relative_eq!(limits.x_min, data.x_min - 0.05 * sx, epsilon = 1e-12);
    assert_relative_eq!(limits.x_max, data.x_max + 0.05 * sx, epsilon = 1e-12);
    assert_relative_eq!(limits.y_min, data.y_min - 0.05 * sy, epsilon = 1e-12);
    assert_relative_eq!(limits.y_max, data.y_max + 0.05 * sy, epsilon = 1e-12);
    assert!(limits.contains(data.x_min, data.y_min));
    assert!(limits.contains(data.x_max, data.y_max));
}

#[test]
fn time_series_png_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("series.png");
    let traj = trajectory();

    let style = SeriesStyle {
        size: FigureSize::new(8.0, 4.0, 30).unwrap(),
        ..SeriesStyle::paper(200).unwrap()
    };
    let figure = render_time_series(&traj, &style, &path).unwrap();

    assert_eq!(figure.pixels(), (240, 120));
    let limits = figure.limits();
    assert!(limits.x_min < 0.0 && limits.x_max > 30.0);
    assert!(path.exists());
}

#[test]
fn empty_trajectory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let empty: Trajectory<2> = std::iter::empty().collect();

    let result = render_phase_portrait(&empty, &small_portrait(), dir.path().join("x.png"));
    assert!(matches!(result, Err(RenderError::EmptyTrajectory)));

    let result = render_time_series(&empty, &SeriesStyle::paper(30).unwrap(), dir.path().join("y.png"));
    assert!(matches!(result, Err(RenderError::EmptyTrajectory)));
}

#[test]
fn unwritable_directory_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"").unwrap();

    let path = blocker.join("portrait.png");
    let err = render_phase_portrait(&trajectory(), &small_portrait(), &path).unwrap_err();

    match &err {
        RenderError::CreateDir { path, .. } => assert_eq!(path, &blocker),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("not-a-dir"));
}
