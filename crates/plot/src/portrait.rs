use std::path::Path;

use plotters::{coord::Shift, prelude::*};
use relclock_oscillator::{Bounds, Trajectory};

use crate::{
    Annotation, AxisLimits, Figure, FigureSize, RenderError,
    canvas::{self, C0_BLUE, C1_ORANGE, C4_PURPLE, DrawResult, FONT, Scene},
};

const TITLE_PT: f64 = 16.0;
const AXIS_LABEL_PT: f64 = 16.0;
const TICK_PT: f64 = 10.0;
const ANNOTATION_PT: f64 = 12.0;
const TRANSIENT_PT: f64 = 1.2;
const CYCLE_PT: f64 = 4.0;
const AXIS_LINE_PT: f64 = 1.2;

/// Marker area in pt², as a scatter size.
const ORIGIN_MARKER_AREA: f64 = 60.0;

/// Sample on the transient where the arrow-of-time annotation points.
const ARROW_OF_TIME_SAMPLE: usize = 4000;

/// Layout of a phase-portrait figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PortraitStyle {
    pub size: FigureSize,
    pub limits: AxisLimits,
    pub title: String,
    pub x_label: String,
    pub y_label: String,

    /// Index of the first sample drawn as part of the limit cycle.
    pub transient: usize,

    /// Whether to add the annotations of the published figure.
    pub annotate: bool,
}

impl PortraitStyle {
    /// The published figure: 7.5 × 7.5 in, `[-3.5, 3.5]²`, annotated, with
    /// the cycle starting at sample 12000.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Size`] if `dpi` is zero.
    pub fn paper(dpi: u32) -> Result<Self, RenderError> {
        Ok(Self {
            size: FigureSize::new(7.5, 7.5, dpi)?,
            limits: AxisLimits::PAPER,
            title: "Phase Portrait of Emergent Time via Limit Cycle".into(),
            x_label: "Δφ".into(),
            y_label: "dΔφ/dτ".into(),
            transient: 12_000,
            annotate: true,
        })
    }
}

/// The five annotations of the published figure, anchored on `trajectory`.
///
/// The two limit-cycle anchors sit at 1/5 and 1/2 of the cycle segment, or
/// on the final sample if the cycle has ten samples or fewer. The
/// arrow-of-time anchor is sample `min(4000, transient_len − 1)`.
#[must_use]
pub fn paper_annotations(trajectory: &Trajectory<2>, transient: usize) -> Vec<Annotation> {
    let mut annotations = vec![
        Annotation::new("Δφ=0\n(Timeless Vacuum / Platonia)", (0.0, 0.0), (-2.2, -2.3)),
        Annotation::new("Vacuum Instability\n(Negative Damping)", (0.4, 0.2), (-2.6, 1.8)),
    ];

    let point = |i: usize| trajectory.states().get(i).map(|s| (s[0], s[1]));
    let Some(last) = trajectory.len().checked_sub(1).and_then(point) else {
        return annotations;
    };

    let (before, cycle) = trajectory.split_at(transient);
    let (stabilizing, crystal) = if cycle.len() > 10 {
        let offset = before.len();
        (
            point(offset + cycle.len() / 5).unwrap_or(last),
            point(offset + cycle.len() / 2).unwrap_or(last),
        )
    } else {
        (last, last)
    };
    let arrow_of_time = point(ARROW_OF_TIME_SAMPLE.min(before.len().saturating_sub(1))).unwrap_or(last);

    annotations.extend([
        Annotation::new("Positive Damping Region\n(Stabilization)", stabilizing, (1.6, 2.2)),
        Annotation::new("Time Crystal Phase\n(STTSB / Stable Limit Cycle)", crystal, (1.4, -2.6)),
        Annotation::new("Emergence of\nArrow of Time", arrow_of_time, (-3.0, -0.2)),
    ]);
    annotations
}

/// Renders `trajectory` as a phase portrait into `path`.
///
/// Samples before `style.transient` are drawn thin, the rest thick. The
/// `Δφ = 0` and `dΔφ/dτ = 0` axes and the origin are marked.
///
/// # Errors
///
/// Returns an error if the trajectory is empty, the limits are invalid, the
/// output directory cannot be created, or drawing fails.
pub fn render_phase_portrait(
    trajectory: &Trajectory<2>,
    style: &PortraitStyle,
    path: impl AsRef<Path>,
) -> Result<Figure, RenderError> {
    let path = path.as_ref();
    let data = trajectory.bounds(0, 1).ok_or(RenderError::EmptyTrajectory)?;
    let limits = style.limits.resolve(Some(data))?;

    let annotations = if style.annotate {
        paper_annotations(trajectory, style.transient)
    } else {
        Vec::new()
    };

    let scene = Portrait {
        trajectory,
        style,
        limits,
        annotations,
    };
    canvas::render(path, &style.size, &scene)?;

    let figure = Figure::new(path, style.size.pixels(), limits);
    tracing::info!(path = %path.display(), pixels = ?figure.pixels(), "saved phase portrait");
    Ok(figure)
}

struct Portrait<'a> {
    trajectory: &'a Trajectory<2>,
    style: &'a PortraitStyle,
    limits: Bounds,
    annotations: Vec<Annotation>,
}

impl Scene for Portrait<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let size = &self.style.size;
        let limits = &self.limits;

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .caption(&self.style.title, (FONT, size.font(TITLE_PT)))
            .margin(size.px(10.0))
            .x_label_area_size(size.px(40.0))
            .y_label_area_size(size.px(48.0))
            .build_cartesian_2d(limits.x_min..limits.x_max, limits.y_min..limits.y_max)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(self.style.x_label.as_str())
            .y_desc(self.style.y_label.as_str())
            .axis_desc_style((FONT, size.font(AXIS_LABEL_PT)))
            .label_style((FONT, size.font(TICK_PT)))
            .draw()?;

        let (transient, cycle) = self.trajectory.split_at(self.style.transient);
        chart.draw_series(LineSeries::new(
            transient.points(0, 1),
            C0_BLUE.stroke_width(size.px(TRANSIENT_PT)),
        ))?;
        chart.draw_series(LineSeries::new(
            cycle.points(0, 1),
            C1_ORANGE.stroke_width(size.px(CYCLE_PT)),
        ))?;

        canvas::draw_axes(&mut chart, limits, size.px(AXIS_LINE_PT))?;

        if limits.contains(0.0, 0.0) {
            let radius = size.px((ORIGIN_MARKER_AREA / std::f64::consts::PI).sqrt());
            chart.draw_series(std::iter::once(Circle::new(
                (0.0, 0.0),
                radius,
                C4_PURPLE.filled(),
            )))?;
        }

        canvas::draw_annotations(&mut chart, &self.annotations, limits, size, ANNOTATION_PT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use relclock_oscillator::StateVector;

    fn line(n: usize) -> Trajectory<2> {
        (0..n)
            .map(|i| {
                let x = i as f64;
                (x, StateVector([x, -x]))
            })
            .collect()
    }

    #[test]
    fn annotations_follow_the_segments() {
        let traj = line(20_000);
        let notes = paper_annotations(&traj, 12_000);

        assert_eq!(notes.len(), 5);
        assert_eq!(notes[0].anchor, (0.0, 0.0));
        assert_eq!(notes[1].anchor, (0.4, 0.2));
        // Cycle holds 8000 samples starting at 12000.
        assert_eq!(notes[2].anchor, (13_600.0, -13_600.0));
        assert_eq!(notes[3].anchor, (16_000.0, -16_000.0));
        assert_eq!(notes[4].anchor, (4000.0, -4000.0));
    }

    #[test]
    fn short_cycle_points_at_the_end() {
        let traj = line(100);
        let notes = paper_annotations(&traj, 95);

        assert_eq!(notes[2].anchor, (99.0, -99.0));
        assert_eq!(notes[3].anchor, (99.0, -99.0));
        assert_eq!(notes[4].anchor, (94.0, -94.0));
    }

    #[test]
    fn no_transient_points_arrow_at_start() {
        let notes = paper_annotations(&line(50), 0);
        assert_eq!(notes[4].anchor, (0.0, 0.0));
    }

    #[test]
    fn empty_trajectory_keeps_fixed_annotations() {
        let traj: Trajectory<2> = std::iter::empty().collect();
        assert_eq!(paper_annotations(&traj, 10).len(), 2);
    }

    #[test]
    fn paper_style() {
        let style = PortraitStyle::paper(300).unwrap();
        assert_eq!(style.size.pixels(), (2250, 2250));
        assert_eq!(style.limits, AxisLimits::PAPER);
        assert!(PortraitStyle::paper(0).is_err());
    }
}
