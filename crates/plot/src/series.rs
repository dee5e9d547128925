use std::path::Path;

use plotters::{coord::Shift, prelude::*};
use relclock_oscillator::{Bounds, Segment, Trajectory};

use crate::{
    AxisLimits, Figure, FigureSize, RenderError,
    canvas::{self, C0_BLUE, DrawResult, FONT, Scene},
};

/// Layout of a time-series figure.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub size: FigureSize,
    pub limits: AxisLimits,
    pub title: String,
    pub x_label: String,
    pub y_label: String,

    /// State component plotted against τ.
    pub component: usize,

    /// Line width in points.
    pub line_width: f64,
}

impl SeriesStyle {
    /// The published figure: 8 × 4 in, `Δφ` against τ, fitted with a 5 %
    /// margin.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Size`] if `dpi` is zero.
    pub fn paper(dpi: u32) -> Result<Self, RenderError> {
        Ok(Self {
            size: FigureSize::new(8.0, 4.0, dpi)?,
            limits: AxisLimits::Auto { padding: 0.05 },
            title: "Emergence of a Time-Crystalline Phase".into(),
            x_label: "relational parameter τ".into(),
            y_label: "Δφ(τ)".into(),
            component: 0,
            line_width: 1.5,
        })
    }
}

/// Renders one component of `trajectory` against τ into `path`.
///
/// # Errors
///
/// Returns an error if the trajectory is empty, the limits are invalid, the
/// output directory cannot be created, or drawing fails.
pub fn render_time_series<const N: usize>(
    trajectory: &Trajectory<N>,
    style: &SeriesStyle,
    path: impl AsRef<Path>,
) -> Result<Figure, RenderError> {
    let path = path.as_ref();
    let segment = trajectory.as_segment();
    let data = time_bounds(&segment, style.component).ok_or(RenderError::EmptyTrajectory)?;
    let limits = style.limits.resolve(Some(data))?;

    let scene = Series {
        segment,
        style,
        limits,
    };
    canvas::render(path, &style.size, &scene)?;

    let figure = Figure::new(path, style.size.pixels(), limits);
    tracing::info!(path = %path.display(), pixels = ?figure.pixels(), "saved time series");
    Ok(figure)
}

/// Bounds of `(τ, state[component])`.
fn time_bounds<const N: usize>(segment: &Segment<'_, N>, component: usize) -> Option<Bounds> {
    let (first, last) = (segment.times().first()?, segment.times().last()?);
    let (y_min, y_max) = segment
        .component(component)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
    Some(Bounds {
        x_min: *first,
        x_max: *last,
        y_min,
        y_max,
    })
}

struct Series<'a, const N: usize> {
    segment: Segment<'a, N>,
    style: &'a SeriesStyle,
    limits: Bounds,
}

impl<const N: usize> Scene for Series<'_, N> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let size = &self.style.size;
        let limits = &self.limits;

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .caption(&self.style.title, (FONT, size.font(12.0)))
            .margin(size.px(8.0))
            .x_label_area_size(size.px(32.0))
            .y_label_area_size(size.px(40.0))
            .build_cartesian_2d(limits.x_min..limits.x_max, limits.y_min..limits.y_max)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(self.style.x_label.as_str())
            .y_desc(self.style.y_label.as_str())
            .axis_desc_style((FONT, size.font(10.0)))
            .label_style((FONT, size.font(10.0)))
            .draw()?;

        let c = self.style.component;
        chart.draw_series(LineSeries::new(
            self.segment.times().iter().zip(self.segment.states()).map(|(&t, s)| (t, s[c])),
            C0_BLUE.stroke_width(size.px(self.style.line_width)),
        ))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use relclock_oscillator::StateVector;

    #[test]
    fn bounds_span_time_and_component() {
        let traj: Trajectory<2> = (0..=10)
            .map(|i| {
                let t = f64::from(i);
                (t, StateVector([t.sin(), 0.0]))
            })
            .collect();
        let b = time_bounds(&traj.as_segment(), 0).unwrap();

        assert_eq!((b.x_min, b.x_max), (0.0, 10.0));
        assert!(b.y_min < -0.95 && b.y_max > 0.95);
    }

    #[test]
    fn paper_style() {
        let style = SeriesStyle::paper(200).unwrap();
        assert_eq!(style.size.pixels(), (1600, 800));
        assert_eq!(style.component, 0);
    }
}
