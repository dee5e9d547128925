//! Backend selection and drawing helpers shared by the figures.

use std::{fmt::Display, fs, path::Path, sync::OnceLock};

use plotters::{
    coord::{Shift, types::RangedCoordf64},
    prelude::*,
    style::{FontStyle, register_font},
};
use relclock_oscillator::Bounds;

use crate::{Annotation, FigureSize, RenderError};

/// Matplotlib's default color cycle, which the published figures use.
pub(crate) const C0_BLUE: RGBColor = RGBColor(31, 119, 180);
pub(crate) const C1_ORANGE: RGBColor = RGBColor(255, 127, 14);
pub(crate) const C2_GREEN: RGBColor = RGBColor(44, 160, 44);
pub(crate) const C3_RED: RGBColor = RGBColor(214, 39, 40);
pub(crate) const C4_PURPLE: RGBColor = RGBColor(148, 103, 189);

pub(crate) const FONT: &str = "sans-serif";

static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

pub(crate) type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

pub(crate) type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Something that can draw itself onto any plotters backend.
pub(crate) trait Scene {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB>;
}

/// Draws `scene` into `path`, picking the backend from the extension.
pub(crate) fn render(path: &Path, size: &FigureSize, scene: &impl Scene) -> Result<(), RenderError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| RenderError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    register_fonts()?;

    let pixels = size.pixels();
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, pixels).into_drawing_area();
        scene
            .draw(&root)
            .and_then(|()| root.present())
            .map_err(|e| draw_error(path, e))
    } else {
        let root = BitMapBackend::new(path, pixels).into_drawing_area();
        scene
            .draw(&root)
            .and_then(|()| root.present())
            .map_err(|e| draw_error(path, e))
    }
}

/// Makes the bundled face available to plotters as [`FONT`].
///
/// Plotters keeps a process-wide font table, so this runs at most once.
fn register_fonts() -> Result<(), RenderError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();

    let registered =
        *REGISTERED.get_or_init(|| register_font(FONT, FontStyle::Normal, DEJAVU_SANS).is_ok());
    if registered {
        Ok(())
    } else {
        Err(RenderError::Font { family: FONT })
    }
}

fn draw_error(path: &Path, e: impl Display) -> RenderError {
    RenderError::Draw {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

/// Draws the `x = 0` and `y = 0` lines where they fall inside `limits`.
pub(crate) fn draw_axes<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    limits: &Bounds,
    width: u32,
) -> DrawResult<DB> {
    if (limits.y_min..=limits.y_max).contains(&0.0) {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(limits.x_min, 0.0), (limits.x_max, 0.0)],
            C2_GREEN.stroke_width(width),
        )))?;
    }
    if (limits.x_min..=limits.x_max).contains(&0.0) {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, limits.y_min), (0.0, limits.y_max)],
            C3_RED.stroke_width(width),
        )))?;
    }
    Ok(())
}

/// Draws each annotation as a shaft from its label to its anchor, an
/// arrowhead at the anchor, and the label text one line per row.
pub(crate) fn draw_annotations<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    annotations: &[Annotation],
    limits: &Bounds,
    size: &FigureSize,
    font_pt: f64,
) -> DrawResult<DB> {
    let stroke = BLACK.stroke_width(size.px(1.2));
    let font = size.font(font_pt);
    #[allow(clippy::cast_possible_truncation)]
    let line_height = (font * 1.2).round() as i32;

    for annotation in annotations {
        chart.draw_series([
            PathElement::new(vec![annotation.label, annotation.anchor], stroke),
            PathElement::new(arrow_head(annotation.label, annotation.anchor, limits).to_vec(), stroke),
        ])?;

        let style = (FONT, font).into_font().color(&BLACK);
        chart.draw_series(annotation.text.lines().zip(0..).map(|(line, row)| {
            EmptyElement::at(annotation.label)
                + Text::new(line.to_string(), (0, row * line_height), style.clone())
        }))?;
    }
    Ok(())
}

/// The two barbs and tip of an arrowhead at `to`, sized relative to the
/// axis spans so it looks the same on any window.
fn arrow_head(from: (f64, f64), to: (f64, f64), limits: &Bounds) -> [(f64, f64); 3] {
    const LENGTH: f64 = 0.025;
    const SPREAD: f64 = 0.4;

    let (sx, sy) = (limits.x_max - limits.x_min, limits.y_max - limits.y_min);
    let angle = ((to.1 - from.1) / sy).atan2((to.0 - from.0) / sx);

    let barb = |offset: f64| {
        let a = angle + std::f64::consts::PI + offset;
        (to.0 + LENGTH * sx * a.cos(), to.1 + LENGTH * sy * a.sin())
    };
    [barb(SPREAD), to, barb(-SPREAD)]
}
