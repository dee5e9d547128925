use std::path::{Path, PathBuf};

use relclock_oscillator::Bounds;

use crate::RenderError;

/// Physical figure size; pixel dimensions are inches times dpi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    width_in: f64,
    height_in: f64,
    dpi: u32,
}

impl FigureSize {
    /// Creates a figure size.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Size`] unless both dimensions are finite and
    /// positive and `dpi` is non-zero.
    pub fn new(width_in: f64, height_in: f64, dpi: u32) -> Result<Self, RenderError> {
        let valid = |d: f64| d.is_finite() && d > 0.0;
        if valid(width_in) && valid(height_in) && dpi > 0 {
            Ok(Self {
                width_in,
                height_in,
                dpi,
            })
        } else {
            Err(RenderError::Size {
                width_in,
                height_in,
                dpi,
            })
        }
    }

    #[must_use]
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Width and height in pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixels(&self) -> (u32, u32) {
        let scale = f64::from(self.dpi);
        (
            (self.width_in * scale).round().max(1.0) as u32,
            (self.height_in * scale).round().max(1.0) as u32,
        )
    }

    /// Converts typographic points (1/72 in) to whole pixels, at least one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn px(&self, points: f64) -> u32 {
        (points * f64::from(self.dpi) / 72.0).round().max(1.0) as u32
    }

    /// Converts typographic points to a font size in pixels.
    pub(crate) fn font(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }
}

/// How a figure chooses its axis ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisLimits {
    /// Use these limits regardless of the data.
    Fixed(Bounds),

    /// Fit the data, grown by `padding` times each span on every side.
    Auto { padding: f64 },
}

impl AxisLimits {
    /// The `[-3.5, 3.5]²` window of the published phase portrait.
    pub const PAPER: Self = Self::Fixed(Bounds {
        x_min: -3.5,
        x_max: 3.5,
        y_min: -3.5,
        y_max: 3.5,
    });

    /// Resolves the limits against the data bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyTrajectory`] if automatic limits are
    /// requested without data, and [`RenderError::Limits`] if the result is
    /// not a finite, non-empty window.
    pub fn resolve(&self, data: Option<Bounds>) -> Result<Bounds, RenderError> {
        let limits = match *self {
            Self::Fixed(bounds) => bounds,
            Self::Auto { padding } => {
                let data = data.ok_or(RenderError::EmptyTrajectory)?;
                if !(padding.is_finite() && padding >= 0.0) {
                    return Err(limits_error(&data));
                }
                data.padded(padding)
            }
        };

        let finite = [limits.x_min, limits.x_max, limits.y_min, limits.y_max]
            .iter()
            .all(|v| v.is_finite());
        if finite && limits.x_min < limits.x_max && limits.y_min < limits.y_max {
            Ok(limits)
        } else {
            Err(limits_error(&limits))
        }
    }
}

fn limits_error(b: &Bounds) -> RenderError {
    RenderError::Limits {
        x_min: b.x_min,
        x_max: b.x_max,
        y_min: b.y_min,
        y_max: b.y_max,
    }
}

/// A text label with an arrow pointing at a location in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Label text; `\n` separates lines.
    pub text: String,
    /// Where the arrow points.
    pub anchor: (f64, f64),
    /// Where the label's first line starts.
    pub label: (f64, f64),
}

impl Annotation {
    pub fn new(text: impl Into<String>, anchor: (f64, f64), label: (f64, f64)) -> Self {
        Self {
            text: text.into(),
            anchor,
            label,
        }
    }
}

/// A rendered figure on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    path: PathBuf,
    pixels: (u32, u32),
    limits: Bounds,
}

impl Figure {
    pub(crate) fn new(path: &Path, pixels: (u32, u32), limits: Bounds) -> Self {
        Self {
            path: path.to_path_buf(),
            pixels,
            limits,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Width and height in pixels.
    #[must_use]
    pub fn pixels(&self) -> (u32, u32) {
        self.pixels
    }

    /// The axis limits the figure was drawn with.
    #[must_use]
    pub fn limits(&self) -> Bounds {
        self.limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn pixels_scale_with_dpi() {
        let size = FigureSize::new(7.5, 7.5, 300).unwrap();
        assert_eq!(size.pixels(), (2250, 2250));
        assert_eq!(FigureSize::new(8.0, 4.0, 200).unwrap().pixels(), (1600, 800));
        assert_eq!(size.px(72.0), 300);
        assert_eq!(size.px(0.0), 1);
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(FigureSize::new(0.0, 4.0, 200).is_err());
        assert!(FigureSize::new(8.0, f64::NAN, 200).is_err());
        assert!(FigureSize::new(8.0, 4.0, 0).is_err());
    }

    #[test]
    fn auto_limits_pad_the_data() {
        let data = Bounds {
            x_min: -2.0,
            x_max: 2.0,
            y_min: -1.0,
            y_max: 3.0,
        };
        let limits = AxisLimits::Auto { padding: 0.25 }.resolve(Some(data)).unwrap();
        assert_relative_eq!(limits.x_min, -3.0);
        assert_relative_eq!(limits.x_max, 3.0);
        assert_relative_eq!(limits.y_min, -2.0);
        assert_relative_eq!(limits.y_max, 4.0);
    }

    #[test]
    fn fixed_limits_ignore_data() {
        assert_eq!(
            AxisLimits::PAPER.resolve(None).unwrap(),
            Bounds {
                x_min: -3.5,
                x_max: 3.5,
                y_min: -3.5,
                y_max: 3.5
            }
        );
    }

    #[test]
    fn invalid_limits_are_rejected() {
        assert!(matches!(
            AxisLimits::Auto { padding: 0.1 }.resolve(None),
            Err(RenderError::EmptyTrajectory)
        ));

        let inverted = AxisLimits::Fixed(Bounds {
            x_min: 1.0,
            x_max: -1.0,
            y_min: 0.0,
            y_max: 1.0,
        });
        assert!(matches!(inverted.resolve(None), Err(RenderError::Limits { .. })));

        let data = Bounds {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        };
        assert!(AxisLimits::Auto { padding: -0.1 }.resolve(Some(data)).is_err());
    }
}
