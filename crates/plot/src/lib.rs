//! Publication figures for relclock trajectories.
//!
//! Two figures are provided:
//!
//! - [`render_phase_portrait`] draws a trajectory in the `(Δφ, dΔφ/dτ)`
//!   plane, with the transient thin and the limit cycle thick, and the
//!   annotations of the published figure.
//! - [`render_time_series`] draws `Δφ(τ)` against τ.
//!
//! Output format follows the file extension: `.svg` writes vector output,
//! anything else goes through the bitmap encoder (PNG for `.png`). Parent
//! directories are created as needed. Both functions return a [`Figure`]
//! describing what was written, including the axis limits actually used.

mod canvas;
mod error;
mod figure;
mod portrait;
mod series;

pub use error::RenderError;
pub use figure::{Annotation, AxisLimits, Figure, FigureSize};
pub use portrait::{PortraitStyle, paper_annotations, render_phase_portrait};
pub use series::{SeriesStyle, render_time_series};
