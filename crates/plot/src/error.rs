use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while rendering a figure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to draw: the trajectory is empty")]
    EmptyTrajectory,

    #[error("invalid axis limits x [{x_min}, {x_max}], y [{y_min}, {y_max}]")]
    Limits {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    #[error("invalid figure size {width_in} x {height_in} in at {dpi} dpi")]
    Size {
        width_in: f64,
        height_in: f64,
        dpi: u32,
    },

    #[error("bundled font for `{family}` could not be loaded")]
    Font { family: &'static str },

    #[error("failed to create output directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to draw {}: {reason}", path.display())]
    Draw { path: PathBuf, reason: String },
}
