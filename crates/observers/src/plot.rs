//! Interactive trace viewer.
//!
//! See [`PlotWindow`] for usage.

use eframe::egui;
use egui_plot::{HLine, Legend, Line, Plot, PlotPoints, VLine};

/// Configuration for rendering a [`PlotWindow`] window.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
pub struct ShowConfig {
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    legend: bool,
    square: bool,
    axes: bool,
}

impl ShowConfig {
    /// Creates a config with no title, no labels, no legend, free aspect.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            legend: false,
            square: false,
            axes: false,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the axis labels.
    #[must_use]
    pub fn labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = Some(x.into());
        self.y_label = Some(y.into());
        self
    }

    /// Enables a legend labeling each trace by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Locks the data aspect ratio to 1:1, as a phase portrait wants.
    #[must_use]
    pub fn square(mut self) -> Self {
        self.square = true;
        self
    }

    /// Draws the `x = 0` and `y = 0` axis lines.
    #[must_use]
    pub fn axes(mut self) -> Self {
        self.axes = true;
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects `N` named traces and displays them in an egui window.
///
/// Points are kept in recording order, so a trace drawn from a trajectory's
/// `(Δφ, dΔφ/dτ)` pairs renders as the orbit rather than a function of x.
pub struct PlotWindow<const N: usize> {
    names: [String; N],
    data: [Vec<[f64; 2]>; N],
}

impl<const N: usize> PlotWindow<N> {
    /// Creates a new `PlotWindow` with the given trace names.
    pub fn new(names: [&str; N]) -> Self {
        Self {
            names: names.map(str::to_owned),
            data: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Records a whole series of points into one trace.
    pub fn extend(&mut self, trace: usize, points: impl IntoIterator<Item = [f64; 2]>) {
        self.data[trace].extend(points);
    }

    /// Opens a blocking egui window displaying all collected traces.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let title = config.title.clone().unwrap_or_default();
        let traces: Vec<(String, Vec<[f64; 2]>)> = self.names.into_iter().zip(self.data).collect();

        eframe::run_native(
            &title,
            eframe::NativeOptions::default(),
            Box::new(move |_cc| Ok(Box::new(PlotApp { traces, config }))),
        )
    }
}

struct PlotApp {
    traces: Vec<(String, Vec<[f64; 2]>)>,
    config: ShowConfig,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("relclock_plot");
            if self.config.legend {
                plot = plot.legend(Legend::default());
            }
            if self.config.square {
                plot = plot.data_aspect(1.0);
            }
            if let Some(label) = &self.config.x_label {
                plot = plot.x_axis_label(label.clone());
            }
            if let Some(label) = &self.config.y_label {
                plot = plot.y_axis_label(label.clone());
            }
            let axes = self.config.axes;
            plot.show(ui, |plot_ui| {
                if axes {
                    plot_ui.hline(HLine::new(0.0));
                    plot_ui.vline(VLine::new(0.0));
                }
                for (name, points) in &self.traces {
                    let points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(name));
                }
            });
        });
    }
}
