//! Run settings: command-line flags over an optional TOML file over the
//! defaults of the published figures.

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::args::{Method, PortraitArgs, TimeSeriesArgs};

/// Contents of a `--config` file. Every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub portrait: PortraitConfig,
    #[serde(default)]
    pub timeseries: TimeSeriesConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PortraitConfig {
    pub mu: Option<f64>,
    pub dt: Option<f64>,
    pub steps: Option<usize>,
    pub x0: Option<f64>,
    pub v0: Option<f64>,
    pub transient: Option<usize>,
    pub out: Option<PathBuf>,
    pub dpi: Option<u32>,
    pub method: Option<Method>,
    pub auto_limits: Option<bool>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TimeSeriesConfig {
    pub epsilon: Option<f64>,
    pub omega0: Option<f64>,
    pub dt: Option<f64>,
    pub steps: Option<usize>,
    pub phi0: Option<f64>,
    pub phidot0: Option<f64>,
    pub out: Option<PathBuf>,
    pub dpi: Option<u32>,
    pub method: Option<Method>,
}

impl RunConfig {
    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
    }
}

/// Fully resolved settings for the phase portrait.
#[derive(Debug, Clone, PartialEq)]
pub struct PortraitSettings {
    pub mu: f64,
    pub dt: f64,
    pub steps: usize,
    pub x0: f64,
    pub v0: f64,
    pub transient: usize,
    pub out: PathBuf,
    pub dpi: u32,
    pub method: Method,
    pub auto_limits: bool,
}

impl PortraitSettings {
    pub fn resolve(args: &PortraitArgs, file: &PortraitConfig) -> Self {
        Self {
            mu: args.mu.or(file.mu).unwrap_or(1.2),
            dt: args.dt.or(file.dt).unwrap_or(0.01),
            steps: args.steps.or(file.steps).unwrap_or(20_000),
            x0: args.x0.or(file.x0).unwrap_or(0.1),
            v0: args.v0.or(file.v0).unwrap_or(0.0),
            transient: args.transient.or(file.transient).unwrap_or(12_000),
            out: args
                .out
                .clone()
                .or_else(|| file.out.clone())
                .unwrap_or_else(|| PathBuf::from("figs/figs_phase_portrait_emergent_time.png")),
            dpi: args.dpi.or(file.dpi).unwrap_or(300),
            method: args.method.or(file.method).unwrap_or(Method::EulerCromer),
            auto_limits: args.auto_limits || file.auto_limits.unwrap_or(false),
        }
    }
}

/// Fully resolved settings for the time series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSettings {
    pub epsilon: f64,
    pub omega0: f64,
    pub dt: f64,
    pub steps: usize,
    pub phi0: f64,
    pub phidot0: f64,
    pub out: PathBuf,
    pub dpi: u32,
    pub method: Method,
}

impl SeriesSettings {
    pub fn resolve(args: &TimeSeriesArgs, file: &TimeSeriesConfig) -> Self {
        Self {
            epsilon: args.epsilon.or(file.epsilon).unwrap_or(0.3),
            omega0: args.omega0.or(file.omega0).unwrap_or(1.0),
            dt: args.dt.or(file.dt).unwrap_or(0.01),
            steps: args.steps.or(file.steps).unwrap_or(20_000),
            phi0: args.phi0.or(file.phi0).unwrap_or(0.1),
            phidot0: args.phidot0.or(file.phidot0).unwrap_or(0.0),
            out: args
                .out
                .clone()
                .or_else(|| file.out.clone())
                .unwrap_or_else(|| PathBuf::from("figs/delta_phi_limit_cycle.png")),
            dpi: args.dpi.or(file.dpi).unwrap_or(200),
            method: args.method.or(file.method).unwrap_or(Method::EulerCromer),
        }
    }
}
