//! Reusable observers for relclock integrators.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the fixed-step and adaptive solvers.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasProgress`])
//! - [`ProgressObserver`] — logs integration progress through `tracing`
//!
//! # Features
//!
//! - `plot` — Enables [`PlotWindow`] for viewing trajectories in an egui
//!   window. This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Observer`]: relclock_core::Observer
//! [`HasProgress`]: traits::HasProgress

pub mod traits;

mod progress;

#[cfg(feature = "plot")]
mod plot;

pub use progress::ProgressObserver;

#[cfg(feature = "plot")]
pub use plot::{PlotWindow, ShowConfig};
