//! Core traits and types for the relclock workspace.
//!
//! This crate defines the shared abstractions that solvers, observers, and
//! oscillator models build on:
//!
//! - [`Model`] — a callable that maps a typed input to a typed output
//! - [`Snapshot`] — a captured input/output pair from a model call
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`OdeProblem`] — adapts an ODE state to model inputs and extracts
//!   derivatives from outputs
//! - [`StateVector`] and [`Rate`] — fixed-dimension state and derivative
//!   vectors for multi-stage integrators

mod model;
mod observer;
mod problems;
mod step;
mod vector;

pub use observer::Observer;
pub use problems::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
pub use vector::{Rate, StateVector};
pub use {model::Model, model::Snapshot};
