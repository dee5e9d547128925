//! Numerical integrators for the relclock workspace.
//!
//! Every solver here drives a [`Model`] through an [`OdeProblem`], reports
//! each accepted step to an [`Observer`], and returns the full history as a
//! [`transient::Solution`].
//!
//! [`Model`]: relclock_core::Model
//! [`OdeProblem`]: relclock_core::OdeProblem
//! [`Observer`]: relclock_core::Observer

pub mod transient;
