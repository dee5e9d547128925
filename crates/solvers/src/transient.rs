//! Solvers for transient ODE problems.
//!
//! # Solvers
//!
//! - [`euler`] — explicit forward Euler, generic over any [`StepIntegrable`] state
//! - [`euler_cromer`] — semi-implicit Euler for `[positions, velocities]` states
//! - [`rk4`] — classic fixed-step fourth-order Runge–Kutta
//! - [`dopri5`] — adaptive Dormand–Prince 5(4) with local error control
//!
//! The fixed-step solvers share [`Event`], [`Action`], [`Solution`], and
//! [`Error`]. The adaptive solver emits its own [`dopri5::Event`], which also
//! carries the accepted step size and error estimate.
//!
//! [`StepIntegrable`]: relclock_core::StepIntegrable

mod action;
mod error;
mod evaluate;
mod event;
mod march;
mod solution;

pub mod dopri5;
pub mod euler;
pub mod euler_cromer;
pub mod rk4;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

#[cfg(test)]
pub(crate) mod test_utils;
