//! Nonlinear phase oscillators for the relational clock.
//!
//! The relational phase `Δφ` and its rate `dΔφ/dτ` evolve under a nonlinear
//! second-order equation whose origin is unstable and whose trajectories
//! settle onto a stable limit cycle. Two such systems are provided:
//!
//! - [`VanDerPol`] — `Δφ'' = μ (1 − Δφ²) Δφ' − Δφ`
//! - [`RelationalPhase`] — `Δφ'' = −ε (Δφ² − 1) Δφ' − ω0² sin Δφ`
//!
//! [`integrate`] advances either system from an initial state over a
//! [`TimeSpan`] according to a [`StepPolicy`], producing a [`Trajectory`]
//! that can be analyzed for convergence onto the cycle and handed to the
//! plotting crate.
//!
//! # Example
//!
//! ```no_run
//! use relclock_oscillator::{
//!     FixedMethod, StepPolicy, TimeSpan, VanDerPol, integrate, StateVector,
//! };
//!
//! let vdp = VanDerPol::new(1.0)?;
//! let span = TimeSpan::new(0.0, 50.0)?;
//! let policy = StepPolicy::fixed(FixedMethod::Rk4, 1000)?;
//!
//! let trajectory = integrate(&vdp, StateVector([0.1, 0.0]), span, &policy, ())?;
//! let peaks = trajectory.tail(200).peaks(0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod field;
mod integrate;
mod params;
mod policy;
mod trajectory;

pub use error::{IntegrateError, OscillatorError, ParameterError};
pub use field::{Dynamics, PhaseInput, PhaseProblem, VectorField};
pub use integrate::{integrate, integrate_each};
pub use params::{RelationalPhase, VanDerPol};
pub use policy::{FixedMethod, StepPolicy, TimeSpan};
pub use trajectory::{Bounds, Peak, Segment, Trajectory};

pub use relclock_core::{Rate, StateVector};
