use relclock_solvers::transient;
use thiserror::Error;

/// Errors raised while evaluating an oscillator's vector field.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OscillatorError {
    #[error("non-finite state {state:?} at τ = {tau}")]
    NonFiniteState { tau: f64, state: Vec<f64> },

    #[error("non-finite rate at τ = {tau}")]
    NonFiniteRate { tau: f64 },
}

/// A coefficient outside the supported parameter range.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParameterError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("{name} must be non-negative, got {value} (negative damping is not supported)")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// Errors returned by [`integrate`](crate::integrate).
#[derive(Debug, Error)]
pub enum IntegrateError {
    #[error("invalid time span [{start}, {end}]: end must be finite and after start")]
    Span { start: f64, end: f64 },

    #[error("a fixed-step run needs at least 2 samples, got {0}")]
    Samples(usize),

    #[error("initial state {0:?} is not finite")]
    InitialState(Vec<f64>),

    #[error("integration stopped before reaching the end of the span")]
    Incomplete,

    #[error(transparent)]
    Solver(#[from] transient::Error),
}

impl IntegrateError {
    /// Returns `true` if the run failed because the state diverged to a
    /// non-finite value, whether the solver or the vector field caught it.
    #[must_use]
    pub fn is_divergence(&self) -> bool {
        match self {
            Self::Solver(transient::Error::NonFinite { .. }) => true,
            Self::Solver(transient::Error::Model { source, .. }) => {
                source.downcast_ref::<OscillatorError>().is_some()
            }
            _ => false,
        }
    }
}
