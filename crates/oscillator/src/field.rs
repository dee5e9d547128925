//! Adapters between a vector field and the solver framework.

use relclock_core::{DerivativeOf, Model, OdeProblem, Rate, StateVector};

use crate::OscillatorError;

/// The right-hand side of an oscillator's first-order system.
///
/// Implementations must be pure: the same `(tau, state)` always yields the
/// same rate, bit for bit.
pub trait VectorField<const N: usize> {
    /// A short name used in logs.
    fn name(&self) -> &'static str;

    /// The named coefficients of this parameter set.
    fn parameters(&self) -> Vec<(&'static str, f64)>;

    /// Evaluates `d state / dτ` at `(tau, state)`.
    fn derivative(&self, tau: f64, state: &StateVector<N>) -> Rate<N>;
}

/// Model input: the relational parameter τ and the oscillator state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseInput<const N: usize> {
    pub tau: f64,
    pub state: StateVector<N>,
}

/// A [`Model`] that evaluates a [`VectorField`], rejecting non-finite
/// states and rates.
#[derive(Debug, Clone, Copy)]
pub struct Dynamics<'a, F, const N: usize> {
    field: &'a F,
}

impl<'a, F: VectorField<N>, const N: usize> Dynamics<'a, F, N> {
    pub fn new(field: &'a F) -> Self {
        Self { field }
    }
}

impl<F: VectorField<N>, const N: usize> Model for Dynamics<'_, F, N> {
    type Input = PhaseInput<N>;
    type Output = Rate<N>;
    type Error = OscillatorError;

    fn call(&self, input: &PhaseInput<N>) -> Result<Rate<N>, OscillatorError> {
        let PhaseInput { tau, state } = *input;

        if !state.is_finite() || !tau.is_finite() {
            return Err(OscillatorError::NonFiniteState {
                tau,
                state: state.0.to_vec(),
            });
        }

        let rate = self.field.derivative(tau, &state);
        if rate.is_finite() {
            Ok(rate)
        } else {
            Err(OscillatorError::NonFiniteRate { tau })
        }
    }
}

/// The [`OdeProblem`] shared by every oscillator: the state is the input's
/// state, the derivative is the model output, and τ advances with each step.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseProblem<const N: usize>;

impl<const N: usize> OdeProblem for PhaseProblem<N> {
    type Input = PhaseInput<N>;
    type Output = Rate<N>;
    type Delta = f64;
    type State = StateVector<N>;
    type Error = std::convert::Infallible;

    fn state(&self, input: &PhaseInput<N>) -> Result<StateVector<N>, Self::Error> {
        Ok(input.state)
    }

    fn derivative(
        &self,
        _input: &PhaseInput<N>,
        output: &Rate<N>,
    ) -> Result<DerivativeOf<StateVector<N>, f64>, Self::Error> {
        Ok(*output)
    }

    fn build_input(
        &self,
        base: &PhaseInput<N>,
        state: &StateVector<N>,
        delta: &f64,
    ) -> Result<PhaseInput<N>, Self::Error> {
        Ok(PhaseInput {
            tau: base.tau + delta,
            state: *state,
        })
    }
}
