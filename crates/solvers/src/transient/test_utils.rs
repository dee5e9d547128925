//! Fixtures shared by the transient solver tests.

use std::convert::Infallible;

use relclock_core::{DerivativeOf, Model, OdeProblem, Rate, StateVector};
use thiserror::Error;

/// Model input: independent variable plus state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Input<const N: usize> {
    pub(crate) t: f64,
    pub(crate) y: StateVector<N>,
}

impl<const N: usize> Input<N> {
    pub(crate) fn at_origin(y: [f64; N]) -> Self {
        Self {
            t: 0.0,
            y: StateVector(y),
        }
    }
}

/// Linear oscillator `y0' = y1`, `y1' = −ω² y0`.
pub(crate) struct Harmonic {
    pub(crate) omega: f64,
}

impl Model for Harmonic {
    type Input = Input<2>;
    type Output = Rate<2>;
    type Error = Infallible;

    fn call(&self, input: &Input<2>) -> Result<Rate<2>, Infallible> {
        let [x, v] = input.y.0;
        Ok(Rate([v, -self.omega * self.omega * x]))
    }
}

/// Scalar growth `y' = y²`, which blows up at `t = 1 / y(0)`.
pub(crate) struct Blowup;

impl Model for Blowup {
    type Input = Input<1>;
    type Output = Rate<1>;
    type Error = Infallible;

    fn call(&self, input: &Input<1>) -> Result<Rate<1>, Infallible> {
        Ok(Rate([input.y[0] * input.y[0]]))
    }
}

#[derive(Debug, Error)]
#[error("refused to evaluate past t = {0}")]
pub(crate) struct Refused(pub(crate) f64);

/// Constant unit rate that fails once `t` exceeds a limit.
pub(crate) struct FailsAfter {
    pub(crate) limit: f64,
}

impl Model for FailsAfter {
    type Input = Input<1>;
    type Output = Rate<1>;
    type Error = Refused;

    fn call(&self, input: &Input<1>) -> Result<Rate<1>, Refused> {
        if input.t > self.limit {
            Err(Refused(input.t))
        } else {
            Ok(Rate([1.0]))
        }
    }
}

/// Problem whose model output is the rate itself.
pub(crate) struct VectorProblem<const N: usize>;

impl<const N: usize> OdeProblem for VectorProblem<N> {
    type Input = Input<N>;
    type Output = Rate<N>;
    type Delta = f64;
    type State = StateVector<N>;
    type Error = Infallible;

    fn state(&self, input: &Input<N>) -> Result<StateVector<N>, Infallible> {
        Ok(input.y)
    }

    fn derivative(
        &self,
        _input: &Input<N>,
        output: &Rate<N>,
    ) -> Result<DerivativeOf<StateVector<N>, f64>, Infallible> {
        Ok(*output)
    }

    fn build_input(
        &self,
        base: &Input<N>,
        state: &StateVector<N>,
        delta: &f64,
    ) -> Result<Input<N>, Infallible> {
        Ok(Input {
            t: base.t + delta,
            y: *state,
        })
    }
}
