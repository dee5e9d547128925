use relclock_core::{DerivativeOf, Model, OdeProblem, Rate, StateVector};

use super::Error;

/// Wraps a model/problem pair, tags failures with the current step, and
/// counts model evaluations.
pub(crate) struct Evaluator<'a, M, P> {
    model: &'a M,
    problem: &'a P,
    pub(crate) calls: usize,
}

impl<'a, M, P> Evaluator<'a, M, P>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
{
    pub(crate) fn new(model: &'a M, problem: &'a P) -> Self {
        Self {
            model,
            problem,
            calls: 0,
        }
    }

    pub(crate) fn call(&mut self, step: usize, input: &M::Input) -> Result<M::Output, Error> {
        self.calls += 1;
        self.model.call(input).map_err(|e| Error::model(step, e))
    }

    pub(crate) fn state(&self, step: usize, input: &M::Input) -> Result<P::State, Error> {
        self.problem
            .state(input)
            .map_err(|e| Error::problem(step, e))
    }

    pub(crate) fn derivative(
        &self,
        step: usize,
        input: &M::Input,
        output: &M::Output,
    ) -> Result<DerivativeOf<P::State, P::Delta>, Error> {
        self.problem
            .derivative(input, output)
            .map_err(|e| Error::problem(step, e))
    }

    pub(crate) fn build_input(
        &self,
        step: usize,
        base: &M::Input,
        state: &P::State,
        delta: &P::Delta,
    ) -> Result<M::Input, Error> {
        self.problem
            .build_input(base, state, delta)
            .map_err(|e| Error::problem(step, e))
    }

    /// Builds and finalizes the input for an accepted step.
    pub(crate) fn accept(
        &self,
        step: usize,
        base: &M::Input,
        base_output: &M::Output,
        state: &P::State,
        delta: &P::Delta,
    ) -> Result<M::Input, Error> {
        let next = self.build_input(step, base, state, delta)?;
        self.problem
            .finalize_step(next, base, base_output, delta)
            .map_err(|e| Error::problem(step, e))
    }

    /// Evaluates the rate at an intermediate stage `delta` past `base`.
    pub(crate) fn rate_at<const N: usize>(
        &mut self,
        step: usize,
        base: &M::Input,
        state: &StateVector<N>,
        delta: f64,
    ) -> Result<Rate<N>, Error>
    where
        P: OdeProblem<Delta = f64, State = StateVector<N>>,
    {
        let input = self.build_input(step, base, state, &delta)?;
        let output = self.call(step, &input)?;
        self.derivative(step, &input, &output)
    }
}
