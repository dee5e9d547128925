//! Explicit forward Euler.
//!
//! ```text
//! state_{n+1} = state_n + derivative_n * dt
//! ```
//!
//! First-order accurate and not energy-preserving: on an undamped oscillator
//! the amplitude grows by a factor of roughly `1 + (ω dt)² / 2` per step. It
//! works with any [`StepIntegrable`] state, which makes it the only solver
//! here that does not require a [`StateVector`](relclock_core::StateVector).

use relclock_core::{Model, Observer, OdeProblem, StepIntegrable};

use super::{Action, Error, Event, Solution, evaluate::Evaluator, march::march};

/// Integrates an ODE problem using forward Euler.
///
/// # Algorithm
///
/// 1. Call the model with the initial input to get the initial snapshot.
/// 2. For each step:
///    - Extract the state and derivative from the current snapshot.
///    - Step the state forward: `state + derivative * dt`.
///    - Build and finalize the next input, then call the model.
///    - Emit an [`Event`]; stop if the observer returns [`Action::StopEarly`].
/// 3. Return the solution with the full history.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let eval = Evaluator::new(model, problem);

    march(eval, initial, steps, observer, |eval, step, current| {
        let state = eval.state(step, &current.input)?;
        let derivative = eval.derivative(step, &current.input, &current.output)?;
        let next_state = state.step(derivative, dt.clone());

        eval.accept(step, &current.input, &current.output, &next_state, &dt)
    })
}

/// Integrates an ODE problem using forward Euler without observation.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    solve(model, problem, initial, dt, steps, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use relclock_core::DerivativeOf;

    use crate::transient::{
        Status,
        test_utils::{FailsAfter, Harmonic, Input, VectorProblem},
    };

    // --- Scalar phase fixture ---

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Phase(f64);

    #[derive(Debug, Clone, Copy)]
    struct Frequency(f64);

    impl StepIntegrable<f64> for Phase {
        type Derivative = Frequency;

        fn step(&self, derivative: Frequency, dt: f64) -> Self {
            Phase(self.0 + derivative.0 * dt)
        }
    }

    #[derive(Debug, Clone)]
    struct ClockInput {
        phase: Phase,
        tau: f64,
    }

    /// A clock that winds at a constant frequency.
    struct UniformClock {
        frequency: f64,
    }

    impl Model for UniformClock {
        type Input = ClockInput;
        type Output = Frequency;
        type Error = Infallible;

        fn call(&self, _input: &ClockInput) -> Result<Frequency, Infallible> {
            Ok(Frequency(self.frequency))
        }
    }

    struct ClockProblem;

    impl OdeProblem for ClockProblem {
        type Input = ClockInput;
        type Output = Frequency;
        type Delta = f64;
        type State = Phase;
        type Error = Infallible;

        fn state(&self, input: &ClockInput) -> Result<Phase, Infallible> {
            Ok(input.phase)
        }

        fn derivative(
            &self,
            _input: &ClockInput,
            output: &Frequency,
        ) -> Result<DerivativeOf<Phase, f64>, Infallible> {
            Ok(*output)
        }

        fn build_input(
            &self,
            base: &ClockInput,
            state: &Phase,
            delta: &f64,
        ) -> Result<ClockInput, Infallible> {
            Ok(ClockInput {
                phase: *state,
                tau: base.tau + delta,
            })
        }
    }

    fn clock_start(phase: f64) -> ClockInput {
        ClockInput {
            phase: Phase(phase),
            tau: 0.0,
        }
    }

    // --- Tests ---

    #[test]
    fn uniform_clock_winds_linearly() {
        let model = UniformClock { frequency: 2.0 };

        let solution = solve_unobserved(&model, &ClockProblem, clock_start(0.0), 0.1, 10)
            .expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 10);
        assert_eq!(solution.history.len(), 11);
        assert_eq!(solution.evaluations, 11);

        let last = solution.history.last().unwrap();
        assert_relative_eq!(last.input.phase.0, 2.0);
        assert_relative_eq!(last.input.tau, 1.0);
    }

    #[test]
    fn observer_can_stop_early() {
        let model = UniformClock { frequency: 1.0 };

        let observer = |event: &Event<ClockInput, Frequency>| {
            (event.step >= 5).then_some(Action::StopEarly)
        };

        let solution = solve(&model, &ClockProblem, clock_start(0.0), 0.1, 100, observer)
            .expect("should stop early");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.history.len(), 6);
    }

    #[test]
    fn zero_steps_returns_initial() {
        let model = UniformClock { frequency: 1.0 };

        let solution = solve_unobserved(&model, &ClockProblem, clock_start(5.0), 0.1, 0)
            .expect("should return initial");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.history.len(), 1);
        assert_relative_eq!(solution.history[0].input.phase.0, 5.0);
    }

    #[test]
    fn events_report_step_and_total() {
        let model = UniformClock { frequency: 1.0 };

        let mut seen = Vec::new();
        solve(
            &model,
            &ClockProblem,
            clock_start(0.0),
            0.25,
            4,
            |event: &Event<ClockInput, Frequency>| {
                seen.push((event.step, event.steps));
                None
            },
        )
        .expect("should solve");

        assert_eq!(seen, vec![(0, 4), (1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[test]
    fn undamped_oscillator_amplitude_grows() {
        let model = Harmonic { omega: 1.0 };
        let solution = solve_unobserved(
            &model,
            &VectorProblem::<2>,
            Input::at_origin([1.0, 0.0]),
            0.01,
            1000,
        )
        .expect("should solve");

        let last = solution.history.last().unwrap().input.y;
        let energy = last[0].powi(2) + last[1].powi(2);
        assert!(energy > 1.05, "explicit Euler should gain energy, got {energy}");
    }

    #[test]
    fn model_error_carries_step() {
        let model = FailsAfter { limit: 0.35 };
        let err = solve_unobserved(
            &model,
            &VectorProblem::<1>,
            Input::at_origin([0.0]),
            0.1,
            10,
        )
        .unwrap_err();

        match err {
            Error::Model { step, .. } => assert_eq!(step, 4),
            other => panic!("unexpected error: {other}"),
        }
    }
}
