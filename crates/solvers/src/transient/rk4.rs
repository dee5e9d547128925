//! Classic fixed-step fourth-order Runge–Kutta.
//!
//! ```text
//! k1 = f(t,        y)
//! k2 = f(t + h/2,  y + h/2 k1)
//! k3 = f(t + h/2,  y + h/2 k2)
//! k4 = f(t + h,    y + h k3)
//! y' = y + h/6 (k1 + 2 k2 + 2 k3 + k4)
//! ```
//!
//! Four model evaluations per step; the fourth stage of one step is not
//! reused by the next because the accepted input is finalized and re-evaluated.

use relclock_core::{Model, Observer, OdeProblem, Rate, StateVector, StepIntegrable};

use super::{Action, Error, Event, Solution, evaluate::Evaluator, march::march};

/// Integrates an ODE problem using classic RK4.
///
/// # Errors
///
/// Returns an error if the model or problem fails, or if the state becomes
/// non-finite.
pub fn solve<M, P, Obs, const N: usize>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: f64,
    steps: usize,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64, State = StateVector<N>>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let eval = Evaluator::new(model, problem);
    let half = 0.5 * dt;

    march(eval, initial, steps, observer, |eval, step, current| {
        let base = &current.input;
        let y = eval.state(step, base)?;

        let k1 = eval.derivative(step, base, &current.output)?;
        let k2 = eval.rate_at(step, base, &y.step(k1, half), half)?;
        let k3 = eval.rate_at(step, base, &y.step(k2, half), half)?;
        let k4 = eval.rate_at(step, base, &y.step(k3, dt), dt)?;

        let slope = Rate::combine(&[
            (1.0 / 6.0, &k1),
            (1.0 / 3.0, &k2),
            (1.0 / 3.0, &k3),
            (1.0 / 6.0, &k4),
        ]);
        let next_state = y.step(slope, dt);

        if !next_state.is_finite() {
            return Err(Error::NonFinite {
                step,
                elapsed: dt * step as f64,
            });
        }

        eval.accept(step, base, &current.output, &next_state, &dt)
    })
}

/// Integrates an ODE problem using classic RK4 without observation.
///
/// # Errors
///
/// Returns an error if the model or problem fails, or if the state becomes
/// non-finite.
pub fn solve_unobserved<M, P, const N: usize>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: f64,
    steps: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64, State = StateVector<N>>,
{
    solve(model, problem, initial, dt, steps, ())
}
