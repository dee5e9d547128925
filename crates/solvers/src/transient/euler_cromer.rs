//! Semi-implicit (symplectic) Euler, also known as Euler–Cromer.
//!
//! The state is laid out as `[positions, velocities]`, each block holding
//! `N / 2` components. Each step first advances the velocity block with the
//! rate evaluated at the current state, then advances the position block with
//! the rate evaluated at the updated velocities:
//!
//! ```text
//! v_{n+1} = v_n + a(x_n, v_n) * dt
//! x_{n+1} = x_n + v_{n+1} * dt
//! ```
//!
//! For a second-order oscillator this is first-order accurate but keeps the
//! orbit bounded where explicit Euler spirals outward. It is the update the
//! published phase-portrait figures were produced with.

use relclock_core::{Model, Observer, OdeProblem, StateVector};

use super::{Action, Error, Event, Solution, evaluate::Evaluator, march::march};

/// Integrates an ODE problem using semi-implicit Euler.
///
/// `N` must be even; odd dimensions are rejected at compile time.
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
    const { assert!(N % 2 == 0, "semi-implicit Euler needs [positions, velocities]") };
    let half = N / 2;

    let eval = Evaluator::new(model, problem);

    march(eval, initial, steps, observer, |eval, step, current| {
        let state = eval.state(step, &current.input)?;
        let rate = eval.derivative(step, &current.input, &current.output)?;

        // Velocities first, evaluated at the start of the step.
        let kicked = state.step_block(&rate, dt, half, half);

        // Positions use the rate at the kicked velocities, same τ.
        let drift = eval.rate_at(step, &current.input, &kicked, 0.0)?;
        let next_state = kicked.step_block(&drift, dt, 0, half);

        if !next_state.is_finite() {
            return Err(Error::NonFinite {
                step,
                elapsed: dt * step as f64,
            });
        }

        eval.accept(step, &current.input, &current.output, &next_state, &dt)
    })
}

/// Integrates an ODE problem using semi-implicit Euler without observation.
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

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::transient::test_utils::{Harmonic, Input, VectorProblem};

    #[test]
    fn matches_hand_rolled_update() {
        let omega = 1.3;
        let dt = 0.01;
        let model = Harmonic { omega };

        let solution =
            solve_unobserved(&model, &VectorProblem::<2>, Input::at_origin([0.1, 0.0]), dt, 50)
                .expect("should solve");

        let (mut x, mut v) = (0.1_f64, 0.0_f64);
        for snapshot in &solution.history[1..] {
            let a = -omega * omega * x;
            v += a * dt;
            x += v * dt;
            assert_eq!(snapshot.input.y.0, [x, v]);
        }
    }

    #[test]
    fn harmonic_orbit_stays_bounded() {
        let model = Harmonic { omega: 1.0 };
        let solution =
            solve_unobserved(&model, &VectorProblem::<2>, Input::at_origin([1.0, 0.0]), 0.01, 20_000)
                .expect("should solve");

        for snapshot in &solution.history {
            let [x, v] = snapshot.input.y.0;
            let energy = x * x + v * v;
            assert!((energy - 1.0).abs() < 0.02, "energy drifted to {energy}");
        }
    }

    #[test]
    fn time_advances_by_dt() {
        let model = Harmonic { omega: 1.0 };
        let solution =
            solve_unobserved(&model, &VectorProblem::<2>, Input::at_origin([1.0, 0.0]), 0.5, 4)
                .expect("should solve");

        let times: Vec<f64> = solution.history.iter().map(|s| s.input.t).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(solution.evaluations, 1 + 2 * 4);
        assert_relative_eq!(solution.history[4].input.t, 2.0);
    }
}
