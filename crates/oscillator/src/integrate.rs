use relclock_core::{Observer, Rate, StateVector};
use relclock_solvers::transient::{
    self, Action, Solution, Status, dopri5, euler, euler_cromer, rk4,
};

use crate::{
    Dynamics, FixedMethod, IntegrateError, PhaseInput, PhaseProblem, StepPolicy, TimeSpan,
    Trajectory, VectorField,
};

/// Integrates `field` from `initial` over `span`.
///
/// The returned trajectory starts with the initial sample at `span.start()`.
/// A [`StepPolicy::Fixed`] run holds exactly `samples` points ending at
/// `span.end()`; an adaptive run holds every accepted step. Integration is
/// deterministic: identical inputs give bit-identical trajectories.
///
/// The observer sees every accepted step from either kind of solver, which
/// lets one progress logger serve both.
///
/// # Errors
///
/// - [`IntegrateError::InitialState`] if `initial` is not finite.
/// - [`IntegrateError::Solver`] if the state diverges or the adaptive
///   controller cannot meet its tolerances.
/// - [`IntegrateError::Incomplete`] if the observer stopped the run.
pub fn integrate<F, Obs, const N: usize>(
    field: &F,
    initial: StateVector<N>,
    span: TimeSpan,
    policy: &StepPolicy,
    observer: Obs,
) -> Result<Trajectory<N>, IntegrateError>
where
    F: VectorField<N>,
    Obs: Observer<transient::Event<PhaseInput<N>, Rate<N>>, Action>
        + Observer<dopri5::Event<PhaseInput<N>, Rate<N>>, Action>,
{
    if !initial.is_finite() {
        return Err(IntegrateError::InitialState(initial.0.to_vec()));
    }

    tracing::debug!(
        field = field.name(),
        parameters = ?field.parameters(),
        start = span.start(),
        end = span.end(),
        ?policy,
        "integrating"
    );

    let model = Dynamics::new(field);
    let problem = PhaseProblem::<N>;
    let start = PhaseInput {
        tau: span.start(),
        state: initial,
    };

    let (solution, exact_end) = match *policy {
        StepPolicy::Fixed { method, samples } => {
            let steps = samples - 1;
            #[allow(clippy::cast_precision_loss)]
            let dt = span.duration() / steps as f64;
            let solution = match method {
                FixedMethod::Euler => euler::solve(&model, &problem, start, dt, steps, observer),
                FixedMethod::EulerCromer => {
                    euler_cromer::solve(&model, &problem, start, dt, steps, observer)
                }
                FixedMethod::Rk4 => rk4::solve(&model, &problem, start, dt, steps, observer),
            };
            (solution?, false)
        }
        StepPolicy::Adaptive { ref config } => {
            let solution = dopri5::solve(&model, &problem, start, span.duration(), config, observer);
            (solution?, true)
        }
    };

    let mut trajectory = into_trajectory(field.name(), solution)?;
    if exact_end {
        // The last step is sized to reach the end, but accumulated τ can
        // still land an ulp away from it.
        trajectory.set_last_time(span.end());
    }
    Ok(trajectory)
}

/// Integrates `field` from each of `initials`, without observation.
///
/// # Errors
///
/// Returns the first error encountered; see [`integrate`].
pub fn integrate_each<F, const N: usize>(
    field: &F,
    initials: &[StateVector<N>],
    span: TimeSpan,
    policy: &StepPolicy,
) -> Result<Vec<Trajectory<N>>, IntegrateError>
where
    F: VectorField<N>,
{
    initials
        .iter()
        .map(|&initial| integrate(field, initial, span, policy, ()))
        .collect()
}

fn into_trajectory<const N: usize>(
    name: &str,
    solution: Solution<PhaseInput<N>, Rate<N>>,
) -> Result<Trajectory<N>, IntegrateError> {
    if solution.status == Status::StoppedByObserver {
        tracing::debug!(steps = solution.steps, "stopped by observer");
        return Err(IntegrateError::Incomplete);
    }

    tracing::info!(
        field = name,
        steps = solution.steps,
        rejected = solution.rejected,
        evaluations = solution.evaluations,
        "integration complete"
    );

    let mut trajectory = Trajectory::with_capacity(solution.history.len());
    for snapshot in solution.history {
        trajectory.push(snapshot.input.tau, snapshot.input.state);
    }
    Ok(trajectory)
}
