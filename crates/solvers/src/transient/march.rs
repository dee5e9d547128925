//! Shared stepping loop for the fixed-step solvers.

use relclock_core::{Model, Observer, OdeProblem, Snapshot};

use super::{Action, Error, Event, Solution, Status, evaluate::Evaluator};

/// Runs `steps` fixed steps, delegating the state update to `advance`.
///
/// `advance` receives the step number being produced and the current
/// snapshot, and returns the finalized input for the next step. The driver
/// evaluates the model at that input, records the snapshot, and notifies the
/// observer.
pub(crate) fn march<'a, M, P, Obs, F>(
    mut eval: Evaluator<'a, M, P>,
    initial: M::Input,
    steps: usize,
    mut observer: Obs,
    mut advance: F,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
    F: FnMut(
        &mut Evaluator<'a, M, P>,
        usize,
        &Snapshot<M::Input, M::Output>,
    ) -> Result<M::Input, Error>,
{
    let initial_output = eval.call(0, &initial)?;
    let initial_snapshot = Snapshot::new(initial, initial_output);

    let mut history = Vec::with_capacity(steps + 1);
    history.push(initial_snapshot.clone());

    let event = Event {
        step: 0,
        steps,
        snapshot: initial_snapshot.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
            rejected: 0,
            evaluations: eval.calls,
        });
    }

    let mut current = initial_snapshot;

    for step in 1..=steps {
        let next_input = advance(&mut eval, step, &current)?;
        let next_output = eval.call(step, &next_input)?;
        let next_snapshot = Snapshot::new(next_input, next_output);

        history.push(next_snapshot.clone());

        let event = Event {
            step,
            steps,
            snapshot: next_snapshot.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            tracing::debug!(step, "integration stopped by observer");
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
                rejected: 0,
                evaluations: eval.calls,
            });
        }

        current = next_snapshot;
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
        rejected: 0,
        evaluations: eval.calls,
    })
}
