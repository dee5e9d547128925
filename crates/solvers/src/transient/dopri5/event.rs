use relclock_core::Snapshot;

/// Event emitted by the Dormand–Prince solver for each accepted step.
///
/// Step 0 is the initial state; its `step_size` and `error_estimate` are zero.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    /// Number of accepted steps so far.
    pub step: usize,

    /// Distance integrated from the initial input.
    pub elapsed: f64,

    /// Total distance requested.
    pub span: f64,

    /// Size of the step that produced this snapshot.
    pub step_size: f64,

    /// Scaled error estimate of that step (at most 1.0 when accepted).
    pub error_estimate: f64,

    /// Snapshot of the model input and output at this step.
    pub snapshot: Snapshot<I, O>,
}
