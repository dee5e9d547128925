use relclock_core::Snapshot;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the end of the requested span.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a transient integration.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// How the solver terminated.
    pub status: Status,

    /// History of accepted snapshots, including the initial state.
    pub history: Vec<Snapshot<I, O>>,

    /// Number of accepted integration steps.
    pub steps: usize,

    /// Number of steps rejected by error control (always 0 for fixed-step solvers).
    pub rejected: usize,

    /// Number of model evaluations, including the initial one.
    pub evaluations: usize,
}
