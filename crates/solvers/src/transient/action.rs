/// Control actions an observer can return to a transient solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop integrating and return the trajectory recorded so far.
    StopEarly,
}
