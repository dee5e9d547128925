//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event types, so one observer
//! can watch a fixed-step run and an adaptive run alike.
//!
//! # Example
//!
//! ```rust
//! use relclock_core::Observer;
//! use relclock_observers::traits::HasProgress;
//!
//! /// Remembers how far any solver got.
//! #[derive(Default)]
//! struct Furthest(f64);
//!
//! impl<E: HasProgress, A> Observer<E, A> for Furthest {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         self.0 = self.0.max(event.progress());
//!         None
//!     }
//! }
//! ```

use relclock_solvers::transient::{self, dopri5};

/// An event that knows how far through its run the solver is.
pub trait HasProgress {
    /// Fraction of the requested run completed, in `[0, 1]`.
    fn progress(&self) -> f64;
}

impl<I, O> HasProgress for transient::Event<I, O> {
    #[allow(clippy::cast_precision_loss)]
    fn progress(&self) -> f64 {
        if self.steps == 0 {
            1.0
        } else {
            self.step as f64 / self.steps as f64
        }
    }
}

impl<I, O> HasProgress for dopri5::Event<I, O> {
    fn progress(&self) -> f64 {
        if self.span > 0.0 {
            (self.elapsed / self.span).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use relclock_core::Snapshot;

    #[test]
    fn fixed_step_progress_is_step_fraction() {
        let event = transient::Event {
            step: 5,
            steps: 20,
            snapshot: Snapshot::new((), ()),
        };
        assert_relative_eq!(event.progress(), 0.25);

        let empty = transient::Event {
            step: 0,
            steps: 0,
            snapshot: Snapshot::new((), ()),
        };
        assert_relative_eq!(empty.progress(), 1.0);
    }

    #[test]
    fn adaptive_progress_is_span_fraction() {
        let event = dopri5::Event {
            step: 7,
            elapsed: 12.5,
            span: 50.0,
            step_size: 0.1,
            error_estimate: 0.3,
            snapshot: Snapshot::new((), ()),
        };
        assert_relative_eq!(event.progress(), 0.25);
    }
}
