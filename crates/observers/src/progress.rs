use relclock_core::Observer;

use crate::traits::HasProgress;

/// Logs integration progress at evenly spaced checkpoints.
///
/// With the default of 20 checkpoints a line is logged every 5 % of the run,
/// plus one when the run completes. Progress is read through
/// [`HasProgress`], so the same observer works for fixed-step and adaptive
/// solvers. It never returns an action.
#[derive(Debug, Clone)]
pub struct ProgressObserver {
    label: String,
    checkpoints: u32,
    next: u32,
    enabled: bool,
}

impl ProgressObserver {
    /// Creates an enabled observer that logs under `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checkpoints: 20,
            next: 0,
            enabled: true,
        }
    }

    /// Creates an observer that records nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new("")
        }
    }

    /// Sets the number of evenly spaced checkpoints (at least one).
    #[must_use]
    pub fn checkpoints(mut self, checkpoints: u32) -> Self {
        self.checkpoints = checkpoints.max(1);
        self
    }

    /// Returns the percentage of the last checkpoint logged, if any.
    #[must_use]
    pub fn last_logged(&self) -> Option<u32> {
        self.next
            .checked_sub(1)
            .map(|c| c * 100 / self.checkpoints)
    }

    /// Logs every checkpoint reached by `fraction`.
    pub fn record(&mut self, fraction: f64) {
        if !self.enabled {
            return;
        }
        while self.next <= self.checkpoints
            && fraction * f64::from(self.checkpoints) >= f64::from(self.next)
        {
            let percent = self.next * 100 / self.checkpoints;
            tracing::info!(target: "relclock::progress", label = %self.label, "integrating: {percent:3}%");
            self.next += 1;
        }
    }
}

impl<E: HasProgress, A> Observer<E, A> for ProgressObserver {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event.progress());
        None
    }
}

/// Allows `&mut ProgressObserver` to be passed to solvers that take an
/// observer by value.
impl<E: HasProgress, A> Observer<E, A> for &mut ProgressObserver {
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).record(event.progress());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct At(f64);

    impl HasProgress for At {
        fn progress(&self) -> f64 {
            self.0
        }
    }

    fn feed(obs: &mut ProgressObserver, fraction: f64) {
        let _: Option<()> = obs.observe(&At(fraction));
    }

    #[test]
    fn logs_each_checkpoint_once() {
        let mut obs = ProgressObserver::new("test").checkpoints(4);
        assert_eq!(obs.last_logged(), None);

        feed(&mut obs, 0.0);
        assert_eq!(obs.last_logged(), Some(0));

        feed(&mut obs, 0.3);
        assert_eq!(obs.last_logged(), Some(25));

        feed(&mut obs, 0.3);
        assert_eq!(obs.last_logged(), Some(25));

        feed(&mut obs, 1.0);
        assert_eq!(obs.last_logged(), Some(100));
    }

    #[test]
    fn skipped_checkpoints_are_caught_up() {
        let mut obs = ProgressObserver::new("test");
        feed(&mut obs, 0.52);
        assert_eq!(obs.last_logged(), Some(50));
    }

    #[test]
    fn disabled_observer_records_nothing() {
        let mut obs = ProgressObserver::disabled();
        feed(&mut obs, 1.0);
        assert_eq!(obs.last_logged(), None);
    }

    #[test]
    fn never_returns_an_action() {
        let mut obs = ProgressObserver::new("test");
        let action: Option<u8> = obs.observe(&At(0.5));
        assert!(action.is_none());
    }
}
