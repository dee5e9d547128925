use std::error::Error as StdError;

/// Errors that can occur during transient integration.
///
/// Every variant is fatal: solvers never retry or return a partial history
/// alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model error at step {step}: {source}")]
    Model {
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("problem error at step {step}: {source}")]
    Problem {
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("state became non-finite at step {step} ({elapsed} after the initial time)")]
    NonFinite { step: usize, elapsed: f64 },

    #[error(
        "step size {step_size:e} fell below the minimum {min_step:e} at {elapsed} after the \
         initial time (error estimate {error_estimate:e})"
    )]
    StepSizeTooSmall {
        elapsed: f64,
        step_size: f64,
        min_step: f64,
        error_estimate: f64,
    },

    #[error(
        "no convergence within {max_steps} steps, stopped at {elapsed} after the initial time \
         (last step size {step_size:e}, error estimate {error_estimate:e})"
    )]
    MaxStepsReached {
        max_steps: usize,
        elapsed: f64,
        step_size: f64,
        error_estimate: f64,
    },
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Model {
            step,
            source: Box::new(err),
        }
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Problem {
            step,
            source: Box::new(err),
        }
    }
}
