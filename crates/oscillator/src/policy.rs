use relclock_solvers::transient::dopri5;
use serde::{Deserialize, Serialize};

use crate::IntegrateError;

/// The interval of the relational parameter τ to integrate over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSpan {
    start: f64,
    end: f64,
}

impl TimeSpan {
    /// Creates a span from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrateError::Span`] unless both ends are finite and
    /// `end > start`.
    pub fn new(start: f64, end: f64) -> Result<Self, IntegrateError> {
        if start.is_finite() && end.is_finite() && end > start {
            Ok(Self { start, end })
        } else {
            Err(IntegrateError::Span { start, end })
        }
    }

    /// Creates the span covered by `steps` steps of size `dt` from zero.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrateError::Span`] if the resulting span is empty or
    /// non-finite.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_steps(dt: f64, steps: usize) -> Result<Self, IntegrateError> {
        Self::new(0.0, dt * steps as f64)
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Fixed-step integration schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixedMethod {
    /// Explicit forward Euler.
    Euler,

    /// Semi-implicit Euler: velocity first, then position with the new
    /// velocity. Matches the published figures.
    #[default]
    EulerCromer,

    /// Classic fourth-order Runge–Kutta.
    Rk4,
}

/// How [`integrate`](crate::integrate) steps through the span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepPolicy {
    /// Evenly spaced steps; the trajectory holds exactly `samples` points,
    /// the initial state included.
    Fixed { method: FixedMethod, samples: usize },

    /// Dormand–Prince 5(4) with local error control; the trajectory holds
    /// every accepted step, strictly increasing in τ.
    Adaptive { config: dopri5::Config },
}

impl StepPolicy {
    /// Creates a fixed-step policy producing `samples` points.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrateError::Samples`] if `samples < 2`.
    pub fn fixed(method: FixedMethod, samples: usize) -> Result<Self, IntegrateError> {
        if samples < 2 {
            return Err(IntegrateError::Samples(samples));
        }
        Ok(Self::Fixed { method, samples })
    }

    /// Creates an adaptive policy.
    #[must_use]
    pub fn adaptive(config: dopri5::Config) -> Self {
        Self::Adaptive { config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_must_move_forward() {
        assert!(TimeSpan::new(0.0, 50.0).is_ok());
        assert!(matches!(
            TimeSpan::new(1.0, 1.0),
            Err(IntegrateError::Span { .. })
        ));
        assert!(TimeSpan::new(0.0, f64::INFINITY).is_err());
        assert!(TimeSpan::from_steps(0.01, 0).is_err());
    }

    #[test]
    fn span_from_steps() {
        let span = TimeSpan::from_steps(0.01, 20_000).unwrap();
        assert_eq!(span.start(), 0.0);
        assert_eq!(span.end(), 200.0);
    }

    #[test]
    fn fixed_policy_needs_two_samples() {
        assert!(matches!(
            StepPolicy::fixed(FixedMethod::Rk4, 1),
            Err(IntegrateError::Samples(1))
        ));
        assert_eq!(
            StepPolicy::fixed(FixedMethod::Rk4, 2).unwrap(),
            StepPolicy::Fixed {
                method: FixedMethod::Rk4,
                samples: 2
            }
        );
    }

    #[test]
    fn method_names_are_kebab_case() {
        use serde::de::{
            IntoDeserializer,
            value::{Error, StrDeserializer},
        };

        let de: StrDeserializer<'_, Error> = "euler-cromer".into_deserializer();
        assert_eq!(FixedMethod::deserialize(de).unwrap(), FixedMethod::EulerCromer);
        assert_eq!(FixedMethod::default(), FixedMethod::EulerCromer);
    }
}
