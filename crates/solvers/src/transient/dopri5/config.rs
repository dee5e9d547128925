use thiserror::Error;

/// Configuration for the Dormand–Prince solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    abs_tol: f64,
    rel_tol: f64,
    initial_step: f64,
    min_step: f64,
    max_step: f64,
    max_steps: usize,
}

/// Errors that can occur when validating a Dormand–Prince config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("abs_tol must be finite and non-negative")]
    AbsTol,

    #[error("rel_tol must be finite and non-negative")]
    RelTol,

    #[error("at least one of abs_tol and rel_tol must be positive")]
    ZeroTolerance,

    #[error("step bounds must satisfy 0 < min_step <= initial_step <= max_step")]
    StepBounds,

    #[error("max_steps must be at least 1")]
    MaxSteps,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-9, 1e-9, 100_000).unwrap()
    }
}

impl Config {
    /// Creates a config with the given tolerances and step budget.
    ///
    /// Step bounds default to an initial step of `1e-3`, a minimum of
    /// `1e-12`, and no maximum.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite, if both
    /// tolerances are zero, or if `max_steps` is zero.
    pub fn new(abs_tol: f64, rel_tol: f64, max_steps: usize) -> Result<Self, ConfigError> {
        if !abs_tol.is_finite() || abs_tol < 0.0 {
            return Err(ConfigError::AbsTol);
        }
        if !rel_tol.is_finite() || rel_tol < 0.0 {
            return Err(ConfigError::RelTol);
        }
        if abs_tol == 0.0 && rel_tol == 0.0 {
            return Err(ConfigError::ZeroTolerance);
        }
        if max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }

        Ok(Self {
            abs_tol,
            rel_tol,
            initial_step: 1e-3,
            min_step: 1e-12,
            max_step: f64::INFINITY,
            max_steps,
        })
    }

    /// Replaces the step size bounds.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < min_step <= initial_step <= max_step`,
    /// with `min_step` and `initial_step` finite.
    pub fn with_step_bounds(
        self,
        initial_step: f64,
        min_step: f64,
        max_step: f64,
    ) -> Result<Self, ConfigError> {
        let ordered = min_step > 0.0 && min_step <= initial_step && initial_step <= max_step;
        if !ordered || !min_step.is_finite() || !initial_step.is_finite() {
            return Err(ConfigError::StepBounds);
        }

        Ok(Self {
            initial_step,
            min_step,
            max_step,
            ..self
        })
    }

    /// Returns the absolute error tolerance.
    #[must_use]
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// Returns the relative error tolerance.
    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Returns the first trial step size.
    #[must_use]
    pub fn initial_step(&self) -> f64 {
        self.initial_step
    }

    /// Returns the smallest step size the controller may propose.
    #[must_use]
    pub fn min_step(&self) -> f64 {
        self.min_step
    }

    /// Returns the largest step size the controller may propose.
    #[must_use]
    pub fn max_step(&self) -> f64 {
        self.max_step
    }

    /// Returns the budget of attempted (accepted plus rejected) steps.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert_eq!(config.abs_tol(), 1e-9);
        assert_eq!(config.max_steps(), 100_000);
        assert!(config.max_step().is_infinite());
    }

    #[test]
    fn rejects_bad_tolerances() {
        assert_eq!(Config::new(-1.0, 1e-6, 10), Err(ConfigError::AbsTol));
        assert_eq!(Config::new(1e-6, f64::NAN, 10), Err(ConfigError::RelTol));
        assert_eq!(Config::new(0.0, 0.0, 10), Err(ConfigError::ZeroTolerance));
        assert_eq!(Config::new(1e-6, 1e-6, 0), Err(ConfigError::MaxSteps));
    }

    #[test]
    fn rejects_unordered_step_bounds() {
        let config = Config::default();
        assert_eq!(
            config.with_step_bounds(1e-3, 1e-2, 1.0),
            Err(ConfigError::StepBounds)
        );
        assert_eq!(
            config.with_step_bounds(2.0, 1e-6, 1.0),
            Err(ConfigError::StepBounds)
        );
        assert_eq!(
            config.with_step_bounds(1e-3, 0.0, 1.0),
            Err(ConfigError::StepBounds)
        );

        let bounded = config.with_step_bounds(0.01, 1e-8, 0.1).unwrap();
        assert_eq!(bounded.max_step(), 0.1);
        assert_eq!(bounded.abs_tol(), config.abs_tol());
    }
}
