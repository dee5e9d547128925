//! Parameter sets and vector fields of the supported oscillators.
//!
//! Both systems are written in first-order form over `[Δφ, dΔφ/dτ]`.

use relclock_core::{Rate, StateVector};

use crate::{ParameterError, VectorField};

/// The classic Van der Pol oscillator.
///
/// ```text
/// Δφ'  = ω
/// ω'   = μ (1 − Δφ²) ω − Δφ
/// ```
///
/// For `μ > 0` the damping is negative inside `|Δφ| < 1` and positive
/// outside, so the origin is unstable and every other trajectory approaches
/// a single limit cycle of amplitude close to 2. `μ = 0` is the undamped
/// harmonic oscillator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanDerPol {
    mu: f64,
}

impl VanDerPol {
    /// Nonlinearity used for the published phase portrait.
    pub const PAPER_MU: f64 = 1.2;

    /// Creates a Van der Pol parameter set.
    ///
    /// # Errors
    ///
    /// Returns an error if `mu` is non-finite or negative. Negative `mu`
    /// reverses the damping, making the cycle repelling, and is outside the
    /// supported regime.
    pub fn new(mu: f64) -> Result<Self, ParameterError> {
        non_negative("mu", mu)?;
        Ok(Self { mu })
    }

    /// Returns the nonlinearity `μ`.
    #[must_use]
    pub fn mu(&self) -> f64 {
        self.mu
    }
}

impl Default for VanDerPol {
    fn default() -> Self {
        Self {
            mu: Self::PAPER_MU,
        }
    }
}

impl VectorField<2> for VanDerPol {
    fn name(&self) -> &'static str {
        "van-der-pol"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("mu", self.mu)]
    }

    fn derivative(&self, _tau: f64, state: &StateVector<2>) -> Rate<2> {
        let [x, v] = state.0;
        Rate([v, self.mu * (1.0 - x * x) * v - x])
    }
}

/// A pendulum-like relational phase with Van der Pol damping.
///
/// ```text
/// Δφ' = ω
/// ω'  = −ε (Δφ² − 1) ω − ω0² sin Δφ
/// ```
///
/// Near the origin it behaves like a Van der Pol oscillator with `μ = ε`
/// and frequency `ω0`; the sine restoring force softens the cycle at large
/// amplitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelationalPhase {
    epsilon: f64,
    omega0: f64,
}

impl RelationalPhase {
    /// Creates a relational phase parameter set.
    ///
    /// # Errors
    ///
    /// Returns an error if `epsilon` is negative or non-finite, or if
    /// `omega0` is not a positive finite number.
    pub fn new(epsilon: f64, omega0: f64) -> Result<Self, ParameterError> {
        non_negative("epsilon", epsilon)?;
        finite("omega0", omega0)?;
        if omega0 <= 0.0 {
            return Err(ParameterError::NotPositive {
                name: "omega0",
                value: omega0,
            });
        }
        Ok(Self { epsilon, omega0 })
    }

    /// Returns the damping strength `ε`.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the small-amplitude frequency `ω0`.
    #[must_use]
    pub fn omega0(&self) -> f64 {
        self.omega0
    }
}

impl Default for RelationalPhase {
    fn default() -> Self {
        Self {
            epsilon: 0.3,
            omega0: 1.0,
        }
    }
}

impl VectorField<2> for RelationalPhase {
    fn name(&self) -> &'static str {
        "relational-phase"
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        vec![("epsilon", self.epsilon), ("omega0", self.omega0)]
    }

    fn derivative(&self, _tau: f64, state: &StateVector<2>) -> Rate<2> {
        let [phi, omega] = state.0;
        let accel = -self.epsilon * (phi * phi - 1.0) * omega - self.omega0.powi(2) * phi.sin();
        Rate([omega, accel])
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NotFinite { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ParameterError> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(ParameterError::Negative { name, value });
    }
    Ok(())
}
