/// A type that can be moved forward along its derivative.
///
/// Implementing this trait lets the explicit Euler solver advance the type by
/// `derivative * delta`, where the derivative is taken with respect to
/// `Delta`. For the oscillators here `Delta` is the relational parameter τ
/// and the derivative is the phase velocity, but nothing requires `Delta` to
/// be time.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Shorthand for [`StepIntegrable::Derivative`].
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

#[cfg(test)]
mod tests {
    use super::*;

    /// A bare phase angle.
    #[derive(Debug, PartialEq)]
    struct Phase(f64);

    /// Angular velocity of a [`Phase`].
    struct PhaseVelocity(f64);

    impl StepIntegrable<f64> for Phase {
        type Derivative = PhaseVelocity;

        fn step(&self, derivative: PhaseVelocity, delta: f64) -> Self {
            Phase(self.0 + derivative.0 * delta)
        }
    }

    #[test]
    fn phase_advances_linearly() {
        let phase = Phase(0.25);
        let next = phase.step(PhaseVelocity(2.0), 0.5);
        assert_eq!(next, Phase(1.25));
    }

    #[test]
    fn zero_step_is_identity() {
        let phase = Phase(-3.0);
        let next = phase.step(PhaseVelocity(100.0), 0.0);
        assert_eq!(next, Phase(-3.0));
    }
}
