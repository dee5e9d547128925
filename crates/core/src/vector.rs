//! Fixed-dimension state and rate vectors.
//!
//! Explicit Euler only needs [`StepIntegrable::step`], but multi-stage methods
//! (Runge–Kutta, Dormand–Prince) combine several derivative evaluations and
//! measure the distance between candidate states. [`StateVector`] and [`Rate`]
//! provide those operations for a state of `N` real components.

use std::ops::{Add, Index, Mul, Sub};

use crate::StepIntegrable;

/// An ordered state of `N` real components.
///
/// The dimension is part of the type, so it cannot change during a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector<const N: usize>(pub [f64; N]);

/// The rate of change of a [`StateVector`] with respect to the independent
/// variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rate<const N: usize>(pub [f64; N]);

impl<const N: usize> StateVector<N> {
    /// Returns the components as an array.
    #[must_use]
    pub fn components(&self) -> [f64; N] {
        self.0
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Returns a state with the block starting at `offset` stepped by `rate`,
    /// leaving all other components unchanged.
    ///
    /// Used by partitioned methods that update velocities before positions.
    #[must_use]
    pub fn step_block(&self, rate: &Rate<N>, delta: f64, offset: usize, len: usize) -> Self {
        let mut next = self.0;
        for i in offset..(offset + len).min(N) {
            next[i] += rate.0[i] * delta;
        }
        Self(next)
    }

    /// Weighted RMS norm of `self − other`, scaled per component by
    /// `abs_tol + rel_tol · max(|a|, |b|)`, where `a` and `b` are the
    /// components of `reference` and `self`.
    ///
    /// Values at or below `1.0` are within tolerance.
    #[must_use]
    pub fn scaled_error(&self, other: &Self, reference: &Self, abs_tol: f64, rel_tol: f64) -> f64 {
        if N == 0 {
            return 0.0;
        }
        let sum: f64 = (0..N)
            .map(|i| {
                let scale = abs_tol + rel_tol * reference.0[i].abs().max(self.0[i].abs());
                let e = (self.0[i] - other.0[i]) / scale;
                e * e
            })
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let n = N as f64;
        (sum / n).sqrt()
    }
}

impl<const N: usize> Rate<N> {
    /// A rate with every component equal to zero.
    #[must_use]
    pub fn zero() -> Self {
        Self([0.0; N])
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Returns the weighted sum `Σ wᵢ · rateᵢ`.
    #[must_use]
    pub fn combine(terms: &[(f64, &Rate<N>)]) -> Self {
        let mut out = [0.0; N];
        for (weight, rate) in terms {
            for (o, r) in out.iter_mut().zip(rate.0.iter()) {
                *o += weight * r;
            }
        }
        Self(out)
    }
}

impl<const N: usize> StepIntegrable<f64> for StateVector<N> {
    type Derivative = Rate<N>;

    fn step(&self, derivative: Rate<N>, delta: f64) -> Self {
        let mut next = self.0;
        for (y, dy) in next.iter_mut().zip(derivative.0) {
            *y += dy * delta;
        }
        Self(next)
    }
}

impl<const N: usize> Index<usize> for StateVector<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<const N: usize> Index<usize> for Rate<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<const N: usize> Sub for StateVector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o -= r;
        }
        Self(out)
    }
}

impl<const N: usize> Add for Rate<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o += r;
        }
        Self(out)
    }
}

impl<const N: usize> Mul<f64> for Rate<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self(self.0.map(|v| v * rhs))
    }
}

impl<const N: usize> From<[f64; N]> for StateVector<N> {
    fn from(value: [f64; N]) -> Self {
        Self(value)
    }
}

impl<const N: usize> From<[f64; N]> for Rate<N> {
    fn from(value: [f64; N]) -> Self {
        Self(value)
    }
}
