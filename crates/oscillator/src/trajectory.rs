//! Sampled solutions and their limit-cycle analysis.

use relclock_core::StateVector;

/// An ordered sequence of `(τ, state)` samples.
///
/// Produced by [`integrate`](crate::integrate), which guarantees strictly
/// increasing τ and finite states. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<const N: usize> {
    times: Vec<f64>,
    states: Vec<StateVector<N>>,
}

/// A borrowed, contiguous run of samples from a [`Trajectory`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a, const N: usize> {
    times: &'a [f64],
    states: &'a [StateVector<N>],
}

/// Axis-aligned bounds of a two-component projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A local maximum of one state component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Interpolated τ of the maximum.
    pub tau: f64,
    /// Interpolated value of the maximum.
    pub value: f64,
}

impl<const N: usize> Trajectory<N> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, tau: f64, state: StateVector<N>) {
        self.times.push(tau);
        self.states.push(state);
    }

    pub(crate) fn set_last_time(&mut self, tau: f64) {
        if let Some(last) = self.times.last_mut() {
            *last = tau;
        }
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[must_use]
    pub fn states(&self) -> &[StateVector<N>] {
        &self.states
    }

    /// The final sample, if any.
    #[must_use]
    pub fn last(&self) -> Option<(f64, StateVector<N>)> {
        self.as_segment().get(self.len().checked_sub(1)?)
    }

    /// The whole trajectory as a segment.
    #[must_use]
    pub fn as_segment(&self) -> Segment<'_, N> {
        Segment {
            times: &self.times,
            states: &self.states,
        }
    }

    /// Splits into a transient and a cycle segment at `index`.
    ///
    /// The index is clamped to `[0, len − 1]`, so the cycle segment keeps at
    /// least the final sample of a non-empty trajectory.
    #[must_use]
    pub fn split_at(&self, index: usize) -> (Segment<'_, N>, Segment<'_, N>) {
        let index = index.min(self.len().saturating_sub(1));
        let (t0, t1) = self.times.split_at(index);
        let (s0, s1) = self.states.split_at(index);
        (
            Segment {
                times: t0,
                states: s0,
            },
            Segment {
                times: t1,
                states: s1,
            },
        )
    }

    /// The last `n` samples (or all of them, if fewer).
    #[must_use]
    pub fn tail(&self, n: usize) -> Segment<'_, N> {
        self.as_segment().tail(n)
    }

    /// Bounds of the projection onto components `a` and `b`.
    #[must_use]
    pub fn bounds(&self, a: usize, b: usize) -> Option<Bounds> {
        self.as_segment().bounds(a, b)
    }

    /// Local maxima of component `c`.
    #[must_use]
    pub fn peaks(&self, c: usize) -> Vec<Peak> {
        self.as_segment().peaks(c)
    }

    /// Mean spacing in τ between successive maxima of component `c`.
    #[must_use]
    pub fn period(&self, c: usize) -> Option<f64> {
        self.as_segment().period(c)
    }
}

impl<const N: usize> FromIterator<(f64, StateVector<N>)> for Trajectory<N> {
    /// Collects samples as given; τ is expected to increase.
    fn from_iter<T: IntoIterator<Item = (f64, StateVector<N>)>>(iter: T) -> Self {
        let (times, states) = iter.into_iter().unzip();
        Self { times, states }
    }
}

impl<'a, const N: usize> Segment<'a, N> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn times(&self) -> &'a [f64] {
        self.times
    }

    #[must_use]
    pub fn states(&self) -> &'a [StateVector<N>] {
        self.states
    }

    /// The sample at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(f64, StateVector<N>)> {
        Some((*self.times.get(index)?, *self.states.get(index)?))
    }

    /// The last `n` samples (or all of them, if fewer).
    #[must_use]
    pub fn tail(&self, n: usize) -> Segment<'a, N> {
        let start = self.len().saturating_sub(n);
        Segment {
            times: &self.times[start..],
            states: &self.states[start..],
        }
    }

    /// Values of component `c` in sample order.
    pub fn component(&self, c: usize) -> impl Iterator<Item = f64> + 'a {
        self.states.iter().map(move |s| s[c])
    }

    /// The projection onto components `a` (x) and `b` (y), in sample order.
    #[must_use]
    pub fn points(&self, a: usize, b: usize) -> Vec<(f64, f64)> {
        self.states.iter().map(|s| (s[a], s[b])).collect()
    }

    /// Bounds of the projection onto components `a` and `b`, or `None` for
    /// an empty segment.
    #[must_use]
    pub fn bounds(&self, a: usize, b: usize) -> Option<Bounds> {
        let first = self.states.first()?;
        let seed = Bounds {
            x_min: first[a],
            x_max: first[a],
            y_min: first[b],
            y_max: first[b],
        };
        Some(self.states.iter().fold(seed, |acc, s| Bounds {
            x_min: acc.x_min.min(s[a]),
            x_max: acc.x_max.max(s[a]),
            y_min: acc.y_min.min(s[b]),
            y_max: acc.y_max.max(s[b]),
        }))
    }

    /// Local maxima of component `c`, refined by a parabola through each
    /// maximum and its two neighbours.
    ///
    /// A sample is a maximum when it is strictly above its predecessor and
    /// not below its successor, so a flat top is reported once.
    #[must_use]
    pub fn peaks(&self, c: usize) -> Vec<Peak> {
        if self.len() < 3 {
            return Vec::new();
        }

        (1..self.len() - 1)
            .filter_map(|i| {
                let (y0, y1, y2) = (self.states[i - 1][c], self.states[i][c], self.states[i + 1][c]);
                (y1 > y0 && y1 >= y2).then(|| {
                    refine(
                        [self.times[i - 1], self.times[i], self.times[i + 1]],
                        [y0, y1, y2],
                    )
                })
            })
            .collect()
    }

    /// Mean spacing in τ between successive maxima of component `c`.
    #[must_use]
    pub fn period(&self, c: usize) -> Option<f64> {
        let peaks = self.peaks(c);
        let (first, last) = (peaks.first()?, peaks.last()?);
        if peaks.len() < 2 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let intervals = (peaks.len() - 1) as f64;
        Some((last.tau - first.tau) / intervals)
    }

    /// Largest change in peak value between successive maxima of
    /// component `c`.
    ///
    /// Tends to zero as the trajectory settles onto a limit cycle.
    #[must_use]
    pub fn amplitude_drift(&self, c: usize) -> Option<f64> {
        self.peaks(c)
            .windows(2)
            .map(|w| (w[1].value - w[0].value).abs())
            .reduce(f64::max)
    }
}

impl Bounds {
    /// Returns bounds grown by `fraction` of each span on every side.
    ///
    /// A degenerate (zero-width) axis is grown by `fraction` in absolute
    /// terms so it never collapses to a point.
    #[must_use]
    pub fn padded(&self, fraction: f64) -> Self {
        let pad = |lo: f64, hi: f64| {
            let span = hi - lo;
            let d = if span > 0.0 { span * fraction } else { fraction };
            (lo - d, hi + d)
        };
        let (x_min, x_max) = pad(self.x_min, self.x_max);
        let (y_min, y_max) = pad(self.y_min, self.y_max);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Returns `true` if `(x, y)` lies inside or on the bounds.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    /// The smallest bounds containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

/// Vertex of the parabola through three samples, in coordinates local to
/// the middle sample.
fn refine(t: [f64; 3], y: [f64; 3]) -> Peak {
    let (s0, s2) = (t[0] - t[1], t[2] - t[1]);
    let (d0, d2) = (y[0] - y[1], y[2] - y[1]);

    let a = (d2 / s2 - d0 / s0) / (s2 - s0);
    if a >= 0.0 || !a.is_finite() {
        return Peak {
            tau: t[1],
            value: y[1],
        };
    }
    let b = d2 / s2 - a * s2;

    let s = (-b / (2.0 * a)).clamp(s0, s2);
    Peak {
        tau: t[1] + s,
        value: y[1] + b * s + a * s * s,
    }
}
