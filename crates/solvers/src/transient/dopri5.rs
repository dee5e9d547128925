//! Adaptive Dormand–Prince 5(4) Runge–Kutta.
//!
//! # Algorithm
//!
//! Each attempted step evaluates the seven-stage Dormand–Prince tableau,
//! producing a fifth-order solution (which is kept) and an embedded
//! fourth-order solution. Their difference, scaled per component by
//! `abs_tol + rel_tol · |y|`, gives an RMS error estimate `err`.
//!
//! - `err <= 1`: the step is accepted, the input is finalized, and an
//!   [`Event`] is emitted.
//! - `err > 1`: the step is rejected and retried with a smaller size.
//!
//! The next step size is `h · clamp(0.9 · err^(-1/5), 0.2, 5.0)`, never
//! growing right after a rejection and never exceeding the configured
//! maximum. The final step is shortened to land exactly on the requested
//! span.
//!
//! # Failure
//!
//! Integration is fatal-on-error. A proposed step size below
//! [`Config::min_step`] (before the end of the span) yields
//! [`Error::StepSizeTooSmall`], exhausting [`Config::max_steps`] attempts
//! yields [`Error::MaxStepsReached`], and a non-finite fifth-order solution
//! yields [`Error::NonFinite`]. The first two report the last step size and
//! error estimate.

mod config;
mod event;


pub use config::{Config, ConfigError};
pub use event::Event;

use relclock_core::{Model, Observer, OdeProblem, Rate, Snapshot, StateVector};

use super::{Action, Error, Solution, Status, evaluate::Evaluator};

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// Fifth-order weights.
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Embedded fourth-order weights.
const E1: f64 = 5179.0 / 57600.0;
const E3: f64 = 7571.0 / 16695.0;
const E4: f64 = 393.0 / 640.0;
const E5: f64 = -92097.0 / 339_200.0;
const E6: f64 = 187.0 / 2100.0;
const E7: f64 = 1.0 / 40.0;

/// Integrates an ODE problem over `span` using adaptive Dormand–Prince 5(4).
///
/// `span` is measured from the initial input's independent variable; the
/// problem's [`OdeProblem::build_input`] is responsible for advancing it.
///
/// # Errors
///
/// Returns an error if the model or problem fails, if the state becomes
/// non-finite, or if the step size controller cannot meet the tolerances
/// within the configured bounds.
pub fn solve<M, P, Obs, const N: usize>(
    model: &M,
    problem: &P,
    initial: M::Input,
    span: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64, State = StateVector<N>>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let mut eval = Evaluator::new(model, problem);

    tracing::debug!(
        span,
        abs_tol = config.abs_tol(),
        rel_tol = config.rel_tol(),
        initial_step = config.initial_step(),
        "starting Dormand–Prince integration"
    );

    let initial_output = eval.call(0, &initial)?;
    let mut current = Snapshot::new(initial, initial_output);
    let mut history = vec![current.clone()];

    let event = Event {
        step: 0,
        elapsed: 0.0,
        span,
        step_size: 0.0,
        error_estimate: 0.0,
        snapshot: current.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(stopped(history, 0, 0, eval.calls));
    }

    let mut elapsed = 0.0;
    let mut h = config.initial_step().min(config.max_step());
    let mut steps = 0;
    let mut rejected = 0;
    let mut last_error = 0.0;

    while elapsed < span {
        let step = steps + 1;

        if steps + rejected >= config.max_steps() {
            return Err(Error::MaxStepsReached {
                max_steps: config.max_steps(),
                elapsed,
                step_size: h,
                error_estimate: last_error,
            });
        }

        let remaining = span - elapsed;
        let last = h >= remaining;
        if last {
            h = remaining;
        }

        let base = &current.input;
        let y = eval.state(step, base)?;
        let k1 = eval.derivative(step, base, &current.output)?;

        let trial = attempt(&mut eval, step, base, &y, &k1, h)?;

        if !trial.y5.is_finite() {
            return Err(Error::NonFinite {
                step,
                elapsed: elapsed + h,
            });
        }

        let err = trial.y5.scaled_error(&trial.y4, &y, config.abs_tol(), config.rel_tol());
        last_error = err;

        if err.is_nan() {
            return Err(Error::NonFinite {
                step,
                elapsed: elapsed + h,
            });
        }

        if err <= 1.0 {
            let next_input = eval.accept(step, base, &current.output, &trial.y5, &h)?;
            let next_output = eval.call(step, &next_input)?;
            current = Snapshot::new(next_input, next_output);
            history.push(current.clone());

            steps = step;
            elapsed = if last { span } else { elapsed + h };

            let event = Event {
                step,
                elapsed,
                span,
                step_size: h,
                error_estimate: err,
                snapshot: current.clone(),
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                tracing::debug!(step, elapsed, "integration stopped by observer");
                return Ok(stopped(history, steps, rejected, eval.calls));
            }

            h = (h * growth(err)).min(config.max_step());

            if elapsed < span && h < config.min_step() {
                return Err(Error::StepSizeTooSmall {
                    elapsed,
                    step_size: h,
                    min_step: config.min_step(),
                    error_estimate: err,
                });
            }
        } else {
            rejected += 1;

            let proposed = h * growth(err).min(1.0);
            tracing::trace!(step, h, err, proposed, "step rejected");

            if proposed < config.min_step() {
                return Err(Error::StepSizeTooSmall {
                    elapsed,
                    step_size: proposed,
                    min_step: config.min_step(),
                    error_estimate: err,
                });
            }
            h = proposed;
        }
    }

    tracing::debug!(
        steps,
        rejected,
        evaluations = eval.calls,
        "Dormand–Prince integration complete"
    );

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
        rejected,
        evaluations: eval.calls,
    })
}

/// Integrates an ODE problem using Dormand–Prince without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, P, const N: usize>(
    model: &M,
    problem: &P,
    initial: M::Input,
    span: f64,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64, State = StateVector<N>>,
{
    solve(model, problem, initial, span, config, ())
}

fn stopped<I, O>(
    history: Vec<Snapshot<I, O>>,
    steps: usize,
    rejected: usize,
    evaluations: usize,
) -> Solution<I, O> {
    Solution {
        status: Status::StoppedByObserver,
        history,
        steps,
        rejected,
        evaluations,
    }
}

/// Fifth- and embedded fourth-order solutions of one attempted step.
struct Trial<const N: usize> {
    y5: StateVector<N>,
    y4: StateVector<N>,
}

fn attempt<M, P, const N: usize>(
    eval: &mut Evaluator<'_, M, P>,
    step: usize,
    base: &M::Input,
    y: &StateVector<N>,
    k1: &Rate<N>,
    h: f64,
) -> Result<Trial<N>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64, State = StateVector<N>>,
{
    let stage = |terms: &[(f64, &Rate<N>)]| advance(y, &Rate::combine(terms), h);

    let k2 = eval.rate_at(step, base, &stage(&[(A21, k1)]), C2 * h)?;
    let k3 = eval.rate_at(step, base, &stage(&[(A31, k1), (A32, &k2)]), C3 * h)?;
    let k4 = eval.rate_at(
        step,
        base,
        &stage(&[(A41, k1), (A42, &k2), (A43, &k3)]),
        C4 * h,
    )?;
    let k5 = eval.rate_at(
        step,
        base,
        &stage(&[(A51, k1), (A52, &k2), (A53, &k3), (A54, &k4)]),
        C5 * h,
    )?;
    let k6 = eval.rate_at(
        step,
        base,
        &stage(&[(A61, k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)]),
        h,
    )?;

    let y5 = stage(&[(B1, k1), (B3, &k3), (B4, &k4), (B5, &k5), (B6, &k6)]);
    let k7 = eval.rate_at(step, base, &y5, h)?;
    let y4 = stage(&[
        (E1, k1),
        (E3, &k3),
        (E4, &k4),
        (E5, &k5),
        (E6, &k6),
        (E7, &k7),
    ]);

    Ok(Trial { y5, y4 })
}

fn advance<const N: usize>(y: &StateVector<N>, slope: &Rate<N>, h: f64) -> StateVector<N> {
    let mut next = y.0;
    for (v, s) in next.iter_mut().zip(slope.0) {
        *v += h * s;
    }
    StateVector(next)
}

/// Step size multiplier for a scaled error estimate.
fn growth(err: f64) -> f64 {
    if err == 0.0 {
        MAX_FACTOR
    } else {
        (SAFETY * err.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
    }
}
