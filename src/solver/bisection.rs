//! Bisection root-finder.

use crate::config::RootFindConfig;

use super::result::{RootFindResult, StopReason};
use super::{opposite_signs, relative_error};

/// Bracketing root-finder.
///
/// Halves an interval whose endpoints differ in sign until successive
/// midpoints agree within the configured tolerance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bisection {
    config: RootFindConfig,
}

impl Bisection {
    /// Create a solver with default tolerance and iteration budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with the given configuration.
    pub fn with_config(config: RootFindConfig) -> Self {
        Self { config }
    }

    /// The configuration this solver runs with.
    pub fn config(&self) -> &RootFindConfig {
        &self.config
    }

    /// Search for a root of `f` in `[a, b]`.
    ///
    /// Bracket ordering and parameter validity are not checked here; see
    /// [`validate_interval`](crate::input::validate_interval). If `f(a)` and
    /// `f(b)` do not have opposite signs the result has no root and zero
    /// iterations.
    pub fn solve<F>(&self, f: F, a: f64, b: f64) -> RootFindResult
    where
        F: Fn(f64) -> f64,
    {
        let RootFindConfig {
            tolerance,
            max_iterations,
        } = self.config;

        if f(a) * f(b) >= 0.0 {
            log::debug!("bisection: no sign change on [{a}, {b}]");
            return RootFindResult::failed(0, StopReason::NoSignChange);
        }

        let (mut a, mut b) = (a, b);
        let mut prev_m: Option<f64> = None;
        let mut iterations = 0;

        loop {
            let fa = f(a);
            let fb = f(b);
            let m = 0.5 * (a + b);
            let fm = f(m);
            iterations += 1;

            let rel = prev_m.map(|prev| relative_error(m, prev));
            log::debug!("bisection: iter {iterations} bracket [{a}, {b}] m = {m} f(m) = {fm}");

            if rel.is_some_and(|e| e < tolerance) {
                log::debug!("bisection: converged after {iterations} iterations");
                return RootFindResult::estimate(m, fm, iterations, rel, StopReason::RelativeError);
            }

            #[allow(clippy::float_cmp)]
            if fm == 0.0 {
                return RootFindResult::estimate(
                    m,
                    fm,
                    iterations,
                    Some(0.0),
                    StopReason::ExactRoot,
                );
            }

            if iterations >= max_iterations {
                log::info!("bisection: iteration budget of {max_iterations} exhausted");
                return RootFindResult::estimate(m, fm, iterations, rel, StopReason::MaxIterations);
            }

            if opposite_signs(fa, fm) {
                b = m;
            } else if opposite_signs(fb, fm) {
                a = m;
            } else {
                log::info!("bisection: no sign change in either half of [{a}, {b}]");
                return RootFindResult::estimate(m, fm, iterations, rel, StopReason::Stalled);
            }

            prev_m = Some(m);
        }
    }
}
