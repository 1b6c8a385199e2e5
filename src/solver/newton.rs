//! Newton-Raphson iteration for scalar equations.

use crate::config::RootFindConfig;

use super::relative_error;
use super::result::{RootFindResult, StopReason};

/// Derivative-based root-finder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonRaphson {
    config: RootFindConfig,
}

impl NewtonRaphson {
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

    /// Search for a root of `f` starting from `x0`, using `f_prime` as its
    /// derivative.
    ///
    /// A zero derivative ends the search with no root and the iteration
    /// count at which it happened.
    pub fn solve<F, D>(&self, f: F, f_prime: D, x0: f64) -> RootFindResult
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let RootFindConfig {
            tolerance,
            max_iterations,
        } = self.config;

        let mut x = x0;
        let mut prev_x: Option<f64> = None;
        let mut iterations = 0;

        loop {
            let fx = f(x);
            let dfx = f_prime(x);
            iterations += 1;

            log::debug!("newton: iter {iterations} x = {x} f(x) = {fx} f'(x) = {dfx}");

            #[allow(clippy::float_cmp)]
            if dfx == 0.0 {
                log::info!("newton: zero derivative at x = {x} (iteration {iterations})");
                return RootFindResult::failed(iterations, StopReason::ZeroDerivative);
            }

            let rel = prev_x.map(|prev| relative_error(x, prev));

            if rel.is_some_and(|e| e < tolerance) {
                log::debug!("newton: converged after {iterations} iterations");
                return RootFindResult::estimate(x, fx, iterations, rel, StopReason::RelativeError);
            }

            #[allow(clippy::float_cmp)]
            if fx == 0.0 {
                return RootFindResult::estimate(
                    x,
                    fx,
                    iterations,
                    Some(0.0),
                    StopReason::ExactRoot,
                );
            }

            if iterations >= max_iterations {
                log::info!("newton: iteration budget of {max_iterations} exhausted");
                return RootFindResult::estimate(x, fx, iterations, rel, StopReason::MaxIterations);
            }

            prev_x = Some(x);
            x -= fx / dfx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_finds_square_root_of_four() {
        let result = NewtonRaphson::new().solve(|x| x * x - 4.0, |x| 2.0 * x, 1.0);

        let root = result.root.expect("should find a root");
        assert_relative_eq!(root, 2.0, epsilon = 1e-10);
        assert_relative_eq!(result.value_at_root.unwrap(), 0.0, epsilon = 1e-9);
        assert!(result.converged());
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_zero_derivative_on_first_iteration() {
        let result = NewtonRaphson::new().solve(|x| x * x + 1.0, |x| 2.0 * x, 0.0);

        assert_eq!(result.root, None);
        assert_eq!(result.value_at_root, None);
        assert_eq!(result.iterations, 1);
        assert!(!result.hit_max_iterations);
        assert_eq!(result.stop, StopReason::ZeroDerivative);
    }

    #[test]
    fn test_zero_derivative_wins_over_exact_root() {
        // x0 = 2 steps to x = 1, where f is zero but so is the supplied f'.
        let f_prime = |x: f64| if x < 1.5 { 0.0 } else { 1.0 };
        let result = NewtonRaphson::new().solve(|x| x - 1.0, f_prime, 2.0);

        assert_eq!(result.root, None);
        assert_eq!(result.iterations, 2);
        assert_eq!(result.stop, StopReason::ZeroDerivative);
    }

    #[test]
    fn test_exact_root_at_start() {
        let result = NewtonRaphson::new().solve(|x| x * x - 4.0, |x| 2.0 * x, 2.0);

        assert_eq!(result.root, Some(2.0));
        assert_eq!(result.iterations, 1);
        assert_eq!(result.relative_error, Some(0.0));
        assert_eq!(result.stop, StopReason::ExactRoot);
    }

    #[test]
    fn test_hits_max_iterations() {
        // No real root: iterates stay bounded but never settle.
        let config = RootFindConfig::new().with_max_iterations(8);
        let result = NewtonRaphson::with_config(config).solve(|x| x * x + 1.0, |x| 2.0 * x, 0.5);

        assert!(result.hit_max_iterations);
        assert_eq!(result.iterations, 8);
        assert!(result.root.is_some());
    }

    #[test]
    fn test_root_at_zero_is_guarded() {
        // Converges onto x = 0 where the plain relative error divides by zero.
        let result = NewtonRaphson::new().solve(|x| x.powi(3) + x, |x| 3.0 * x * x + 1.0, 0.5);

        let root = result.root.expect("should find a root");
        assert_relative_eq!(root, 0.0, epsilon = 1e-7);
        assert!(result.relative_error.map_or(true, f64::is_finite));
    }

    #[test]
    fn test_transcendental() {
        let result = NewtonRaphson::new().solve(|x: f64| x.cos() - x, |x: f64| -x.sin() - 1.0, 1.0);

        assert_relative_eq!(result.root.unwrap(), 0.739_085_133_215_160_6, epsilon = 1e-9);
    }

    #[test]
    fn test_relative_error_checked_before_exact_root() {
        // x = 2 is reached exactly on iteration 2, where the tolerance is also met.
        let config = RootFindConfig::new().with_tolerance(10.0);
        let result = NewtonRaphson::with_config(config).solve(|x| x - 2.0, |_| 1.0, 1.0);

        assert_eq!(result.iterations, 2);
        assert_eq!(result.root, Some(2.0));
        assert_eq!(result.value_at_root, Some(0.0));
        assert_eq!(result.stop, StopReason::RelativeError);
        assert_relative_eq!(result.relative_error.unwrap(), 0.5);
    }
}
