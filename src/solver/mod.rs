//! Numerical solvers.
//!
//! Three independent, stateless components:
//!
//! - [`Bisection`] - bracketing root-finder
//! - [`NewtonRaphson`] - derivative-based root-finder
//! - [`LinearSystemSolver`] - Gaussian elimination with SVD and
//!   least-squares fallbacks
//!
//! None of them call each other, and each holds nothing but its
//! configuration, so a solver can be shared freely between threads.
//!
//! ## Relative error
//!
//! Both root-finders stop when successive estimates satisfy
//!
//! ```text
//! |(x_k - x_{k-1}) / x_k| < tolerance
//! ```
//!
//! The quotient is undefined at `x_k = 0`, so for `|x_k| <= ε` the absolute
//! difference `|x_k - x_{k-1}|` is used instead.

mod bisection;
pub mod decomposition;
pub mod elimination;
mod linear;
mod newton;
mod result;

pub use bisection::Bisection;
pub use linear::LinearSystemSolver;
pub use newton::NewtonRaphson;
pub use result::{LinearStatus, LinearSystemResult, Method, RootFindResult, StopReason};

/// Relative change from `previous` to `current`, falling back to the
/// absolute change when `current` is too close to zero to divide by.
pub fn relative_error(current: f64, previous: f64) -> f64 {
    let delta = current - previous;
    if current.abs() <= f64::EPSILON {
        delta.abs()
    } else {
        (delta / current).abs()
    }
}

/// True if `x` and `y` are nonzero with opposite signs.
fn opposite_signs(x: f64, y: f64) -> bool {
    (x < 0.0 && y > 0.0) || (x > 0.0 && y < 0.0)
}
