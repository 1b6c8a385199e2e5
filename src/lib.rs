//! # Calculo Core
//!
//! Classic numerical-analysis solvers.
//!
//! This library provides:
//! - Bisection root-finding on a sign-changing interval
//! - Newton-Raphson root-finding from a starting point and a derivative
//! - Gaussian elimination with partial pivoting for square linear systems,
//!   with SVD pseudo-inverse and normal-equations least-squares fallbacks
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`solver`] - The three solvers and their result types
//! - [`config`] - Per-solver configuration with defaults
//! - [`input`] - Matrix/vector/scalar text parsing, parameter validation and
//!   polynomial functions
//! - [`error`] - Error type for input handling and internal numeric failures
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! calculo newton --poly "1 0 -4" --x0 1
//! calculo bisection --poly "1 0 -1 -2" -a 1 -b 2 --tolerance 1e-5
//! calculo linear --matrix "2 1 -1; -3 -1 2; -2 1 2" --rhs "8 -11 -3"
//! ```
//!
//! ### Library
//!
//! ```
//! use calculo_core::{Bisection, LinearSystemSolver, LinearStatus};
//! use nalgebra::{dmatrix, dvector};
//!
//! let result = Bisection::new().solve(|x| x * x - 4.0, 1.0, 3.0);
//! assert!((result.root.unwrap() - 2.0).abs() < 1e-6);
//!
//! let a = dmatrix![2.0, 1.0, -1.0; -3.0, -1.0, 2.0; -2.0, 1.0, 2.0];
//! let b = dvector![8.0, -11.0, -3.0];
//! let result = LinearSystemSolver::new().solve(&a, &b);
//! assert_eq!(result.status, LinearStatus::SuccessElimination);
//! ```
//!
//! ## Failure Model
//!
//! Solvers never return errors or panic on user data. Root-finders report
//! why they stopped through [`StopReason`]; the linear solver tags its result
//! with a [`LinearStatus`] and, for singular or non-square systems, suggests
//! a [`Method`] for the caller to run instead.

pub mod config;
pub mod error;
pub mod input;
pub mod solver;

// Re-export main types for convenience
pub use config::{LinearSystemConfig, RootFindConfig};
pub use error::{CalculoError, Result};
pub use solver::{
    Bisection, LinearStatus, LinearSystemResult, LinearSystemSolver, Method, NewtonRaphson,
    RootFindResult, StopReason,
};
