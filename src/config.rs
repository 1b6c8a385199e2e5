//! Solver configuration.
//!
//! Defaults live here instead of in shared mutable state; every solver holds
//! its own copy of the configuration it was built with.

use crate::error::{CalculoError, Result};

/// Default convergence tolerance for the root-finders.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Default iteration ceiling for the root-finders.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Condition number above which elimination results carry a warning.
pub const DEFAULT_CONDITION_THRESHOLD: f64 = 1e5;

/// Pivots with magnitude at or below this are treated as zero.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-8;

/// Singular values at or below this are dropped from the pseudo-inverse.
pub const DEFAULT_SINGULAR_VALUE_CUTOFF: f64 = 1e-12;

/// Configuration shared by the bisection and Newton-Raphson solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFindConfig {
    /// Relative-error threshold that counts as converged.
    pub tolerance: f64,
    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl Default for RootFindConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RootFindConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Validates that the tolerance is positive and the budget non-zero.
    ///
    /// The solvers do not call this themselves; it is meant for the layer
    /// that turns user input into a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CalculoError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(CalculoError::invalid_config(
                "tolerance must be a positive value",
            ));
        }
        if self.max_iterations == 0 {
            return Err(CalculoError::invalid_config(
                "maximum number of iterations must be positive",
            ));
        }
        Ok(())
    }
}

/// Configuration for [`LinearSystemSolver`](crate::solver::LinearSystemSolver).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSystemConfig {
    /// Condition number above which the result warns of numerical error.
    pub condition_threshold: f64,
    /// Absolute magnitude under which a pivot counts as zero.
    pub pivot_tolerance: f64,
    /// Singular values at or below this are zeroed in the pseudo-inverse.
    pub singular_value_cutoff: f64,
}

impl Default for LinearSystemConfig {
    fn default() -> Self {
        Self {
            condition_threshold: DEFAULT_CONDITION_THRESHOLD,
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
            singular_value_cutoff: DEFAULT_SINGULAR_VALUE_CUTOFF,
        }
    }
}

impl LinearSystemConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the condition number warning threshold.
    pub fn with_condition_threshold(mut self, condition_threshold: f64) -> Self {
        self.condition_threshold = condition_threshold;
        self
    }

    /// Set the zero-pivot tolerance.
    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }

    /// Set the pseudo-inverse singular value cutoff.
    pub fn with_singular_value_cutoff(mut self, cutoff: f64) -> Self {
        self.singular_value_cutoff = cutoff;
        self
    }

    /// Validates that all thresholds are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`CalculoError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if !self.condition_threshold.is_finite() || self.condition_threshold <= 0.0 {
            return Err(CalculoError::invalid_config(
                "condition threshold must be a positive value",
            ));
        }
        if !self.pivot_tolerance.is_finite() || self.pivot_tolerance < 0.0 {
            return Err(CalculoError::invalid_config(
                "pivot tolerance must be finite and non-negative",
            ));
        }
        if !self.singular_value_cutoff.is_finite() || self.singular_value_cutoff < 0.0 {
            return Err(CalculoError::invalid_config(
                "singular value cutoff must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
