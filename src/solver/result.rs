//! Result types produced by the solvers.

use std::fmt;

/// Which criterion ended a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// f(a) and f(b) do not differ in sign; no search was attempted.
    NoSignChange,
    /// f'(x) was exactly zero, so no Newton step is possible.
    ZeroDerivative,
    /// Successive estimates agreed within the tolerance.
    RelativeError,
    /// The function evaluated to exactly zero.
    ExactRoot,
    /// The iteration budget ran out.
    MaxIterations,
    /// Neither half of the bracket showed a sign change.
    Stalled,
}

/// Outcome of a single bisection or Newton-Raphson solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFindResult {
    /// Root estimate, absent when the search could not start or proceed.
    pub root: Option<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// f evaluated at the root estimate.
    pub value_at_root: Option<f64>,
    /// True when the search stopped on the iteration ceiling.
    pub hit_max_iterations: bool,
    /// Relative error of the last step, when one was computable.
    pub relative_error: Option<f64>,
    /// Criterion that ended the search.
    pub stop: StopReason,
}

impl RootFindResult {
    /// A search that could not produce an estimate.
    pub(crate) fn failed(iterations: usize, stop: StopReason) -> Self {
        Self {
            root: None,
            iterations,
            value_at_root: None,
            hit_max_iterations: false,
            relative_error: None,
            stop,
        }
    }

    /// A search that stopped with `x` as its estimate.
    pub(crate) fn estimate(
        x: f64,
        fx: f64,
        iterations: usize,
        relative_error: Option<f64>,
        stop: StopReason,
    ) -> Self {
        Self {
            root: Some(x),
            iterations,
            value_at_root: Some(fx),
            hit_max_iterations: stop == StopReason::MaxIterations,
            relative_error,
            stop,
        }
    }

    /// True if the search stopped on a convergence criterion.
    pub fn converged(&self) -> bool {
        matches!(self.stop, StopReason::RelativeError | StopReason::ExactRoot)
    }

    /// Human-readable summary of how the search ended.
    pub fn message(&self) -> &'static str {
        match self.stop {
            StopReason::NoSignChange => "Error: f(a) and f(b) must have opposite signs.",
            StopReason::ZeroDerivative => "Failure: derivative equal to zero.",
            StopReason::RelativeError => "Converged by relative error.",
            StopReason::ExactRoot => "Converged: f(x) is exactly zero.",
            StopReason::MaxIterations => "Maximum number of iterations reached.",
            StopReason::Stalled => {
                "Stopped: no sign change in either half of the interval."
            }
        }
    }
}

/// Solution strategy for a linear system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Gaussian elimination with partial pivoting.
    Elimination,
    /// SVD pseudo-inverse.
    Svd,
    /// Normal-equations least squares.
    LeastSquares,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Elimination => write!(f, "Gaussian elimination"),
            Method::Svd => write!(f, "singular value decomposition (SVD)"),
            Method::LeastSquares => write!(f, "least squares (normal equations)"),
        }
    }
}

/// Status tag of a [`LinearSystemResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinearStatus {
    SuccessElimination,
    SuccessSvd,
    SuccessLeastSquares,
    Singular,
    NotSquare,
    InputError,
    NumericError,
}

impl LinearStatus {
    /// True for the three solved statuses.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            LinearStatus::SuccessElimination
                | LinearStatus::SuccessSvd
                | LinearStatus::SuccessLeastSquares
        )
    }

    /// Alternative method the caller may choose to run.
    ///
    /// The solver never switches methods on its own.
    pub fn suggested_method(&self) -> Option<Method> {
        match self {
            LinearStatus::Singular => Some(Method::Svd),
            LinearStatus::NotSquare => Some(Method::LeastSquares),
            _ => None,
        }
    }
}

/// Outcome of a linear solve.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystemResult {
    pub status: LinearStatus,
    /// Present exactly when `status` is a success, with one entry per unknown.
    pub solution: Option<Vec<f64>>,
    pub message: String,
    /// Condition number of A, when the square path computed it.
    pub condition_number: Option<f64>,
}

impl LinearSystemResult {
    pub(crate) fn success(
        status: LinearStatus,
        solution: Vec<f64>,
        message: impl Into<String>,
    ) -> Self {
        debug_assert!(status.is_success());
        Self {
            status,
            solution: Some(solution),
            message: message.into(),
            condition_number: None,
        }
    }

    pub(crate) fn failure(status: LinearStatus, message: impl Into<String>) -> Self {
        debug_assert!(!status.is_success());
        Self {
            status,
            solution: None,
            message: message.into(),
            condition_number: None,
        }
    }

    pub(crate) fn with_condition_number(mut self, condition_number: f64) -> Self {
        self.condition_number = Some(condition_number);
        self
    }

    /// True if a solution is present.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Alternative method suggested by the status, if any.
    pub fn suggested_method(&self) -> Option<Method> {
        self.status.suggested_method()
    }
}
