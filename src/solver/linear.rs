//! Linear system solver: shape dispatch, rank and conditioning checks,
//! elimination, and the SVD and least-squares fallbacks.

use nalgebra::{DMatrix, DVector};

use crate::config::LinearSystemConfig;
use crate::error::{CalculoError, Result};
use crate::input;

use super::decomposition::{matrix_rank, Decomposition};
use super::elimination::gaussian_elimination;
use super::result::{LinearStatus, LinearSystemResult, Method};

/// Solver for `A x = b`.
///
/// [`solve`](Self::solve) only ever uses Gaussian elimination. When the system
/// is singular or not square it reports that and names an alternative; the
/// caller decides whether to run [`solve_by_svd`](Self::solve_by_svd) or
/// [`solve_by_least_squares`](Self::solve_by_least_squares).
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSystemSolver {
    config: LinearSystemConfig,
}

impl LinearSystemSolver {
    /// Create a solver with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with the given configuration.
    pub fn with_config(config: LinearSystemConfig) -> Self {
        Self { config }
    }

    /// The configuration this solver runs with.
    pub fn config(&self) -> &LinearSystemConfig {
        &self.config
    }

    /// Solve a square, non-singular system by Gaussian elimination.
    pub fn solve(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> LinearSystemResult {
        if let Err(e) = check_system(a, b) {
            return input_error(&e);
        }

        let (m, n) = a.shape();
        if m != n {
            return LinearSystemResult::failure(
                LinearStatus::NotSquare,
                format!(
                    "The system is not square ({m}x{n}) and cannot be solved by Gaussian \
                     elimination. Suggested method: {}.",
                    Method::LeastSquares
                ),
            );
        }

        let decomposition = match Decomposition::new(a, false) {
            Ok(d) => d,
            Err(e) => return numeric_error(&e),
        };

        let rank = decomposition.rank();
        if rank < n {
            log::info!("linear: rank {rank} < {n}, system is singular");
            return LinearSystemResult::failure(
                LinearStatus::Singular,
                format!(
                    "The system is singular (rank {rank} < {n}, det(A) = 0) and cannot be solved \
                     by Gaussian elimination. Suggested method: {}.",
                    Method::Svd
                ),
            );
        }

        let cond = decomposition.condition_number();
        let conditioning = if cond > self.config.condition_threshold {
            log::warn!("linear: ill-conditioned system, cond(A) = {cond:.2e}");
            format!(
                "Ill-conditioned system (cond(A) = {cond:.2e}); the elimination result may \
                 contain numerical errors."
            )
        } else {
            format!("Well-conditioned system (cond(A) = {cond:.2}).")
        };

        match gaussian_elimination(a, b, self.config.pivot_tolerance) {
            Ok(x) => finish(
                LinearStatus::SuccessElimination,
                x,
                format!("{conditioning} Solution obtained by {}.", Method::Elimination),
            )
            .with_condition_number(cond),
            Err(e) => {
                log::warn!("linear: elimination failed after rank check passed: {e}");
                LinearSystemResult::failure(
                    LinearStatus::Singular,
                    format!(
                        "Error during elimination: {e}. Floating-point error can let a singular \
                         system pass the rank check. Suggested method: {}.",
                        Method::Svd
                    ),
                )
                .with_condition_number(cond)
            }
        }
    }

    /// Solve any system through the SVD pseudo-inverse.
    ///
    /// Gives the minimum-norm least-squares solution, so it also handles
    /// singular and non-square systems.
    pub fn solve_by_svd(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> LinearSystemResult {
        if let Err(e) = check_system(a, b) {
            return input_error(&e);
        }

        let solved = Decomposition::new(a, true)
            .and_then(|d| d.pseudo_inverse_solve(b, self.config.singular_value_cutoff));

        match solved {
            Ok(x) => finish(
                LinearStatus::SuccessSvd,
                x,
                format!("Solution obtained by {} (not Gaussian elimination).", Method::Svd),
            ),
            Err(e) => numeric_error(&e),
        }
    }

    /// Solve any system through the normal equations `AᵀA x = Aᵀb`.
    ///
    /// Falls back to [`solve_by_svd`](Self::solve_by_svd) on the original
    /// system when `AᵀA` is rank-deficient. Once the rank check passes, only
    /// an exactly zero pivot in `AᵀA` counts as a failure.
    pub fn solve_by_least_squares(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> LinearSystemResult {
        if let Err(e) = check_system(a, b) {
            return input_error(&e);
        }

        let ata = a.tr_mul(a);
        let atb = a.tr_mul(b);
        let n = ata.nrows();

        let rank = match matrix_rank(&ata) {
            Ok(rank) => rank,
            Err(e) => return numeric_error(&e),
        };
        if rank < n {
            log::warn!("linear: AᵀA has rank {rank} < {n}, delegating to SVD");
            return self.delegate_to_svd(a, b, "The matrix AᵀA is singular");
        }

        match gaussian_elimination(&ata, &atb, 0.0) {
            Ok(x) => finish(
                LinearStatus::SuccessLeastSquares,
                x,
                format!(
                    "Solution obtained by {} (not Gaussian elimination).",
                    Method::LeastSquares
                ),
            ),
            Err(e) => {
                log::warn!("linear: normal equations failed ({e}), delegating to SVD");
                self.delegate_to_svd(a, b, "Elimination on AᵀA hit a zero pivot")
            }
        }
    }

    /// Parse `matrix` and `rhs` text and run the chosen method.
    ///
    /// Text that does not parse yields [`LinearStatus::InputError`].
    pub fn solve_text(&self, matrix: &str, rhs: &str, method: Method) -> LinearSystemResult {
        let parsed = input::parse_matrix(matrix)
            .and_then(|a| input::parse_vector(rhs).map(|b| (a, b)));

        match parsed {
            Ok((a, b)) => self.solve_with(method, &a, &b),
            Err(e) => input_error(&e),
        }
    }

    /// Run the given method.
    pub fn solve_with(
        &self,
        method: Method,
        a: &DMatrix<f64>,
        b: &DVector<f64>,
    ) -> LinearSystemResult {
        match method {
            Method::Elimination => self.solve(a, b),
            Method::Svd => self.solve_by_svd(a, b),
            Method::LeastSquares => self.solve_by_least_squares(a, b),
        }
    }

    fn delegate_to_svd(
        &self,
        a: &DMatrix<f64>,
        b: &DVector<f64>,
        reason: &str,
    ) -> LinearSystemResult {
        let mut result = self.solve_by_svd(a, b);
        if result.is_success() {
            result.message = format!("{reason}; using SVD for least squares. {}", result.message);
        }
        result
    }
}

/// Reject systems the solvers cannot take: empty, mismatched, or non-finite.
fn check_system(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<()> {
    let (rows, cols) = a.shape();
    if rows == 0 || cols == 0 {
        return Err(CalculoError::EmptyInput { what: "matrix" });
    }
    if b.len() != rows {
        return Err(CalculoError::DimensionMismatch { rows, len: b.len() });
    }

    for row in 0..rows {
        for column in 0..cols {
            let value = a[(row, column)];
            if !value.is_finite() {
                return Err(CalculoError::NonFiniteEntry {
                    row: row + 1,
                    column: column + 1,
                    value,
                });
            }
        }
    }
    if let Some((row, &value)) = b.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(CalculoError::NonFiniteEntry {
            row: row + 1,
            column: cols + 1,
            value,
        });
    }

    Ok(())
}

fn finish(status: LinearStatus, x: DVector<f64>, message: String) -> LinearSystemResult {
    if x.iter().all(|v| v.is_finite()) {
        LinearSystemResult::success(status, x.iter().copied().collect(), message)
    } else {
        LinearSystemResult::failure(
            LinearStatus::NumericError,
            "The computed solution contains non-finite values.",
        )
    }
}

fn input_error(e: &CalculoError) -> LinearSystemResult {
    LinearSystemResult::failure(LinearStatus::InputError, format!("Input error: {e}"))
}

fn numeric_error(e: &CalculoError) -> LinearSystemResult {
    log::warn!("linear: numeric failure: {e}");
    LinearSystemResult::failure(LinearStatus::NumericError, format!("Numerical error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use nalgebra::{dmatrix, dvector};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn classic() -> (DMatrix<f64>, DVector<f64>) {
        (
            dmatrix![2.0, 1.0, -1.0; -3.0, -1.0, 2.0; -2.0, 1.0, 2.0],
            dvector![8.0, -11.0, -3.0],
        )
    }

    fn assert_solution(result: &LinearSystemResult, expected: &[f64], epsilon: f64) {
        let x = result.solution.as_ref().expect("should have a solution");
        assert_eq!(x.len(), expected.len());
        for (got, want) in x.iter().zip(expected) {
            assert_relative_eq!(*got, *want, epsilon = epsilon);
        }
    }

    #[test]
    fn test_classic_system() {
        let (a, b) = classic();
        let result = LinearSystemSolver::new().solve(&a, &b);

        assert_eq!(result.status, LinearStatus::SuccessElimination);
        assert_solution(&result, &[2.0, 3.0, -1.0], 1e-10);
        assert!(result.condition_number.is_some());
        assert!(result.message.contains("Well-conditioned"));
    }

    #[test]
    fn test_singular_duplicate_rows() {
        let a = dmatrix![1.0, 2.0, 3.0; 1.0, 2.0, 3.0; 4.0, 0.0, 1.0];
        let solver = LinearSystemSolver::new();

        for b in [dvector![1.0, 1.0, 1.0], dvector![1.0, 2.0, 3.0]] {
            let result = solver.solve(&a, &b);
            assert_eq!(result.status, LinearStatus::Singular);
            assert_eq!(result.solution, None);
            assert_eq!(result.suggested_method(), Some(Method::Svd));
        }
    }

    #[test]
    fn test_not_square() {
        let a = dmatrix![1.0, 2.0; 3.0, 4.0; 5.0, 6.0];
        let b = dvector![1.0, 2.0, 3.0];
        let result = LinearSystemSolver::new().solve(&a, &b);

        assert_eq!(result.status, LinearStatus::NotSquare);
        assert_eq!(result.solution, None);
        assert_eq!(result.suggested_method(), Some(Method::LeastSquares));
    }

    #[test]
    fn test_single_equation_exact() {
        let result = LinearSystemSolver::new().solve(&dmatrix![5.0], &dvector![10.0]);

        assert_eq!(result.status, LinearStatus::SuccessElimination);
        assert_eq!(result.solution, Some(vec![2.0]));
    }

    #[test]
    fn test_tiny_last_pivot_still_solves() {
        let solver = LinearSystemSolver::new();

        let result = solver.solve(&dmatrix![1e-9], &dvector![1.0]);
        assert_eq!(result.status, LinearStatus::SuccessElimination);
        let x = result.solution.expect("should have a solution");
        assert_relative_eq!(x[0], 1e9, max_relative = 1e-12);

        let a = dmatrix![1.0, 0.0; 0.0, 1e-9];
        let result = solver.solve(&a, &dvector![1.0, 1.0]);
        assert_eq!(result.status, LinearStatus::SuccessElimination);
        assert!(result.message.contains("Ill-conditioned"));
        let x = result.solution.expect("should have a solution");
        assert_relative_eq!(x[0], 1.0, max_relative = 1e-12);
        assert_relative_eq!(x[1], 1e9, max_relative = 1e-12);
    }

    #[test]
    fn test_idempotent() {
        let (a, b) = classic();
        let solver = LinearSystemSolver::new();

        let first = solver.solve(&a, &b);
        let second = solver.solve(&a, &b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 8;

        // Diagonal dominance keeps the system well conditioned.
        let a = DMatrix::from_fn(n, n, |i, j| {
            let v: f64 = rng.gen_range(-1.0..1.0);
            if i == j {
                v + n as f64
            } else {
                v
            }
        });
        let x: DVector<f64> = DVector::from_fn(n, |_, _| rng.gen_range(-10.0..10.0));
        let b = &a * &x;

        let result = LinearSystemSolver::new().solve(&a, &b);
        assert_eq!(result.status, LinearStatus::SuccessElimination);
        assert_solution(&result, x.as_slice(), 1e-9);
    }

    #[test]
    fn test_ill_conditioned_still_solves() {
        // 5x5 Hilbert matrix, cond ~ 4.8e5.
        let n = 5;
        let a = DMatrix::from_fn(n, n, |i, j| 1.0 / (i + j + 1) as f64);
        let x = DVector::from_element(n, 1.0);
        let b = &a * &x;

        let result = LinearSystemSolver::new().solve(&a, &b);
        assert_eq!(result.status, LinearStatus::SuccessElimination);
        assert!(result.message.contains("Ill-conditioned"));
        assert!(result.condition_number.unwrap() > 1e5);
        assert_solution(&result, x.as_slice(), 1e-6);
    }

    #[test]
    fn test_condition_threshold_is_configurable() {
        let (a, b) = classic();
        let config = LinearSystemConfig::new().with_condition_threshold(1.0);
        let result = LinearSystemSolver::with_config(config).solve(&a, &b);

        assert_eq!(result.status, LinearStatus::SuccessElimination);
        assert!(result.message.contains("Ill-conditioned"));
    }

    #[test]
    fn test_pivot_tolerance_failure_is_singular() {
        // Full rank, but every pivot is below an oversized tolerance.
        let a = dmatrix![1e-3, 0.0; 0.0, 1e-3];
        let config = LinearSystemConfig::new().with_pivot_tolerance(1e-2);
        let result = LinearSystemSolver::with_config(config).solve(&a, &dvector![1.0, 1.0]);

        assert_eq!(result.status, LinearStatus::Singular);
        assert_eq!(result.solution, None);
        assert!(result.message.contains("Error during elimination"));
    }

    #[test]
    fn test_dimension_mismatch_is_input_error() {
        let (a, _) = classic();
        let result = LinearSystemSolver::new().solve(&a, &dvector![1.0, 2.0]);

        assert_eq!(result.status, LinearStatus::InputError);
        assert_eq!(result.solution, None);
    }

    #[test]
    fn test_non_finite_is_input_error() {
        let a = dmatrix![1.0, f64::NAN; 0.0, 1.0];
        let result = LinearSystemSolver::new().solve_by_svd(&a, &dvector![1.0, 1.0]);
        assert_eq!(result.status, LinearStatus::InputError);

        let a = dmatrix![1.0, 0.0; 0.0, 1.0];
        let result = LinearSystemSolver::new().solve(&a, &dvector![1.0, f64::INFINITY]);
        assert_eq!(result.status, LinearStatus::InputError);
    }

    #[test]
    fn test_overflowing_solution_is_numeric_error() {
        // 1e300 / 1e-10 overflows to infinity.
        let a = dmatrix![1e-10, 0.0; 0.0, 1.0];
        let result = LinearSystemSolver::new().solve_by_svd(&a, &dvector![1e300, 1.0]);

        assert_eq!(result.status, LinearStatus::NumericError);
        assert_eq!(result.solution, None);
    }

    #[test]
    fn test_svd_singular_minimum_norm() {
        let a = dmatrix![1.0, 1.0; 1.0, 1.0];
        let result = LinearSystemSolver::new().solve_by_svd(&a, &dvector![2.0, 2.0]);

        assert_eq!(result.status, LinearStatus::SuccessSvd);
        assert_solution(&result, &[1.0, 1.0], 1e-12);
    }

    #[test]
    fn test_svd_matches_elimination_when_regular() {
        let (a, b) = classic();
        let result = LinearSystemSolver::new().solve_by_svd(&a, &b);

        assert_eq!(result.status, LinearStatus::SuccessSvd);
        assert_solution(&result, &[2.0, 3.0, -1.0], 1e-10);
    }

    #[test]
    fn test_least_squares_line_fit() {
        // y = 2 + 3t at t = 0, 1, 2, 3
        let a = dmatrix![1.0, 0.0; 1.0, 1.0; 1.0, 2.0; 1.0, 3.0];
        let b = dvector![2.0, 5.0, 8.0, 11.0];
        let result = LinearSystemSolver::new().solve_by_least_squares(&a, &b);

        assert_eq!(result.status, LinearStatus::SuccessLeastSquares);
        assert_solution(&result, &[2.0, 3.0], 1e-10);
    }

    #[test]
    fn test_least_squares_small_scale_uses_normal_equations() {
        // AᵀA entries are ~1e-10, far below the default pivot tolerance.
        let a = dmatrix![1.0, 0.0; 0.0, 1.0; 1.0, 1.0] * 1e-5;
        let b = dvector![1.0, 2.0, 3.0] * 1e-5;
        let result = LinearSystemSolver::new().solve_by_least_squares(&a, &b);

        assert_eq!(result.status, LinearStatus::SuccessLeastSquares);
        assert_solution(&result, &[1.0, 2.0], 1e-9);
    }

    #[test]
    fn test_least_squares_rank_deficient_delegates() {
        // Second column duplicates the first.
        let a = dmatrix![1.0, 1.0; 1.0, 1.0; 1.0, 1.0];
        let b = dvector![2.0, 2.0, 2.0];
        let result = LinearSystemSolver::new().solve_by_least_squares(&a, &b);

        assert_eq!(result.status, LinearStatus::SuccessSvd);
        assert!(result.message.contains("AᵀA is singular"));
        assert_solution(&result, &[1.0, 1.0], 1e-10);
    }

    #[test]
    fn test_solve_text() {
        let solver = LinearSystemSolver::new();

        let result =
            solver.solve_text("2 1 -1; -3 -1 2; -2 1 2", "8, -11, -3", Method::Elimination);
        assert_eq!(result.status, LinearStatus::SuccessElimination);
        assert_solution(&result, &[2.0, 3.0, -1.0], 1e-10);

        let result = solver.solve_text("1 2; 3 x", "1 2", Method::Elimination);
        assert_eq!(result.status, LinearStatus::InputError);
        assert!(result.message.contains("'x'"));

        let result = solver.solve_text("1 2\n3", "1 2", Method::Svd);
        assert_eq!(result.status, LinearStatus::InputError);
    }
}
