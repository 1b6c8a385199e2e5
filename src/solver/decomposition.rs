//! SVD-based rank, conditioning and pseudo-inverse solves.

use nalgebra::{DMatrix, DVector, Dyn, SVD};

use crate::error::{CalculoError, Result};

/// Iteration cap handed to the SVD; exceeding it is reported as an error.
pub const SVD_MAX_ITERATIONS: usize = 10_000;

/// Singular value decomposition of a matrix, plus what the solver needs from it.
pub struct Decomposition {
    svd: SVD<f64, Dyn, Dyn>,
    rows: usize,
    cols: usize,
}

impl Decomposition {
    /// Decompose `a`, computing U and Vᵀ only when `with_vectors` is set.
    ///
    /// # Errors
    ///
    /// Returns [`CalculoError::DecompositionFailed`] if the iteration does not
    /// converge.
    pub fn new(a: &DMatrix<f64>, with_vectors: bool) -> Result<Self> {
        let (rows, cols) = a.shape();
        let svd = SVD::try_new(
            a.clone(),
            with_vectors,
            with_vectors,
            f64::EPSILON,
            SVD_MAX_ITERATIONS,
        )
        .ok_or(CalculoError::DecompositionFailed { rows, cols })?;

        Ok(Self { svd, rows, cols })
    }

    /// Singular values, in no guaranteed order.
    pub fn singular_values(&self) -> &DVector<f64> {
        &self.svd.singular_values
    }

    fn largest(&self) -> f64 {
        self.singular_values().iter().copied().fold(0.0, f64::max)
    }

    fn smallest(&self) -> f64 {
        self.singular_values()
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    /// Numerical rank: singular values above `σ_max · max(m, n) · ε`.
    pub fn rank(&self) -> usize {
        let threshold = self.largest() * self.rows.max(self.cols) as f64 * f64::EPSILON;
        self.singular_values()
            .iter()
            .filter(|&&s| s > threshold)
            .count()
    }

    /// 2-norm condition number `σ_max / σ_min`; infinite when `σ_min` is 0.
    pub fn condition_number(&self) -> f64 {
        let smallest = self.smallest();
        if smallest == 0.0 {
            f64::INFINITY
        } else {
            self.largest() / smallest
        }
    }

    /// Minimum-norm solution `x = V · Σ⁺ · Uᵀ · b`.
    ///
    /// Singular values at or below `cutoff` are treated as zero. Requires the
    /// decomposition to have been computed with vectors.
    ///
    /// # Panics
    ///
    /// Panics if `b` does not have one entry per row of the decomposed matrix.
    pub fn pseudo_inverse_solve(&self, b: &DVector<f64>, cutoff: f64) -> Result<DVector<f64>> {
        assert_eq!(self.rows, b.len(), "right-hand side length must match matrix rows");

        let (Some(u), Some(v_t)) = (self.svd.u.as_ref(), self.svd.v_t.as_ref()) else {
            return Err(CalculoError::DecompositionFailed {
                rows: self.rows,
                cols: self.cols,
            });
        };

        let mut projected = u.tr_mul(b);
        for (value, &sigma) in projected.iter_mut().zip(self.singular_values().iter()) {
            if sigma > cutoff {
                *value /= sigma;
            } else {
                *value = 0.0;
            }
        }

        Ok(v_t.tr_mul(&projected))
    }
}

/// Numerical rank of `a`.
pub fn matrix_rank(a: &DMatrix<f64>) -> Result<usize> {
    Decomposition::new(a, false).map(|d| d.rank())
}
