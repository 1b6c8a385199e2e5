//! Gaussian elimination with partial pivoting.
//!
//! Works on the augmented matrix `[A|b]`, reducing it to upper-triangular form
//! with row swaps only, then recovers `x` by back substitution.

use nalgebra::{DMatrix, DVector};

use crate::error::{CalculoError, Result};

/// Solve the square system `a * x = b` by Gaussian elimination.
///
/// `a` and `b` are left untouched; the elimination runs on an augmented copy.
/// A pivot in columns `0..n-1` whose magnitude is at or below `pivot_tolerance`
/// is reported as [`CalculoError::ZeroPivot`]. Back substitution divides by the
/// diagonal unchecked, so a zero last diagonal shows up as a non-finite entry.
///
/// # Panics
///
/// Panics if `a` is not square or `b` does not have one entry per row.
pub fn gaussian_elimination(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    pivot_tolerance: f64,
) -> Result<DVector<f64>> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "elimination requires a square matrix");
    assert_eq!(n, b.len(), "right-hand side length must match matrix rows");

    let mut ab = augment(a, b);
    forward_eliminate(&mut ab, pivot_tolerance)?;
    Ok(back_substitute(&ab))
}

/// Build the n x (n+1) augmented matrix `[A|b]`.
fn augment(a: &DMatrix<f64>, b: &DVector<f64>) -> DMatrix<f64> {
    let n = a.ncols();
    let mut ab = a.clone().insert_column(n, 0.0);
    ab.set_column(n, b);
    ab
}

/// Reduce `ab` to upper-triangular form in place.
fn forward_eliminate(ab: &mut DMatrix<f64>, pivot_tolerance: f64) -> Result<()> {
    let n = ab.nrows();

    for k in 0..n.saturating_sub(1) {
        // Find pivot
        let mut max_val = ab[(k, k)].abs();
        let mut max_row = k;

        for i in (k + 1)..n {
            let val = ab[(i, k)].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        // Swap rows if needed
        if max_row != k {
            ab.swap_rows(k, max_row);
        }

        // NaN pivots fail the comparison, so check for "not large enough".
        if !(max_val > pivot_tolerance) {
            log::debug!("elimination: zero pivot {max_val:e} in column {k}");
            return Err(CalculoError::ZeroPivot { column: k });
        }

        // Eliminate
        let pivot = ab[(k, k)];
        for i in (k + 1)..n {
            let factor = ab[(i, k)] / pivot;
            for j in k..=n {
                ab[(i, j)] -= factor * ab[(k, j)];
            }
        }
    }

    Ok(())
}

/// Solve the upper-triangular augmented system.
fn back_substitute(ab: &DMatrix<f64>) -> DVector<f64> {
    let n = ab.nrows();
    let mut x = DVector::zeros(n);

    for i in (0..n).rev() {
        // Empty for the last row, where the sum is zero.
        let sum: f64 = ((i + 1)..n).map(|j| ab[(i, j)] * x[j]).sum();
        x[i] = (ab[(i, n)] - sum) / ab[(i, i)];
    }

    x
}
