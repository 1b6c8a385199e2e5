//! Caller-side input handling.
//!
//! Turns user-entered text into solver inputs and checks the parameters the
//! solvers themselves leave unchecked.
//!
//! # Text Conventions
//!
//! ```text
//! matrix  = row { row_sep row }
//! row     = number { value_sep number }
//! vector  = number { (row_sep | value_sep) number }
//!
//! row_sep   = ';' | newline
//! value_sep = ',' | whitespace
//! ```
//!
//! Blank rows are ignored, so a trailing `;` or newline is harmless.
//!
//! # Example
//!
//! ```text
//! A = "2 1 -1; -3 -1 2; -2 1 2"
//! b = "8, -11, -3"
//! ```
//!
//! Single scalars (interval ends, tolerances, starting points) also accept a
//! comma as the decimal separator, so `"0,5"` reads as `0.5`.

mod polynomial;

pub use polynomial::Polynomial;

use nalgebra::{DMatrix, DVector};

use crate::config::RootFindConfig;
use crate::error::{CalculoError, Result};

/// Parse a matrix whose rows are separated by `;` or newlines.
///
/// # Errors
///
/// Fails on empty input, a token that is not a number, or rows of different
/// lengths.
pub fn parse_matrix(text: &str) -> Result<DMatrix<f64>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for line in text.split([';', '\n']) {
        let row_number = rows.len() + 1;
        let row = parse_row(line, row_number)?;
        if row.is_empty() {
            continue;
        }

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(CalculoError::RaggedMatrix {
                    row: row_number,
                    expected: first.len(),
                    got: row.len(),
                });
            }
        }
        rows.push(row);
    }

    let n_rows = rows.len();
    if n_rows == 0 {
        return Err(CalculoError::EmptyInput { what: "matrix" });
    }
    let n_cols = rows[0].len();

    Ok(DMatrix::from_row_iterator(
        n_rows,
        n_cols,
        rows.into_iter().flatten(),
    ))
}

/// Parse a vector whose values may be separated by `;`, newlines, commas or
/// whitespace.
///
/// # Errors
///
/// Fails on empty input or a token that is not a number.
pub fn parse_vector(text: &str) -> Result<DVector<f64>> {
    let values = parse_row(&text.replace(';', " "), 1)?;
    if values.is_empty() {
        return Err(CalculoError::EmptyInput { what: "vector" });
    }
    Ok(DVector::from_vec(values))
}

/// Parse a single number, accepting `,` as the decimal separator.
///
/// # Errors
///
/// Fails on empty input or text that is not a number.
pub fn parse_scalar(text: &str) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CalculoError::EmptyInput { what: "value" });
    }
    text.replace(',', ".")
        .parse::<f64>()
        .map_err(|_| CalculoError::InvalidScalar {
            text: text.to_string(),
        })
}

/// Check that `[a, b]` is a usable bisection interval.
///
/// # Errors
///
/// Returns [`CalculoError::InvalidInterval`] unless both ends are finite and
/// `a < b`.
pub fn validate_interval(a: f64, b: f64) -> Result<()> {
    if a.is_finite() && b.is_finite() && a < b {
        Ok(())
    } else {
        Err(CalculoError::InvalidInterval { a, b })
    }
}

/// Check root-finder parameters before a solve.
///
/// # Errors
///
/// See [`RootFindConfig::validate`].
pub fn validate_root_params(config: &RootFindConfig) -> Result<()> {
    config.validate()
}

/// Split one row on commas and whitespace and parse each value.
fn parse_row(line: &str, row: usize) -> Result<Vec<f64>> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<f64>()
                .map_err(|_| CalculoError::invalid_number(token, row, i + 1))
        })
        .collect()
}
