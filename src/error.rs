//! Error types for the Calculo solvers.
//!
//! This module provides a unified error type [`CalculoError`] for everything
//! that can go wrong before or around a solve: parsing matrix and vector text,
//! validating solver parameters, and the internal elimination and
//! decomposition steps. The solvers themselves never return these errors to
//! the caller; they fold them into a status-tagged result.

use thiserror::Error;

/// Result type alias using [`CalculoError`].
pub type Result<T> = std::result::Result<T, CalculoError>;

/// Unified error type for all Calculo operations.
#[derive(Error, Debug)]
pub enum CalculoError {
    // ============ Input Parsing Errors ============
    /// Nothing to parse
    #[error("{what} is empty")]
    EmptyInput { what: &'static str },

    /// A token could not be read as a number
    #[error("Invalid number '{text}' in row {row}, position {position}")]
    InvalidNumber {
        text: String,
        row: usize,
        position: usize,
    },

    /// A single value could not be read as a number
    #[error("Invalid number '{text}'")]
    InvalidScalar { text: String },

    /// Matrix rows of different lengths
    #[error("Row {row} has {got} values, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Right-hand side does not match the matrix
    #[error("Matrix has {rows} rows but the right-hand side has {len} values")]
    DimensionMismatch { rows: usize, len: usize },

    /// NaN or infinite entry
    #[error("Non-finite value {value} at row {row}, column {column}")]
    NonFiniteEntry { row: usize, column: usize, value: f64 },

    // ============ Parameter Errors ============
    /// Invalid solver configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Interval endpoints out of order or not finite
    #[error("Invalid interval [{a}, {b}]: 'a' must be less than 'b' and both must be finite")]
    InvalidInterval { a: f64, b: f64 },

    /// Constant function has no root to search for
    #[error("Function is the constant {value}; there is no variable root to search for")]
    ConstantFunction { value: f64 },

    // ============ Numerical Errors ============
    /// Pivot vanished during elimination
    #[error("Zero pivot found in column {column} - system is singular")]
    ZeroPivot { column: usize },

    /// SVD did not converge
    #[error("Singular value decomposition of a {rows}x{cols} matrix did not converge")]
    DecompositionFailed { rows: usize, cols: usize },

    // ============ I/O Errors ============
    /// Error reading an input file
    #[error("Failed to read file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CalculoError {
    /// Create an invalid number error
    pub fn invalid_number(text: impl Into<String>, row: usize, position: usize) -> Self {
        Self::InvalidNumber {
            text: text.into(),
            row,
            position,
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
