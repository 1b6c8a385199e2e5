//! Polynomials as a source of scalar functions with exact derivatives.

use std::fmt;

use crate::error::{CalculoError, Result};

/// Real polynomial, coefficients ordered from the highest degree down.
///
/// `[1, 0, -4]` is `x^2 - 4`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial, dropping leading zero coefficients.
    pub fn new(coefficients: impl Into<Vec<f64>>) -> Self {
        let coefficients: Vec<f64> = coefficients.into();
        let first_nonzero = coefficients
            .iter()
            .position(|&c| c != 0.0)
            .unwrap_or(coefficients.len());
        let mut coefficients = coefficients[first_nonzero..].to_vec();
        if coefficients.is_empty() {
            coefficients.push(0.0);
        }
        Self { coefficients }
    }

    /// Parse coefficients with the same separators as [`parse_vector`](super::parse_vector).
    pub fn parse(text: &str) -> Result<Self> {
        let values = super::parse_vector(text)?;
        Ok(Self::new(values.as_slice()))
    }

    /// Coefficients, highest degree first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Degree of the polynomial; the zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// True if the polynomial does not depend on x.
    pub fn is_constant(&self) -> bool {
        self.degree() == 0
    }

    /// Reject constant polynomials, which have no root to search for.
    pub fn require_variable(&self) -> Result<()> {
        if self.is_constant() {
            Err(CalculoError::ConstantFunction {
                value: self.coefficients[0],
            })
        } else {
            Ok(())
        }
    }

    /// Evaluate at `x` by Horner's rule.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Exact first derivative.
    pub fn derivative(&self) -> Self {
        let degree = self.degree();
        let coefficients: Vec<f64> = self.coefficients[..degree]
            .iter()
            .enumerate()
            .map(|(i, &c)| c * (degree - i) as f64)
            .collect();
        Self::new(coefficients)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degree = self.degree();
        let mut wrote_any = false;

        for (i, &c) in self.coefficients.iter().enumerate() {
            let power = degree - i;
            if c == 0.0 && (wrote_any || power > 0) {
                continue;
            }

            let magnitude = c.abs();
            if wrote_any {
                write!(f, " {} ", if c < 0.0 { '-' } else { '+' })?;
            } else if c < 0.0 {
                write!(f, "-")?;
            }

            let show_magnitude = magnitude != 1.0 || power == 0;
            if show_magnitude {
                write!(f, "{magnitude}")?;
            }
            match power {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{power}")?,
            }
            wrote_any = true;
        }

        if !wrote_any {
            write!(f, "0")?;
        }
        Ok(())
    }
}
