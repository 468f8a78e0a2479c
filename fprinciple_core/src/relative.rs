//! Relative errors of the low and high frequency parts.
//!
//! ```text
//! e_low  = sqrt( Σ_i ‖Y_low[i]  − H_low[i] ‖² / Σ_i ‖Y_low[i] ‖² )
//! e_high = sqrt( Σ_i ‖Y_high[i] − H_high[i]‖² / Σ_i ‖Y_high[i]‖² )
//! ```
//!
//! Tracked across epochs, `e_low` falling faster than `e_high` is the
//! signature of the Frequency Principle.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::decompose::FrequencyDecomposition;
use crate::error::{FrequencyError, FrequencyResult};
use crate::spectral::accumulate::{squared_difference, sum_of_squares};

/// Per-epoch pair of relative errors.
///
/// A component whose label projection carries zero energy has an undefined
/// relative error; it is stored as NaN (or +∞ when the numerator is non-zero)
/// and reported through [`ErrorPair::is_degenerate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorPair {
    pub e_low: f64,
    pub e_high: f64,
}

impl ErrorPair {
    /// True if either component is NaN or infinite.
    pub fn is_degenerate(&self) -> bool {
        !self.e_low.is_finite() || !self.e_high.is_finite()
    }
}

/// `sqrt(‖target − fit‖² / ‖target‖²)` over all entries.
///
/// A zero denominator is not masked: `0/0` yields NaN.
pub fn relative_error(target: &Array2<f64>, fit: &Array2<f64>) -> FrequencyResult<f64> {
    if target.dim() != fit.dim() {
        let (rows, cols) = target.dim();
        let (fit_rows, fit_cols) = fit.dim();
        let (expected, got, context) = if rows != fit_rows {
            (rows, fit_rows, "relative error rows")
        } else {
            (cols, fit_cols, "relative error columns")
        };
        return Err(FrequencyError::dimension_mismatch(expected, got, context));
    }

    let numerator = squared_difference(target.iter(), fit.iter());
    let denominator = sum_of_squares(target.iter());
    Ok((numerator / denominator).sqrt())
}

/// Reduce a decomposition to `(e_low, e_high)`.
pub fn error_pair(parts: &FrequencyDecomposition) -> FrequencyResult<ErrorPair> {
    let e_low = relative_error(&parts.y_low, &parts.h_low)?;
    let e_high = relative_error(&parts.y_high, &parts.h_high)?;
    let pair = ErrorPair { e_low, e_high };

    if pair.is_degenerate() {
        tracing::warn!(
            e_low,
            e_high,
            "degenerate epoch: a frequency component of the labels carries zero energy"
        );
    }

    Ok(pair)
}
