//! Error types for frequency diagnostics
//!
//! Every failure the engine can report is a precondition violation caught
//! before any matrix work starts. Numerically undefined results (zero-energy
//! denominators) are not errors: they propagate as NaN inside
//! [`ErrorPair`](crate::relative::ErrorPair).

use std::fmt;

/// Result type alias for diagnostic operations
pub type FrequencyResult<T> = Result<T, FrequencyError>;

/// Error type for kernel, decomposition and spectral operations
#[derive(Debug, Clone, PartialEq)]
pub enum FrequencyError {
    /// Row or column count disagreement between aligned arrays
    DimensionMismatch {
        expected: usize,
        got: usize,
        context: String,
    },

    /// Invalid configuration parameter (e.g. a non-positive bandwidth)
    InvalidConfiguration {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Empty snapshot or sequence
    EmptyCollection { collection: String },

    /// Snapshot buffer received more rows than it was sized for
    CapacityExceeded { current: usize, max: usize },

    /// History record older than the last recorded epoch
    OutOfOrder { last: usize, got: usize },

    /// A report sink failed to accept a record
    ReportFailed { reason: String },
}

impl fmt::Display for FrequencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyError::DimensionMismatch {
                expected,
                got,
                context,
            } => {
                write!(
                    f,
                    "Dimension mismatch in {}: expected {}, got {}",
                    context, expected, got
                )
            }
            FrequencyError::InvalidConfiguration {
                parameter,
                value,
                reason,
            } => {
                write!(
                    f,
                    "Invalid configuration for parameter '{}' with value '{}': {}",
                    parameter, value, reason
                )
            }
            FrequencyError::EmptyCollection { collection } => {
                write!(f, "Empty collection: {}", collection)
            }
            FrequencyError::CapacityExceeded { current, max } => {
                write!(
                    f,
                    "Snapshot capacity exceeded: {} rows requested, buffer holds {}",
                    current, max
                )
            }
            FrequencyError::OutOfOrder { last, got } => {
                write!(
                    f,
                    "Out-of-order epoch: history already holds epoch {}, got {}",
                    last, got
                )
            }
            FrequencyError::ReportFailed { reason } => {
                write!(f, "Report sink failed: {}", reason)
            }
        }
    }
}

impl std::error::Error for FrequencyError {}

impl FrequencyError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: usize, got: usize, context: impl Into<String>) -> Self {
        FrequencyError::DimensionMismatch {
            expected,
            got,
            context: context.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(
        parameter: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FrequencyError::InvalidConfiguration {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an empty collection error
    pub fn empty_collection(collection: impl Into<String>) -> Self {
        FrequencyError::EmptyCollection {
            collection: collection.into(),
        }
    }

    /// Create a capacity exceeded error
    pub fn capacity_exceeded(current: usize, max: usize) -> Self {
        FrequencyError::CapacityExceeded { current, max }
    }

    /// Create an out-of-order epoch error
    pub fn out_of_order(last: usize, got: usize) -> Self {
        FrequencyError::OutOfOrder { last, got }
    }

    /// Create a report failure error
    pub fn report_failed(reason: impl Into<String>) -> Self {
        FrequencyError::ReportFailed {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for FrequencyError {
    fn from(value: std::io::Error) -> Self {
        FrequencyError::report_failed(value.to_string())
    }
}

/// Reject bandwidths that are not strictly positive and finite.
pub(crate) fn ensure_positive(parameter: &str, value: f64) -> FrequencyResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FrequencyError::invalid_config(
            parameter,
            value.to_string(),
            "must be finite and > 0",
        ))
    }
}
