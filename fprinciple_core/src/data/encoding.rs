//! Label encodings for the classification case.

use ndarray::Array2;

use crate::error::{FrequencyError, FrequencyResult};

/// One row per label with a single `1.0` in the label's column.
///
/// # Errors
///
/// `DimensionMismatch` if a label is not below `num_classes`.
pub fn one_hot(labels: &[usize], num_classes: usize) -> FrequencyResult<Array2<f64>> {
    let mut encoded = Array2::zeros((labels.len(), num_classes));
    for (row, &label) in labels.iter().enumerate() {
        if label >= num_classes {
            return Err(FrequencyError::dimension_mismatch(
                num_classes,
                label + 1,
                "one-hot class count",
            ));
        }
        encoded[[row, label]] = 1.0;
    }
    Ok(encoded)
}
