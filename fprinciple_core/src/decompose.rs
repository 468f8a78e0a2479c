//! Low/high frequency decomposition by kernel smoothing.
//!
//! `low(M)[i] = (G·M)[i] / C[i]` is a similarity-weighted average of the rows
//! of `M`, weighted by how close each sample's input is to sample `i`. It is
//! the smooth part of the function `x ↦ M[x]` as seen through input-space
//! locality; `high(M) = M − low(M)` is the fast-varying residual. The same
//! operator is applied to labels and predictions.
//!
//! Exact multi-dimensional spectra are meaningless for inputs such as
//! flattened images; kernel smoothing gives an analogous smooth/rough split
//! at any dimensionality.

use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{FrequencyError, FrequencyResult};
use crate::kernel::KernelMatrix;

/// Smooth and residual parts of labels `Y` and predictions `H`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyDecomposition {
    pub y_low: Array2<f64>,
    pub y_high: Array2<f64>,
    pub h_low: Array2<f64>,
    pub h_high: Array2<f64>,
}

/// Kernel-smoothed component `diag(C)^-1 · G · M`.
///
/// # Errors
///
/// `DimensionMismatch` if `values` does not have one row per kernel sample.
pub fn low_frequency(
    kernel: &KernelMatrix,
    values: ArrayView2<'_, f64>,
) -> FrequencyResult<Array2<f64>> {
    if values.nrows() != kernel.len() {
        return Err(FrequencyError::dimension_mismatch(
            kernel.len(),
            values.nrows(),
            "rows projected onto the kernel",
        ));
    }

    let mut low = kernel.weights().dot(&values);
    low /= &kernel.normalizer().view().insert_axis(Axis(1));
    Ok(low)
}

/// Residual `M − low(M)`.
pub fn high_frequency(values: ArrayView2<'_, f64>, low: &Array2<f64>) -> Array2<f64> {
    &values - low
}

/// Split `values` into `(low(M), high(M))`.
pub fn split(
    kernel: &KernelMatrix,
    values: ArrayView2<'_, f64>,
) -> FrequencyResult<(Array2<f64>, Array2<f64>)> {
    let low = low_frequency(kernel, values)?;
    let high = high_frequency(values, &low);
    Ok((low, high))
}

/// Decompose labels and predictions with one kernel.
///
/// # Errors
///
/// `DimensionMismatch` if either matrix disagrees with the kernel's sample
/// count or if labels and predictions have different widths.
///
/// # Example
///
/// ```
/// use fprinciple_core::decompose::decompose;
/// use fprinciple_core::kernel::KernelMatrix;
/// use ndarray::array;
///
/// let x = array![[0.0], [0.5], [4.0]];
/// let y = array![[1.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
/// let h = array![[0.8, 0.2], [0.6, 0.4], [0.1, 0.9]];
/// let kernel = KernelMatrix::gaussian(x.view(), 1.0).unwrap();
/// let parts = decompose(&kernel, y.view(), h.view()).unwrap();
/// assert_eq!(parts.y_low.dim(), (3, 2));
/// ```
pub fn decompose(
    kernel: &KernelMatrix,
    labels: ArrayView2<'_, f64>,
    predictions: ArrayView2<'_, f64>,
) -> FrequencyResult<FrequencyDecomposition> {
    if labels.ncols() != predictions.ncols() {
        return Err(FrequencyError::dimension_mismatch(
            labels.ncols(),
            predictions.ncols(),
            "prediction columns",
        ));
    }

    let (y_low, y_high) = split(kernel, labels)?;
    let (h_low, h_high) = split(kernel, predictions)?;

    Ok(FrequencyDecomposition {
        y_low,
        y_high,
        h_low,
        h_high,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_matrix(rng: &mut StdRng, n: usize, k: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, k), |_| rng.gen_range(-1.0..1.0))
    }

    #[test]
    fn test_low_plus_high_reconstructs_input() {
        let mut rng = StdRng::seed_from_u64(3);
        let x = random_matrix(&mut rng, 20, 4);
        let y = random_matrix(&mut rng, 20, 3);
        let h = random_matrix(&mut rng, 20, 3);
        let kernel = KernelMatrix::gaussian(x.view(), 0.7).unwrap();
        let parts = decompose(&kernel, y.view(), h.view()).unwrap();

        let y_back = &parts.y_low + &parts.y_high;
        let h_back = &parts.h_low + &parts.h_high;
        for (a, b) in y_back.iter().zip(y.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
        for (a, b) in h_back.iter().zip(h.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_shapes_preserved() {
        let x = array![[0.0, 1.0], [1.0, 0.0], [2.0, 2.0], [0.5, 0.5]];
        let y = Array2::<f64>::ones((4, 5));
        let h = Array2::<f64>::zeros((4, 5));
        let kernel = KernelMatrix::gaussian(x.view(), 1.0).unwrap();
        let parts = decompose(&kernel, y.view(), h.view()).unwrap();
        assert_eq!(parts.y_low.dim(), (4, 5));
        assert_eq!(parts.y_high.dim(), (4, 5));
        assert_eq!(parts.h_low.dim(), (4, 5));
        assert_eq!(parts.h_high.dim(), (4, 5));
    }

    #[test]
    fn test_identical_inputs_give_mean_and_deviation() {
        let n = 5;
        let x = Array2::from_elem((n, 3), 1.5);
        let y = array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let kernel = KernelMatrix::gaussian(x.view(), 2.0).unwrap();
        let (low, high) = split(&kernel, y.view()).unwrap();

        let mean: Array1<f64> = y.mean_axis(Axis(0)).unwrap();
        for i in 0..n {
            for c in 0..2 {
                assert!((low[[i, c]] - mean[c]).abs() < 1e-15);
                assert!((high[[i, c]] - (y[[i, c]] - mean[c])).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_isolated_points_are_all_low_frequency() {
        // Far-apart inputs see only themselves, so smoothing is the identity.
        let x = array![[0.0], [1.0e4], [2.0e4]];
        let y = array![[1.0], [-1.0], [0.5]];
        let kernel = KernelMatrix::gaussian(x.view(), 1.0).unwrap();
        let (low, high) = split(&kernel, y.view()).unwrap();
        assert_eq!(low, y);
        assert!(high.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_row_mismatch_rejected() {
        let x = array![[0.0], [1.0], [2.0]];
        let y = Array2::<f64>::zeros((3, 2));
        let h = Array2::<f64>::zeros((2, 2));
        let kernel = KernelMatrix::gaussian(x.view(), 1.0).unwrap();
        let err = decompose(&kernel, y.view(), h.view()).unwrap_err();
        assert!(matches!(err, FrequencyError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_column_mismatch_rejected() {
        let x = array![[0.0], [1.0]];
        let y = Array2::<f64>::zeros((2, 2));
        let h = Array2::<f64>::zeros((2, 3));
        let kernel = KernelMatrix::gaussian(x.view(), 1.0).unwrap();
        let err = decompose(&kernel, y.view(), h.view()).unwrap_err();
        assert!(matches!(
            err,
            FrequencyError::DimensionMismatch {
                expected: 2,
                got: 3,
                ..
            }
        ));
    }
}
