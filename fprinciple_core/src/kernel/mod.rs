//! Gaussian similarity kernel over the inputs of one epoch snapshot.
//!
//! The kernel matrix `G[i][j] = exp(-‖x_i − x_j‖² / (2·delta))` and its row
//! sums `C[i]` are the only inputs the low/high frequency decomposer needs.
//! The whole n×n matrix is materialised, so snapshots are expected to hold
//! thousands of samples, not millions.

pub mod distance;

use ndarray::{Array1, Array2, ArrayView2, Axis};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{ensure_positive, FrequencyError, FrequencyResult};

pub use distance::{pairwise_sq_distances, squared_euclidean};

/// Gaussian weight for a squared distance at bandwidth `delta`.
#[inline]
pub fn gaussian_weight(sq_distance: f64, delta: f64) -> f64 {
    (-sq_distance / (2.0 * delta)).exp()
}

/// Materialised kernel matrix `G` together with its row normalizer `C`.
///
/// # Examples
///
/// ```
/// use fprinciple_core::kernel::KernelMatrix;
/// use ndarray::array;
///
/// let x = array![[0.0], [1.0], [5.0]];
/// let kernel = KernelMatrix::gaussian(x.view(), 3.0).unwrap();
/// assert_eq!(kernel.weights()[[1, 1]], 1.0);
/// assert!(kernel.normalizer()[0] >= 1.0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct KernelMatrix {
    weights: Array2<f64>,
    normalizer: Array1<f64>,
    delta: f64,
}

impl KernelMatrix {
    /// Build `G` and `C` from an n×d feature matrix.
    ///
    /// # Errors
    ///
    /// * `InvalidConfiguration` if `delta` is not finite and positive; checked
    ///   before any distance is computed.
    /// * `EmptyCollection` if `features` has no rows.
    /// * `InvalidConfiguration` if any feature is NaN or infinite.
    pub fn gaussian(features: ArrayView2<'_, f64>, delta: f64) -> FrequencyResult<Self> {
        ensure_positive("delta", delta)?;
        if features.nrows() == 0 {
            return Err(FrequencyError::empty_collection("kernel feature rows"));
        }
        if let Some(bad) = features.iter().find(|v| !v.is_finite()) {
            return Err(FrequencyError::invalid_config(
                "features",
                bad.to_string(),
                "every feature must be finite",
            ));
        }

        let distances = pairwise_sq_distances(features);
        Ok(Self::from_valid_distances(distances, delta))
    }

    /// Build `G` and `C` from a precomputed squared distance matrix.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` if the matrix is not square.
    /// * `EmptyCollection` if it has no rows.
    /// * `InvalidConfiguration` unless every entry is finite and non-negative,
    ///   the diagonal is zero and the matrix is exactly symmetric.
    pub fn from_sq_distances(distances: Array2<f64>, delta: f64) -> FrequencyResult<Self> {
        ensure_positive("delta", delta)?;
        let (rows, cols) = distances.dim();
        if rows != cols {
            return Err(FrequencyError::dimension_mismatch(
                rows,
                cols,
                "squared distance matrix columns",
            ));
        }
        if rows == 0 {
            return Err(FrequencyError::empty_collection("squared distance matrix"));
        }
        check_distances(&distances)?;

        Ok(Self::from_valid_distances(distances, delta))
    }

    fn from_valid_distances(mut distances: Array2<f64>, delta: f64) -> Self {
        distances.par_mapv_inplace(|d| gaussian_weight(d, delta));
        let row_sums: Vec<f64> = distances
            .axis_iter(Axis(0))
            .into_par_iter()
            .map(|row| row.sum())
            .collect();
        let normalizer = Array1::from(row_sums);

        tracing::debug!(
            samples = distances.nrows(),
            delta,
            "built gaussian kernel matrix"
        );

        Self {
            weights: distances,
            normalizer,
            delta,
        }
    }

    /// Kernel matrix `G` (n×n, symmetric, unit diagonal).
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Row sums `C[i]`; each is at least 1 because of the diagonal term.
    pub fn normalizer(&self) -> &Array1<f64> {
        &self.normalizer
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Number of samples n.
    pub fn len(&self) -> usize {
        self.normalizer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizer.is_empty()
    }
}

fn check_distances(distances: &Array2<f64>) -> FrequencyResult<()> {
    for ((i, j), &d) in distances.indexed_iter() {
        let reason = if !d.is_finite() || d < 0.0 {
            "must be finite and >= 0"
        } else if i == j && d != 0.0 {
            "diagonal must be zero"
        } else if d != distances[[j, i]] {
            "matrix must be symmetric"
        } else {
            continue;
        };
        return Err(FrequencyError::invalid_config(
            format!("squared distance [{}, {}]", i, j),
            d.to_string(),
            reason,
        ));
    }
    Ok(())
}
