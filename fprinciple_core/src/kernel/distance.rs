//! Pairwise squared Euclidean distances over raw feature rows.

use ndarray::{Array2, ArrayView1, ArrayView2, Zip};

/// Squared Euclidean distance between two feature rows.
///
/// Each term is `(a - b)^2`, so swapping the arguments yields the identical
/// bit pattern and a row compared with itself yields exactly `0.0`.
pub fn squared_euclidean(a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(&lhs, &rhs)| {
            let diff = lhs - rhs;
            diff * diff
        })
        .sum()
}

/// Full n×n matrix `D[i][j] = ‖x_i − x_j‖²` for the rows of `features`.
///
/// Output rows are filled in parallel; every entry is computed independently,
/// so the matrix is exactly symmetric with a zero diagonal.
pub fn pairwise_sq_distances(features: ArrayView2<'_, f64>) -> Array2<f64> {
    let n = features.nrows();
    let mut distances = Array2::zeros((n, n));

    Zip::from(distances.rows_mut())
        .and(features.rows())
        .par_for_each(|mut out, xi| {
            for (value, xj) in out.iter_mut().zip(features.rows()) {
                *value = squared_euclidean(&xi, &xj);
            }
        });

    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_squared_euclidean() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![4.0, 6.0, 3.0];
        assert_eq!(squared_euclidean(&a.view(), &b.view()), 25.0);
    }

    #[test]
    fn test_pairwise_distances_shape_and_diagonal() {
        let x = array![[0.0, 0.0], [3.0, 4.0], [1.0, 1.0]];
        let d = pairwise_sq_distances(x.view());
        assert_eq!(d.dim(), (3, 3));
        for i in 0..3 {
            assert_eq!(d[[i, i]], 0.0);
        }
        assert_eq!(d[[0, 1]], 25.0);
        assert_eq!(d[[0, 2]], 2.0);
        assert_eq!(d[[1, 2]], 13.0);
    }

    #[test]
    fn test_pairwise_distances_symmetric() {
        let x = array![[0.1, -0.7, 2.3], [1.9, 0.4, -0.2], [-3.3, 0.05, 0.6], [0.0, 0.0, 0.0]];
        let d = pairwise_sq_distances(x.view());
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(d[[i, j]], d[[j, i]]);
                assert!(d[[i, j]] >= 0.0);
            }
        }
    }

    #[test]
    fn test_pairwise_distances_empty() {
        let x = Array2::<f64>::zeros((0, 3));
        let d = pairwise_sq_distances(x.view());
        assert_eq!(d.dim(), (0, 0));
    }
}
