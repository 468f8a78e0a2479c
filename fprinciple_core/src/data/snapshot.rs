//! Aligned per-epoch inputs, labels and predictions.
//!
//! Training glue sees data one batch at a time. [`SnapshotBuffer`] is sized
//! for the whole epoch up front and copies each batch into place, so building
//! an [`EpochSnapshot`] never reallocates.

use ndarray::{s, Array2, ArrayView2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{FrequencyError, FrequencyResult};

/// One full pass over the training data: `x` (n×d), `y` (n×k), `h` (n×k).
///
/// Row `i` of every matrix describes the same sample.
///
/// Deserializing runs the same alignment checks as [`EpochSnapshot::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct EpochSnapshot {
    features: Array2<f64>,
    labels: Array2<f64>,
    predictions: Array2<f64>,
}

#[derive(Deserialize)]
struct RawSnapshot {
    features: Array2<f64>,
    labels: Array2<f64>,
    predictions: Array2<f64>,
}

impl TryFrom<RawSnapshot> for EpochSnapshot {
    type Error = FrequencyError;

    fn try_from(raw: RawSnapshot) -> FrequencyResult<Self> {
        Self::new(raw.features, raw.labels, raw.predictions)
    }
}

impl EpochSnapshot {
    /// Validate alignment and wrap the three matrices.
    ///
    /// # Errors
    ///
    /// * `EmptyCollection` if there are no rows.
    /// * `DimensionMismatch` if row counts differ or labels and predictions
    ///   have different widths.
    pub fn new(
        features: Array2<f64>,
        labels: Array2<f64>,
        predictions: Array2<f64>,
    ) -> FrequencyResult<Self> {
        let n = features.nrows();
        if n == 0 {
            return Err(FrequencyError::empty_collection("epoch snapshot"));
        }
        if labels.nrows() != n {
            return Err(FrequencyError::dimension_mismatch(
                n,
                labels.nrows(),
                "label rows",
            ));
        }
        if predictions.nrows() != n {
            return Err(FrequencyError::dimension_mismatch(
                n,
                predictions.nrows(),
                "prediction rows",
            ));
        }
        if labels.ncols() != predictions.ncols() {
            return Err(FrequencyError::dimension_mismatch(
                labels.ncols(),
                predictions.ncols(),
                "prediction columns",
            ));
        }

        Ok(Self {
            features,
            labels,
            predictions,
        })
    }

    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    pub fn labels(&self) -> ArrayView2<'_, f64> {
        self.labels.view()
    }

    pub fn predictions(&self) -> ArrayView2<'_, f64> {
        self.predictions.view()
    }

    /// Number of samples n.
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.features.nrows() == 0
    }

    /// Input dimension d.
    pub fn feature_dim(&self) -> usize {
        self.features.ncols()
    }

    /// Output dimension k.
    pub fn output_dim(&self) -> usize {
        self.labels.ncols()
    }

    /// Same samples with rows reordered by a seeded shuffle.
    pub fn shuffled(&self, seed: u64) -> Self {
        let mut order: Vec<usize> = (0..self.len()).collect();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        order.shuffle(&mut rng);

        Self {
            features: self.features.select(Axis(0), &order),
            labels: self.labels.select(Axis(0), &order),
            predictions: self.predictions.select(Axis(0), &order),
        }
    }
}

/// Pre-sized storage filled batch by batch during an epoch.
#[derive(Debug, Clone)]
pub struct SnapshotBuffer {
    features: Array2<f64>,
    labels: Array2<f64>,
    predictions: Array2<f64>,
    filled: usize,
}

impl SnapshotBuffer {
    /// Reserve room for `capacity` samples of input width `feature_dim` and
    /// output width `output_dim`.
    pub fn with_capacity(capacity: usize, feature_dim: usize, output_dim: usize) -> Self {
        Self {
            features: Array2::zeros((capacity, feature_dim)),
            labels: Array2::zeros((capacity, output_dim)),
            predictions: Array2::zeros((capacity, output_dim)),
            filled: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.features.nrows()
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.filled
    }

    /// Copy one batch into the next free rows.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` for misaligned or wrongly shaped batches,
    /// `CapacityExceeded` if the batch does not fit.
    pub fn push_batch(
        &mut self,
        features: ArrayView2<'_, f64>,
        labels: ArrayView2<'_, f64>,
        predictions: ArrayView2<'_, f64>,
    ) -> FrequencyResult<()> {
        let rows = features.nrows();
        if labels.nrows() != rows {
            return Err(FrequencyError::dimension_mismatch(
                rows,
                labels.nrows(),
                "batch label rows",
            ));
        }
        if predictions.nrows() != rows {
            return Err(FrequencyError::dimension_mismatch(
                rows,
                predictions.nrows(),
                "batch prediction rows",
            ));
        }
        if features.ncols() != self.features.ncols() {
            return Err(FrequencyError::dimension_mismatch(
                self.features.ncols(),
                features.ncols(),
                "batch feature columns",
            ));
        }
        if labels.ncols() != self.labels.ncols() {
            return Err(FrequencyError::dimension_mismatch(
                self.labels.ncols(),
                labels.ncols(),
                "batch label columns",
            ));
        }
        if predictions.ncols() != self.predictions.ncols() {
            return Err(FrequencyError::dimension_mismatch(
                self.predictions.ncols(),
                predictions.ncols(),
                "batch prediction columns",
            ));
        }
        if rows > self.remaining() {
            return Err(FrequencyError::capacity_exceeded(
                self.filled + rows,
                self.capacity(),
            ));
        }

        let (start, end) = (self.filled, self.filled + rows);
        self.features
            .slice_mut(s![start..end, ..])
            .assign(&features);
        self.labels.slice_mut(s![start..end, ..]).assign(&labels);
        self.predictions
            .slice_mut(s![start..end, ..])
            .assign(&predictions);
        self.filled += rows;
        Ok(())
    }

    /// Close the epoch. A partially filled buffer keeps only its filled rows.
    pub fn finish(self) -> FrequencyResult<EpochSnapshot> {
        let filled = self.filled;
        if filled < self.capacity() {
            tracing::debug!(
                filled,
                capacity = self.capacity(),
                "snapshot buffer closed before reaching capacity"
            );
        }

        EpochSnapshot::new(
            self.features.slice_move(s![..filled, ..]),
            self.labels.slice_move(s![..filled, ..]),
            self.predictions.slice_move(s![..filled, ..]),
        )
    }
}
