//! Exact spectral comparison for 1-D regression targets.
//!
//! The target's spectrum never changes during a run, so it is computed once
//! and shared behind an `Arc`; each snapshot only transforms the current
//! prediction. Inputs must be scalar and evenly spaced. Non-uniform spacing
//! is not detected and produces a meaningless spectrum.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::fft::{AmplitudeSpectrum, OneSidedTransform};
use crate::error::{ensure_positive, FrequencyError, FrequencyResult};

/// Target and predicted spectra on one shared frequency axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPair {
    pub epoch: usize,
    pub target: Arc<AmplitudeSpectrum>,
    pub predicted: AmplitudeSpectrum,
}

impl SpectrumPair {
    pub fn frequencies(&self) -> &[f64] {
        &self.target.frequencies
    }

    /// `|A_target[k] − A_pred[k]| / A_target[k]`. A bin with zero target
    /// amplitude gives NaN when the prediction is also zero there and +∞
    /// otherwise.
    pub fn relative_error_at(&self, bin: usize) -> Option<f64> {
        let target = *self.target.amplitudes.get(bin)?;
        let predicted = *self.predicted.amplitudes.get(bin)?;
        Some((target - predicted).abs() / target)
    }
}

/// Caches the target spectrum and produces per-epoch [`SpectrumPair`]s.
#[derive(Debug, Clone)]
pub struct SpectralTracker {
    dx: f64,
    transform: OneSidedTransform,
    target: Arc<AmplitudeSpectrum>,
}

impl SpectralTracker {
    /// Transform `target` (sampled at spacing `dx`) once and keep it.
    ///
    /// # Errors
    ///
    /// `EmptyCollection` for an empty target, `InvalidConfiguration` for a
    /// non-positive spacing.
    pub fn new(target: &[f64], dx: f64) -> FrequencyResult<Self> {
        ensure_positive("dx", dx)?;
        let transform = OneSidedTransform::new(target.len())?;
        let spectrum = transform.spectrum(target, dx)?;

        tracing::debug!(
            samples = target.len(),
            dx,
            bins = spectrum.len(),
            "cached target spectrum"
        );

        Ok(Self {
            dx,
            transform,
            target: Arc::new(spectrum),
        })
    }

    /// Derive the spacing from the first two sample positions.
    pub fn from_samples(positions: &[f64], target: &[f64]) -> FrequencyResult<Self> {
        if positions.len() != target.len() {
            return Err(FrequencyError::dimension_mismatch(
                positions.len(),
                target.len(),
                "target samples",
            ));
        }
        match positions {
            [first, second, ..] => Self::new(target, second - first),
            _ => Err(FrequencyError::invalid_config(
                "dx",
                "undefined",
                "at least two sample positions are needed to derive the spacing",
            )),
        }
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn len(&self) -> usize {
        self.transform.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transform.is_empty()
    }

    pub fn target(&self) -> &Arc<AmplitudeSpectrum> {
        &self.target
    }

    /// Spectrum of `prediction` paired with the cached target spectrum.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `prediction` is not as long as the target.
    pub fn snapshot(&self, epoch: usize, prediction: &[f64]) -> FrequencyResult<SpectrumPair> {
        let predicted = self.transform.spectrum(prediction, self.dx)?;
        Ok(SpectrumPair {
            epoch,
            target: Arc::clone(&self.target),
            predicted,
        })
    }

    /// Snapshot cadence: every `plot_interval` epochs starting at epoch 0.
    /// An interval of zero is treated as one.
    pub fn should_snapshot(epoch: usize, plot_interval: usize) -> bool {
        epoch % plot_interval.max(1) == 0
    }

    /// One-based frame number of the snapshot taken at `epoch`.
    pub fn frame_index(epoch: usize, plot_interval: usize) -> usize {
        epoch / plot_interval.max(1) + 1
    }
}
