//! Per-epoch frequency analysis.
//!
//! [`FrequencyAnalyzer`] is the entry point training glue calls at every
//! epoch boundary: it builds the kernel over the epoch's inputs, splits
//! labels and predictions into low and high frequency parts, and reduces
//! them to an [`ErrorPair`]. The `*_epoch` methods additionally append to an
//! [`ErrorHistory`] and forward records to a [`ReportSink`].

use crate::config::AnalysisConfig;
use crate::data::EpochSnapshot;
use crate::decompose::{decompose, FrequencyDecomposition};
use crate::error::{ensure_positive, FrequencyResult};
use crate::history::ErrorHistory;
use crate::kernel::KernelMatrix;
use crate::logging::ReportSink;
use crate::relative::{error_pair, ErrorPair};
use crate::spectral::{SpectralTracker, SpectrumPair};

/// Stateless analyzer holding a validated kernel bandwidth.
///
/// # Examples
///
/// ```
/// use fprinciple_core::{EpochSnapshot, FrequencyAnalyzer};
/// use ndarray::array;
///
/// let x = array![[0.0], [1.0], [2.0], [3.0]];
/// let y = array![[1.0], [0.0], [1.0], [0.0]];
/// let analyzer = FrequencyAnalyzer::new(1.0).unwrap();
///
/// let snapshot = EpochSnapshot::new(x, y.clone(), y).unwrap();
/// let pair = analyzer.analyze(&snapshot).unwrap();
/// assert_eq!(pair.e_low, 0.0);
/// assert_eq!(pair.e_high, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyAnalyzer {
    delta: f64,
}

impl FrequencyAnalyzer {
    /// # Errors
    ///
    /// `InvalidConfiguration` unless `delta` is finite and positive.
    pub fn new(delta: f64) -> FrequencyResult<Self> {
        ensure_positive("delta", delta)?;
        Ok(Self { delta })
    }

    pub fn from_config(config: &AnalysisConfig) -> FrequencyResult<Self> {
        Self::new(config.delta)
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Kernel and four projections for one epoch.
    pub fn decompose(&self, snapshot: &EpochSnapshot) -> FrequencyResult<FrequencyDecomposition> {
        let kernel = KernelMatrix::gaussian(snapshot.features(), self.delta)?;
        decompose(&kernel, snapshot.labels(), snapshot.predictions())
    }

    /// `(e_low, e_high)` for one epoch.
    pub fn analyze(&self, snapshot: &EpochSnapshot) -> FrequencyResult<ErrorPair> {
        let parts = self.decompose(snapshot)?;
        error_pair(&parts)
    }

    /// Analyze, append to `history` and forward the new records to `sink`.
    ///
    /// The history is only touched once the analysis and the sink have both
    /// succeeded, so a failed call can be retried.
    pub fn analyze_epoch(
        &self,
        epoch: usize,
        snapshot: &EpochSnapshot,
        history: &mut ErrorHistory,
        sink: &mut dyn ReportSink,
    ) -> FrequencyResult<ErrorPair> {
        let pair = self.analyze(snapshot)?;
        let records = history.prepare(epoch, pair)?;
        sink.record_errors(&records)?;
        history.record(epoch, pair)?;

        tracing::debug!(
            epoch,
            samples = snapshot.len(),
            e_low = pair.e_low,
            e_high = pair.e_high,
            "frequency errors recorded"
        );
        Ok(pair)
    }

    /// Spectrum snapshot of a 1-D prediction on the `plot_interval` cadence.
    ///
    /// Returns `None` on epochs that are not snapshot epochs.
    pub fn track_spectrum(
        tracker: &SpectralTracker,
        epoch: usize,
        prediction: &[f64],
        plot_interval: usize,
        sink: &mut dyn ReportSink,
    ) -> FrequencyResult<Option<SpectrumPair>> {
        if !SpectralTracker::should_snapshot(epoch, plot_interval) {
            return Ok(None);
        }

        let pair = tracker.snapshot(epoch, prediction)?;
        let frame = SpectralTracker::frame_index(epoch, plot_interval);
        sink.record_spectrum(frame, &pair)?;

        tracing::debug!(epoch, frame, bins = pair.predicted.len(), "spectrum snapshot");
        Ok(Some(pair))
    }
}
