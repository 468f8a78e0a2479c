//! # Frequency Principle Core
//!
//! Diagnostics that show how a network fits the low and high frequency
//! content of its target during training. Labels and predictions are split
//! with a Gaussian kernel smoother over the inputs; the relative error of
//! each part is tracked per epoch. For 1-D regression the amplitude spectra
//! of target and prediction can be compared directly.
//!
//! ## Quick Start
//!
//! ```rust
//! use fprinciple_core::{EpochSnapshot, ErrorHistory, FrequencyAnalyzer, MemorySink};
//! use ndarray::Array2;
//!
//! let x = Array2::from_shape_fn((16, 1), |(i, _)| i as f64 / 16.0);
//! let y = x.mapv(|v| (6.0 * v).sin());
//! let h = y.mapv(|v| 0.5 * v);
//!
//! let analyzer = FrequencyAnalyzer::new(0.01).unwrap();
//! let mut history = ErrorHistory::new();
//! let mut sink = MemorySink::default();
//!
//! let snapshot = EpochSnapshot::new(x, y, h).unwrap();
//! let pair = analyzer
//!     .analyze_epoch(0, &snapshot, &mut history, &mut sink)
//!     .unwrap();
//! println!("e_low = {:.3}, e_high = {:.3}", pair.e_low, pair.e_high);
//! ```
//!
//! ## Core Modules
//!
//! - [`config`] - Analysis configuration via TOML
//! - [`kernel`] - Gaussian kernel matrix and row normalizer
//! - [`decompose`] - Low/high frequency projections
//! - [`relative`] - Relative error pair
//! - [`spectral`] - One-sided amplitude spectra and snapshot tracking
//! - [`data`] - 1-D target generation and epoch snapshots
//! - [`history`] - Append-only error history
//! - [`logging`] - Report sinks (JSON lines, in-memory)
//! - [`analyzer`] - Per-epoch entry point

pub mod analyzer;
pub mod config;
pub mod data;
pub mod decompose;
pub mod error;
pub mod history;
pub mod kernel;
pub mod logging;
#[cfg(feature = "plot")]
pub mod plot;
pub mod relative;
pub mod spectral;

pub use analyzer::FrequencyAnalyzer;
pub use config::{AnalysisConfig, ConfigError, LowDimConfig};
pub use data::{low_dim_data, one_hot, EpochSnapshot, LowDimData, SnapshotBuffer};
pub use decompose::{decompose, high_frequency, low_frequency, FrequencyDecomposition};
pub use error::{FrequencyError, FrequencyResult};
pub use history::{ErrorHistory, ErrorKind, ErrorRecord, ErrorTable};
pub use kernel::KernelMatrix;
pub use logging::{JsonlSink, MemorySink, NullSink, ReportSink};
#[cfg(feature = "plot")]
pub use plot::SpectrumPlotSink;
pub use relative::{error_pair, relative_error, ErrorPair};
pub use spectral::{amplitude_spectrum, AmplitudeSpectrum, SpectralTracker, SpectrumPair};
